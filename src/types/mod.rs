mod models;
mod table;
mod time;

pub use models::*;
pub use table::{Column, ColumnType, NamedTable, Table, TableRow, TableSet};
pub use time::{format_timestamp, parse_timestamp};
