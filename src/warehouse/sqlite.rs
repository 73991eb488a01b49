use std::path::Path;
use std::sync::Mutex;

use rusqlite::types::Value;
use rusqlite::{Connection, params, params_from_iter};

use super::schema::{COMMIT_COUNTS, SCHEMA, STAGING_DDL, UPSERT_ALL};
use super::validation::validate_identifier;
use super::{STAGING_SCHEMA as STAGING, Warehouse};
use crate::error::{Error, Result};
use crate::types::{CommitCount, Table};

pub struct SqliteWarehouse {
    conn: Mutex<Connection>,
}

impl SqliteWarehouse {
    /// Opens the main database and attaches the staging database under the
    /// `staging` schema name.
    pub fn new<P: AsRef<Path>, Q: AsRef<Path>>(db_path: P, staging_path: Q) -> Result<Self> {
        let conn = Connection::open(db_path)?;

        conn.pragma_update(None, "foreign_keys", "ON")?;
        conn.pragma_update(None, "journal_mode", "WAL")?;
        conn.execute(
            &format!("ATTACH DATABASE ?1 AS {STAGING}"),
            params![staging_path.as_ref().to_string_lossy().into_owned()],
        )?;

        Ok(Self {
            conn: Mutex::new(conn),
        })
    }

    fn conn(&self) -> std::sync::MutexGuard<'_, Connection> {
        self.conn.lock().unwrap_or_else(|e| e.into_inner())
    }

    /// Returns a guard to the underlying database connection.
    /// This allows consuming applications to execute custom SQL.
    pub fn connection(&self) -> std::sync::MutexGuard<'_, Connection> {
        self.conn()
    }

    /// Reads a staging table back in insertion order.
    pub fn staging_rows(&self, name: &str) -> Result<Vec<Vec<Value>>> {
        validate_identifier(name)?;
        let conn = self.conn();
        let mut stmt = conn.prepare(&format!("SELECT * FROM {STAGING}.\"{name}\" ORDER BY rowid"))?;
        let width = stmt.column_count();

        let rows = stmt.query_map([], |row| {
            (0..width)
                .map(|i| row.get::<_, Value>(i))
                .collect::<rusqlite::Result<Vec<Value>>>()
        })?;

        rows.collect::<std::result::Result<Vec<_>, _>>()
            .map_err(Error::from)
    }
}

fn create_table_sql(name: &str, table: &Table) -> Result<String> {
    validate_identifier(name)?;
    if table.columns().is_empty() {
        return Err(Error::InvalidIdentifier(format!("table '{name}' has no columns")));
    }

    let mut columns = Vec::with_capacity(table.columns().len());
    for column in table.columns() {
        validate_identifier(&column.name)?;
        columns.push(format!("\"{}\" {}", column.name, column.kind.sql_type()));
    }
    Ok(format!("CREATE TABLE {STAGING}.\"{name}\" ({})", columns.join(", ")))
}

fn insert_sql(name: &str, table: &Table) -> String {
    let names: Vec<String> = table
        .columns()
        .iter()
        .map(|c| format!("\"{}\"", c.name))
        .collect();
    let placeholders: Vec<String> = (1..=names.len()).map(|i| format!("?{i}")).collect();
    format!(
        "INSERT INTO {STAGING}.\"{name}\" ({}) VALUES ({})",
        names.join(", "),
        placeholders.join(", ")
    )
}

impl Warehouse for SqliteWarehouse {
    fn initialize(&self) -> Result<()> {
        let conn = self.conn();
        conn.execute_batch(SCHEMA)?;
        conn.execute_batch(STAGING_DDL)?;
        Ok(())
    }

    fn stage_table(&self, name: &str, table: &Table) -> Result<()> {
        let create = create_table_sql(name, table)?;
        let insert = insert_sql(name, table);

        let mut conn = self.conn();
        let tx = conn.transaction()?;
        tx.execute(&format!("DROP TABLE IF EXISTS {STAGING}.\"{name}\""), [])?;
        tx.execute(&create, [])?;
        {
            let mut stmt = tx.prepare(&insert)?;
            for row in table.rows() {
                stmt.execute(params_from_iter(row.iter()))?;
            }
        }
        tx.commit()?;
        Ok(())
    }

    fn upsert_all(&self) -> Result<()> {
        let mut conn = self.conn();
        let tx = conn.transaction()?;
        tx.execute_batch(UPSERT_ALL)?;
        tx.commit()?;
        Ok(())
    }

    fn commit_counts(&self, organisation: &str, repository: &str) -> Result<Vec<CommitCount>> {
        let conn = self.conn();
        let mut stmt = conn.prepare(COMMIT_COUNTS)?;

        let rows = stmt.query_map(params![repository, organisation], |row| {
            Ok(CommitCount {
                day_of_week: row.get(0)?,
                interval_of_day: row.get(1)?,
                commit_counts: row.get(2)?,
            })
        })?;

        rows.collect::<std::result::Result<Vec<_>, _>>()
            .map_err(Error::from)
    }
}
