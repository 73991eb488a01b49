mod schema;
mod sqlite;
mod validation;

pub use sqlite::SqliteWarehouse;
pub use validation::validate_identifier;

use tracing::info;

use crate::error::Result;
use crate::types::{CommitCount, Table, TableSet};

pub const STAGING_SCHEMA: &str = "staging";

pub const REPOSITORIES_TABLE: &str = "repositories_dim";
pub const COMMITS_TABLE: &str = "commit_df";
pub const AUTHORS_TABLE: &str = "author_df";

/// Proof that a set of tables reached staging. Only [`Warehouse::stage`]
/// produces one, and [`Warehouse::merge`] consumes it.
#[derive(Debug)]
#[must_use = "staged tables only reach the main tables once merged"]
pub struct Staged {
    tables: Vec<String>,
}

impl Staged {
    #[must_use]
    pub fn tables(&self) -> &[String] {
        &self.tables
    }
}

/// Warehouse defines the load and query interface.
///
/// Loading is two-phase: `stage` replaces staging tables and may be repeated
/// freely; `merge` reconciles staging into the main tables in one transaction
/// and should not be re-run without staging again.
pub trait Warehouse {
    fn initialize(&self) -> Result<()>;

    /// Replaces the staging table `name` with the contents of `table`.
    fn stage_table(&self, name: &str, table: &Table) -> Result<()>;

    /// Runs the merge procedure over everything currently in staging.
    fn upsert_all(&self) -> Result<()>;

    fn commit_counts(&self, organisation: &str, repository: &str) -> Result<Vec<CommitCount>>;

    fn stage(&self, tables: &TableSet) -> Result<Staged> {
        let mut staged = Vec::with_capacity(tables.len());
        for named in tables.iter() {
            info!("Inserting into {STAGING_SCHEMA}.{}", named.name);
            self.stage_table(&named.name, &named.table)?;
            staged.push(named.name.clone());
        }
        Ok(Staged { tables: staged })
    }

    fn merge(&self, staged: Staged) -> Result<()> {
        info!(tables = ?staged.tables(), "Executing upsert procedure");
        self.upsert_all()
    }

    fn load(&self, tables: &TableSet) -> Result<()> {
        let staged = self.stage(tables)?;
        self.merge(staged)
    }
}
