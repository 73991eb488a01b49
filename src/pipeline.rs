use std::fmt;
use std::fs;

use tracing::info;

use crate::config::{PipelineConfig, WarehouseConfig};
use crate::error::Result;
use crate::extract::{Extractor, build_table_set, normalize_commits};
use crate::heatmap::Heatmap;
use crate::remote::PageSource;
use crate::types::RepositoryRecord;
use crate::warehouse::{AUTHORS_TABLE, COMMITS_TABLE, SqliteWarehouse, Warehouse};

/// Phases of one extraction run, in order.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RunState {
    FetchRepo,
    FetchCommits,
    Normalize,
    Stage,
    Merge,
    Done,
}

impl fmt::Display for RunState {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let s = match self {
            RunState::FetchRepo => "FETCH_REPO",
            RunState::FetchCommits => "FETCH_COMMITS",
            RunState::Normalize => "NORMALIZE",
            RunState::Stage => "STAGE",
            RunState::Merge => "MERGE",
            RunState::Done => "DONE",
        };
        f.write_str(s)
    }
}

fn enter(state: RunState) {
    info!(state = %state, "pipeline state");
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum RunOutcome {
    /// Nothing was committed since the start date; the warehouse was not touched.
    NoCommits { repository: RepositoryRecord },
    Loaded {
        repository: RepositoryRecord,
        commits: usize,
        authors: usize,
    },
}

/// Creates the data directory if needed, then opens and initializes the warehouse.
pub fn open_warehouse(config: &WarehouseConfig) -> Result<SqliteWarehouse> {
    fs::create_dir_all(&config.data_dir)?;
    let warehouse = SqliteWarehouse::new(config.db_path(), config.staging_path())?;
    warehouse.initialize()?;
    Ok(warehouse)
}

/// Extracts the configured repository's commits and loads them into the
/// warehouse. Any remote or warehouse failure aborts the run as-is.
pub fn run_etl<S, W>(config: &PipelineConfig, source: S, warehouse: &W) -> Result<RunOutcome>
where
    S: PageSource,
    W: Warehouse,
{
    config.validate()?;
    let extractor = Extractor::new(source, &config.api);

    enter(RunState::FetchRepo);
    let repository = extractor.get_repository_info(&config.organisation, &config.repository)?;

    enter(RunState::FetchCommits);
    let Some(raw) =
        extractor.fetch_commits(&config.organisation, &config.repository, &config.since)?
    else {
        enter(RunState::Done);
        return Ok(RunOutcome::NoCommits { repository });
    };

    enter(RunState::Normalize);
    let commits = normalize_commits(raw, repository.repo_id)?;
    let tables = build_table_set(&repository, &commits)?;

    enter(RunState::Stage);
    let staged = warehouse.stage(&tables)?;

    enter(RunState::Merge);
    warehouse.merge(staged)?;

    enter(RunState::Done);
    Ok(RunOutcome::Loaded {
        repository,
        commits: tables.get(COMMITS_TABLE).map_or(0, |t| t.len()),
        authors: tables.get(AUTHORS_TABLE).map_or(0, |t| t.len()),
    })
}

/// Builds the day by time-of-day heatmap for one repository from the main tables.
pub fn make_heatmap<W: Warehouse>(
    warehouse: &W,
    organisation: &str,
    repository: &str,
) -> Result<Heatmap> {
    let counts = warehouse.commit_counts(organisation, repository)?;
    Heatmap::from_counts(&counts)
}
