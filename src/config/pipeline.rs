use std::fs;
use std::path::{Path, PathBuf};

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::error::{Error, Result};
use crate::types::parse_timestamp;

pub const DEFAULT_ORGANISATION: &str = "apache";
pub const DEFAULT_REPOSITORY: &str = "hadoop";
pub const DEFAULT_SINCE: &str = "2021-01-01T00:00:00Z";

/// The commits endpoint refuses anything larger than this per page.
const MAX_PAGE_SIZE: u32 = 100;

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct ApiConfig {
    pub base_url: String,
    /// Optional bearer token. Anonymous requests work but hit the rate limit quickly.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub token: Option<String>,
    pub page_size: u32,
    pub timeout_secs: u64,
    pub user_agent: String,
}

impl Default for ApiConfig {
    fn default() -> Self {
        Self {
            base_url: "https://api.github.com".to_string(),
            token: None,
            page_size: MAX_PAGE_SIZE,
            timeout_secs: 30,
            user_agent: "commit-etl".to_string(),
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct WarehouseConfig {
    pub data_dir: PathBuf,
}

impl WarehouseConfig {
    #[must_use]
    pub fn db_path(&self) -> PathBuf {
        self.data_dir.join("warehouse.db")
    }

    #[must_use]
    pub fn staging_path(&self) -> PathBuf {
        self.data_dir.join("staging.db")
    }
}

impl Default for WarehouseConfig {
    fn default() -> Self {
        Self {
            data_dir: PathBuf::from("./data"),
        }
    }
}

/// Everything a single pipeline run needs. Built once by the caller and
/// passed down; nothing below the entry points reads global state.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct PipelineConfig {
    pub api: ApiConfig,
    pub warehouse: WarehouseConfig,
    pub organisation: String,
    pub repository: String,
    /// ISO-8601 lower bound for commit timestamps, passed verbatim as `since`.
    pub since: String,
}

impl Default for PipelineConfig {
    fn default() -> Self {
        Self {
            api: ApiConfig::default(),
            warehouse: WarehouseConfig::default(),
            organisation: DEFAULT_ORGANISATION.to_string(),
            repository: DEFAULT_REPOSITORY.to_string(),
            since: DEFAULT_SINCE.to_string(),
        }
    }
}

impl PipelineConfig {
    /// Reads a TOML config file. Missing keys fall back to defaults.
    pub fn from_file<P: AsRef<Path>>(path: P) -> Result<Self> {
        let content = fs::read_to_string(path.as_ref())?;
        Ok(toml::from_str(&content)?)
    }

    /// Loads from `path` if given, otherwise returns the defaults.
    pub fn load(path: Option<&Path>) -> Result<Self> {
        match path {
            Some(p) => Self::from_file(p),
            None => Ok(Self::default()),
        }
    }

    pub fn validate(&self) -> Result<()> {
        if self.organisation.trim().is_empty() {
            return Err(Error::Config("organisation cannot be empty".to_string()));
        }
        if self.repository.trim().is_empty() {
            return Err(Error::Config("repository cannot be empty".to_string()));
        }
        if self.api.page_size == 0 || self.api.page_size > MAX_PAGE_SIZE {
            return Err(Error::Config(format!(
                "page_size must be between 1 and {MAX_PAGE_SIZE}"
            )));
        }
        self.since_timestamp()?;
        Ok(())
    }

    pub fn since_timestamp(&self) -> Result<DateTime<Utc>> {
        parse_timestamp(&self.since)
    }
}
