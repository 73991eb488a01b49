use thiserror::Error;

#[derive(Debug, Error)]
pub enum Error {
    #[error("database error: {0}")]
    Database(#[from] rusqlite::Error),

    #[error("http error: {0}")]
    Http(#[from] reqwest::Error),

    #[error("no results returned for {organisation}/{repository} ({status}): {message}")]
    RemoteLookup {
        organisation: String,
        repository: String,
        status: u16,
        message: String,
    },

    #[error("page {page} request failed ({status}): {message}")]
    PageRequest {
        page: u32,
        status: u16,
        message: String,
    },

    #[error("failed to decode remote response: {0}")]
    Decode(String),

    #[error("invalid timestamp: {0}")]
    Timestamp(String),

    #[error("invalid identifier: {0}")]
    InvalidIdentifier(String),

    #[error("table shape mismatch: {0}")]
    TableShape(String),

    #[error("invalid heatmap bucket: {0}")]
    InvalidBucket(String),

    #[error("io error: {0}")]
    Io(#[from] std::io::Error),

    #[error("invalid configuration: {0}")]
    Config(String),

    #[error("invalid config file: {0}")]
    Toml(#[from] toml::de::Error),
}

pub type Result<T> = std::result::Result<T, Error>;
