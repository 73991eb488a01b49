use serde_json::Value;

use crate::error::{Error, Result};
use crate::remote::dto::RawCommit;
use crate::types::{CommitRecord, parse_timestamp};

/// A decoded commit before filtering. Any field may still be missing.
#[derive(Debug, Clone, PartialEq)]
pub struct CommitRow {
    pub id: Option<String>,
    pub date: Option<String>,
    pub name: Option<String>,
    pub author_id: Option<i64>,
    pub repo_id: i64,
    pub message: Option<String>,
    pub url: Option<String>,
}

impl CommitRow {
    fn from_raw(raw: RawCommit, repo_id: i64) -> Self {
        let (name, date) = raw
            .commit
            .author
            .map_or((None, None), |sig| (sig.name, sig.date));
        Self {
            id: raw.sha,
            date,
            name,
            author_id: raw.author.and_then(|a| a.id),
            repo_id,
            message: raw.commit.message,
            url: raw.html_url,
        }
    }

    /// Converts a row whose fields are all present. `None` means incomplete.
    fn into_record(self) -> Option<Result<CommitRecord>> {
        let author_id = self.author_id?;
        let (id, date, name) = (self.id?, self.date?, self.name?);
        let (message, url) = (self.message?, self.url?);
        Some(parse_timestamp(&date).map(|timestamp| CommitRecord {
            id,
            timestamp,
            name,
            author_id,
            repo_id: self.repo_id,
            message,
            url,
        }))
    }
}

/// Decodes raw commit objects. Only a structurally invalid record (not an
/// object, or a field of the wrong type) fails the batch; nulls decode to `None`.
pub fn decode_commits(raw_records: Vec<Value>, repo_id: i64) -> Result<Vec<CommitRow>> {
    raw_records
        .into_iter()
        .enumerate()
        .map(|(idx, value)| {
            serde_json::from_value::<RawCommit>(value)
                .map(|raw| CommitRow::from_raw(raw, repo_id))
                .map_err(|e| Error::Decode(format!("commit record {idx}: {e}")))
        })
        .collect()
}

/// Drops every commit whose author is not linked to a remote account, either
/// because `author` is null or because it carries no id.
pub fn resolve_author(rows: Vec<CommitRow>) -> Vec<CommitRow> {
    rows.into_iter().filter(|row| row.author_id.is_some()).collect()
}

/// Drops rows with any missing field and parses the commit timestamp of the rest.
pub fn drop_incomplete(rows: Vec<CommitRow>) -> Result<Vec<CommitRecord>> {
    rows.into_iter().filter_map(CommitRow::into_record).collect()
}

pub fn normalize_commits(raw_records: Vec<Value>, repo_id: i64) -> Result<Vec<CommitRecord>> {
    let rows = decode_commits(raw_records, repo_id)?;
    drop_incomplete(resolve_author(rows))
}
