use chrono::{DateTime, Utc};
use rusqlite::types::Value;
use serde::{Deserialize, Serialize};

use super::table::{Column, ColumnType, TableRow};
use super::time::format_timestamp;

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct RepositoryRecord {
    pub repo_id: i64,
    pub organisation: String,
    pub repository: String,
}

/// A commit whose author resolved to a remote account. Commits without one
/// never become a `CommitRecord`, so `author_id` is not optional here.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CommitRecord {
    pub id: String,
    pub timestamp: DateTime<Utc>,
    pub name: String,
    pub author_id: i64,
    pub repo_id: i64,
    pub message: String,
    pub url: String,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct AuthorRecord {
    pub author_id: i64,
    pub name: String,
}

impl From<&CommitRecord> for AuthorRecord {
    fn from(commit: &CommitRecord) -> Self {
        Self {
            author_id: commit.author_id,
            name: commit.name.clone(),
        }
    }
}

/// One cell of the grouped commit count: ISO weekday (1 = Monday) and
/// three-hour interval of the day (0 = midnight to 3am).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct CommitCount {
    pub day_of_week: i64,
    pub interval_of_day: i64,
    pub commit_counts: i64,
}

impl TableRow for RepositoryRecord {
    fn columns() -> Vec<Column> {
        vec![
            Column::new("repo_id", ColumnType::Integer),
            Column::new("organisation", ColumnType::Text),
            Column::new("repository", ColumnType::Text),
        ]
    }

    fn to_row(&self) -> Vec<Value> {
        vec![
            Value::Integer(self.repo_id),
            Value::Text(self.organisation.clone()),
            Value::Text(self.repository.clone()),
        ]
    }
}

impl TableRow for CommitRecord {
    fn columns() -> Vec<Column> {
        vec![
            Column::new("id", ColumnType::Text),
            Column::new("timestamp", ColumnType::Timestamp),
            Column::new("name", ColumnType::Text),
            Column::new("author_id", ColumnType::Integer),
            Column::new("repo_id", ColumnType::Integer),
            Column::new("message", ColumnType::Text),
            Column::new("url", ColumnType::Text),
        ]
    }

    fn to_row(&self) -> Vec<Value> {
        vec![
            Value::Text(self.id.clone()),
            Value::Text(format_timestamp(&self.timestamp)),
            Value::Text(self.name.clone()),
            Value::Integer(self.author_id),
            Value::Integer(self.repo_id),
            Value::Text(self.message.clone()),
            Value::Text(self.url.clone()),
        ]
    }
}

impl TableRow for AuthorRecord {
    fn columns() -> Vec<Column> {
        vec![
            Column::new("author_id", ColumnType::Integer),
            Column::new("name", ColumnType::Text),
        ]
    }

    fn to_row(&self) -> Vec<Value> {
        vec![
            Value::Integer(self.author_id),
            Value::Text(self.name.clone()),
        ]
    }
}
