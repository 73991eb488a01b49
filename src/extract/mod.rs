mod normalize;

pub use normalize::{
    CommitRow, decode_commits, drop_incomplete, normalize_commits, resolve_author,
};

use serde_json::Value;
use tracing::{error, info};

use crate::config::ApiConfig;
use crate::error::{Error, Result};
use crate::remote::dto::RepoInfo;
use crate::remote::{PageSource, commits_url, fetch_paginated, repo_url};
use crate::types::{AuthorRecord, CommitRecord, RepositoryRecord, Table, TableRow, TableSet};
use crate::warehouse::{AUTHORS_TABLE, COMMITS_TABLE, REPOSITORIES_TABLE};

pub struct Extractor<S> {
    source: S,
    base_url: String,
    page_size: u32,
}

impl<S: PageSource> Extractor<S> {
    pub fn new(source: S, api: &ApiConfig) -> Self {
        Self {
            source,
            base_url: api.base_url.clone(),
            page_size: api.page_size,
        }
    }

    /// Looks up the remote id of a repository. Any non-success answer is fatal.
    pub fn get_repository_info(
        &self,
        organisation: &str,
        repository: &str,
    ) -> Result<RepositoryRecord> {
        let url = repo_url(&self.base_url, organisation, repository);
        let resp = self.source.get(&url, &[])?;

        if !resp.is_success() {
            error!(
                "No results returned for {organisation}/{repository}. Error msg: {}",
                resp.body
            );
            return Err(Error::RemoteLookup {
                organisation: organisation.to_string(),
                repository: repository.to_string(),
                status: resp.status,
                message: resp.body,
            });
        }

        let info: RepoInfo = resp.json()?;
        Ok(RepositoryRecord {
            repo_id: info.id,
            organisation: organisation.to_string(),
            repository: repository.to_string(),
        })
    }

    /// Fetches every raw commit since `since`. Returns `None` when the
    /// endpoint yielded no records at all.
    pub fn fetch_commits(
        &self,
        organisation: &str,
        repository: &str,
        since: &str,
    ) -> Result<Option<Vec<Value>>> {
        let url = commits_url(&self.base_url, organisation, repository);
        let raw = fetch_paginated(&self.source, &url, since, self.page_size)?;
        if raw.is_empty() {
            info!("No commits found. Terminating program.");
            return Ok(None);
        }
        Ok(Some(raw))
    }

    /// Fetches and normalizes every commit since `since`.
    pub fn get_commits_info(
        &self,
        organisation: &str,
        repository: &str,
        repo_id: i64,
        since: &str,
    ) -> Result<Option<Vec<CommitRecord>>> {
        match self.fetch_commits(organisation, repository, since)? {
            Some(raw) => normalize_commits(raw, repo_id).map(Some),
            None => Ok(None),
        }
    }
}

/// Builds the three staging tables. The author table is projected from the
/// commit table before its `name` column is dropped; duplicates are kept.
pub fn build_table_set(repo: &RepositoryRecord, commits: &[CommitRecord]) -> Result<TableSet> {
    let mut commit_table = Table::from_records(commits);
    let author_table = commit_table.select(&AuthorRecord::column_names())?;
    commit_table.drop_column("name")?;

    let mut tables = TableSet::new();
    tables.insert(REPOSITORIES_TABLE, Table::from_records(std::slice::from_ref(repo)));
    tables.insert(COMMITS_TABLE, commit_table);
    tables.insert(AUTHORS_TABLE, author_table);
    Ok(tables)
}

#[cfg(test)]
mod tests {
    use std::cell::Cell;

    use rusqlite::types::Value as SqlValue;

    use super::*;
    use crate::remote::RemoteResponse;

    struct RepoOnly {
        status: u16,
        body: &'static str,
        calls: Cell<u32>,
    }

    impl PageSource for RepoOnly {
        fn get(&self, _url: &str, _query: &[(&str, String)]) -> Result<RemoteResponse> {
            self.calls.set(self.calls.get() + 1);
            Ok(RemoteResponse {
                status: self.status,
                body: self.body.to_string(),
            })
        }
    }

    #[test]
    fn test_repository_lookup() {
        let source = RepoOnly {
            status: 200,
            body: r#"{"id": 42, "name": "hadoop"}"#,
            calls: Cell::new(0),
        };
        let extractor = Extractor::new(&source, &ApiConfig::default());
        let repo = extractor.get_repository_info("apache", "hadoop").unwrap();

        assert_eq!(
            repo,
            RepositoryRecord {
                repo_id: 42,
                organisation: "apache".to_string(),
                repository: "hadoop".to_string(),
            }
        );
    }

    #[test]
    fn test_repository_lookup_failure() {
        let source = RepoOnly {
            status: 404,
            body: r#"{"message":"Not Found"}"#,
            calls: Cell::new(0),
        };
        let extractor = Extractor::new(&source, &ApiConfig::default());
        let err = extractor.get_repository_info("apache", "nope").unwrap_err();

        match err {
            Error::RemoteLookup {
                organisation,
                repository,
                status,
                message,
            } => {
                assert_eq!(organisation, "apache");
                assert_eq!(repository, "nope");
                assert_eq!(status, 404);
                assert!(message.contains("Not Found"));
            }
            other => panic!("expected RemoteLookup, got {other:?}"),
        }
    }

    #[test]
    fn test_empty_commits_is_none() {
        let source = RepoOnly {
            status: 200,
            body: "[]",
            calls: Cell::new(0),
        };
        let extractor = Extractor::new(&source, &ApiConfig::default());
        let commits = extractor
            .get_commits_info("apache", "hadoop", 42, "2021-01-01T00:00:00Z")
            .unwrap();

        assert!(commits.is_none());
        assert_eq!(source.calls.get(), 1);
    }

    fn commit(id: &str, author_id: i64, name: &str) -> CommitRecord {
        CommitRecord {
            id: id.to_string(),
            timestamp: crate::types::parse_timestamp("2021-05-05T10:00:00Z").unwrap(),
            name: name.to_string(),
            author_id,
            repo_id: 42,
            message: "msg".to_string(),
            url: format!("https://example.com/{id}"),
        }
    }

    #[test]
    fn test_build_table_set_shapes() {
        let repo = RepositoryRecord {
            repo_id: 42,
            organisation: "apache".to_string(),
            repository: "hadoop".to_string(),
        };
        let commits = vec![commit("a", 1, "ada"), commit("b", 1, "ada"), commit("c", 2, "bob")];
        let tables = build_table_set(&repo, &commits).unwrap();

        let names: Vec<&str> = tables.iter().map(|t| t.name.as_str()).collect();
        assert_eq!(names, vec!["repositories_dim", "commit_df", "author_df"]);

        let commit_table = tables.get("commit_df").unwrap();
        assert_eq!(commit_table.len(), 3);
        assert!(commit_table.column_index("name").is_none());
        assert!(commit_table.column_index("author_id").is_some());

        let authors: Vec<AuthorRecord> = commits.iter().map(AuthorRecord::from).collect();
        assert_eq!(tables.get("author_df").unwrap(), &Table::from_records(&authors));
        assert_eq!(
            tables.get("author_df").unwrap().rows()[0],
            vec![SqlValue::Integer(1), SqlValue::Text("ada".to_string())]
        );

        let repo_table = tables.get("repositories_dim").unwrap();
        assert_eq!(repo_table.rows()[0][0], SqlValue::Integer(42));
    }
}
