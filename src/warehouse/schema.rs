pub const SCHEMA: &str = r#"
-- Repositories, keyed by the remote-assigned id
CREATE TABLE IF NOT EXISTS main.repositories_dim (
    repo_id INTEGER PRIMARY KEY,
    organisation TEXT NOT NULL,
    repository TEXT NOT NULL
);

-- Commit authors linked to a remote account
CREATE TABLE IF NOT EXISTS main.authors_dim (
    author_id INTEGER PRIMARY KEY,
    name TEXT NOT NULL
);

-- One row per commit
CREATE TABLE IF NOT EXISTS main.commits_fact (
    id TEXT PRIMARY KEY,           -- commit sha
    timestamp TEXT NOT NULL,       -- RFC 3339, UTC
    author_id INTEGER NOT NULL REFERENCES authors_dim(author_id),
    repo_id INTEGER NOT NULL REFERENCES repositories_dim(repo_id),
    message TEXT NOT NULL,
    url TEXT NOT NULL
);

CREATE INDEX IF NOT EXISTS main.idx_commits_repo ON commits_fact(repo_id);
CREATE INDEX IF NOT EXISTS main.idx_commits_author ON commits_fact(author_id);
CREATE UNIQUE INDEX IF NOT EXISTS main.idx_repositories_name ON repositories_dim(organisation, repository);
"#;

/// Empty staging tables so a merge never fails on a missing table. Writes
/// replace these wholesale; no keys, no indexes.
pub const STAGING_DDL: &str = r#"
CREATE TABLE IF NOT EXISTS staging.repositories_dim (repo_id INTEGER, organisation TEXT, repository TEXT);
CREATE TABLE IF NOT EXISTS staging.commit_df (id TEXT, timestamp TEXT, author_id INTEGER, repo_id INTEGER, message TEXT, url TEXT);
CREATE TABLE IF NOT EXISTS staging.author_df (author_id INTEGER, name TEXT);
"#;

/// The merge procedure (`staging.upsert_all`). Staged values overwrite every
/// non-key column. Duplicate keys within a staging table resolve in rowid
/// order, so the last staged row wins.
pub const UPSERT_ALL: &str = r#"
INSERT INTO main.repositories_dim (repo_id, organisation, repository)
SELECT repo_id, organisation, repository FROM staging.repositories_dim WHERE true ORDER BY rowid
ON CONFLICT(repo_id) DO UPDATE SET
    organisation = excluded.organisation,
    repository = excluded.repository;

INSERT INTO main.authors_dim (author_id, name)
SELECT author_id, name FROM staging.author_df WHERE true ORDER BY rowid
ON CONFLICT(author_id) DO UPDATE SET
    name = excluded.name;

INSERT INTO main.commits_fact (id, timestamp, author_id, repo_id, message, url)
SELECT id, timestamp, author_id, repo_id, message, url FROM staging.commit_df WHERE true ORDER BY rowid
ON CONFLICT(id) DO UPDATE SET
    timestamp = excluded.timestamp,
    author_id = excluded.author_id,
    repo_id = excluded.repo_id,
    message = excluded.message,
    url = excluded.url;
"#;

/// Commits per (ISO weekday, three-hour interval) for one repository.
pub const COMMIT_COUNTS: &str = r#"
SELECT ((CAST(strftime('%w', cf.timestamp) AS INTEGER) + 6) % 7) + 1 AS day_of_week,
       CAST(strftime('%H', cf.timestamp) AS INTEGER) / 3 AS interval_of_day,
       COUNT(cf.id) AS commit_counts
FROM commits_fact cf
INNER JOIN repositories_dim rd ON cf.repo_id = rd.repo_id
WHERE rd.repository = ?1 AND rd.organisation = ?2
GROUP BY day_of_week, interval_of_day
ORDER BY day_of_week, interval_of_day
"#;
