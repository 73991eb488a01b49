use serde::Deserialize;

/// `GET /repos/{org}/{repo}`; only the id is kept.
#[derive(Debug, Deserialize)]
pub struct RepoInfo {
    pub id: i64,
}

/// One element of `GET /repos/{org}/{repo}/commits`. Leaf fields may be null
/// or absent; rows missing any of them are dropped during normalization.
#[derive(Debug, Deserialize)]
pub struct RawCommit {
    #[serde(default)]
    pub sha: Option<String>,
    pub commit: RawCommitDetail,
    /// Null when the commit email is not linked to an account.
    #[serde(default)]
    pub author: Option<RawAccount>,
    #[serde(default)]
    pub html_url: Option<String>,
}

#[derive(Debug, Deserialize)]
pub struct RawCommitDetail {
    #[serde(default)]
    pub author: Option<RawSignature>,
    #[serde(default)]
    pub message: Option<String>,
}

#[derive(Debug, Deserialize)]
pub struct RawSignature {
    #[serde(default)]
    pub name: Option<String>,
    #[serde(default)]
    pub date: Option<String>,
}

#[derive(Debug, Deserialize)]
pub struct RawAccount {
    #[serde(default)]
    pub id: Option<i64>,
}
