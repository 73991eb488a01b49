mod client;
pub mod dto;
mod paginate;

pub use client::GithubClient;
pub use paginate::fetch_paginated;

use serde::de::DeserializeOwned;

use crate::error::{Error, Result};

/// Sent on every request so the API answers in the v3 JSON shape.
pub const ACCEPT_V3: &str = "application/vnd.github.v3+json";

/// A status code and the undecoded body of one GET.
#[derive(Debug, Clone)]
pub struct RemoteResponse {
    pub status: u16,
    pub body: String,
}

impl RemoteResponse {
    #[must_use]
    pub fn is_success(&self) -> bool {
        (200..300).contains(&self.status)
    }

    pub fn json<T: DeserializeOwned>(&self) -> Result<T> {
        serde_json::from_str(&self.body).map_err(|e| Error::Decode(e.to_string()))
    }
}

/// Transport seam for the remote API. One blocking request at a time.
pub trait PageSource {
    fn get(&self, url: &str, query: &[(&str, String)]) -> Result<RemoteResponse>;
}

impl<S: PageSource + ?Sized> PageSource for &S {
    fn get(&self, url: &str, query: &[(&str, String)]) -> Result<RemoteResponse> {
        (**self).get(url, query)
    }
}

pub fn repo_url(base_url: &str, organisation: &str, repository: &str) -> String {
    format!(
        "{}/repos/{}/{}",
        base_url.trim_end_matches('/'),
        urlencoding::encode(organisation),
        urlencoding::encode(repository)
    )
}

pub fn commits_url(base_url: &str, organisation: &str, repository: &str) -> String {
    format!("{}/commits", repo_url(base_url, organisation, repository))
}
