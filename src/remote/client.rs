use std::time::Duration;

use reqwest::blocking::Client;
use reqwest::header::{ACCEPT, HeaderMap, HeaderValue};

use super::{ACCEPT_V3, PageSource, RemoteResponse};
use crate::config::ApiConfig;
use crate::error::Result;

/// Blocking client for the hosting API.
#[derive(Clone)]
pub struct GithubClient {
    client: Client,
    base_url: String,
    token: Option<String>,
}

impl GithubClient {
    pub fn new(config: &ApiConfig) -> Result<Self> {
        let mut headers = HeaderMap::new();
        headers.insert(ACCEPT, HeaderValue::from_static(ACCEPT_V3));

        let client = Client::builder()
            .timeout(Duration::from_secs(config.timeout_secs))
            .user_agent(config.user_agent.clone())
            .default_headers(headers)
            .build()?;

        Ok(Self {
            client,
            base_url: config.base_url.trim_end_matches('/').to_string(),
            token: config.token.clone().filter(|t| !t.is_empty()),
        })
    }

    #[must_use]
    pub fn base_url(&self) -> &str {
        &self.base_url
    }
}

impl PageSource for GithubClient {
    fn get(&self, url: &str, query: &[(&str, String)]) -> Result<RemoteResponse> {
        let mut request = self.client.get(url).query(query);
        if let Some(token) = &self.token {
            request = request.bearer_auth(token);
        }

        let resp = request.send()?;
        let status = resp.status().as_u16();
        let body = resp.text()?;
        tracing::debug!(url, status, "remote response");

        Ok(RemoteResponse { status, body })
    }
}
