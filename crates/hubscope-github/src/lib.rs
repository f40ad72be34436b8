#![forbid(unsafe_code)]

//! GitHub-backed [`DirectoryClient`].
//!
//! Blocking HTTP client over the GitHub REST API: user search via
//! `/search/users`, repository listing via `/users/{login}/repos`. Calls
//! block, which is fine — the controller runs them on background task
//! threads and consumes the results as messages.

use std::time::Duration;

use reqwest::blocking::Client;
use reqwest::header::{ACCEPT, HeaderMap, HeaderValue, USER_AGENT};
use serde::Deserialize;
use tracing::debug;

use hubscope_core::{Candidate, DirectoryClient, DirectoryError, Repo};

/// GitHub API base URL.
const GITHUB_API_URL: &str = "https://api.github.com";

/// User agent string; GitHub rejects requests without one.
const USER_AGENT_VALUE: &str = concat!("hubscope/", env!("CARGO_PKG_VERSION"));

/// Wire shape of `/search/users`.
#[derive(Debug, Deserialize)]
struct SearchUsersResponse {
    items: Vec<Candidate>,
}

/// Blocking directory client over the GitHub REST API.
#[derive(Debug, Clone)]
pub struct GitHubClient {
    http: Client,
    base_url: String,
}

impl GitHubClient {
    /// Create a client with the given per-request timeout.
    ///
    /// # Errors
    ///
    /// Returns [`DirectoryError::Transport`] if the underlying HTTP client
    /// cannot be constructed.
    pub fn new(timeout: Duration) -> Result<Self, DirectoryError> {
        Self::with_base_url(GITHUB_API_URL, timeout)
    }

    /// Create a client against a non-default base URL (for testing).
    ///
    /// # Errors
    ///
    /// Returns [`DirectoryError::Transport`] if the underlying HTTP client
    /// cannot be constructed.
    pub fn with_base_url(
        base_url: impl Into<String>,
        timeout: Duration,
    ) -> Result<Self, DirectoryError> {
        let mut headers = HeaderMap::new();
        headers.insert(
            ACCEPT,
            HeaderValue::from_static("application/vnd.github+json"),
        );
        headers.insert(USER_AGENT, HeaderValue::from_static(USER_AGENT_VALUE));

        let http = Client::builder()
            .default_headers(headers)
            .timeout(timeout)
            .build()
            .map_err(|e| DirectoryError::Transport(format!("failed to create HTTP client: {e}")))?;

        Ok(Self {
            http,
            base_url: base_url.into(),
        })
    }

    fn get_json<T: serde::de::DeserializeOwned>(
        &self,
        url: &str,
        query: &[(&str, &str)],
    ) -> Result<T, DirectoryError> {
        debug!(url, "directory request");
        let response = self
            .http
            .get(url)
            .query(query)
            .send()
            .map_err(|e| DirectoryError::Transport(e.to_string()))?;

        let status = response.status();
        if !status.is_success() {
            return Err(DirectoryError::Status(status.as_u16()));
        }

        response
            .json::<T>()
            .map_err(|e| DirectoryError::Transport(format!("malformed response body: {e}")))
    }
}

impl DirectoryClient for GitHubClient {
    fn search(&self, query: &str, limit: usize) -> Result<Vec<Candidate>, DirectoryError> {
        let url = format!("{}/search/users", self.base_url);
        let limit = limit.to_string();
        let response: SearchUsersResponse =
            self.get_json(&url, &[("q", query), ("per_page", limit.as_str())])?;
        Ok(response.items)
    }

    fn list_repos(&self, login: &str) -> Result<Vec<Repo>, DirectoryError> {
        let url = format!("{}/users/{}/repos", self.base_url, login);
        self.get_json(&url, &[("sort", "updated"), ("direction", "desc")])
    }
}
