use base64::engine::general_purpose::STANDARD;
use base64::Engine;
use chrono::{DateTime, Utc};
use reqwest::header::{HeaderMap, HeaderValue, AUTHORIZATION};
use reqwest::{Client, RequestBuilder, Response};
use serde::de::DeserializeOwned;
use serde::Deserialize;
use std::future::Future;
use std::time::Duration;
use thiserror::Error;
use tracing::debug;

pub const DEFAULT_API_BASE_URL: &str = "https://api.github.com";

/// Repository as returned by the list endpoint (only the fields we use)
#[derive(Debug, Clone, PartialEq, Deserialize)]
pub struct Repository {
    pub id: u64,
    pub name: String,
    #[serde(default)]
    pub description: Option<String>,
    pub html_url: String,
    #[serde(default)]
    pub updated_at: Option<DateTime<Utc>>,
}

impl Repository {
    /// Description if it has any visible text
    pub fn description_text(&self) -> Option<&str> {
        self.description
            .as_deref()
            .map(str::trim)
            .filter(|d| !d.is_empty())
    }

    /// First letter of the name, uppercased, for the card avatar
    pub fn initial(&self) -> String {
        self.name
            .chars()
            .next()
            .map(|c| c.to_uppercase().collect())
            .unwrap_or_default()
    }
}

/// Account profile shown in the title bar
#[derive(Debug, Clone, PartialEq, Deserialize)]
pub struct Profile {
    pub login: String,
    #[serde(default)]
    pub name: Option<String>,
    #[serde(default)]
    pub bio: Option<String>,
    #[serde(default)]
    pub html_url: Option<String>,
}

#[derive(Debug, Deserialize)]
struct ContentResponse {
    content: String,
    #[serde(default)]
    encoding: Option<String>,
}

/// Result of an existence probe
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ProbeOutcome {
    Status(u16),
    TimedOut,
    Failed(String),
}

#[derive(Debug, Error)]
pub enum GitHubError {
    #[error("request failed: {0}")]
    Request(#[from] reqwest::Error),
    #[error("GitHub answered with status {0}")]
    Status(u16),
    #[error("no response within {0:?}")]
    Timeout(Duration),
    #[error("unexpected response body: {0}")]
    Decode(String),
    #[error("cannot decode file content: {0}")]
    Content(String),
}

#[derive(Debug, Clone)]
pub struct ClientOptions {
    pub api_base_url: String,
    pub token: Option<String>,
    pub request_timeout: Duration,
    pub probe_timeout: Duration,
}

impl Default for ClientOptions {
    fn default() -> Self {
        Self {
            api_base_url: DEFAULT_API_BASE_URL.to_string(),
            token: None,
            request_timeout: Duration::from_secs(10),
            probe_timeout: Duration::from_secs(8),
        }
    }
}

/// Thin client over the GitHub REST API plus the Pages probe
#[derive(Debug, Clone)]
pub struct GitHubClient {
    http: Client,
    api_base_url: String,
    token: Option<String>,
    request_timeout: Duration,
    probe_timeout: Duration,
}

impl GitHubClient {
    pub fn new(options: ClientOptions) -> Result<Self, GitHubError> {
        let http = Client::builder()
            .user_agent(concat!("folio/", env!("CARGO_PKG_VERSION")))
            .build()?;
        Ok(Self {
            http,
            api_base_url: options.api_base_url.trim_end_matches('/').to_string(),
            token: options.token,
            request_timeout: options.request_timeout,
            probe_timeout: options.probe_timeout,
        })
    }

    pub fn has_token(&self) -> bool {
        self.token.is_some()
    }

    fn auth_headers(&self) -> HeaderMap {
        let mut headers = HeaderMap::new();
        if let Some(ref token) = self.token {
            match HeaderValue::from_str(&format!("token {}", token)) {
                Ok(value) => {
                    headers.insert(AUTHORIZATION, value);
                }
                Err(_) => debug!("token contains invalid header characters, sending unauthenticated"),
            }
        }
        headers
    }

    fn api_get(&self, path: &str) -> RequestBuilder {
        self.http
            .get(format!("{}{}", self.api_base_url, path))
            .headers(self.auth_headers())
            .header("Accept", "application/vnd.github+json")
    }

    async fn send(&self, request: RequestBuilder) -> Result<Response, GitHubError> {
        let response = with_timeout(self.request_timeout, request.send()).await??;
        let status = response.status();
        if !status.is_success() {
            return Err(GitHubError::Status(status.as_u16()));
        }
        Ok(response)
    }

    async fn get_json<T: DeserializeOwned>(&self, path: &str) -> Result<T, GitHubError> {
        let response = self.send(self.api_get(path)).await?;
        let body = with_timeout(self.request_timeout, response.bytes()).await??;
        serde_json::from_slice(&body).map_err(|e| GitHubError::Decode(e.to_string()))
    }

    /// Repositories owned by `account`, in the order GitHub returns them
    pub async fn list_repositories(&self, account: &str) -> Result<Vec<Repository>, GitHubError> {
        self.get_json(&format!("/users/{}/repos", account)).await
    }

    pub async fn user_profile(&self, account: &str) -> Result<Profile, GitHubError> {
        self.get_json(&format!("/users/{}", account)).await
    }

    /// Text of a file in a repository, via the contents API
    pub async fn file_content(&self, owner: &str, repo: &str, path: &str) -> Result<String, GitHubError> {
        let response: ContentResponse = self
            .get_json(&format!("/repos/{}/{}/contents/{}", owner, repo, path))
            .await?;
        if let Some(ref encoding) = response.encoding {
            if encoding != "base64" {
                return Err(GitHubError::Content(format!("unsupported encoding {}", encoding)));
            }
        }
        decode_content(&response.content)
    }

    /// Unauthenticated GET used only for its status code
    pub async fn probe(&self, url: &str) -> ProbeOutcome {
        match tokio::time::timeout(self.probe_timeout, self.http.get(url).send()).await {
            Ok(Ok(response)) => ProbeOutcome::Status(response.status().as_u16()),
            Ok(Err(e)) => ProbeOutcome::Failed(e.to_string()),
            Err(_) => ProbeOutcome::TimedOut,
        }
    }
}

async fn with_timeout<F: Future>(limit: Duration, fut: F) -> Result<F::Output, GitHubError> {
    tokio::time::timeout(limit, fut)
        .await
        .map_err(|_| GitHubError::Timeout(limit))
}

/// Decode base64 file content; GitHub wraps it at 60 columns
pub fn decode_content(encoded: &str) -> Result<String, GitHubError> {
    let compact: String = encoded.chars().filter(|c| !c.is_whitespace()).collect();
    let bytes = STANDARD
        .decode(compact)
        .map_err(|e| GitHubError::Content(e.to_string()))?;
    Ok(String::from_utf8_lossy(&bytes).into_owned())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn repository_ignores_unknown_fields() {
        let json = r#"[{"id": 7, "name": "foo", "description": null,
            "html_url": "https://github.com/bar/foo", "stargazers_count": 3,
            "updated_at": "2024-05-01T10:00:00Z"}]"#;
        let repos: Vec<Repository> = serde_json::from_str(json).unwrap();
        assert_eq!(repos.len(), 1);
        assert_eq!(repos[0].id, 7);
        assert_eq!(repos[0].description, None);
        assert!(repos[0].updated_at.is_some());
    }

    #[test]
    fn blank_description_counts_as_missing() {
        let repo = Repository {
            id: 1,
            name: "foo".into(),
            description: Some("   ".into()),
            html_url: String::new(),
            updated_at: None,
        };
        assert_eq!(repo.description_text(), None);
        assert_eq!(repo.initial(), "F");
    }

    #[test]
    fn decodes_wrapped_content() {
        // "# Title\nbody\n" split over two lines
        let text = decode_content("IyBUaXRsZQpi\nb2R5Cg==\n").unwrap();
        assert_eq!(text, "# Title\nbody\n");
    }

    #[test]
    fn rejects_garbage_content() {
        assert!(matches!(decode_content("!!!"), Err(GitHubError::Content(_))));
    }
}
