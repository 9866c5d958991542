//! GitHub Contents API implementation of [`DocumentStore`].
//!
//! Reads GET the contents URL and decode the base64 payload; writes re-read
//! the current blob SHA and PUT new base64 content with that SHA as the
//! precondition, producing one commit per mutation.

use super::{DocumentStore, RemoteDocument, StoreError};
use crate::config::Config;
use crate::models::LinkCatalog;
use async_trait::async_trait;
use base64::{engine::general_purpose, Engine as _};
use chrono::{SecondsFormat, Utc};
use reqwest::{header, StatusCode};
use serde::Deserialize;
use std::time::Duration;

const USER_AGENT: &str = concat!("driveboard/", env!("CARGO_PKG_VERSION"));
const REQUEST_TIMEOUT: Duration = Duration::from_secs(30);

/// GET response envelope for a contents URL. GitHub sends many more fields;
/// only these two matter here.
#[derive(Debug, Deserialize)]
struct ContentsResponse {
    content: String,
    sha: String,
}

pub struct GitHubStore {
    http: reqwest::Client,
    api_base: String,
    file_path: String,
    owner: Option<String>,
    repo: Option<String>,
    token: Option<String>,
}

impl GitHubStore {
    pub fn from_config(config: &Config) -> Result<Self, StoreError> {
        // GitHub rejects requests without a User-Agent
        let http = reqwest::Client::builder()
            .user_agent(USER_AGENT)
            .timeout(REQUEST_TIMEOUT)
            .build()?;

        Ok(GitHubStore {
            http,
            api_base: config.github_api_base.clone(),
            file_path: config.drive_links_path.clone(),
            owner: config.github_owner.clone(),
            repo: config.github_repo.clone(),
            token: config.github_token.clone(),
        })
    }

    /// Repository coordinates, or `NotConfigured` when any piece is missing.
    ///
    /// Checked per operation rather than at startup so the server still
    /// boots (and serves pages) on an incompletely configured deployment.
    fn repo_info(&self) -> Result<(&str, &str, &str), StoreError> {
        match (&self.owner, &self.repo, &self.token) {
            (Some(owner), Some(repo), Some(token)) => {
                Ok((owner.as_str(), repo.as_str(), token.as_str()))
            }
            _ => Err(StoreError::NotConfigured),
        }
    }

    fn contents_url(&self, owner: &str, repo: &str) -> String {
        format!(
            "{}/repos/{}/{}/contents/{}",
            self.api_base, owner, repo, self.file_path
        )
    }

    /// GET the contents URL. `Ok(None)` when the file does not exist.
    async fn get_contents(&self) -> Result<Option<ContentsResponse>, StoreError> {
        let (owner, repo, token) = self.repo_info()?;

        let response = self
            .http
            .get(self.contents_url(owner, repo))
            .header(header::AUTHORIZATION, format!("token {}", token))
            .header(header::ACCEPT, "application/vnd.github.v3+json")
            .send()
            .await?;

        if response.status() == StatusCode::NOT_FOUND {
            return Ok(None);
        }
        if !response.status().is_success() {
            return Err(error_from_response(response).await);
        }

        Ok(Some(response.json::<ContentsResponse>().await?))
    }
}

#[async_trait]
impl DocumentStore for GitHubStore {
    async fn fetch(&self) -> Result<RemoteDocument, StoreError> {
        match self.get_contents().await? {
            Some(file) => Ok(RemoteDocument {
                catalog: decode_catalog(&file.content),
                revision: Some(file.sha),
            }),
            // Never-written repository: an empty catalog, no revision
            None => Ok(RemoteDocument {
                catalog: LinkCatalog::default(),
                revision: None,
            }),
        }
    }

    async fn fetch_revision(&self) -> Result<Option<String>, StoreError> {
        Ok(self.get_contents().await?.map(|file| file.sha))
    }

    async fn write(&self, catalog: &LinkCatalog) -> Result<(), StoreError> {
        let (owner, repo, token) = self.repo_info()?;

        // Re-read the revision immediately before the PUT; the sequence is
        // never issued concurrently within one mutation.
        let revision = self.fetch_revision().await?;

        let json = serde_json::to_string_pretty(catalog)?;
        let encoded = general_purpose::STANDARD.encode(json.as_bytes());

        let mut body = serde_json::json!({
            "message": commit_message(revision.is_some()),
            "content": encoded,
        });
        if let Some(sha) = &revision {
            body["sha"] = serde_json::Value::String(sha.clone());
        }

        let response = self
            .http
            .put(self.contents_url(owner, repo))
            .header(header::AUTHORIZATION, format!("token {}", token))
            .header(header::ACCEPT, "application/vnd.github.v3+json")
            .json(&body)
            .send()
            .await?;

        if !response.status().is_success() {
            return Err(error_from_response(response).await);
        }

        tracing::debug!(
            links = catalog.links.len(),
            created = revision.is_none(),
            "Catalog written to repository"
        );
        Ok(())
    }
}

/// Turn a non-success response into a [`StoreError`], preferring GitHub's
/// `message` body field over the bare status text. SHA precondition
/// failures (409/412) become [`StoreError::Conflict`].
async fn error_from_response(response: reqwest::Response) -> StoreError {
    let status = response.status();
    let message = response
        .json::<serde_json::Value>()
        .await
        .ok()
        .and_then(|v| v.get("message").and_then(|m| m.as_str()).map(String::from))
        .unwrap_or_else(|| {
            status
                .canonical_reason()
                .unwrap_or("unknown error")
                .to_string()
        });

    match status.as_u16() {
        409 | 412 => StoreError::Conflict(message),
        code => StoreError::Status {
            status: code,
            message,
        },
    }
}

/// Decode a contents payload into a catalog.
///
/// GitHub wraps base64 at 60 columns, so whitespace is stripped first. Any
/// decode or parse failure logs and yields an empty catalog; the caller
/// keeps the file's sha, so the next successful write replaces the bad
/// content.
fn decode_catalog(content: &str) -> LinkCatalog {
    let stripped: String = content
        .chars()
        .filter(|c| !c.is_ascii_whitespace())
        .collect();

    let bytes = match general_purpose::STANDARD.decode(stripped.as_bytes()) {
        Ok(bytes) => bytes,
        Err(err) => {
            tracing::error!(error = %err, "Stored document is not valid base64, treating as empty");
            return LinkCatalog::default();
        }
    };

    match serde_json::from_slice(&bytes) {
        Ok(catalog) => catalog,
        Err(err) => {
            tracing::error!(error = %err, "Stored document is not valid catalog JSON, treating as empty");
            LinkCatalog::default()
        }
    }
}

/// Commit message for a write; `update` when the file already existed.
fn commit_message(update: bool) -> String {
    let stamp = Utc::now().to_rfc3339_opts(SecondsFormat::Millis, true);
    if update {
        format!("Update drive links - {}", stamp)
    } else {
        format!("Create drive links file - {}", stamp)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const CATALOG_JSON: &str = r#"{
  "links": [
    {
      "id": "link-1700000000000-ab12cd3",
      "title": "Intake checklist",
      "url": "https://drive.google.com/file/d/1AbC_dEf-2gH/view",
      "createdAt": "2023-11-14T22:13:20.000Z"
    }
  ]
}"#;

    /// Base64 the way GitHub serves it: wrapped at 60 columns with a
    /// trailing newline.
    fn github_style_base64(data: &str) -> String {
        let raw = general_purpose::STANDARD.encode(data.as_bytes());
        let mut wrapped = String::new();
        for chunk in raw.as_bytes().chunks(60) {
            wrapped.push_str(std::str::from_utf8(chunk).unwrap());
            wrapped.push('\n');
        }
        wrapped
    }

    #[test]
    fn test_decode_catalog_strips_line_wrapping() {
        let content = github_style_base64(CATALOG_JSON);
        assert!(content.contains('\n'));

        let catalog = decode_catalog(&content);
        assert_eq!(catalog.links.len(), 1);
        assert_eq!(catalog.links[0].id, "link-1700000000000-ab12cd3");
        assert_eq!(catalog.links[0].title, "Intake checklist");
    }

    #[test]
    fn test_decode_catalog_plain_base64() {
        let content = general_purpose::STANDARD.encode(CATALOG_JSON.as_bytes());
        let catalog = decode_catalog(&content);
        assert_eq!(catalog.links.len(), 1);
    }

    #[test]
    fn test_decode_catalog_bad_base64_is_empty() {
        let catalog = decode_catalog("!!! definitely not base64 !!!");
        assert!(catalog.links.is_empty());
    }

    #[test]
    fn test_decode_catalog_bad_json_is_empty() {
        let content = general_purpose::STANDARD.encode(b"{\"links\": [truncated");
        let catalog = decode_catalog(&content);
        assert!(catalog.links.is_empty());
    }

    #[test]
    fn test_decode_catalog_missing_links_field() {
        let content = general_purpose::STANDARD.encode(b"{}");
        let catalog = decode_catalog(&content);
        assert!(catalog.links.is_empty());
    }

    #[test]
    fn test_commit_messages() {
        let update = commit_message(true);
        assert!(update.starts_with("Update drive links - "));
        let stamp = update.trim_start_matches("Update drive links - ");
        assert!(chrono::DateTime::parse_from_rfc3339(stamp).is_ok());
        assert!(stamp.ends_with('Z'));

        let create = commit_message(false);
        assert!(create.starts_with("Create drive links file - "));
    }

    #[test]
    fn test_contents_url() {
        let config = Config {
            admin_username: None,
            admin_password: None,
            github_owner: Some("someorg".to_string()),
            github_repo: Some("site-data".to_string()),
            github_token: Some("ghp_test".to_string()),
            github_api_base: "https://api.github.com".to_string(),
            drive_links_path: "data/drive-links.json".to_string(),
            bind_addr: "127.0.0.1:0".parse().unwrap(),
            cookie_secure: false,
        };
        let store = GitHubStore::from_config(&config).unwrap();
        let (owner, repo, _) = store.repo_info().unwrap();
        assert_eq!(
            store.contents_url(owner, repo),
            "https://api.github.com/repos/someorg/site-data/contents/data/drive-links.json"
        );
    }

    #[test]
    fn test_repo_info_not_configured() {
        let config = Config {
            admin_username: None,
            admin_password: None,
            github_owner: Some("someorg".to_string()),
            github_repo: None,
            github_token: Some("ghp_test".to_string()),
            github_api_base: "https://api.github.com".to_string(),
            drive_links_path: "data/drive-links.json".to_string(),
            bind_addr: "127.0.0.1:0".parse().unwrap(),
            cookie_secure: false,
        };
        let store = GitHubStore::from_config(&config).unwrap();
        assert!(matches!(
            store.repo_info().unwrap_err(),
            StoreError::NotConfigured
        ));
    }
}
