//! HTTP implementation of [`MergeRequestApi`].

use std::fmt;

use async_trait::async_trait;
use gitlab_mcp_protocol::MergeRequest;
use reqwest::StatusCode;
use serde_json::Value;
use tracing::debug;
use url::Url;

use super::{GitLabError, MergeRequestApi, NewMergeRequest};
use crate::config::GitLabSettings;

/// Header GitLab reads personal/project access tokens from.
const TOKEN_HEADER: &str = "PRIVATE-TOKEN";

/// Used when a failure body carries no usable message.
const UNKNOWN_ERROR: &str = "unknown error";

/// GitLab REST client for merge request creation.
#[derive(Clone)]
pub struct GitLabClient {
    http: reqwest::Client,
    base_url: Url,
    token: String,
}

impl fmt::Debug for GitLabClient {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("GitLabClient")
            .field("base_url", &self.base_url.as_str())
            .field("token", &"<redacted>")
            .finish()
    }
}

impl GitLabClient {
    /// Build a client from validated settings.
    ///
    /// # Errors
    ///
    /// Returns [`GitLabError::Transport`] if the HTTP client cannot be
    /// constructed (e.g. TLS backend initialization fails).
    pub fn new(settings: GitLabSettings) -> Result<Self, GitLabError> {
        let http = reqwest::Client::builder()
            .user_agent(concat!("mcp-server-gitlab/", env!("CARGO_PKG_VERSION")))
            .build()?;

        Ok(Self {
            http,
            base_url: settings.base_url,
            token: settings.token,
        })
    }

    /// Configured GitLab base URL.
    pub fn base_url(&self) -> &Url {
        &self.base_url
    }

    /// `{base}/api/v4/projects/{project}/merge_requests`, with the project id
    /// encoded as a single path segment so `group/project` paths work.
    fn merge_requests_url(&self, project_id: &str) -> Result<Url, GitLabError> {
        let mut url = self.base_url.clone();
        url.path_segments_mut()
            .map_err(|()| GitLabError::InvalidBaseUrl(self.base_url.to_string()))?
            .pop_if_empty()
            .extend(["api", "v4", "projects", project_id, "merge_requests"]);
        Ok(url)
    }
}

#[async_trait]
impl MergeRequestApi for GitLabClient {
    async fn create_merge_request(
        &self,
        request: &NewMergeRequest,
    ) -> Result<MergeRequest, GitLabError> {
        let url = self.merge_requests_url(&request.project_id)?;
        debug!(%url, source = %request.source_branch, target = %request.target_branch, "Creating merge request");

        let response = self
            .http
            .post(url)
            .header(TOKEN_HEADER, &self.token)
            .json(request)
            .send()
            .await?;

        let status = response.status();
        let body = response.bytes().await?;

        if status.as_u16() >= 400 {
            return Err(GitLabError::Api {
                status: status.as_u16(),
                message: error_message(status, &body),
            });
        }

        serde_json::from_slice(&body).map_err(|e| GitLabError::InvalidResponse(e.to_string()))
    }
}

/// Pull a readable message out of a GitLab error body.
///
/// GitLab uses `message` (a string, or an array/object for validation
/// errors) and occasionally `error`. Non-JSON bodies fall back to the status.
fn error_message(status: StatusCode, body: &[u8]) -> String {
    let Ok(payload) = serde_json::from_slice::<Value>(body) else {
        return status.to_string();
    };

    let text = ["message", "error"]
        .into_iter()
        .filter_map(|key| payload.get(key))
        .find_map(|value| match value {
            Value::String(s) if !s.is_empty() => Some(s.clone()),
            Value::Array(_) | Value::Object(_) => Some(value.to_string()),
            _ => None,
        });

    text.unwrap_or_else(|| UNKNOWN_ERROR.to_string())
}

#[cfg(test)]
mod tests {
    use super::*;

    fn client(base: &str) -> GitLabClient {
        GitLabClient::new(GitLabSettings {
            base_url: Url::parse(base).unwrap(),
            token: "glpat-secret".to_string(),
        })
        .unwrap()
    }

    #[test]
    fn test_url_for_numeric_project() {
        let url = client("https://gitlab.example.com")
            .merge_requests_url("42")
            .unwrap();
        assert_eq!(
            url.as_str(),
            "https://gitlab.example.com/api/v4/projects/42/merge_requests"
        );
    }

    #[test]
    fn test_url_encodes_project_path() {
        let url = client("https://gitlab.example.com/")
            .merge_requests_url("group/sub/project")
            .unwrap();
        assert_eq!(
            url.as_str(),
            "https://gitlab.example.com/api/v4/projects/group%2Fsub%2Fproject/merge_requests"
        );
    }

    #[test]
    fn test_url_keeps_base_path_prefix() {
        let url = client("https://example.com/gitlab/")
            .merge_requests_url("7")
            .unwrap();
        assert_eq!(
            url.as_str(),
            "https://example.com/gitlab/api/v4/projects/7/merge_requests"
        );
    }

    #[test]
    fn test_base_url_is_reported_as_configured() {
        let client = client("https://example.com/gitlab/");
        assert_eq!(client.base_url().as_str(), "https://example.com/gitlab/");
    }

    #[test]
    fn test_debug_redacts_token() {
        let rendered = format!("{:?}", client("https://gitlab.example.com"));
        assert!(!rendered.contains("glpat-secret"));
        assert!(rendered.contains("<redacted>"));
    }

    #[test]
    fn test_error_message_variants() {
        let status = StatusCode::NOT_FOUND;
        assert_eq!(
            error_message(status, br#"{"message":"404 Project Not Found"}"#),
            "404 Project Not Found"
        );
        assert_eq!(
            error_message(
                StatusCode::CONFLICT,
                br#"{"message":["Another open merge request already exists"]}"#
            ),
            r#"["Another open merge request already exists"]"#
        );
        assert_eq!(
            error_message(StatusCode::UNAUTHORIZED, br#"{"error":"invalid_token"}"#),
            "invalid_token"
        );
        assert_eq!(error_message(status, br#"{"message":""}"#), UNKNOWN_ERROR);
        assert_eq!(error_message(status, b"{}"), UNKNOWN_ERROR);
        assert_eq!(error_message(status, b"<html>oops</html>"), "404 Not Found");
    }
}
