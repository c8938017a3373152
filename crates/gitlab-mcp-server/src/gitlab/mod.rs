//! GitLab merge request API.
//!
//! Handlers talk to GitLab only through [`MergeRequestApi`], so tests can
//! swap in a stub and count calls.

mod client;

pub use client::GitLabClient;

use std::sync::Arc;

use async_trait::async_trait;
use gitlab_mcp_protocol::MergeRequest;
use serde::Serialize;
use thiserror::Error;

/// Errors from the GitLab collaborator.
#[derive(Debug, Error)]
pub enum GitLabError {
    /// GitLab answered with a status >= 400.
    #[error("{message}")]
    Api {
        /// HTTP status code
        status: u16,
        /// Error text extracted from the response body
        message: String,
    },

    /// The request never got a usable response.
    #[error("request failed: {0}")]
    Transport(#[from] reqwest::Error),

    /// A success response did not decode as a merge request.
    #[error("unexpected response: {0}")]
    InvalidResponse(String),

    /// The configured base URL cannot carry an API path.
    #[error("base URL cannot be used for API requests: {0}")]
    InvalidBaseUrl(String),
}

/// A merge request to create.
///
/// Serializes to the JSON body GitLab expects; `project_id` travels in the URL.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct NewMergeRequest {
    /// Numeric project id or `namespace/project` path
    #[serde(skip)]
    pub project_id: String,
    /// Branch to merge from
    pub source_branch: String,
    /// Branch to merge into
    pub target_branch: String,
    /// Merge request title
    pub title: String,
    /// Optional body text
    #[serde(skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
}

/// Creates merge requests on the remote service.
///
/// One call is one remote mutation; implementations must not retry.
#[async_trait]
pub trait MergeRequestApi: Send + Sync {
    /// Create a merge request and return the created resource.
    async fn create_merge_request(
        &self,
        request: &NewMergeRequest,
    ) -> Result<MergeRequest, GitLabError>;
}

#[async_trait]
impl<T: MergeRequestApi + ?Sized> MergeRequestApi for Arc<T> {
    async fn create_merge_request(
        &self,
        request: &NewMergeRequest,
    ) -> Result<MergeRequest, GitLabError> {
        (**self).create_merge_request(request).await
    }
}
