//! Merge request payload returned by GitLab on creation.

use serde::{Deserialize, Serialize};

/// The subset of a GitLab merge request resource this server reports back.
///
/// GitLab returns many more fields; they are ignored on decode.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct MergeRequest {
    /// Global merge request id
    pub id: u64,
    /// Project-scoped sequence number (the `!123` users see)
    pub iid: u64,
    /// Browser URL of the merge request
    pub web_url: String,
    /// Branch being merged
    pub source_branch: String,
    /// Branch merged into
    pub target_branch: String,
    /// Lifecycle state (`opened`, `merged`, `closed`, ...)
    pub state: String,
}
