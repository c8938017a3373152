//! Tools exposed through `tools/list` and `tools/call`.

pub mod merge_request;

use gitlab_mcp_protocol::ToolDescriptor;

/// Name of the merge request tool.
pub const CREATE_MERGE_REQUEST: &str = "create_merge_request";

/// Descriptors for every registered tool, in listing order.
#[must_use]
pub fn descriptors() -> Vec<ToolDescriptor> {
    vec![merge_request::descriptor()]
}
