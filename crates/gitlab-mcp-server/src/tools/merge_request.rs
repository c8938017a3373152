//! `create_merge_request`: argument validation and execution.
//!
//! `tools/call` and the flat `create_merge_request` alias both end up in
//! [`create`], so the two entry points cannot drift apart.

use gitlab_mcp_protocol::{JsonRpcResponse, McpError, McpResult, ToolDescriptor, response};
use serde_json::{Map, Value};
use tracing::{info, warn};

use super::CREATE_MERGE_REQUEST;
use crate::gitlab::{MergeRequestApi, NewMergeRequest};

/// Required arguments, in the order they are reported when missing.
pub const REQUIRED_FIELDS: [&str; 4] = ["project_id", "source_branch", "target_branch", "title"];

/// Descriptor advertised by `tools/list`.
#[must_use]
pub fn descriptor() -> ToolDescriptor {
    ToolDescriptor::new(CREATE_MERGE_REQUEST, "Create a GitLab merge request")
        .with_param(
            "project_id",
            "string",
            "Project ID or URL-encoded namespace/project path",
            true,
        )
        .with_param("source_branch", "string", "Source branch", true)
        .with_param("target_branch", "string", "Target branch", true)
        .with_param("title", "string", "Merge request title", true)
        .with_param("description", "string", "Merge request description", false)
}

/// Check an argument bag and turn it into a request.
///
/// A required field counts as missing when it is absent, `null`, or an empty
/// string. `project_id` may also be an integer. `description` may be any
/// string, including an empty one.
///
/// # Errors
///
/// Returns an `InvalidParams` [`McpError`] naming every missing field, or the
/// first field with the wrong type.
pub fn validate(arguments: Option<&Value>) -> McpResult<NewMergeRequest> {
    let empty = Map::new();
    let args = match arguments {
        None | Some(Value::Null) => &empty,
        Some(Value::Object(map)) => map,
        Some(_) => return Err(McpError::invalid_params("Arguments must be a JSON object")),
    };

    let missing: Vec<&str> = REQUIRED_FIELDS
        .into_iter()
        .filter(|field| is_missing(args.get(*field)))
        .collect();
    if !missing.is_empty() {
        return Err(McpError::invalid_params(format!(
            "Missing required fields: {}",
            missing.join(", ")
        )));
    }

    let project_id = match args.get("project_id") {
        Some(Value::String(s)) => s.clone(),
        Some(Value::Number(n)) if n.is_u64() || n.is_i64() => n.to_string(),
        _ => return Err(wrong_type("project_id", "a string or an integer")),
    };

    let description = match args.get("description") {
        None | Some(Value::Null) => None,
        Some(Value::String(s)) => Some(s.clone()),
        Some(_) => return Err(wrong_type("description", "a string")),
    };

    Ok(NewMergeRequest {
        project_id,
        source_branch: string_field(args, "source_branch")?,
        target_branch: string_field(args, "target_branch")?,
        title: string_field(args, "title")?,
        description,
    })
}

/// Validate `arguments`, create the merge request, and build the envelope.
///
/// Validation failures return `-32602` without touching `api`. Collaborator
/// failures return `-32603`. There are no retries.
pub async fn create<A>(api: &A, id: Value, arguments: Option<&Value>) -> JsonRpcResponse
where
    A: MergeRequestApi + ?Sized,
{
    let request = match validate(arguments) {
        Ok(request) => request,
        Err(err) => {
            warn!(%err, "Rejected create_merge_request arguments");
            return JsonRpcResponse::error(id, err);
        }
    };

    match api.create_merge_request(&request).await {
        Ok(merge_request) => {
            info!(
                project = %request.project_id,
                iid = merge_request.iid,
                web_url = %merge_request.web_url,
                "Merge request created"
            );
            response::merge_request_created(id, &merge_request)
        }
        Err(err) => {
            warn!(project = %request.project_id, error = %err, "Merge request creation failed");
            JsonRpcResponse::error(id, McpError::internal(format!("GitLab API error: {err}")))
        }
    }
}

fn is_missing(value: Option<&Value>) -> bool {
    match value {
        None | Some(Value::Null) => true,
        Some(Value::String(s)) => s.is_empty(),
        Some(_) => false,
    }
}

fn string_field(args: &Map<String, Value>, field: &str) -> McpResult<String> {
    args.get(field)
        .and_then(Value::as_str)
        .map(str::to_string)
        .ok_or_else(|| wrong_type(field, "a string"))
}

fn wrong_type(field: &str, expected: &str) -> McpError {
    McpError::invalid_params(format!("Invalid field '{field}': expected {expected}"))
}
