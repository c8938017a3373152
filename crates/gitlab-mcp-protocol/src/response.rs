//! Response envelopes and the builders that produce them.
//!
//! Handlers never assemble raw JSON envelopes. They call the constructors in
//! this module, which guarantees:
//!
//! - every envelope carries `"jsonrpc": "2.0"`
//! - exactly one of `result` / `error` is present (enforced by
//!   [`JsonRpcResponsePayload`])
//! - `id` is always serialized, as `null` when no correlation is possible

use std::fmt;

use serde::{Deserialize, Deserializer, Serialize, Serializer};
use serde_json::{Value, json};

use crate::error::McpError;
use crate::merge_request::MergeRequest;
use crate::tool::ToolDescriptor;
use crate::{JSONRPC_VERSION, PROTOCOL_VERSION, ServerInfo};

/// JSON-RPC version type (always "2.0")
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct JsonRpcVersion;

impl Serialize for JsonRpcVersion {
    fn serialize<S>(&self, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: Serializer,
    {
        serializer.serialize_str(JSONRPC_VERSION)
    }
}

impl<'de> Deserialize<'de> for JsonRpcVersion {
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: Deserializer<'de>,
    {
        let version = String::deserialize(deserializer)?;
        if version == JSONRPC_VERSION {
            Ok(JsonRpcVersion)
        } else {
            Err(serde::de::Error::custom(format!(
                "Invalid JSON-RPC version: expected '{}', got '{}'",
                JSONRPC_VERSION, version
            )))
        }
    }
}

/// JSON-RPC error object
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct JsonRpcError {
    /// Error code
    pub code: i32,
    /// Error message
    pub message: String,
}

impl From<McpError> for JsonRpcError {
    fn from(err: McpError) -> Self {
        Self {
            code: err.jsonrpc_code(),
            message: err.message,
        }
    }
}

impl fmt::Display for JsonRpcError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "[{}] {}", self.code, self.message)
    }
}

/// JSON-RPC response payload
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum JsonRpcResponsePayload {
    /// Successful response
    Success {
        /// Response result
        result: Value,
    },
    /// Error response
    Error {
        /// Response error
        error: JsonRpcError,
    },
}

/// One outbound envelope.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct JsonRpcResponse {
    /// JSON-RPC version
    pub jsonrpc: JsonRpcVersion,
    /// Echo of the request id, `null` when unknown
    pub id: Value,
    /// Response payload
    #[serde(flatten)]
    pub payload: JsonRpcResponsePayload,
}

impl JsonRpcResponse {
    /// Create a success response
    #[must_use]
    pub fn success(id: Value, result: Value) -> Self {
        Self {
            jsonrpc: JsonRpcVersion,
            id,
            payload: JsonRpcResponsePayload::Success { result },
        }
    }

    /// Create an error response
    #[must_use]
    pub fn error(id: Value, error: impl Into<JsonRpcError>) -> Self {
        Self {
            jsonrpc: JsonRpcVersion,
            id,
            payload: JsonRpcResponsePayload::Error {
                error: error.into(),
            },
        }
    }

    /// Create a parse error response (null id)
    #[must_use]
    pub fn parse_error(error: McpError) -> Self {
        Self::error(Value::Null, error)
    }

    /// Check if this is a success response
    #[must_use]
    pub fn is_success(&self) -> bool {
        matches!(self.payload, JsonRpcResponsePayload::Success { .. })
    }

    /// Check if this is an error response
    #[must_use]
    pub fn is_error(&self) -> bool {
        matches!(self.payload, JsonRpcResponsePayload::Error { .. })
    }

    /// Get the result if success
    #[must_use]
    pub fn result(&self) -> Option<&Value> {
        match &self.payload {
            JsonRpcResponsePayload::Success { result } => Some(result),
            JsonRpcResponsePayload::Error { .. } => None,
        }
    }

    /// Get the error if error
    #[must_use]
    pub fn error_object(&self) -> Option<&JsonRpcError> {
        match &self.payload {
            JsonRpcResponsePayload::Success { .. } => None,
            JsonRpcResponsePayload::Error { error } => Some(error),
        }
    }
}

/// `initialize` result: protocol version, tool capability, server identity.
#[must_use]
pub fn initialize(id: Value, server_info: &ServerInfo) -> JsonRpcResponse {
    JsonRpcResponse::success(
        id,
        json!({
            "protocolVersion": PROTOCOL_VERSION,
            "capabilities": { "tools": {} },
            "serverInfo": server_info,
        }),
    )
}

/// `tools/list` result.
#[must_use]
pub fn tools_list(id: Value, tools: &[ToolDescriptor]) -> JsonRpcResponse {
    JsonRpcResponse::success(id, json!({ "tools": tools }))
}

/// Tool result with a single text content block.
#[must_use]
pub fn tool_text(id: Value, text: impl Into<String>) -> JsonRpcResponse {
    JsonRpcResponse::success(
        id,
        json!({
            "content": [{ "type": "text", "text": text.into() }]
        }),
    )
}

/// Tool result for a freshly created merge request.
///
/// The text block is a pretty-printed JSON summary so clients can both show
/// it and parse it back.
#[must_use]
pub fn merge_request_created(id: Value, merge_request: &MergeRequest) -> JsonRpcResponse {
    let summary = json!({
        "id": merge_request.id,
        "iid": merge_request.iid,
        "web_url": merge_request.web_url,
        "source_branch": merge_request.source_branch,
        "target_branch": merge_request.target_branch,
        "state": merge_request.state,
    });
    tool_text(id, format!("{summary:#}"))
}
