//! # GitLab MCP Protocol
//!
//! Wire types for the GitLab MCP server: the inbound [`Message`], the outbound
//! [`JsonRpcResponse`] envelope, the [`McpError`] taxonomy, and the static
//! [`ToolDescriptor`] metadata advertised by `tools/list`.
//!
//! Every outbound envelope is built through the constructors in [`response`],
//! which keeps the `result`/`error` exclusivity and the `"jsonrpc": "2.0"` tag
//! in one place.
//!
//! ```rust
//! use gitlab_mcp_protocol::{parse_message, response, ServerInfo};
//!
//! let message = parse_message(r#"{"jsonrpc":"2.0","id":7,"method":"initialize"}"#)?;
//! let envelope = response::initialize(message.id, &ServerInfo::new("demo", "1.0.0"));
//! assert!(envelope.is_success());
//! # Ok::<(), gitlab_mcp_protocol::McpError>(())
//! ```

#![warn(missing_docs, missing_debug_implementations, rust_2018_idioms)]

pub mod error;
pub mod merge_request;
pub mod message;
pub mod response;
pub mod tool;

pub use error::{ErrorKind, McpError, McpResult};
pub use merge_request::MergeRequest;
pub use message::{Message, parse_message};
pub use response::{JsonRpcError, JsonRpcResponse, JsonRpcResponsePayload, JsonRpcVersion};
pub use tool::{ToolDescriptor, ToolInputSchema};

use serde::{Deserialize, Serialize};

/// JSON-RPC version tag carried by every envelope
pub const JSONRPC_VERSION: &str = "2.0";

/// MCP protocol revision this server speaks
pub const PROTOCOL_VERSION: &str = "2024-11-05";

/// Server identity reported by `initialize`
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ServerInfo {
    /// Machine-readable server name
    pub name: String,
    /// Server version
    pub version: String,
}

impl ServerInfo {
    /// Create server info with name and version.
    #[must_use]
    pub fn new(name: impl Into<String>, version: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            version: version.into(),
        }
    }
}
