//! Protocol error taxonomy.
//!
//! A single [`McpError`] carries every failure that ends up on the wire. Its
//! [`ErrorKind`] decides the JSON-RPC code; the message is forwarded verbatim.
//!
//! ```rust
//! use gitlab_mcp_protocol::error::{ErrorKind, McpError};
//!
//! let err = McpError::tool_not_found("delete_everything");
//! assert_eq!(err.kind, ErrorKind::ToolNotFound);
//! assert_eq!(err.jsonrpc_code(), -32601);
//! ```

use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Result type alias for protocol operations
pub type McpResult<T> = Result<T, McpError>;

/// Error classification for programmatic handling
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ErrorKind {
    /// Line could not be framed or decoded (-32700)
    ParseError,
    /// No handler registered for the method (-32601)
    MethodNotFound,
    /// `tools/call` named a tool that does not exist (-32601)
    ToolNotFound,
    /// Missing or malformed arguments (-32602)
    InvalidParams,
    /// Downstream execution failed (-32603)
    Internal,
}

impl ErrorKind {
    /// JSON-RPC error code for this kind.
    ///
    /// Unknown tools share `-32601` with unknown methods.
    #[must_use]
    pub const fn code(self) -> i32 {
        match self {
            Self::ParseError => -32700,
            Self::MethodNotFound | Self::ToolNotFound => -32601,
            Self::InvalidParams => -32602,
            Self::Internal => -32603,
        }
    }
}

/// Unified protocol error
#[derive(Debug, Clone, PartialEq, Eq, Error, Serialize, Deserialize)]
#[error("{message}")]
pub struct McpError {
    /// Error classification
    pub kind: ErrorKind,
    /// Human-readable error message
    pub message: String,
}

impl McpError {
    /// Create a new error with kind and message
    #[must_use]
    pub fn new(kind: ErrorKind, message: impl Into<String>) -> Self {
        Self {
            kind,
            message: message.into(),
        }
    }

    /// Create a parse error
    #[must_use]
    pub fn parse_error(message: impl Into<String>) -> Self {
        Self::new(ErrorKind::ParseError, message)
    }

    /// Create a method not found error
    #[must_use]
    pub fn method_not_found(method: impl Into<String>) -> Self {
        Self::new(
            ErrorKind::MethodNotFound,
            format!("Unknown method: {}", method.into()),
        )
    }

    /// Create a tool not found error
    #[must_use]
    pub fn tool_not_found(tool_name: impl Into<String>) -> Self {
        Self::new(
            ErrorKind::ToolNotFound,
            format!("Unknown tool: {}", tool_name.into()),
        )
    }

    /// Create an invalid params error
    #[must_use]
    pub fn invalid_params(message: impl Into<String>) -> Self {
        Self::new(ErrorKind::InvalidParams, message)
    }

    /// Create an internal error
    #[must_use]
    pub fn internal(message: impl Into<String>) -> Self {
        Self::new(ErrorKind::Internal, message)
    }

    /// Get the JSON-RPC error code
    #[must_use]
    pub const fn jsonrpc_code(&self) -> i32 {
        self.kind.code()
    }
}
