//! # GitLab MCP Server
//!
//! A Model Context Protocol server on stdio that exposes one tool,
//! `create_merge_request`, backed by the GitLab REST API.
//!
//! The pieces:
//!
//! - [`registry::Method`] - the fixed table of supported methods
//! - [`Dispatcher`] - routes a parsed message to its handler
//! - [`tools::merge_request`] - argument validation and execution for the tool
//! - [`gitlab`] - the [`MergeRequestApi`] seam and its HTTP implementation
//! - [`config`] / [`logging`] - startup configuration and stderr logging
//!
//! ```rust,ignore
//! use gitlab_mcp_server::{Dispatcher, GitLabClient, ServerConfig};
//! use gitlab_mcp_stdio::stdio;
//!
//! let config = ServerConfig::parse();
//! let client = GitLabClient::new(config.gitlab()?)?;
//! stdio::serve(Dispatcher::new(client), config.max_line_length).await?;
//! ```

#![deny(missing_docs)]
#![warn(missing_debug_implementations)]
#![warn(clippy::all)]

pub mod config;
pub mod dispatcher;
pub mod gitlab;
pub mod logging;
pub mod registry;
pub mod tools;

pub use config::{ConfigError, GitLabSettings, ServerConfig};
pub use dispatcher::Dispatcher;
pub use gitlab::{GitLabClient, GitLabError, MergeRequestApi, NewMergeRequest};
pub use logging::LoggingConfig;
pub use registry::Method;

/// Server name reported by `initialize`
pub const SERVER_NAME: &str = "mcp-server-gitlab";

/// Server version reported by `initialize`
pub const SERVER_VERSION: &str = env!("CARGO_PKG_VERSION");
