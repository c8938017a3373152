//! # GitLab MCP STDIO Transport
//!
//! Newline-delimited JSON over stdin/stdout:
//!
//! - [`LineFramer`] reassembles lines from arbitrarily chunked input
//! - [`LineTransportRunner`] parses each line and dispatches it on its own task
//! - [`LineWriter`] writes one envelope plus `\n` at a time, from a single task,
//!   so concurrent responses never interleave
//!
//! Logging goes through `tracing`; the binary routes it to stderr because
//! stdout is the protocol channel.
//!
//! ## Usage
//!
//! ```rust,ignore
//! use gitlab_mcp_stdio::stdio;
//!
//! stdio::serve(dispatcher, gitlab_mcp_stdio::DEFAULT_MAX_LINE_LENGTH).await?;
//! ```

#![warn(
    missing_docs,
    missing_debug_implementations,
    rust_2018_idioms,
    unreachable_pub,
    clippy::all
)]

mod error;
mod framer;
mod runner;
pub mod stdio;
mod writer;

pub use error::{TransportError, TransportResult};
pub use framer::{DEFAULT_MAX_LINE_LENGTH, FrameError, LineFramer};
pub use runner::{Dispatch, LineTransportRunner};
pub use writer::LineWriter;
