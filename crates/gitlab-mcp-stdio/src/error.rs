//! Transport error types.

use std::io;

use thiserror::Error;

/// A specialized `Result` type for transport operations.
pub type TransportResult<T> = Result<T, TransportError>;

/// Failures that end the transport loop.
///
/// Per-line problems (bad JSON, oversized lines) are answered on the wire and
/// never surface here; only the streams themselves can fail the runner.
#[derive(Error, Debug)]
#[non_exhaustive]
pub enum TransportError {
    /// Reading the input stream failed.
    #[error("Receive failed: {0}")]
    ReceiveFailed(#[source] io::Error),

    /// Writing or flushing the output stream failed.
    #[error("Send failed: {0}")]
    SendFailed(#[source] io::Error),

    /// An envelope could not be serialized.
    #[error("Serialization failed: {0}")]
    SerializationFailed(#[from] serde_json::Error),
}
