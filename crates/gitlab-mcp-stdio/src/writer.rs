//! Newline-delimited envelope writer.

use gitlab_mcp_protocol::JsonRpcResponse;
use tokio::io::{AsyncWrite, AsyncWriteExt};
use tracing::trace;

use crate::error::{TransportError, TransportResult};

/// Writes one serialized envelope plus `\n` per call.
///
/// The envelope and its terminator go out in a single `write_all`, followed by
/// a flush. Callers keep a single `LineWriter` per stream so two envelopes can
/// never interleave mid-line.
#[derive(Debug)]
pub struct LineWriter<W> {
    inner: W,
}

impl<W: AsyncWrite + Unpin> LineWriter<W> {
    /// Wrap an output stream.
    pub fn new(inner: W) -> Self {
        Self { inner }
    }

    /// Serialize and write one envelope.
    ///
    /// # Errors
    ///
    /// Returns [`TransportError::SerializationFailed`] if the envelope cannot be
    /// encoded, or [`TransportError::SendFailed`] if the stream rejects the
    /// write or flush.
    pub async fn write_envelope(&mut self, response: &JsonRpcResponse) -> TransportResult<()> {
        let mut line = serde_json::to_vec(response)?;
        line.push(b'\n');

        self.inner
            .write_all(&line)
            .await
            .map_err(TransportError::SendFailed)?;
        self.inner
            .flush()
            .await
            .map_err(TransportError::SendFailed)?;

        trace!(bytes = line.len(), "Wrote response line");
        Ok(())
    }

    /// Unwrap the underlying stream.
    pub fn into_inner(self) -> W {
        self.inner
    }
}
