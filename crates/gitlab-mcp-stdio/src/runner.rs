//! Read-parse-dispatch-respond loop for line-based transports.
//!
//! # Ordering
//!
//! Lines are framed and parsed strictly in arrival order, but each message is
//! dispatched on its own task. A request whose handler suspends on I/O does
//! not hold back the ones behind it, so responses are written in completion
//! order, which may differ from arrival order. Clients correlate by `id`.
//!
//! All writes happen on the runner's task: handler tasks hand finished
//! envelopes over an `mpsc` channel, so one envelope line is always written
//! whole before the next begins.
//!
//! A handler task that panics is answered with `-32603` under the request's
//! `id`, so every dispatched line still gets its envelope.

use std::future::Future;

use gitlab_mcp_protocol::{JsonRpcResponse, McpError, Message, parse_message};
use tokio::io::{AsyncRead, AsyncReadExt, AsyncWrite};
use tokio::sync::mpsc;
use tokio::task::JoinError;
use tracing::{debug, error, warn};

use crate::error::{TransportError, TransportResult};
use crate::framer::{DEFAULT_MAX_LINE_LENGTH, LineFramer};
use crate::writer::LineWriter;

/// Read buffer size for each chunk pulled from the input stream.
const READ_CHUNK_SIZE: usize = 8 * 1024;

/// Completed responses waiting for the writer.
const RESPONSE_CHANNEL_CAPACITY: usize = 32;

/// Routes one parsed message to its handler.
///
/// Returns `None` when the method is a notification and nothing must be
/// written back.
pub trait Dispatch: Clone + Send + Sync + 'static {
    /// Handle one message.
    fn dispatch(&self, message: Message) -> impl Future<Output = Option<JsonRpcResponse>> + Send;
}

/// Shared runner for line-based transports.
#[derive(Debug)]
pub struct LineTransportRunner<D: Dispatch> {
    dispatcher: D,
    max_line_length: usize,
}

impl<D: Dispatch> LineTransportRunner<D> {
    /// Create a new runner with the default line cap.
    pub fn new(dispatcher: D) -> Self {
        Self {
            dispatcher,
            max_line_length: DEFAULT_MAX_LINE_LENGTH,
        }
    }

    /// Override the line cap.
    #[must_use]
    pub fn with_max_line_length(mut self, max_line_length: usize) -> Self {
        self.max_line_length = max_line_length;
        self
    }

    /// Run the transport loop until the reader reaches EOF.
    ///
    /// After EOF no further input is read, but every in-flight dispatch still
    /// completes and its response is written before this returns.
    ///
    /// Must be called from within a tokio runtime.
    ///
    /// # Errors
    ///
    /// Returns a [`TransportError`] only when the input or output stream
    /// fails. Malformed lines are answered with a `-32700` envelope and the
    /// loop continues.
    pub async fn run<R, W>(&self, mut reader: R, writer: W) -> TransportResult<()>
    where
        R: AsyncRead + Unpin,
        W: AsyncWrite + Unpin,
    {
        let mut framer = LineFramer::with_max_length(self.max_line_length);
        let mut writer = LineWriter::new(writer);
        let (response_tx, mut response_rx) =
            mpsc::channel::<JsonRpcResponse>(RESPONSE_CHANNEL_CAPACITY);
        let mut chunk = vec![0u8; READ_CHUNK_SIZE];

        loop {
            tokio::select! {
                read = reader.read(&mut chunk) => {
                    let bytes_read = read.map_err(TransportError::ReceiveFailed)?;
                    if bytes_read == 0 {
                        break;
                    }

                    for frame in framer.push(&chunk[..bytes_read]) {
                        let parsed = frame
                            .map_err(|e| McpError::parse_error(format!("Parse error: {e}")))
                            .and_then(|line| parse_message(&line));

                        match parsed {
                            Ok(message) => self.spawn_dispatch(message, response_tx.clone()),
                            Err(err) => {
                                warn!(error = %err, "Rejecting unparseable line");
                                writer.write_envelope(&JsonRpcResponse::parse_error(err)).await?;
                            }
                        }
                    }
                }

                Some(response) = response_rx.recv() => {
                    writer.write_envelope(&response).await?;
                }
            }
        }

        if framer.pending() > 0 {
            debug!(
                bytes = framer.pending(),
                "Discarding unterminated input at EOF"
            );
        }

        // Close our sender so the channel ends once every handler task finishes
        drop(response_tx);
        while let Some(response) = response_rx.recv().await {
            writer.write_envelope(&response).await?;
        }

        debug!("Input closed, transport loop finished");
        Ok(())
    }

    fn spawn_dispatch(&self, message: Message, response_tx: mpsc::Sender<JsonRpcResponse>) {
        debug!(method = %message.method, id = %message.id, "Dispatching message");
        let dispatcher = self.dispatcher.clone();
        let id = message.id.clone();
        tokio::spawn(async move {
            let handler = tokio::spawn(async move { dispatcher.dispatch(message).await });
            let response = match handler.await {
                Ok(response) => response,
                Err(err) => {
                    error!(%id, error = %err, "Handler task failed");
                    Some(JsonRpcResponse::error(id, handler_failed(&err)))
                }
            };

            if let Some(response) = response {
                // The receiver lives until every sender is gone, so this only
                // fails if the runner itself bailed out on an I/O error.
                let _ = response_tx.send(response).await;
            }
        });
    }
}

fn handler_failed(err: &JoinError) -> McpError {
    if err.is_panic() {
        McpError::internal("Internal error: request handler panicked")
    } else {
        McpError::internal("Internal error: request handler was cancelled")
    }
}
