//! Line framing over an arbitrarily chunked byte stream.
//!
//! [`LineFramer`] owns the carry-over buffer between reads, so it can be fed
//! any chunk sequence in tests without touching real stdio.

use bytes::BytesMut;
use thiserror::Error;
use tokio_util::codec::{Decoder, LinesCodec, LinesCodecError};
use tracing::trace;

/// Default cap on a single line (10 MiB).
pub const DEFAULT_MAX_LINE_LENGTH: usize = 10 * 1024 * 1024;

/// A line that could not be framed.
///
/// Both variants consume the offending line; framing resumes with the next one.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum FrameError {
    /// The line grew past the configured cap before its terminator arrived.
    #[error("Line exceeds maximum length of {max} bytes")]
    LineTooLong {
        /// Configured cap
        max: usize,
    },

    /// The line is not valid UTF-8.
    #[error("Line is not valid UTF-8")]
    InvalidUtf8,
}

/// Splits a byte stream into newline-terminated text lines.
///
/// - a line is emitted only once its `\n` has been seen (`\r\n` is accepted)
/// - lines come out in arrival order, regardless of chunk boundaries
/// - blank lines are dropped
/// - a line longer than the cap yields one [`FrameError::LineTooLong`] and is
///   discarded through its terminator, so the buffer never grows unbounded
///
/// ```rust
/// use gitlab_mcp_stdio::LineFramer;
///
/// let mut framer = LineFramer::new();
/// assert!(framer.push(b"{\"id\":").is_empty());
/// let lines = framer.push(b"1}\n\n{\"id\":2}\n{");
/// assert_eq!(lines, vec![Ok("{\"id\":1}".to_string()), Ok("{\"id\":2}".to_string())]);
/// assert_eq!(framer.pending(), 1);
/// ```
#[derive(Debug)]
pub struct LineFramer {
    codec: LinesCodec,
    buffer: BytesMut,
}

impl Default for LineFramer {
    fn default() -> Self {
        Self::new()
    }
}

impl LineFramer {
    /// Create a framer with [`DEFAULT_MAX_LINE_LENGTH`].
    #[must_use]
    pub fn new() -> Self {
        Self::with_max_length(DEFAULT_MAX_LINE_LENGTH)
    }

    /// Create a framer with a custom line cap.
    #[must_use]
    pub fn with_max_length(max_length: usize) -> Self {
        Self {
            codec: LinesCodec::new_with_max_length(max_length),
            buffer: BytesMut::new(),
        }
    }

    /// Configured line cap in bytes.
    #[must_use]
    pub fn max_length(&self) -> usize {
        self.codec.max_length()
    }

    /// Bytes received but not yet terminated.
    #[must_use]
    pub fn pending(&self) -> usize {
        self.buffer.len()
    }

    /// Append a chunk and return every line it completed.
    pub fn push(&mut self, chunk: &[u8]) -> Vec<Result<String, FrameError>> {
        self.buffer.extend_from_slice(chunk);

        let mut frames = Vec::new();
        loop {
            match self.codec.decode(&mut self.buffer) {
                Ok(Some(line)) => {
                    if line.trim().is_empty() {
                        trace!("Skipping blank line");
                        continue;
                    }
                    frames.push(Ok(line));
                }
                Ok(None) => break,
                Err(LinesCodecError::MaxLineLengthExceeded) => {
                    frames.push(Err(FrameError::LineTooLong {
                        max: self.max_length(),
                    }));
                }
                // LinesCodec only reports I/O errors for invalid UTF-8 when decoding a buffer
                Err(LinesCodecError::Io(_)) => frames.push(Err(FrameError::InvalidUtf8)),
            }
        }
        frames
    }
}
