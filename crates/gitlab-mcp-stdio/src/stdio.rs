//! STDIO entry point.

use tracing::info;

use crate::error::TransportResult;
use crate::runner::{Dispatch, LineTransportRunner};

/// Serve `dispatcher` over the process's stdin/stdout until stdin closes.
///
/// # Errors
///
/// Returns an error if stdin cannot be read or stdout cannot be written.
pub async fn serve<D: Dispatch>(dispatcher: D, max_line_length: usize) -> TransportResult<()> {
    let runner = LineTransportRunner::new(dispatcher).with_max_line_length(max_line_length);

    info!("MCP server started, waiting for requests");
    runner.run(tokio::io::stdin(), tokio::io::stdout()).await
}
