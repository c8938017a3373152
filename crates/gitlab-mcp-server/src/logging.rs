//! Logging initialization.
//!
//! stdout is the protocol channel, so every log line goes to stderr.
//! `RUST_LOG` wins over the configured level when set.

use std::io;

use clap::Args;
use tracing_subscriber::prelude::*;
use tracing_subscriber::{EnvFilter, fmt};

/// Logging configuration
#[derive(Args, Debug, Clone, PartialEq, Eq)]
pub struct LoggingConfig {
    /// Log filter used when RUST_LOG is unset (e.g. "info", "gitlab_mcp_server=debug")
    #[arg(long = "log-level", env = "MCP_LOG_LEVEL", default_value = "info")]
    pub level: String,

    /// Emit structured JSON log lines
    #[arg(long = "log-json")]
    pub structured: bool,
}

impl Default for LoggingConfig {
    fn default() -> Self {
        Self {
            level: "info".to_string(),
            structured: false,
        }
    }
}

impl LoggingConfig {
    /// Initialize the global stderr subscriber.
    ///
    /// # Errors
    ///
    /// Returns an error if a global subscriber is already installed.
    pub fn init(&self) -> io::Result<()> {
        let filter =
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(&self.level));
        let subscriber = tracing_subscriber::registry().with(filter);

        if self.structured {
            subscriber
                .with(fmt::layer().json().with_writer(io::stderr))
                .try_init()
                .map_err(|e| io::Error::other(e.to_string()))
        } else {
            subscriber
                .with(fmt::layer().with_writer(io::stderr).with_ansi(false))
                .try_init()
                .map_err(|e| io::Error::other(e.to_string()))
        }
    }
}
