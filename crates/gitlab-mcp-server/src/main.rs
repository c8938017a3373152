//! `mcp-server-gitlab`: GitLab merge request tool over MCP stdio.

use anyhow::Context;
use clap::Parser;
use gitlab_mcp_server::{Dispatcher, GitLabClient, SERVER_VERSION, ServerConfig};
use gitlab_mcp_stdio::stdio;
use tracing::info;

#[tokio::main(flavor = "current_thread")]
async fn main() -> anyhow::Result<()> {
    let config = ServerConfig::parse();

    config
        .logging
        .init()
        .context("failed to initialize logging")?;

    config.validate().context("invalid configuration")?;
    let settings = config.gitlab()?;

    let client = GitLabClient::new(settings).context("failed to build GitLab client")?;

    info!(
        version = SERVER_VERSION,
        gitlab = %client.base_url(),
        max_line_length = config.max_line_length,
        "Starting GitLab MCP server"
    );

    stdio::serve(Dispatcher::new(client), config.max_line_length)
        .await
        .context("stdio transport failed")?;

    info!("stdin closed, shutting down");
    Ok(())
}
