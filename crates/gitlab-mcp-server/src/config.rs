//! Startup configuration.
//!
//! Everything comes from the command line or the environment. The two GitLab
//! values are required; the server refuses to start without them.

use std::fmt;

use clap::Parser;
use gitlab_mcp_stdio::DEFAULT_MAX_LINE_LENGTH;
use url::Url;

use crate::logging::LoggingConfig;

/// Server configuration
#[derive(Parser, Clone, PartialEq, Eq)]
#[command(
    name = "mcp-server-gitlab",
    version,
    about = "MCP stdio server that creates GitLab merge requests"
)]
pub struct ServerConfig {
    /// GitLab server address, e.g. https://gitlab.example.com
    #[arg(long = "gitlab-base-url", env = "GITLAB_BASE_URL", value_name = "URL")]
    pub gitlab_base_url: String,

    /// GitLab access token sent as PRIVATE-TOKEN
    #[arg(
        long = "gitlab-token",
        env = "GITLAB_TOKEN",
        value_name = "TOKEN",
        hide_env_values = true
    )]
    pub gitlab_token: String,

    /// Longest accepted input line in bytes
    #[arg(long, env = "MCP_MAX_LINE_LENGTH", default_value_t = DEFAULT_MAX_LINE_LENGTH)]
    pub max_line_length: usize,

    /// Logging options
    #[command(flatten)]
    pub logging: LoggingConfig,
}

impl fmt::Debug for ServerConfig {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("ServerConfig")
            .field("gitlab_base_url", &self.gitlab_base_url)
            .field("gitlab_token", &"<redacted>")
            .field("max_line_length", &self.max_line_length)
            .field("logging", &self.logging)
            .finish()
    }
}

/// Configuration error types
#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    /// A required value was empty
    #[error("{0} must not be empty")]
    Empty(&'static str),

    /// The base URL did not parse
    #[error("GITLAB_BASE_URL is not a valid URL: {0}")]
    InvalidBaseUrl(#[from] url::ParseError),

    /// The base URL is not http(s)
    #[error("GITLAB_BASE_URL must use http or https, got '{0}'")]
    UnsupportedScheme(String),

    /// The line cap was zero
    #[error("max line length must be greater than zero")]
    InvalidLineLimit,
}

/// Validated connection settings for the GitLab client.
#[derive(Clone, PartialEq, Eq)]
pub struct GitLabSettings {
    /// GitLab base URL
    pub base_url: Url,
    /// Access token
    pub token: String,
}

impl fmt::Debug for GitLabSettings {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("GitLabSettings")
            .field("base_url", &self.base_url.as_str())
            .field("token", &"<redacted>")
            .finish()
    }
}

impl ServerConfig {
    /// Check the values clap cannot check on its own.
    ///
    /// # Errors
    ///
    /// Returns a [`ConfigError`] describing the first invalid value.
    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.max_line_length == 0 {
            return Err(ConfigError::InvalidLineLimit);
        }
        self.gitlab().map(|_| ())
    }

    /// Validated GitLab settings.
    ///
    /// # Errors
    ///
    /// Returns a [`ConfigError`] if either value is blank or the URL is not an
    /// absolute http(s) URL.
    pub fn gitlab(&self) -> Result<GitLabSettings, ConfigError> {
        let base_url = self.gitlab_base_url.trim();
        if base_url.is_empty() {
            return Err(ConfigError::Empty("GITLAB_BASE_URL"));
        }
        let token = self.gitlab_token.trim();
        if token.is_empty() {
            return Err(ConfigError::Empty("GITLAB_TOKEN"));
        }

        let base_url = Url::parse(base_url)?;
        if !matches!(base_url.scheme(), "http" | "https") {
            return Err(ConfigError::UnsupportedScheme(base_url.scheme().to_string()));
        }

        Ok(GitLabSettings {
            base_url,
            token: token.to_string(),
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn parse(args: &[&str]) -> Result<ServerConfig, clap::Error> {
        let mut argv = vec!["mcp-server-gitlab"];
        argv.extend_from_slice(args);
        ServerConfig::try_parse_from(argv)
    }

    #[test]
    fn test_parse_flags() {
        let config = parse(&[
            "--gitlab-base-url",
            "https://gitlab.example.com",
            "--gitlab-token",
            "glpat-abc",
        ])
        .unwrap();
        assert_eq!(config.max_line_length, DEFAULT_MAX_LINE_LENGTH);
        assert_eq!(config.logging, LoggingConfig::default());

        let settings = config.gitlab().unwrap();
        assert_eq!(settings.base_url.as_str(), "https://gitlab.example.com/");
        assert_eq!(settings.token, "glpat-abc");
        assert!(config.validate().is_ok());
    }

    #[test]
    fn test_logging_flags() {
        let config = parse(&[
            "--gitlab-base-url",
            "https://gitlab.example.com",
            "--gitlab-token",
            "t",
            "--log-level",
            "debug",
            "--log-json",
        ])
        .unwrap();
        assert_eq!(config.logging.level, "debug");
        assert!(config.logging.structured);
    }

    #[test]
    fn test_blank_values_rejected() {
        let config = parse(&["--gitlab-base-url", "  ", "--gitlab-token", "t"]).unwrap();
        assert!(matches!(
            config.gitlab(),
            Err(ConfigError::Empty("GITLAB_BASE_URL"))
        ));

        let config = parse(&[
            "--gitlab-base-url",
            "https://gitlab.example.com",
            "--gitlab-token",
            "",
        ])
        .unwrap();
        assert!(matches!(
            config.gitlab(),
            Err(ConfigError::Empty("GITLAB_TOKEN"))
        ));
    }

    #[test]
    fn test_bad_urls_rejected() {
        let config = parse(&["--gitlab-base-url", "gitlab.example.com", "--gitlab-token", "t"])
            .unwrap();
        assert!(matches!(
            config.gitlab(),
            Err(ConfigError::InvalidBaseUrl(_))
        ));

        let config = parse(&["--gitlab-base-url", "ftp://gitlab.example.com", "--gitlab-token", "t"])
            .unwrap();
        assert!(matches!(
            config.gitlab(),
            Err(ConfigError::UnsupportedScheme(scheme)) if scheme == "ftp"
        ));
    }

    #[test]
    fn test_zero_line_limit_rejected() {
        let config = parse(&[
            "--gitlab-base-url",
            "https://gitlab.example.com",
            "--gitlab-token",
            "t",
            "--max-line-length",
            "0",
        ])
        .unwrap();
        assert!(matches!(config.validate(), Err(ConfigError::InvalidLineLimit)));
    }

    #[test]
    fn test_debug_redacts_token() {
        let config = parse(&[
            "--gitlab-base-url",
            "https://gitlab.example.com",
            "--gitlab-token",
            "glpat-very-secret",
        ])
        .unwrap();
        let rendered = format!("{config:?}");
        assert!(!rendered.contains("glpat-very-secret"));
    }
}
