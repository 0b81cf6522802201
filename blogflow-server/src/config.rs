//! Command-line and environment configuration for the server.

use blogflow::observability::LogFormat;
use blogflow::pipeline::FailureMode;
use clap::Parser;

/// Streams two-step blog generation over HTTP.
#[derive(Debug, Clone, Parser)]
#[command(name = "blogflow-server")]
#[command(about = "Streams two-step blog generation over HTTP as ndjson")]
#[command(version)]
pub struct ServerArgs {
    /// Address to bind
    #[arg(long, env = "BLOGFLOW_HOST", default_value = "0.0.0.0")]
    pub host: String,

    /// Port to bind
    #[arg(long, env = "BLOGFLOW_PORT", default_value_t = 8000)]
    pub port: u16,

    /// Log output format (pretty, json)
    #[arg(long, env = "BLOGFLOW_LOG_FORMAT", default_value = "pretty")]
    pub log_format: LogFormat,

    /// What to do when a model call fails (placeholder, fail_fast)
    #[arg(long, env = "BLOGFLOW_FAILURE_MODE", default_value = "placeholder")]
    pub failure_mode: FailureMode,
}

impl ServerArgs {
    /// Returns the `host:port` string to bind.
    #[must_use]
    pub fn bind_target(&self) -> String {
        format!("{}:{}", self.host, self.port)
    }
}
