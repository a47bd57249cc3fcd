//! Server configuration from flags and environment variables.

use std::path::PathBuf;
use std::time::Duration;

use clap::Parser;
use page_zen_core::ExtractorConfig;
use page_zen_core::debug::DEFAULT_DEBUG_HTML_PATH;

/// HTTP API for article extraction and Open Graph metadata
#[derive(Parser, Debug, Clone)]
#[command(name = "page-zen-server")]
#[command(version)]
#[command(about = "HTTP API for article extraction and Open Graph metadata", long_about = None)]
pub struct Config {
    /// Port to listen on
    #[arg(long, env = "PORT", default_value_t = 8080)]
    pub port: u16,

    /// Address to bind
    #[arg(long, env = "HOST", default_value = "0.0.0.0")]
    pub host: String,

    /// Deployment environment; "production" switches to plain info-level logs
    #[arg(long = "env", env = "ENV", default_value = "development", value_name = "ENV")]
    pub environment: String,

    /// Log filter, e.g. "debug" or "page_zen_core=debug,info"
    #[arg(long, env = "LOG_LEVEL")]
    pub log_level: Option<String>,

    /// Outbound fetch timeout in seconds
    #[arg(long, env = "FETCH_TIMEOUT", default_value_t = 30, value_name = "SECS")]
    pub fetch_timeout: u64,

    /// Inbound request timeout in seconds; must exceed the fetch timeout
    #[arg(long, env = "REQUEST_TIMEOUT", default_value_t = 35, value_name = "SECS")]
    pub request_timeout: u64,

    /// Where the cleaned HTML of the last extraction is written; empty disables
    #[arg(long, env = "DEBUG_HTML_PATH", default_value = DEFAULT_DEBUG_HTML_PATH, value_name = "FILE")]
    pub debug_html_path: String,

    /// Seconds in-flight requests get to finish on shutdown
    #[arg(long, env = "SHUTDOWN_GRACE", default_value_t = 5, value_name = "SECS")]
    pub shutdown_grace: u64,
}

impl Config {
    /// Rejects settings where the inbound timer would fire before the fetch
    /// timeout, which would cut off the pipeline's own timeout error.
    pub fn validate(&self) -> anyhow::Result<()> {
        if self.request_timeout <= self.fetch_timeout {
            anyhow::bail!(
                "REQUEST_TIMEOUT ({}s) must be greater than FETCH_TIMEOUT ({}s)",
                self.request_timeout,
                self.fetch_timeout
            );
        }
        Ok(())
    }

    pub fn is_production(&self) -> bool {
        self.environment.eq_ignore_ascii_case("production")
    }

    pub fn bind_address(&self) -> String {
        format!("{}:{}", self.host, self.port)
    }

    pub fn request_timeout(&self) -> Duration {
        Duration::from_secs(self.request_timeout)
    }

    pub fn shutdown_grace(&self) -> Duration {
        Duration::from_secs(self.shutdown_grace)
    }

    pub fn debug_html_path(&self) -> Option<PathBuf> {
        let path = self.debug_html_path.trim();
        if path.is_empty() { None } else { Some(PathBuf::from(path)) }
    }

    pub fn extractor_config(&self) -> ExtractorConfig {
        ExtractorConfig::builder()
            .timeout(self.fetch_timeout)
            .debug_html_path(self.debug_html_path())
            .build()
    }
}
