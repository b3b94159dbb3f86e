//! Configuration for Postern
//!
//! CLI arguments and environment variable handling using clap.

use clap::Parser;
use std::net::SocketAddr;
use uuid::Uuid;

/// Postern - aggregating HTTP gateway for a tag-indexed blog post catalog
#[derive(Parser, Debug, Clone)]
#[command(name = "postern")]
#[command(about = "Aggregating HTTP gateway for a tag-indexed blog post catalog")]
pub struct Args {
    /// Unique node identifier for this gateway instance
    #[arg(long, env = "NODE_ID", default_value_t = Uuid::new_v4())]
    pub node_id: Uuid,

    /// Address to listen on
    #[arg(long, env = "LISTEN", default_value = "0.0.0.0:8080")]
    pub listen: SocketAddr,

    /// Base URL of the upstream catalog's tag-filtered endpoint.
    /// The tag is appended as a `?tag=` query parameter.
    #[arg(
        long,
        env = "UPSTREAM_URL",
        default_value = "https://api.hatchways.io/assessment/blog/posts"
    )]
    pub upstream_url: String,

    /// Upstream request timeout in milliseconds
    #[arg(long, env = "REQUEST_TIMEOUT_MS", default_value = "30000")]
    pub request_timeout_ms: u64,

    /// Interval between full cache flushes in seconds
    #[arg(long, env = "CACHE_FLUSH_INTERVAL_SECS", default_value = "86400")]
    pub cache_flush_interval_secs: u64,

    /// Align the first cache flush to the next UTC midnight.
    /// When false, the first flush fires one full interval after startup.
    #[arg(long, env = "CACHE_FLUSH_ALIGN_MIDNIGHT", default_value = "true")]
    pub cache_flush_align_midnight: bool,

    /// Log level (trace, debug, info, warn, error)
    #[arg(long, env = "LOG_LEVEL", default_value = "info")]
    pub log_level: String,
}

impl Args {
    /// Validate configuration
    pub fn validate(&self) -> Result<(), String> {
        if self.upstream_url.trim().is_empty() {
            return Err("UPSTREAM_URL must not be empty".to_string());
        }

        if !self.upstream_url.starts_with("http://") && !self.upstream_url.starts_with("https://") {
            return Err("UPSTREAM_URL must be an http:// or https:// URL".to_string());
        }

        if self.cache_flush_interval_secs == 0 {
            return Err("CACHE_FLUSH_INTERVAL_SECS must be greater than zero".to_string());
        }

        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn test_args() -> Args {
        Args::parse_from(["postern"])
    }

    #[test]
    fn test_defaults_validate() {
        let args = test_args();
        assert!(args.validate().is_ok());
        assert_eq!(args.request_timeout_ms, 30_000);
        assert_eq!(args.cache_flush_interval_secs, 86_400);
        assert!(args.cache_flush_align_midnight);
    }

    #[test]
    fn test_rejects_non_http_upstream() {
        let mut args = test_args();
        args.upstream_url = "ftp://catalog.example".to_string();
        assert!(args.validate().is_err());
    }

    #[test]
    fn test_rejects_zero_flush_interval() {
        let mut args = test_args();
        args.cache_flush_interval_secs = 0;
        assert!(args.validate().is_err());
    }
}
