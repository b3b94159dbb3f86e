//! Health and liveness endpoints
//!
//! - `/api/ping` - liveness check, `{"success": true}`
//! - `/health`, `/healthz` - health probe with service metadata
//! - `/version` - build info for deployment verification
//!
//! None of these touch the aggregation core; the gateway answers them
//! whether or not the upstream catalog is reachable.

use bytes::Bytes;
use http_body_util::Full;
use hyper::Response;
use serde::Serialize;
use std::sync::Arc;

use crate::routes::json_response;
use crate::server::AppState;

/// Ping response body
#[derive(Serialize)]
struct PingResponse {
    success: bool,
}

/// Health response body
#[derive(Serialize)]
pub struct HealthResponse {
    /// Overall health status (true if the service is running)
    pub healthy: bool,
    /// Status string for dashboards
    pub status: &'static str,
    /// Service version
    pub version: &'static str,
    /// Seconds since process start
    pub uptime: u64,
    /// Current timestamp
    pub timestamp: String,
    /// Node identifier
    pub node_id: String,
    /// Cache status
    pub cache: CacheStatus,
}

/// Cache block of the health response
#[derive(Serialize)]
pub struct CacheStatus {
    pub enabled: bool,
    pub entries: usize,
}

/// Version response body
#[derive(Serialize)]
struct VersionResponse {
    version: &'static str,
    commit: &'static str,
    commit_full: &'static str,
    build_time: &'static str,
    service: &'static str,
}

/// Handle GET /api/ping
pub fn handle_ping() -> Response<Full<Bytes>> {
    let body = serde_json::to_vec(&PingResponse { success: true }).unwrap_or_default();
    json_response(body)
}

/// Handle GET /health and /healthz
pub fn health_check(state: Arc<AppState>) -> Response<Full<Bytes>> {
    let response = HealthResponse {
        healthy: true,
        status: "online",
        version: env!("CARGO_PKG_VERSION"),
        uptime: state.started_at.elapsed().as_secs(),
        timestamp: chrono::Utc::now().to_rfc3339(),
        node_id: state.args.node_id.to_string(),
        cache: CacheStatus {
            enabled: true,
            entries: state.cache.len(),
        },
    };

    let body = serde_json::to_vec(&response).unwrap_or_default();
    json_response(body)
}

/// Handle GET /version
pub fn version_info() -> Response<Full<Bytes>> {
    let response = VersionResponse {
        version: env!("CARGO_PKG_VERSION"),
        commit: option_env!("GIT_COMMIT_SHORT").unwrap_or("unknown"),
        commit_full: option_env!("GIT_COMMIT_FULL").unwrap_or("unknown"),
        build_time: option_env!("BUILD_TIMESTAMP").unwrap_or("unknown"),
        service: "postern",
    };

    let body = serde_json::to_vec(&response).unwrap_or_default();
    json_response(body)
}
