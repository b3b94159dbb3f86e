//! Status endpoint
//!
//! Runtime stats for operators, including the response cache counters.

use bytes::Bytes;
use http_body_util::Full;
use hyper::Response;
use serde::Serialize;
use std::sync::Arc;

use crate::cache::CacheStats;
use crate::routes::json_response;
use crate::server::AppState;

/// Status response body
#[derive(Serialize)]
struct StatusResponse {
    node_id: String,
    version: &'static str,
    uptime_secs: u64,
    upstream_url: String,
    cache: CacheStats,
}

/// Handle GET /status
pub fn status_check(state: Arc<AppState>) -> Response<Full<Bytes>> {
    let response = StatusResponse {
        node_id: state.args.node_id.to_string(),
        version: env!("CARGO_PKG_VERSION"),
        uptime_secs: state.started_at.elapsed().as_secs(),
        upstream_url: state.args.upstream_url.clone(),
        cache: state.cache.stats(),
    };

    let body = serde_json::to_vec(&response).unwrap_or_default();
    json_response(body)
}
