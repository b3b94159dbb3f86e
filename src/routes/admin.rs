//! Administrative endpoints
//!
//! `POST /admin/cache/flush` - drop every cached response at once.
//! The scheduled flush task does the same thing on its own timer; this
//! route exists for operators who need a reset now.

use bytes::Bytes;
use http_body_util::Full;
use hyper::Response;
use serde::Serialize;
use std::sync::Arc;
use tracing::info;

use crate::routes::json_response;
use crate::server::AppState;

/// Flush response body
#[derive(Serialize)]
struct FlushResponse {
    flushed: bool,
    entries_cleared: usize,
}

/// Handle POST /admin/cache/flush
pub fn handle_cache_flush(state: Arc<AppState>) -> Response<Full<Bytes>> {
    let entries_cleared = state.cache.invalidate_all();
    info!(entries_cleared = entries_cleared, "Cache flushed on demand");

    let body = serde_json::to_vec(&FlushResponse {
        flushed: true,
        entries_cleared,
    })
    .unwrap_or_default();
    json_response(body)
}
