//! Post aggregation endpoint
//!
//! `GET /api/posts?tags=a,b&sortBy=likes&direction=desc`
//!
//! The `tags` parameter is required; `sortBy` defaults to `id` and
//! `direction` to `asc` when omitted. Defaults are applied here, before
//! validation, so the pipeline always sees three concrete values.
//! Validation errors map to 400 with a message naming the offending
//! parameter; upstream failures map to 502.

use bytes::Bytes;
use http_body_util::Full;
use hyper::{Response, StatusCode};
use serde::Serialize;
use std::collections::HashMap;
use std::sync::Arc;
use tracing::{debug, info, warn};

use crate::routes::{error_response, json_response};
use crate::server::AppState;
use crate::types::Post;

/// Default sort field when the caller omits `sortBy`
const DEFAULT_SORT_BY: &str = "id";
/// Default direction when the caller omits `direction`
const DEFAULT_DIRECTION: &str = "asc";

/// Response envelope, borrowed from the cached collection
#[derive(Serialize)]
struct PostsBody<'a> {
    posts: &'a [Post],
}

/// Parse query string into key-value map
fn parse_query_params(query: &str) -> HashMap<String, String> {
    if query.is_empty() {
        return HashMap::new();
    }

    query
        .split('&')
        .filter_map(|pair| {
            let mut parts = pair.splitn(2, '=');
            let key = parts.next()?;
            let value = parts.next().unwrap_or("");
            Some((key.to_string(), value.to_string()))
        })
        .collect()
}

/// Handle GET /api/posts
pub async fn handle_posts_request(
    state: Arc<AppState>,
    query: Option<&str>,
) -> Response<Full<Bytes>> {
    let params = parse_query_params(query.unwrap_or(""));
    let tags = params.get("tags").map(String::as_str);
    let sort_by = params
        .get("sortBy")
        .map(String::as_str)
        .unwrap_or(DEFAULT_SORT_BY);
    let direction = params
        .get("direction")
        .map(String::as_str)
        .unwrap_or(DEFAULT_DIRECTION);

    debug!(
        tags = ?tags,
        sort_by = sort_by,
        direction = direction,
        "Posts request"
    );

    match state.service.get_posts(tags, sort_by, direction).await {
        Ok(posts) => {
            info!(count = posts.len(), "Posts request served");
            let body = serde_json::to_vec(&PostsBody {
                posts: posts.as_slice(),
            })
            .unwrap_or_default();
            json_response(body)
        }
        Err(e) if e.is_client_error() => {
            debug!(error = %e, "Rejected posts request");
            error_response(StatusCode::BAD_REQUEST, &e.to_string())
        }
        Err(e) => {
            warn!(error = %e, "Posts request failed upstream");
            error_response(StatusCode::BAD_GATEWAY, &e.to_string())
        }
    }
}
