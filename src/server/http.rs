//! HTTP server implementation
//!
//! Uses hyper http1 with TokioIo for async handling: one task per
//! connection, a hand-rolled route match, JSON responses throughout.

use bytes::Bytes;
use http_body_util::{BodyExt, Full};
use hyper::body::Incoming;
use hyper::server::conn::http1;
use hyper::service::service_fn;
use hyper::{Method, Request, Response, StatusCode};
use hyper_util::rt::TokioIo;
use std::net::SocketAddr;
use std::sync::Arc;
use std::time::{Duration, Instant};
use tokio::net::TcpListener;
use tracing::{debug, error, info};

use crate::cache::{spawn_flush_task, FlushSchedule, ResponseCache};
use crate::catalog::PostService;
use crate::config::Args;
use crate::routes;
use crate::types::GatewayError;

type BoxBody = http_body_util::combinators::BoxBody<Bytes, hyper::Error>;

/// Shared application state
pub struct AppState {
    pub args: Args,
    /// Aggregation pipeline behind /api/posts
    pub service: Arc<PostService>,
    /// Response cache, shared with the flush task and admin routes
    pub cache: Arc<ResponseCache>,
    /// Process start, for uptime reporting
    pub started_at: Instant,
}

impl AppState {
    pub fn new(args: Args, service: Arc<PostService>, cache: Arc<ResponseCache>) -> Self {
        Self {
            args,
            service,
            cache,
            started_at: Instant::now(),
        }
    }
}

/// Run the HTTP server until the process exits
pub async fn run(state: Arc<AppState>) -> Result<(), GatewayError> {
    let listener = TcpListener::bind(state.args.listen).await?;

    info!(
        "Postern listening on {} as node {}",
        state.args.listen, state.args.node_id
    );

    // Start the scheduled cache flush task
    spawn_flush_task(
        Arc::clone(&state.cache),
        FlushSchedule {
            interval: Duration::from_secs(state.args.cache_flush_interval_secs),
            align_midnight: state.args.cache_flush_align_midnight,
        },
    );

    loop {
        match listener.accept().await {
            Ok((stream, addr)) => {
                let state = Arc::clone(&state);
                tokio::spawn(async move {
                    let io = TokioIo::new(stream);

                    let service = service_fn(move |req| {
                        let state = Arc::clone(&state);
                        async move { handle_request(state, addr, req).await }
                    });

                    if let Err(err) = http1::Builder::new().serve_connection(io, service).await {
                        error!("Error serving connection from {}: {:?}", addr, err);
                    }
                });
            }
            Err(e) => {
                error!("Error accepting connection: {:?}", e);
            }
        }
    }
}

/// Route incoming HTTP requests
async fn handle_request(
    state: Arc<AppState>,
    addr: SocketAddr,
    req: Request<Incoming>,
) -> Result<Response<BoxBody>, hyper::Error> {
    let method = req.method().clone();
    let path = req.uri().path().to_string();
    let query = req.uri().query().map(|q| q.to_string());

    debug!("[{}] {} {}", addr, method, path);

    let response = match (method, path.as_str()) {
        // Liveness check, no interaction with the core
        (Method::GET, "/api/ping") => to_boxed(routes::handle_ping()),

        // The aggregation endpoint
        (Method::GET, "/api/posts") => {
            to_boxed(routes::handle_posts_request(Arc::clone(&state), query.as_deref()).await)
        }

        // Health probes
        (Method::GET, "/health") | (Method::GET, "/healthz") => {
            to_boxed(routes::health_check(Arc::clone(&state)))
        }

        // Version info for deployment verification
        (Method::GET, "/version") => to_boxed(routes::version_info()),

        // Runtime stats including cache counters
        (Method::GET, "/status") => to_boxed(routes::status_check(Arc::clone(&state))),

        // Administrative cache reset
        (Method::POST, "/admin/cache/flush") => {
            to_boxed(routes::handle_cache_flush(Arc::clone(&state)))
        }

        _ => to_boxed(not_found()),
    };

    Ok(response)
}

fn not_found() -> Response<Full<Bytes>> {
    Response::builder()
        .status(StatusCode::NOT_FOUND)
        .header("Content-Type", "application/json")
        .body(Full::new(Bytes::from(r#"{"error":"Not found"}"#)))
        .unwrap_or_else(|_| Response::new(Full::new(Bytes::new())))
}

/// Convert a Full<Bytes> body to BoxBody
fn to_boxed(response: Response<Full<Bytes>>) -> Response<BoxBody> {
    response.map(|body| body.map_err(|never| match never {}).boxed())
}
