//! Postern - aggregating HTTP gateway for a tag-indexed blog post catalog
//!
//! "The small gate beside the great one"
//!
//! Postern sits in front of a remote catalog that serves blog posts by
//! tag. Given one or more tags it fetches the per-tag result sets,
//! deduplicates overlapping posts, sorts the combined set by a
//! caller-chosen field and direction, and caches the computed response
//! so identical requests skip the upstream round trips.
//!
//! ## Services
//!
//! - **Catalog**: per-tag fetches, merge with first-tag-wins duplicate
//!   resolution, stable multi-field sorting
//! - **Cache**: in-memory response memoization keyed by the verbatim
//!   request tuple, flushed wholesale on a daily schedule or on demand
//! - **Server**: hyper http1 gateway exposing the aggregation endpoint
//!   plus ping/health/version/status/admin routes

pub mod cache;
pub mod catalog;
pub mod config;
pub mod routes;
pub mod server;
pub mod types;

pub use config::Args;
pub use server::{run, AppState};
pub use types::{GatewayError, Result};
