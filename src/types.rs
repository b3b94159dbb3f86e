//! Shared types for Postern
//!
//! Wire model for catalog posts plus the crate-wide error taxonomy.
//! The `Display` text of each caller-input error doubles as the
//! client-facing message in the JSON error body.

use serde::{Deserialize, Serialize};
use thiserror::Error;

/// A single blog post as the upstream catalog serves it.
///
/// Posts are immutable once fetched - the gateway only changes their
/// membership and position in collections, never their fields.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Post {
    /// Identifier, unique within the catalog
    pub id: u64,
    /// Author display name
    pub author: String,
    /// Author identifier
    pub author_id: u64,
    /// Like count
    pub likes: u64,
    /// Popularity score (fractional, 0.0 - 1.0 from upstream)
    pub popularity: f32,
    /// Read count
    pub reads: u64,
    /// Tags attached to the post, in upstream order
    pub tags: Vec<String>,
}

/// Wire envelope for a post collection: `{"posts": [...]}`.
///
/// Used both for decoding upstream responses and for encoding our own.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct PostList {
    pub posts: Vec<Post>,
}

/// Error types for the gateway
#[derive(Debug, Error)]
pub enum GatewayError {
    /// The tags parameter was absent or empty after trimming
    #[error("tags parameter is required")]
    MissingTags,

    /// The sortBy parameter was not one of id, reads, likes, popularity
    #[error("sortBy parameter is invalid")]
    InvalidSortField,

    /// The direction parameter was not asc or desc
    #[error("direction parameter is invalid")]
    InvalidDirection,

    /// A catalog fetch failed (network, HTTP status, or body decode)
    #[error("upstream fetch failed for tag '{tag}': {reason}")]
    UpstreamFetch { tag: String, reason: String },

    /// Server I/O error (bind, accept)
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),
}

impl GatewayError {
    /// Whether this error was caused by the caller's input.
    ///
    /// Caller errors map to 400, everything else to 5xx.
    pub fn is_client_error(&self) -> bool {
        matches!(
            self,
            GatewayError::MissingTags
                | GatewayError::InvalidSortField
                | GatewayError::InvalidDirection
        )
    }
}

/// Crate-wide result alias
pub type Result<T> = std::result::Result<T, GatewayError>;
