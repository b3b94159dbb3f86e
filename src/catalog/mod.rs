//! Tag-indexed post catalog aggregation
//!
//! - `query`: request parameter validation
//! - `client`: upstream catalog fetches (one round trip per tag)
//! - `merge`: duplicate resolution across tag collections
//! - `sort`: stable multi-field ordering
//! - `service`: the fetch-merge-sort pipeline behind `/api/posts`

pub mod client;
pub mod merge;
pub mod query;
pub mod service;
pub mod sort;

pub use client::{CatalogClient, PostSource};
pub use query::{PostQuery, SortDirection, SortField};
pub use service::PostService;
