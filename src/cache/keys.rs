//! Cache key definitions
//!
//! A response is keyed by the exact input parameter tuple. The tags
//! component is the caller's raw string, so tag order and separators
//! matter: "a,b" and "b,a" are different keys on purpose.

use std::fmt;

use crate::catalog::query::{PostQuery, SortDirection, SortField};

/// Cache key for a computed post response
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct RequestKey {
    /// The tags parameter verbatim, no canonicalization
    pub tags: String,
    /// Validated sort field
    pub sort_by: SortField,
    /// Validated sort direction
    pub direction: SortDirection,
}

impl RequestKey {
    pub fn new(tags: &str, sort_by: SortField, direction: SortDirection) -> Self {
        Self {
            tags: tags.to_string(),
            sort_by,
            direction,
        }
    }

    /// Derive the key from a validated query
    pub fn from_query(query: &PostQuery) -> Self {
        Self::new(&query.raw_tags, query.sort_by, query.direction)
    }
}

impl fmt::Display for RequestKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}:{}:{}", self.tags, self.sort_by, self.direction)
    }
}
