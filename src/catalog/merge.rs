//! Multi-tag collection merge
//!
//! Combines per-tag collections into one set with each post identifier
//! appearing exactly once. When the same identifier shows up under more
//! than one tag, the copy from the earliest collection in the input
//! sequence wins and later duplicates are dropped.

use std::collections::HashSet;

use crate::types::Post;

/// Merge per-tag collections, first collection wins on duplicate ids.
///
/// Output order is first-seen order. The user-visible order is decided
/// by the sorter afterwards.
pub fn merge_collections(collections: Vec<Vec<Post>>) -> Vec<Post> {
    let mut seen = HashSet::new();
    let mut merged = Vec::new();

    for posts in collections {
        for post in posts {
            if seen.insert(post.id) {
                merged.push(post);
            }
        }
    }

    merged
}
