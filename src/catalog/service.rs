//! Post aggregation pipeline
//!
//! The orchestrator behind `GET /api/posts`: validate the parameters,
//! consult the response cache, and on a miss fetch every requested tag,
//! merge the collections, and sort the result.
//!
//! A single-tag request with the default order (id ascending) skips
//! merge and sort entirely and returns the upstream order untouched.
//! That shortcut result is cached like any other.

use futures::future;
use std::sync::Arc;
use tracing::debug;

use crate::cache::{RequestKey, ResponseCache};
use crate::catalog::client::PostSource;
use crate::catalog::merge::merge_collections;
use crate::catalog::query::PostQuery;
use crate::catalog::sort::sort_posts;
use crate::types::{Post, Result};

/// Aggregation service over a post source and a response cache
pub struct PostService {
    source: Arc<dyn PostSource>,
    cache: Arc<ResponseCache>,
}

impl PostService {
    pub fn new(source: Arc<dyn PostSource>, cache: Arc<ResponseCache>) -> Self {
        Self { source, cache }
    }

    pub fn cache(&self) -> &Arc<ResponseCache> {
        &self.cache
    }

    /// Resolve a post request.
    ///
    /// Validation failures surface immediately and are never cached;
    /// computed responses land in the cache under the verbatim
    /// parameter tuple.
    pub async fn get_posts(
        &self,
        tags: Option<&str>,
        sort_by: &str,
        direction: &str,
    ) -> Result<Arc<Vec<Post>>> {
        let query = PostQuery::parse(tags, sort_by, direction)?;
        let key = RequestKey::from_query(&query);

        let source = Arc::clone(&self.source);
        self.cache
            .get_or_compute(key, || Self::compute(source, query))
            .await
    }

    /// Fetch, merge, and sort for a cache miss.
    ///
    /// Fetches run concurrently but `try_join_all` keeps the results in
    /// tag-list order, which is what the merge tie-break depends on.
    /// The first fetch failure aborts the whole request.
    async fn compute(source: Arc<dyn PostSource>, query: PostQuery) -> Result<Vec<Post>> {
        let fetches = query.tags.iter().map(|tag| source.fetch_by_tag(tag));
        let mut collections = future::try_join_all(fetches).await?;

        if collections.len() == 1 && query.is_default_order() {
            debug!(tags = %query.raw_tags, "Single tag with default order, returning upstream order");
            return Ok(collections.remove(0));
        }

        let merged = merge_collections(collections);
        debug!(
            tags = %query.raw_tags,
            sort_by = %query.sort_by,
            direction = %query.direction,
            merged = merged.len(),
            "Merged tag collections"
        );

        Ok(sort_posts(merged, query.sort_by, query.direction))
    }
}
