//! Upstream catalog client
//!
//! One outbound HTTP round trip per tag against the catalog's
//! tag-filtered endpoint. Failures surface as `UpstreamFetch` carrying
//! the failing tag - no retry, no partial result.
//!
//! The `PostSource` trait is the seam between the pipeline and the
//! network, so tests can script a source without standing up a server.

use async_trait::async_trait;
use std::time::Duration;
use tracing::{debug, warn};

use crate::types::{GatewayError, Post, PostList, Result};

/// Anything that can produce the post collection for a single tag
#[async_trait]
pub trait PostSource: Send + Sync {
    async fn fetch_by_tag(&self, tag: &str) -> Result<Vec<Post>>;
}

/// HTTP client for the remote post catalog
#[derive(Debug, Clone)]
pub struct CatalogClient {
    http: reqwest::Client,
    base_url: String,
}

impl CatalogClient {
    /// Build a client against the given base URL.
    ///
    /// The timeout applies per request and surfaces as `UpstreamFetch`
    /// like any other transport failure.
    pub fn new(base_url: &str, timeout: Duration) -> anyhow::Result<Self> {
        let http = reqwest::Client::builder().timeout(timeout).build()?;

        Ok(Self {
            http,
            base_url: base_url.to_string(),
        })
    }

    pub fn base_url(&self) -> &str {
        &self.base_url
    }
}

#[async_trait]
impl PostSource for CatalogClient {
    async fn fetch_by_tag(&self, tag: &str) -> Result<Vec<Post>> {
        let response = self
            .http
            .get(&self.base_url)
            .query(&[("tag", tag)])
            .send()
            .await
            .map_err(|e| {
                warn!(tag = tag, error = %e, "Catalog request failed");
                GatewayError::UpstreamFetch {
                    tag: tag.to_string(),
                    reason: format!("request failed: {e}"),
                }
            })?;

        if !response.status().is_success() {
            warn!(tag = tag, status = %response.status(), "Catalog returned error status");
            return Err(GatewayError::UpstreamFetch {
                tag: tag.to_string(),
                reason: format!("HTTP {} from catalog", response.status()),
            });
        }

        let list: PostList = response.json().await.map_err(|e| {
            warn!(tag = tag, error = %e, "Catalog body decode failed");
            GatewayError::UpstreamFetch {
                tag: tag.to_string(),
                reason: format!("body decode failed: {e}"),
            }
        })?;

        debug!(tag = tag, count = list.posts.len(), "Fetched posts from catalog");
        Ok(list.posts)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_client_keeps_base_url() {
        let client =
            CatalogClient::new("http://localhost:9999/posts", Duration::from_secs(5)).unwrap();
        assert_eq!(client.base_url(), "http://localhost:9999/posts");
    }

    #[tokio::test]
    async fn test_unreachable_catalog_maps_to_upstream_fetch() {
        // Port 1 is never listening; the connect error must carry the tag.
        let client =
            CatalogClient::new("http://127.0.0.1:1/posts", Duration::from_secs(1)).unwrap();

        let err = client.fetch_by_tag("tech").await.unwrap_err();
        match err {
            GatewayError::UpstreamFetch { tag, .. } => assert_eq!(tag, "tech"),
            other => panic!("expected UpstreamFetch, got {other:?}"),
        }
    }
}
