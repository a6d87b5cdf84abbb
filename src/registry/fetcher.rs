//! Fetch abstraction
//!
//! The engine never performs IO itself. A session hands each dispatched key
//! to a [`Fetcher`], which answers with a decoded resource or a typed error.

use crate::cache::{Resource, ResourceKey};
use crate::error::FetchError;
use async_trait::async_trait;

/// Source of registry resources
///
/// Implementations:
/// - [`HttpFetcher`](super::HttpFetcher): the live registry over HTTP
/// - [`MemoryFetcher`](super::MemoryFetcher): in-memory fixtures
#[async_trait]
pub trait Fetcher: Send + Sync {
    /// Fetch and decode one resource
    async fn fetch(&self, key: &ResourceKey) -> Result<Resource, FetchError>;

    /// Human-readable source name for logs
    fn source_name(&self) -> &str;
}
