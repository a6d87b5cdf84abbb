//! In-memory fetcher backed by fixtures

use crate::cache::{Resource, ResourceKey};
use crate::error::FetchError;
use crate::registry::fetcher::Fetcher;
use crate::registry::wire;
use async_trait::async_trait;
use std::collections::HashMap;
use std::sync::Mutex;
use std::time::Duration;

/// Serves fixed responses and counts how often each key is fetched.
/// Keys without a fixture fail with `NotFound`.
#[derive(Default)]
pub struct MemoryFetcher {
    responses: HashMap<ResourceKey, Result<Resource, FetchError>>,
    delays: HashMap<ResourceKey, Duration>,
    calls: Mutex<HashMap<ResourceKey, usize>>,
}

impl MemoryFetcher {
    pub fn new() -> Self {
        Self::default()
    }

    /// Serve a decoded resource for `key`
    pub fn with_resource(mut self, key: ResourceKey, resource: Resource) -> Self {
        self.responses.insert(key, Ok(resource));
        self
    }

    /// Serve a raw registry body for `key`, decoded the same way as HTTP responses
    pub fn with_body(mut self, key: ResourceKey, body: &str) -> Self {
        let decoded = wire::decode(&key, body);
        self.responses.insert(key, decoded);
        self
    }

    /// Fail `key` with `error`
    pub fn with_error(mut self, key: ResourceKey, error: FetchError) -> Self {
        self.responses.insert(key, Err(error));
        self
    }

    /// Hold the response for `key` back by `delay`
    pub fn with_delay(mut self, key: ResourceKey, delay: Duration) -> Self {
        self.delays.insert(key, delay);
        self
    }

    /// Number of fetches issued for `key`
    pub fn calls(&self, key: &ResourceKey) -> usize {
        self.calls
            .lock()
            .unwrap_or_else(|e| e.into_inner())
            .get(key)
            .copied()
            .unwrap_or(0)
    }

    /// Number of fetches issued across all keys
    pub fn total_calls(&self) -> usize {
        self.calls
            .lock()
            .unwrap_or_else(|e| e.into_inner())
            .values()
            .sum()
    }
}

#[async_trait]
impl Fetcher for MemoryFetcher {
    async fn fetch(&self, key: &ResourceKey) -> Result<Resource, FetchError> {
        *self
            .calls
            .lock()
            .unwrap_or_else(|e| e.into_inner())
            .entry(key.clone())
            .or_insert(0) += 1;

        if let Some(delay) = self.delays.get(key) {
            tokio::time::sleep(*delay).await;
        }

        self.responses
            .get(key)
            .cloned()
            .unwrap_or_else(|| Err(FetchError::not_found(key)))
    }

    fn source_name(&self) -> &str {
        "memory"
    }
}
