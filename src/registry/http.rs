//! HTTP registry client

use crate::cache::{Resource, ResourceKey};
use crate::config::schema::RegistryConfig;
use crate::error::FetchError;
use crate::registry::fetcher::Fetcher;
use crate::registry::wire;
use async_trait::async_trait;
use std::time::Duration;
use tracing::debug;
use ureq::Agent;

/// Fetches resources from a live registry
///
/// `ureq` is blocking, so each request runs on tokio's blocking pool.
#[derive(Clone)]
pub struct HttpFetcher {
    agent: Agent,
    base_url: String,
    user_agent: String,
}

impl HttpFetcher {
    /// Create a fetcher from registry settings
    pub fn new(config: &RegistryConfig) -> Self {
        let agent: Agent = Agent::config_builder()
            .timeout_global(Some(Duration::from_secs(config.timeout_secs)))
            .http_status_as_error(false)
            .build()
            .into();

        Self {
            agent,
            base_url: config.base_url.trim_end_matches('/').to_string(),
            user_agent: config.user_agent.clone(),
        }
    }

    /// Full URL serving a key
    pub fn url(&self, key: &ResourceKey) -> String {
        format!("{}/{}", self.base_url, wire::endpoint(key))
    }

    fn get(&self, key: &ResourceKey) -> Result<Resource, FetchError> {
        let url = self.url(key);
        debug!("GET {}", url);

        let mut response = self
            .agent
            .get(&url)
            .header("User-Agent", self.user_agent.as_str())
            .call()
            .map_err(|e| FetchError::network(key, e.to_string()))?;

        let status = response.status().as_u16();
        if status == 404 {
            return Err(FetchError::not_found(key));
        }
        if !(200..300).contains(&status) {
            return Err(FetchError::network(key, format!("HTTP {} from {}", status, url)));
        }

        let bytes = response
            .body_mut()
            .read_to_vec()
            .map_err(|e| FetchError::network(key, format!("reading body: {}", e)))?;
        let body = String::from_utf8(bytes)
            .map_err(|e| FetchError::malformed(key, format!("body is not UTF-8: {}", e)))?;

        wire::decode(key, &body)
    }
}

#[async_trait]
impl Fetcher for HttpFetcher {
    async fn fetch(&self, key: &ResourceKey) -> Result<Resource, FetchError> {
        let this = self.clone();
        let owned = key.clone();

        tokio::task::spawn_blocking(move || this.get(&owned))
            .await
            .map_err(|e| FetchError::network(key, format!("fetch task failed: {}", e)))?
    }

    fn source_name(&self) -> &str {
        &self.base_url
    }
}
