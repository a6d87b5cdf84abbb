//! Messages and progress reports exchanged with a running session

use crate::cache::{CacheStats, Resource, ResourceKey};
use crate::error::FetchError;

/// Message delivered to the session by a fetch task
#[derive(Debug)]
pub enum SessionMsg {
    /// A fetch finished, successfully or not
    Arrived {
        key: ResourceKey,
        result: Result<Resource, FetchError>,
    },
}

/// Snapshot handed to progress callbacks while a page is loading
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct LoadProgress {
    /// Fetches spawned but not yet integrated
    pub in_flight: usize,
    /// Cache entry counts
    pub stats: CacheStats,
}

impl LoadProgress {
    pub fn message(&self) -> String {
        match self.in_flight {
            1 => "Waiting for 1 request".to_string(),
            n => format!("Waiting for {} requests", n),
        }
    }
}
