//! Fetch dispatch
//!
//! Turning an `Unrequested` key into a fetch instruction and marking it
//! `Pending` happen in one step, so a key can never have two requests in
//! flight no matter how many queries mention it.

use crate::cache::{Cache, ResourceKey};
use std::fmt;
use tracing::debug;

/// An outbound request to fetch one resource
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct FetchInstruction {
    key: ResourceKey,
}

impl FetchInstruction {
    /// The resource to fetch
    pub fn key(&self) -> &ResourceKey {
        &self.key
    }

    pub fn into_key(self) -> ResourceKey {
        self.key
    }
}

impl fmt::Display for FetchInstruction {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "fetch {}", self.key)
    }
}

/// Produce a fetch instruction for `key` if it has never been requested
pub fn dispatch(cache: &mut Cache, key: &ResourceKey) -> Option<FetchInstruction> {
    if !cache.mark_pending(key) {
        return None;
    }

    debug!("Dispatching fetch for {}", key);
    Some(FetchInstruction { key: key.clone() })
}
