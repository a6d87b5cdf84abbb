//! Session cache store
//!
//! The single source of truth for what the session already knows. Entries
//! move forward only; requests that would move an entry backwards or skip
//! `Pending` are logged and ignored rather than applied.

use crate::cache::entry::{Entry, Resource};
use crate::cache::key::ResourceKey;
use crate::error::FetchError;
use std::collections::HashMap;
use std::fmt;
use tracing::{debug, warn};

/// Per-state entry counts
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct CacheStats {
    pub pending: usize,
    pub ready: usize,
    pub failed: usize,
}

impl fmt::Display for CacheStats {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "{} ready, {} pending, {} failed",
            self.ready, self.pending, self.failed
        )
    }
}

/// Mapping from resource identity to fetch state
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Cache {
    entries: HashMap<ResourceKey, Entry>,
}

impl Cache {
    /// Create an empty cache
    pub fn new() -> Self {
        Self::default()
    }

    /// Current state of a key; unknown keys are `Unrequested`
    pub fn lookup(&self, key: &ResourceKey) -> Entry {
        self.entries.get(key).cloned().unwrap_or_default()
    }

    /// Borrow the entry for a key if one was ever recorded
    pub fn get(&self, key: &ResourceKey) -> Option<&Entry> {
        self.entries.get(key)
    }

    /// The ready value for a key, if any
    pub fn ready(&self, key: &ResourceKey) -> Option<&Resource> {
        match self.entries.get(key) {
            Some(Entry::Ready(value)) => Some(value),
            _ => None,
        }
    }

    /// Move an `Unrequested` key to `Pending`.
    ///
    /// Returns `true` if the entry changed. Keys that are already pending or
    /// settled are left alone.
    pub fn mark_pending(&mut self, key: &ResourceKey) -> bool {
        if self.entries.contains_key(key) {
            return false;
        }
        debug!("{} -> pending", key);
        self.entries.insert(key.clone(), Entry::Pending);
        true
    }

    /// Record a failed fetch for a pending key
    pub fn mark_failed(&mut self, key: &ResourceKey, error: FetchError) -> bool {
        self.settle(key, Entry::Failed(error))
    }

    /// Record a successful fetch for a pending key
    pub fn mark_ready(&mut self, key: &ResourceKey, value: Resource) -> bool {
        if value.kind() != key.kind() {
            warn!(
                "Ignoring {} value delivered for {}, recording it as malformed",
                value.kind(),
                key
            );
            let error = FetchError::malformed(key, format!("expected {} data", key.kind()));
            return self.settle(key, Entry::Failed(error));
        }
        self.settle(key, Entry::Ready(value))
    }

    fn settle(&mut self, key: &ResourceKey, entry: Entry) -> bool {
        match self.entries.get_mut(key) {
            Some(current) if current.is_pending() => {
                debug!("{} -> {}", key, entry);
                *current = entry;
                true
            }
            current => {
                let state = current.map_or("unrequested", |e| e.state_name());
                warn!(
                    "Ignoring {} result for {}: entry is {}, not pending",
                    entry, key, state
                );
                false
            }
        }
    }

    /// Apply an arrived fetch result in place
    pub fn apply_result(&mut self, key: &ResourceKey, result: Result<Resource, FetchError>) -> bool {
        match result {
            Ok(value) => self.mark_ready(key, value),
            Err(error) => self.mark_failed(key, error),
        }
    }

    /// Apply an arrived fetch result and return the updated cache
    pub fn integrate(mut self, key: &ResourceKey, result: Result<Resource, FetchError>) -> Self {
        self.apply_result(key, result);
        self
    }

    /// Keys with a fetch in flight, in key order
    pub fn pending_keys(&self) -> Vec<ResourceKey> {
        let mut keys: Vec<ResourceKey> = self
            .entries
            .iter()
            .filter(|(_, entry)| entry.is_pending())
            .map(|(key, _)| key.clone())
            .collect();
        keys.sort();
        keys
    }

    /// Count entries per state
    pub fn stats(&self) -> CacheStats {
        self.entries
            .values()
            .fold(CacheStats::default(), |mut stats, entry| {
                match entry {
                    Entry::Pending => stats.pending += 1,
                    Entry::Ready(_) => stats.ready += 1,
                    Entry::Failed(_) => stats.failed += 1,
                    Entry::Unrequested => {}
                }
                stats
            })
    }

    /// Number of recorded entries
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}
