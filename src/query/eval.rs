//! Query evaluation
//!
//! `evaluate` walks a query tree against a cache snapshot and returns the
//! updated cache, the fetches to issue, and the status of the whole tree. The
//! cache is threaded through the walk, so a key that appears twice in one
//! tree is dispatched once: the second leaf already sees it as pending.

use crate::cache::{Cache, ResourceKey};
use crate::query::dispatch::{dispatch, FetchInstruction};
use crate::query::status::Status;
use crate::query::tree::Query;

/// State threaded through one evaluation
pub(crate) struct EvalContext {
    cache: Cache,
    dispatch: Vec<FetchInstruction>,
}

impl EvalContext {
    fn new(cache: Cache) -> Self {
        Self {
            cache,
            dispatch: Vec::new(),
        }
    }

    /// Dispatch `key` if it has never been requested
    pub(crate) fn request(&mut self, key: &ResourceKey) {
        if let Some(instruction) = dispatch(&mut self.cache, key) {
            self.dispatch.push(instruction);
        }
    }

    pub(crate) fn cache(&self) -> &Cache {
        &self.cache
    }
}

/// Result of evaluating a query
#[derive(Debug, Clone, PartialEq)]
pub struct Evaluation<T> {
    /// The cache with newly dispatched keys marked pending
    pub cache: Cache,
    /// Fetches to issue, in tree order
    pub dispatch: Vec<FetchInstruction>,
    /// Status of the whole tree
    pub status: Status<T>,
}

/// Evaluate `query` against `cache`
pub fn evaluate<T>(query: &Query<T>, cache: Cache) -> Evaluation<T> {
    let mut cx = EvalContext::new(cache);
    let status = query.eval(&mut cx);

    Evaluation {
        cache: cx.cache,
        dispatch: cx.dispatch,
        status,
    }
}
