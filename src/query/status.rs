//! Three-way evaluation result

use crate::error::FetchError;

/// Outcome of evaluating a query against a cache snapshot
#[derive(Debug, Clone, PartialEq)]
pub enum Status<T> {
    /// At least one required resource has not arrived yet
    Loading,
    /// A required resource failed
    Failed(FetchError),
    /// Every required resource is available
    Ready(T),
}

impl<T> Status<T> {
    /// Transform a ready value; loading and failure pass through
    pub fn map<U>(self, f: impl FnOnce(T) -> U) -> Status<U> {
        match self {
            Self::Loading => Status::Loading,
            Self::Failed(e) => Status::Failed(e),
            Self::Ready(v) => Status::Ready(f(v)),
        }
    }

    pub fn is_loading(&self) -> bool {
        matches!(self, Self::Loading)
    }

    pub fn is_ready(&self) -> bool {
        matches!(self, Self::Ready(_))
    }

    pub fn is_failed(&self) -> bool {
        matches!(self, Self::Failed(_))
    }

    /// The ready value, if any
    pub fn ready(self) -> Option<T> {
        match self {
            Self::Ready(v) => Some(v),
            _ => None,
        }
    }

    /// `None` while loading, otherwise the settled outcome
    pub fn settled(self) -> Option<Result<T, FetchError>> {
        match self {
            Self::Loading => None,
            Self::Failed(e) => Some(Err(e)),
            Self::Ready(v) => Some(Ok(v)),
        }
    }

    pub fn as_ref(&self) -> Status<&T> {
        match self {
            Self::Loading => Status::Loading,
            Self::Failed(e) => Status::Failed(e.clone()),
            Self::Ready(v) => Status::Ready(v),
        }
    }
}

impl<T> From<Result<T, FetchError>> for Status<T> {
    fn from(result: Result<T, FetchError>) -> Self {
        match result {
            Ok(v) => Self::Ready(v),
            Err(e) => Self::Failed(e),
        }
    }
}
