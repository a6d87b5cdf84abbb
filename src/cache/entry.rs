//! Cache entry states and the values they carry

use crate::cache::key::ResourceKind;
use crate::error::FetchError;
use crate::registry::{ModuleDocs, PackageSummary, Release};
use semver::Version;
use std::fmt;
use std::sync::Arc;

/// A fetched resource value. Payloads are shared so snapshots clone cheaply.
#[derive(Debug, Clone, PartialEq)]
pub enum Resource {
    Releases(Arc<Vec<Release>>),
    Latest(Version),
    Readme(Arc<str>),
    Docs(Arc<Vec<ModuleDocs>>),
    Module(Arc<ModuleDocs>),
    Catalog(Arc<Vec<PackageSummary>>),
}

impl Resource {
    /// The kind of key this value belongs under
    pub fn kind(&self) -> ResourceKind {
        match self {
            Self::Releases(_) => ResourceKind::Releases,
            Self::Latest(_) => ResourceKind::Latest,
            Self::Readme(_) => ResourceKind::Readme,
            Self::Docs(_) => ResourceKind::Docs,
            Self::Module(_) => ResourceKind::Module,
            Self::Catalog(_) => ResourceKind::Catalog,
        }
    }
}

/// Fetch state of one resource
///
/// Transitions only go forward: `Unrequested -> Pending -> Failed | Ready`.
#[derive(Debug, Clone, PartialEq, Default)]
pub enum Entry {
    /// Never asked for
    #[default]
    Unrequested,
    /// A fetch is in flight
    Pending,
    /// The fetch failed; terminal for the session
    Failed(FetchError),
    /// The fetch succeeded
    Ready(Resource),
}

impl Entry {
    /// Whether the entry has reached a final state
    pub fn is_settled(&self) -> bool {
        matches!(self, Self::Failed(_) | Self::Ready(_))
    }

    pub fn is_pending(&self) -> bool {
        matches!(self, Self::Pending)
    }

    /// Short state name for logs
    pub fn state_name(&self) -> &'static str {
        match self {
            Self::Unrequested => "unrequested",
            Self::Pending => "pending",
            Self::Failed(_) => "failed",
            Self::Ready(_) => "ready",
        }
    }
}

impl fmt::Display for Entry {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.state_name())
    }
}
