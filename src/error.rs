//! Error types for pkgdocs
//!
//! Two layers of errors live here:
//! - [`FetchError`] is the per-resource failure recorded in the cache and
//!   carried by `Status::Failed`. It is `Clone` because one failure can be
//!   observed by many queries.
//! - [`PkgDocsError`] covers everything around the engine: configuration,
//!   argument parsing, IO, and a page that ended in a fetch failure.

use crate::cache::ResourceKey;
use std::fmt;
use std::path::PathBuf;
use thiserror::Error;

/// Result type alias for pkgdocs operations
pub type PkgDocsResult<T> = Result<T, PkgDocsError>;

/// Kind of a fetch failure, independent of the resource it happened on
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ErrorKind {
    /// The resource does not exist
    NotFound,
    /// Transport failure or unexpected HTTP status
    Network,
    /// The response could not be parsed
    Malformed,
}

impl fmt::Display for ErrorKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::NotFound => write!(f, "not found"),
            Self::Network => write!(f, "network"),
            Self::Malformed => write!(f, "malformed"),
        }
    }
}

/// Failure of a single resource fetch
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum FetchError {
    #[error("{resource} not found")]
    NotFound { resource: String },

    #[error("network error fetching {resource}: {reason}")]
    Network { resource: String, reason: String },

    #[error("malformed response for {resource}: {reason}")]
    Malformed { resource: String, reason: String },
}

impl FetchError {
    /// Create a not-found error for a key
    pub fn not_found(key: &ResourceKey) -> Self {
        Self::NotFound {
            resource: key.to_string(),
        }
    }

    /// Create a network error for a key
    pub fn network(key: &ResourceKey, reason: impl Into<String>) -> Self {
        Self::Network {
            resource: key.to_string(),
            reason: reason.into(),
        }
    }

    /// Create a malformed-response error for a key
    pub fn malformed(key: &ResourceKey, reason: impl Into<String>) -> Self {
        Self::Malformed {
            resource: key.to_string(),
            reason: reason.into(),
        }
    }

    /// The kind of failure
    pub fn kind(&self) -> ErrorKind {
        match self {
            Self::NotFound { .. } => ErrorKind::NotFound,
            Self::Network { .. } => ErrorKind::Network,
            Self::Malformed { .. } => ErrorKind::Malformed,
        }
    }

    /// Description of the resource that failed
    pub fn resource(&self) -> &str {
        match self {
            Self::NotFound { resource }
            | Self::Network { resource, .. }
            | Self::Malformed { resource, .. } => resource,
        }
    }
}

/// All errors that can occur in pkgdocs
#[derive(Error, Debug)]
pub enum PkgDocsError {
    // Configuration errors
    #[error("Invalid configuration at {path}: {reason}")]
    ConfigInvalid { path: PathBuf, reason: String },

    #[error("Failed to create config directory {path}: {source}")]
    ConfigDirCreate {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    // Argument errors
    #[error("Invalid package name '{0}', expected author/project")]
    InvalidPackage(String),

    #[error("Invalid version '{input}': {reason}")]
    InvalidVersion { input: String, reason: String },

    // Page errors
    #[error("Page failed to load: {0}")]
    Fetch(#[from] FetchError),

    #[error("Session stalled: page is still loading but no request is in flight")]
    Stalled,

    // IO errors
    #[error("IO error: {context}")]
    Io {
        context: String,
        #[source]
        source: std::io::Error,
    },

    // Serialization errors
    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    #[error("TOML parse error: {0}")]
    TomlParse(#[from] toml::de::Error),

    #[error("TOML serialize error: {0}")]
    TomlSerialize(#[from] toml::ser::Error),

    // General errors
    #[error("{0}")]
    User(String),

    #[error("Internal error: {0}")]
    Internal(String),
}

impl PkgDocsError {
    /// Create an IO error with context
    pub fn io(context: impl Into<String>, source: std::io::Error) -> Self {
        Self::Io {
            context: context.into(),
            source,
        }
    }

    /// Get actionable hint for the error
    pub fn hint(&self) -> Option<&'static str> {
        match self {
            Self::InvalidPackage(_) => Some("Packages are named like elm/core"),
            Self::InvalidVersion { .. } => Some("Use a version like 1.0.5, or 'latest'"),
            Self::Fetch(e) => match e.kind() {
                ErrorKind::NotFound => Some("Check the package name and version: pkgdocs releases <author/project>"),
                ErrorKind::Network => Some("Check your connection or registry.base_url in the config"),
                ErrorKind::Malformed => None,
            },
            Self::ConfigInvalid { .. } => Some("Run: pkgdocs config init --force"),
            _ => None,
        }
    }
}
