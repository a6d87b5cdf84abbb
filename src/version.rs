//! Version references
//!
//! A page may ask for "the latest version" of a package. That reference is
//! resolved in two phases: the latest-version leaf is fetched first, and once
//! its cache entry is ready the concrete version replaces the marker for
//! every key built afterwards.

use crate::cache::{Cache, Entry, PackageName, Resource, ResourceKey};
use crate::error::{FetchError, PkgDocsError, PkgDocsResult};
use crate::query::{self, Query};
use semver::Version;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// A version as requested by the user
#[derive(Debug, Clone, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub enum VersionRef {
    #[default]
    Latest,
    Exact(Version),
}

impl fmt::Display for VersionRef {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Latest => write!(f, "latest"),
            Self::Exact(v) => write!(f, "{}", v),
        }
    }
}

impl FromStr for VersionRef {
    type Err = PkgDocsError;

    fn from_str(s: &str) -> PkgDocsResult<Self> {
        let s = s.trim();
        if s.eq_ignore_ascii_case("latest") {
            return Ok(Self::Latest);
        }

        Version::parse(s)
            .map(Self::Exact)
            .map_err(|e| PkgDocsError::InvalidVersion {
                input: s.to_string(),
                reason: e.to_string(),
            })
    }
}

impl TryFrom<String> for VersionRef {
    type Error = PkgDocsError;

    fn try_from(s: String) -> PkgDocsResult<Self> {
        s.parse()
    }
}

impl From<VersionRef> for String {
    fn from(v: VersionRef) -> Self {
        v.to_string()
    }
}

/// A requested version plus the concrete version it resolved to
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct VersionSpec {
    package: PackageName,
    requested: VersionRef,
    resolved: Option<Version>,
}

impl VersionSpec {
    /// Exact requests are resolved immediately; `latest` waits for the cache
    pub fn new(package: PackageName, requested: VersionRef) -> Self {
        let resolved = match &requested {
            VersionRef::Exact(v) => Some(v.clone()),
            VersionRef::Latest => None,
        };
        Self {
            package,
            requested,
            resolved,
        }
    }

    pub fn package(&self) -> &PackageName {
        &self.package
    }

    pub fn requested(&self) -> &VersionRef {
        &self.requested
    }

    pub fn resolved(&self) -> Option<&Version> {
        self.resolved.as_ref()
    }

    /// The query whose completion lets this spec resolve
    pub fn latest_query(&self) -> Query<Option<Version>> {
        query::latest(&self.package).optional()
    }

    /// Fill in the concrete version from a ready latest-version entry.
    ///
    /// Returns `Ok(None)` while the latest version is not known yet, and the
    /// recorded failure once it is known to be unavailable.
    pub fn resolve_from(&mut self, cache: &Cache) -> Result<Option<&Version>, FetchError> {
        if self.resolved.is_none() {
            let key = ResourceKey::latest(&self.package);
            match cache.get(&key) {
                Some(Entry::Ready(Resource::Latest(v))) => self.resolved = Some(v.clone()),
                Some(Entry::Failed(e)) => return Err(e.clone()),
                Some(Entry::Ready(_)) => {
                    return Err(FetchError::malformed(&key, "expected a version"))
                }
                _ => {}
            }
        }
        Ok(self.resolved.as_ref())
    }
}

impl fmt::Display for VersionSpec {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match (&self.requested, &self.resolved) {
            (VersionRef::Latest, Some(v)) => write!(f, "{} {} (latest)", self.package, v),
            (requested, _) => write!(f, "{} {}", self.package, requested),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::ErrorKind;
    use crate::query::{evaluate, Status};
    use std::sync::Arc;

    fn pkg() -> PackageName {
        PackageName::new("elm", "browser")
    }

    #[test]
    fn parse_version_ref() {
        assert_eq!("latest".parse::<VersionRef>().unwrap(), VersionRef::Latest);
        assert_eq!("LATEST".parse::<VersionRef>().unwrap(), VersionRef::Latest);
        assert_eq!(
            "1.0.2".parse::<VersionRef>().unwrap(),
            VersionRef::Exact(Version::new(1, 0, 2))
        );
        assert!("1.0".parse::<VersionRef>().is_err());
    }

    #[test]
    fn exact_spec_is_resolved_up_front() {
        let mut spec = VersionSpec::new(pkg(), VersionRef::Exact(Version::new(1, 0, 2)));
        assert_eq!(spec.resolved(), Some(&Version::new(1, 0, 2)));
        assert_eq!(spec.resolve_from(&Cache::new()).unwrap(), Some(&Version::new(1, 0, 2)));
    }

    #[test]
    fn latest_spec_waits_for_cache() {
        let mut spec = VersionSpec::new(pkg(), VersionRef::Latest);
        let evaluation = evaluate(&spec.latest_query(), Cache::new());
        assert_eq!(evaluation.status, Status::Loading);

        // Pending is not a resolution
        assert_eq!(spec.resolve_from(&evaluation.cache).unwrap(), None);

        let key = ResourceKey::latest(&pkg());
        let cache = evaluation
            .cache
            .integrate(&key, Ok(Resource::Latest(Version::new(1, 0, 2))));
        assert_eq!(spec.resolve_from(&cache).unwrap(), Some(&Version::new(1, 0, 2)));
        assert_eq!(spec.to_string(), "elm/browser 1.0.2 (latest)");
    }

    #[test]
    fn latest_failure_is_reported() {
        let key = ResourceKey::latest(&pkg());
        let mut cache = Cache::new();
        cache.mark_pending(&key);
        let cache = cache.integrate(&key, Err(FetchError::not_found(&key)));

        let mut spec = VersionSpec::new(pkg(), VersionRef::Latest);
        let err = spec.resolve_from(&cache).unwrap_err();
        assert_eq!(err.kind(), ErrorKind::NotFound);
        assert_eq!(spec.resolved(), None);
    }

    #[test]
    fn resolved_version_reuses_ready_entries() {
        let v = Version::new(1, 0, 2);
        let latest = ResourceKey::latest(&pkg());
        let readme = ResourceKey::readme(&pkg(), &v);

        // The readme for 1.0.2 was fetched by an earlier exact-version page
        let mut cache = Cache::new();
        cache.mark_pending(&readme);
        cache.mark_pending(&latest);
        let cache = cache
            .integrate(&readme, Ok(Resource::Readme(Arc::from("# elm/browser"))))
            .integrate(&latest, Ok(Resource::Latest(v.clone())));

        let mut spec = VersionSpec::new(pkg(), VersionRef::Latest);
        let resolved = spec.resolve_from(&cache).unwrap().cloned().unwrap();

        let evaluation = evaluate(&query::readme(&pkg(), &resolved), cache);
        assert!(evaluation.dispatch.is_empty());
        assert_eq!(evaluation.status, Status::Ready(Arc::from("# elm/browser")));
    }
}
