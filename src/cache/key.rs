//! Resource identities
//!
//! A [`ResourceKey`] names one fetchable piece of registry data. Keys compare
//! structurally, so two pages asking for the same readme share one entry.

use crate::error::{PkgDocsError, PkgDocsResult};
use semver::Version;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// A package identified as `author/project`
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub struct PackageName {
    pub author: String,
    pub project: String,
}

impl PackageName {
    /// Create a package name from its parts
    pub fn new(author: impl Into<String>, project: impl Into<String>) -> Self {
        Self {
            author: author.into(),
            project: project.into(),
        }
    }
}

impl fmt::Display for PackageName {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}/{}", self.author, self.project)
    }
}

impl FromStr for PackageName {
    type Err = PkgDocsError;

    fn from_str(s: &str) -> PkgDocsResult<Self> {
        let s = s.trim();
        let (author, project) = s
            .split_once('/')
            .ok_or_else(|| PkgDocsError::InvalidPackage(s.to_string()))?;

        let valid = |part: &str| {
            !part.is_empty()
                && part
                    .chars()
                    .all(|c| c.is_ascii_alphanumeric() || c == '-' || c == '_' || c == '.')
        };

        if !valid(author) || !valid(project) {
            return Err(PkgDocsError::InvalidPackage(s.to_string()));
        }

        Ok(Self::new(author, project))
    }
}

impl TryFrom<String> for PackageName {
    type Error = PkgDocsError;

    fn try_from(s: String) -> PkgDocsResult<Self> {
        s.parse()
    }
}

impl From<PackageName> for String {
    fn from(name: PackageName) -> Self {
        name.to_string()
    }
}

/// Kind of resource a key refers to
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ResourceKind {
    Releases,
    Latest,
    Readme,
    Docs,
    Module,
    Catalog,
}

impl fmt::Display for ResourceKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Releases => write!(f, "releases"),
            Self::Latest => write!(f, "latest"),
            Self::Readme => write!(f, "readme"),
            Self::Docs => write!(f, "docs"),
            Self::Module => write!(f, "module"),
            Self::Catalog => write!(f, "catalog"),
        }
    }
}

/// Identity of a fetchable resource
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum ResourceKey {
    /// Every published release of a package
    Releases { package: PackageName },
    /// The highest published version of a package
    Latest { package: PackageName },
    /// README of one release
    Readme { package: PackageName, version: Version },
    /// Full module documentation of one release
    Docs { package: PackageName, version: Version },
    /// Documentation of a single module of one release
    Module {
        package: PackageName,
        version: Version,
        module: String,
    },
    /// Summary of every package in the registry
    Catalog,
}

impl ResourceKey {
    pub fn releases(package: &PackageName) -> Self {
        Self::Releases {
            package: package.clone(),
        }
    }

    pub fn latest(package: &PackageName) -> Self {
        Self::Latest {
            package: package.clone(),
        }
    }

    pub fn readme(package: &PackageName, version: &Version) -> Self {
        Self::Readme {
            package: package.clone(),
            version: version.clone(),
        }
    }

    pub fn docs(package: &PackageName, version: &Version) -> Self {
        Self::Docs {
            package: package.clone(),
            version: version.clone(),
        }
    }

    pub fn module(package: &PackageName, version: &Version, module: &str) -> Self {
        Self::Module {
            package: package.clone(),
            version: version.clone(),
            module: module.to_string(),
        }
    }

    /// The kind of value stored under this key
    pub fn kind(&self) -> ResourceKind {
        match self {
            Self::Releases { .. } => ResourceKind::Releases,
            Self::Latest { .. } => ResourceKind::Latest,
            Self::Readme { .. } => ResourceKind::Readme,
            Self::Docs { .. } => ResourceKind::Docs,
            Self::Module { .. } => ResourceKind::Module,
            Self::Catalog => ResourceKind::Catalog,
        }
    }

    /// The package this key belongs to, if any
    pub fn package(&self) -> Option<&PackageName> {
        match self {
            Self::Releases { package }
            | Self::Latest { package }
            | Self::Readme { package, .. }
            | Self::Docs { package, .. }
            | Self::Module { package, .. } => Some(package),
            Self::Catalog => None,
        }
    }
}

impl fmt::Display for ResourceKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Releases { package } => write!(f, "releases of {}", package),
            Self::Latest { package } => write!(f, "latest version of {}", package),
            Self::Readme { package, version } => write!(f, "README of {} {}", package, version),
            Self::Docs { package, version } => write!(f, "docs of {} {}", package, version),
            Self::Module {
                package,
                version,
                module,
            } => write!(f, "module {} of {} {}", module, package, version),
            Self::Catalog => write!(f, "package catalog"),
        }
    }
}
