//! Documentation pages
//!
//! A [`Target`] names what the user navigated to. [`query_for`] turns it into
//! a [`Query`](crate::query::Query) producing a [`Page`], and [`load`] drives
//! that query through a session, resolving `latest` versions first.

pub mod query;
pub mod render;

pub use query::{load, query_for};
pub use render::render;

use crate::cache::PackageName;
use crate::registry::{ModuleDocs, PackageSummary, Release};
use crate::version::{VersionRef, VersionSpec};
use semver::Version;
use serde::Serialize;
use std::fmt;

/// Navigation target
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Target {
    Releases {
        package: PackageName,
    },
    Readme {
        package: PackageName,
        version: VersionRef,
    },
    Docs {
        package: PackageName,
        version: VersionRef,
        module: Option<String>,
    },
    Search {
        query: String,
    },
}

impl Target {
    /// Version to resolve before the page query can be built
    pub fn version_spec(&self) -> Option<VersionSpec> {
        match self {
            Self::Readme { package, version } | Self::Docs { package, version, .. } => {
                Some(VersionSpec::new(package.clone(), version.clone()))
            }
            Self::Releases { .. } | Self::Search { .. } => None,
        }
    }
}

impl fmt::Display for Target {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Releases { package } => write!(f, "releases of {}", package),
            Self::Readme { package, version } => write!(f, "README of {} {}", package, version),
            Self::Docs {
                package,
                version,
                module: Some(module),
            } => write!(f, "{} in {} {}", module, package, version),
            Self::Docs { package, version, .. } => write!(f, "docs of {} {}", package, version),
            Self::Search { query } => write!(f, "search for \"{}\"", query),
        }
    }
}

/// A fully loaded page
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(tag = "page", rename_all = "snake_case")]
pub enum Page {
    Releases(ReleasesPage),
    Readme(ReadmePage),
    Docs(DocsPage),
    Module(ModulePage),
    Search(SearchPage),
}

impl Page {
    pub fn title(&self) -> String {
        match self {
            Self::Releases(p) => format!("{} releases", p.package),
            Self::Readme(p) => format!("{} {}", p.package, p.version),
            Self::Docs(p) => format!("{} {} modules", p.package, p.version),
            Self::Module(p) => format!("{} ({} {})", p.module.name, p.package, p.version),
            Self::Search(p) => format!("Search: {}", p.query),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ReleasesPage {
    pub package: PackageName,
    /// Oldest first
    pub releases: Vec<Release>,
    /// Missing when the latest version could not be determined
    pub latest: Option<Version>,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ReadmePage {
    pub package: PackageName,
    pub version: Version,
    pub readme: String,
    /// Set when a newer version than the one shown exists
    pub newer: Option<Version>,
}

/// One line of a module index
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ModuleSummary {
    pub name: String,
    pub summary: String,
}

impl ModuleSummary {
    pub fn from_docs(docs: &ModuleDocs) -> Self {
        Self {
            name: docs.name.clone(),
            summary: first_sentence(&docs.comment),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct DocsPage {
    pub package: PackageName,
    pub version: Version,
    pub modules: Vec<ModuleSummary>,
    pub readme: Option<String>,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ModulePage {
    pub package: PackageName,
    pub version: Version,
    pub module: ModuleDocs,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct SearchPage {
    pub query: String,
    pub matches: Vec<PackageSummary>,
}

/// First prose line of a doc comment, skipping headings and `@docs` lists
fn first_sentence(comment: &str) -> String {
    comment
        .lines()
        .map(str::trim)
        .find(|line| !line.is_empty() && !line.starts_with('#') && !line.starts_with("@docs"))
        .map(|line| match line.find(". ") {
            Some(end) => line[..=end].to_string(),
            None => line.to_string(),
        })
        .unwrap_or_default()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn first_sentence_skips_headings() {
        let comment = "\n# Lists\n\nA built-in representation. Fast enough.\n\n@docs List\n";
        assert_eq!(first_sentence(comment), "A built-in representation.");
        assert_eq!(first_sentence("@docs map"), "");
    }

    #[test]
    fn version_spec_only_for_versioned_targets() {
        let package = PackageName::new("elm", "json");
        let readme = Target::Readme {
            package: package.clone(),
            version: VersionRef::Latest,
        };
        let releases = Target::Releases { package };

        assert!(readme.version_spec().is_some());
        assert!(releases.version_spec().is_none());
        assert_eq!(readme.to_string(), "README of elm/json latest");
    }

    #[test]
    fn page_serializes_with_tag() {
        let page = Page::Search(SearchPage {
            query: "json".to_string(),
            matches: vec![],
        });
        let json = serde_json::to_string(&page).unwrap();
        assert!(json.contains(r#""page":"search""#));
    }
}
