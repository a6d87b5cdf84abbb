//! Registry data carried by ready cache entries

use crate::cache::PackageName;
use chrono::{DateTime, Utc};
use semver::Version;
use serde::{Deserialize, Serialize};
use std::fmt;

/// One published release of a package
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Release {
    pub version: Version,
    pub published: DateTime<Utc>,
}

/// Kind of a documented declaration
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum BlockKind {
    Union,
    Alias,
    Value,
    Binop,
}

impl fmt::Display for BlockKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Union => write!(f, "type"),
            Self::Alias => write!(f, "type alias"),
            Self::Value => write!(f, "value"),
            Self::Binop => write!(f, "operator"),
        }
    }
}

/// A single documented declaration inside a module
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct DocBlock {
    pub kind: BlockKind,
    pub name: String,
    pub comment: String,
    /// Rendered signature, e.g. `map : (a -> b) -> List a -> List b`
    pub signature: String,
}

/// Documentation of one module
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ModuleDocs {
    pub name: String,
    pub comment: String,
    pub blocks: Vec<DocBlock>,
}

impl ModuleDocs {
    /// Find a declaration by name
    pub fn block(&self, name: &str) -> Option<&DocBlock> {
        self.blocks.iter().find(|b| b.name == name)
    }
}

/// Catalog entry for one package
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PackageSummary {
    pub name: PackageName,
    #[serde(default)]
    pub summary: String,
    #[serde(default)]
    pub license: String,
    pub version: Version,
}

impl PackageSummary {
    /// Case-insensitive match against name or summary
    pub fn matches(&self, term: &str) -> bool {
        let term = term.to_lowercase();
        self.name.to_string().to_lowercase().contains(&term)
            || self.summary.to_lowercase().contains(&term)
    }
}
