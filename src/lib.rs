//! pkgdocs - Package registry documentation browser
//!
//! Pages describe the registry resources they need as composable queries.
//! A session evaluates those queries against a per-run cache, fetches each
//! missing resource exactly once, and re-evaluates as results arrive.

pub mod cache;
pub mod cli;
pub mod config;
pub mod error;
pub mod page;
pub mod query;
pub mod registry;
pub mod session;
pub mod ui;
pub mod version;

pub use error::{PkgDocsError, PkgDocsResult};
