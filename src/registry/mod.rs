//! Registry access
//!
//! Data types for registry resources, their wire formats, and the
//! [`Fetcher`] implementations that load them.

pub mod fetcher;
pub mod http;
pub mod memory;
pub mod types;
pub mod wire;

pub use fetcher::Fetcher;
pub use http::HttpFetcher;
pub use memory::MemoryFetcher;
pub use types::{BlockKind, DocBlock, ModuleDocs, PackageSummary, Release};
