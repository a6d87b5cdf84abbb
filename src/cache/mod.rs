//! Session cache of registry resources
//!
//! Keyed by resource identity rather than by page, so a result that arrives
//! after its page is gone still lands in the right place and serves later
//! pages.
//!
//! # Entry States
//!
//! | State | Meaning | Next |
//! |-------|---------|------|
//! | Unrequested | Never asked for | Pending |
//! | Pending | One fetch in flight | Failed, Ready |
//! | Failed | Fetch failed, kept for the session | - |
//! | Ready | Value available | - |
//!
//! Nothing is ever evicted.

pub mod entry;
pub mod key;
pub mod store;

pub use entry::{Entry, Resource};
pub use key::{PackageName, ResourceKey, ResourceKind};
pub use store::{Cache, CacheStats};
