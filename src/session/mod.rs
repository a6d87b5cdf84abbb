//! Page-loading session
//!
//! A [`Session`] is the single owner of the resource cache. It evaluates
//! queries, hands dispatched keys to a [`Fetcher`](crate::registry::Fetcher)
//! on tokio tasks, and applies the results one message at a time.

pub mod message;
pub mod state;

pub use message::{LoadProgress, SessionMsg};
pub use state::Session;
