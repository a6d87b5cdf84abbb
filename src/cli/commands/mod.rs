//! CLI command implementations

pub mod completions;
pub mod config;
pub mod page;

pub use completions::execute as completions;
pub use config::execute as config;
pub use page::execute as page;
