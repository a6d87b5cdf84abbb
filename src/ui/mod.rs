//! UI module for consistent CLI output
//!
//! Uses `cliclack` and `indicatif` for interactive output with automatic
//! fallback to plain text in CI/non-interactive environments.
//!
//! # Example
//!
//! ```rust,ignore
//! use pkgdocs::ui::{self, FetchProgress, UiContext};
//!
//! let ctx = UiContext::detect();
//!
//! let progress = FetchProgress::new(&ctx, "elm/core");
//! let page = page::load(&mut session, &target, |p| progress.update(&p)).await;
//! progress.finish();
//!
//! ui::remark(&session.stats().to_string());
//! ```

mod context;
mod output;
mod progress;

pub use context::UiContext;
pub use output::{error_page, remark, step_ok, step_ok_detail, step_warn_hint};
pub use progress::FetchProgress;
