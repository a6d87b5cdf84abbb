//! Output functions for consistent CLI formatting

use super::context::UiContext;
use console::style;

/// Display an error page for a target that failed to load
pub fn error_page(ctx: &UiContext, title: &str, message: &str, hint: Option<&str>) {
    if ctx.use_fancy_output() {
        cliclack::intro(style(title).cyan().bold()).ok();
        cliclack::log::error(message).ok();
        match hint {
            Some(hint) => cliclack::outro(style(hint).dim()).ok(),
            None => cliclack::outro(style("Page unavailable").red()).ok(),
        };
    } else {
        eprintln!("{}", style(title).cyan().bold());
        eprintln!("  {} {}", style("[FAIL]").red(), message);
        if let Some(hint) = hint {
            eprintln!("  {}", style(hint).dim());
        }
    }
}

/// Display a success step with detail
pub fn step_ok_detail(ctx: &UiContext, message: &str, detail: &str) {
    if ctx.use_fancy_output() {
        cliclack::log::success(format!("{} ({})", message, style(detail).dim())).ok();
    } else {
        println!("  {} {} ({})", style("[OK]").green(), message, detail);
    }
}

/// Display a success step
pub fn step_ok(ctx: &UiContext, message: &str) {
    if ctx.use_fancy_output() {
        cliclack::log::success(message).ok();
    } else {
        println!("  {} {}", style("[OK]").green(), message);
    }
}

/// Display a warning step with hint
pub fn step_warn_hint(ctx: &UiContext, message: &str, hint: &str) {
    if ctx.use_fancy_output() {
        cliclack::log::warning(format!("{} - {}", message, style(hint).dim())).ok();
    } else {
        println!("  {} {} - {}", style("[WARN]").yellow(), message, hint);
    }
}

/// Display a dim remark on stderr, e.g. a page footer
pub fn remark(message: &str) {
    eprintln!("{}", style(message).dim());
}
