//! Page commands - load a target and print it

use crate::cli::args::{DocsArgs, OutputFormat, ReadmeArgs, ReleasesArgs, SearchArgs};
use crate::config::Config;
use crate::error::{PkgDocsError, PkgDocsResult};
use crate::page::{self, Page, Target};
use crate::registry::HttpFetcher;
use crate::session::Session;
use crate::ui::{self, FetchProgress, UiContext};
use chrono::Utc;
use std::sync::Arc;
use tracing::debug;

impl From<ReleasesArgs> for Target {
    fn from(args: ReleasesArgs) -> Self {
        Target::Releases {
            package: args.package,
        }
    }
}

impl From<ReadmeArgs> for Target {
    fn from(args: ReadmeArgs) -> Self {
        Target::Readme {
            package: args.package,
            version: args.version,
        }
    }
}

impl From<DocsArgs> for Target {
    fn from(args: DocsArgs) -> Self {
        Target::Docs {
            package: args.package,
            version: args.version,
            module: args.module,
        }
    }
}

impl From<SearchArgs> for Target {
    fn from(args: SearchArgs) -> Self {
        Target::Search { query: args.term }
    }
}

/// Load `target` from the configured registry and print it.
///
/// Returns `Ok(false)` when the page failed and an error page was shown.
pub async fn execute(target: Target, format: OutputFormat, config: &Config) -> PkgDocsResult<bool> {
    let ctx = UiContext::detect();
    let fetcher = Arc::new(HttpFetcher::new(&config.registry));
    let mut session = Session::new(fetcher);
    debug!("Loading {} in session {}", target, session.id());

    let progress = FetchProgress::new(&ctx, &target.to_string());
    let result = page::load(&mut session, &target, |p| progress.update(&p)).await;
    progress.finish();

    let page = match result {
        Ok(page) => page,
        Err(PkgDocsError::Fetch(e)) if format == OutputFormat::Text => {
            let err = PkgDocsError::Fetch(e);
            ui::error_page(&ctx, &target.to_string(), &err.to_string(), err.hint());
            return Ok(false);
        }
        Err(e) => return Err(e),
    };

    print_page(&page, format)?;

    if config.display.show_footer && format == OutputFormat::Text {
        let elapsed = Utc::now() - session.started_at();
        ui::remark(&format!(
            "{} in {}ms",
            session.stats(),
            elapsed.num_milliseconds()
        ));
    }
    Ok(true)
}

fn print_page(page: &Page, format: OutputFormat) -> PkgDocsResult<()> {
    match format {
        OutputFormat::Text => print!("{}", page::render(page)),
        OutputFormat::Json => println!("{}", serde_json::to_string_pretty(page)?),
    }
    Ok(())
}
