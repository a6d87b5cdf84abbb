//! pkgdocs - Package registry documentation browser
//!
//! CLI entry point that dispatches to subcommands.

use clap::Parser;
use console::style;
use pkgdocs::cli::{commands, Cli, Commands};
use pkgdocs::config::{Config, ConfigManager};
use pkgdocs::error::PkgDocsResult;
use pkgdocs::page::Target;
use std::path::PathBuf;
use std::process::ExitCode;
use tracing::debug;
use tracing_subscriber::EnvFilter;

#[tokio::main]
async fn main() -> ExitCode {
    match run().await {
        Ok(code) => code,
        Err(e) => {
            eprintln!("{} {}", style("Error:").red().bold(), e);
            if let Some(hint) = e.hint() {
                eprintln!("{} {}", style("Hint:").yellow(), hint);
            }
            ExitCode::FAILURE
        }
    }
}

async fn run() -> PkgDocsResult<ExitCode> {
    let cli = Cli::parse();

    let target: Target = match cli.command {
        // Completions need neither config nor logging
        Commands::Completions { shell } => {
            commands::completions(shell, &mut std::io::stdout());
            return Ok(ExitCode::SUCCESS);
        }
        Commands::Config(args) => {
            let (manager, config) = setup(cli.config, cli.verbose).await?;
            commands::config(args, &manager, &config).await?;
            return Ok(ExitCode::SUCCESS);
        }
        Commands::Releases(args) => args.into(),
        Commands::Readme(args) => args.into(),
        Commands::Docs(args) => args.into(),
        Commands::Search(args) => args.into(),
    };

    let (_, config) = setup(cli.config, cli.verbose).await?;
    let loaded = commands::page(target, cli.format, &config).await?;
    Ok(if loaded {
        ExitCode::SUCCESS
    } else {
        ExitCode::FAILURE
    })
}

/// Load configuration and start logging
async fn setup(path: Option<PathBuf>, verbose: u8) -> PkgDocsResult<(ConfigManager, Config)> {
    let manager = match path {
        Some(path) => ConfigManager::with_path(path),
        None => ConfigManager::new(),
    };
    let config = manager.load().await?;

    init_logging(verbose, &config);
    debug!("Using config at {}", manager.path().display());

    if !config.display.color {
        console::set_colors_enabled(false);
        console::set_colors_enabled_stderr(false);
    }
    Ok((manager, config))
}

/// 0 = warn (spinner only), 1 = info, 2+ = debug
fn init_logging(verbose: u8, config: &Config) {
    let filter = match verbose {
        0 => EnvFilter::new("pkgdocs=warn"),
        1 => EnvFilter::new("pkgdocs=info"),
        _ => EnvFilter::new("pkgdocs=debug"),
    };

    let builder = tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .with_target(false)
        .without_time();

    if config.general.log_format == "json" {
        builder.json().init();
    } else {
        builder.init();
    }
}
