//! CLI argument definitions using clap derive

use crate::cache::PackageName;
use crate::version::VersionRef;
use clap::{ArgAction, Parser, Subcommand, ValueEnum};
use clap_complete::Shell;
use std::path::PathBuf;

/// pkgdocs - Browse package registry documentation
///
/// Loads release lists, READMEs and module docs from the registry,
/// fetching each resource at most once per run.
#[derive(Parser, Debug)]
#[command(name = "pkgdocs")]
#[command(author, version, about, long_about = None)]
pub struct Cli {
    /// Subcommand to execute
    #[command(subcommand)]
    pub command: Commands,

    /// Increase verbosity (-v info, -vv debug)
    #[arg(short, long, global = true, action = ArgAction::Count)]
    pub verbose: u8,

    /// Configuration file path
    #[arg(short, long, global = true, env = "PKGDOCS_CONFIG")]
    pub config: Option<PathBuf>,

    /// Output format for pages
    #[arg(long, global = true, value_enum, default_value = "text")]
    pub format: OutputFormat,
}

/// Available commands
#[derive(Subcommand, Debug)]
pub enum Commands {
    /// List the releases of a package
    Releases(ReleasesArgs),

    /// Show the README of a package version
    Readme(ReadmeArgs),

    /// Show the module index or one module's documentation
    Docs(DocsArgs),

    /// Search the package catalog
    Search(SearchArgs),

    /// Show or edit configuration
    Config(ConfigArgs),

    /// Generate shell completions
    Completions {
        /// Shell type (bash, zsh, fish, powershell, elvish)
        shell: Shell,
    },
}

/// Arguments for the releases command
#[derive(Parser, Debug)]
pub struct ReleasesArgs {
    /// Package name (author/project)
    pub package: PackageName,
}

/// Arguments for the readme command
#[derive(Parser, Debug)]
pub struct ReadmeArgs {
    /// Package name (author/project)
    pub package: PackageName,

    /// Version to show, or "latest"
    #[arg(short = 'V', long, default_value = "latest")]
    pub version: VersionRef,
}

/// Arguments for the docs command
#[derive(Parser, Debug)]
pub struct DocsArgs {
    /// Package name (author/project)
    pub package: PackageName,

    /// Version to show, or "latest"
    #[arg(short = 'V', long, default_value = "latest")]
    pub version: VersionRef,

    /// Show a single module, e.g. Json.Decode
    #[arg(short, long)]
    pub module: Option<String>,
}

/// Arguments for the search command
#[derive(Parser, Debug)]
pub struct SearchArgs {
    /// Text to look for in package names and summaries
    pub term: String,
}

/// Arguments for the config command
#[derive(Parser, Debug)]
pub struct ConfigArgs {
    /// Subcommand for config
    #[command(subcommand)]
    pub action: Option<ConfigAction>,
}

/// Config subcommands
#[derive(Subcommand, Debug)]
pub enum ConfigAction {
    /// Show current configuration
    Show,

    /// Show configuration file path
    Path,

    /// Initialize default configuration
    Init {
        /// Overwrite existing configuration
        #[arg(short, long)]
        force: bool,
    },

    /// Set a configuration value
    Set {
        /// Configuration key (e.g., registry.base_url)
        key: String,
        /// Value to set
        value: String,
    },
}

/// Output format for pages
#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum OutputFormat {
    /// Human-readable text
    Text,
    /// JSON output
    Json,
}
