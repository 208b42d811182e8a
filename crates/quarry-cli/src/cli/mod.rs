use std::path::PathBuf;

use clap::Parser;

pub mod global;

pub use global::{GlobalFlags, OutputFormat};

/// Top-level CLI parser for the `quarry` binary.
///
/// There are no subcommands: running `quarry` performs the whole load.
#[derive(Debug, Parser)]
#[command(
    name = "quarry",
    version,
    about = "Load the developer survey CSV into a normalized relational schema"
)]
pub struct Cli {
    /// Extra TOML configuration layered over the defaults and quarry.toml
    #[arg(short, long)]
    pub config: Option<PathBuf>,

    /// Survey CSV to load (overrides source.path)
    #[arg(short, long)]
    pub source: Option<PathBuf>,

    /// Report format: json, raw
    #[arg(short, long, default_value = "json")]
    pub format: OutputFormat,

    /// Quiet mode (errors only, no spinner)
    #[arg(short, long, conflicts_with = "verbose")]
    pub quiet: bool,

    /// Verbose mode (debug logging)
    #[arg(short, long)]
    pub verbose: bool,
}

impl Cli {
    #[must_use]
    pub fn global_flags(&self) -> GlobalFlags {
        GlobalFlags {
            format: self.format,
            quiet: self.quiet,
            verbose: self.verbose,
            config: self.config.clone(),
            source: self.source.clone(),
        }
    }
}
