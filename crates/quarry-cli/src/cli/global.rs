use std::path::PathBuf;

use clap::ValueEnum;

/// How the run report is printed on stdout.
#[derive(Clone, Copy, Debug, Eq, PartialEq, ValueEnum)]
pub enum OutputFormat {
    Json,
    Raw,
}

/// Flags shared by bootstrap, progress, and output.
#[derive(Clone, Debug)]
pub struct GlobalFlags {
    pub format: OutputFormat,
    pub quiet: bool,
    pub verbose: bool,
    pub config: Option<PathBuf>,
    pub source: Option<PathBuf>,
}
