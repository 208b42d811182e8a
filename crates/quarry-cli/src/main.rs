use clap::Parser;

mod bootstrap;
mod cli;
mod output;
mod pipeline;
mod progress;

/// Exit status when the run finished but some dimension, phase, or row failed.
const EXIT_PARTIAL: i32 = 2;

#[tokio::main(flavor = "current_thread")]
async fn main() {
    match run().await {
        Ok(true) => {}
        Ok(false) => std::process::exit(EXIT_PARTIAL),
        Err(error) => {
            eprintln!("quarry error: {error:#}");
            std::process::exit(1);
        }
    }
}

/// Run the load and print the report. `Ok(false)` means a partial run.
async fn run() -> anyhow::Result<bool> {
    let cli = cli::Cli::parse();
    init_tracing(cli.quiet, cli.verbose)?;
    let flags = cli.global_flags();

    let config = bootstrap::load_config(&flags)?;
    let report = pipeline::run(&config, progress::enabled(flags.quiet)).await?;
    output::output(&report, flags.format)?;

    if !report.is_clean() {
        tracing::warn!(failures = report.failure_count(), "load finished with failures");
    }
    Ok(report.is_clean())
}

fn init_tracing(quiet: bool, verbose: bool) -> anyhow::Result<()> {
    let level = if quiet {
        "error"
    } else if verbose {
        "debug"
    } else {
        "warn"
    };

    let filter = tracing_subscriber::EnvFilter::try_from_env("QUARRY_LOG")
        .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new(level));

    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .try_init()
        .map_err(|error| anyhow::anyhow!("failed to initialize tracing subscriber: {error}"))?;

    Ok(())
}
