//! P2000 notifier CLI
//!
//! Meant to be started by an external scheduler such as cron. One
//! invocation performs one fetch/diff/deliver pass.

use std::path::PathBuf;
use std::process::ExitCode;

use clap::Parser;
use p2000::{
    error::Result,
    models::{Config, RunOptions},
    pipeline,
    utils::executable_dir,
};

/// p2000 - Dutch emergency services pager notifier
#[derive(Parser, Debug)]
#[command(name = "p2000", version, about = "Show new P2000 pager messages")]
struct Cli {
    /// Number of records to render per run
    #[arg(short, long, default_value_t = 5)]
    lines: usize,

    /// Security region code (looked up as regions.region<code>)
    #[arg(short, long, default_value = "40")]
    region: String,

    /// Send notifications with Telegram instead of printing them
    #[arg(short, long)]
    telegram: bool,

    /// Path to the config file (default: p2000.toml next to the binary)
    #[arg(short, long)]
    config: Option<PathBuf>,

    /// Directory holding the state files (default: next to the binary)
    #[arg(long)]
    state_dir: Option<PathBuf>,

    /// Enable verbose logging
    #[arg(short, long)]
    verbose: bool,
}

/// Initialize logging based on verbosity flag.
fn init_logging(verbose: bool) {
    let level = if verbose { "debug" } else { "info" };
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or(level))
        .format_timestamp_secs()
        .init();
}

async fn run(cli: Cli) -> Result<()> {
    let base_dir = executable_dir();
    let config_path = cli.config.unwrap_or_else(|| base_dir.join("p2000.toml"));

    let config = Config::load(&config_path)?;
    log::debug!("Loaded configuration from {}", config_path.display());

    let settings = config.resolve(RunOptions {
        region: cli.region,
        lines: cli.lines,
        telegram: cli.telegram,
        state_dir: cli.state_dir.unwrap_or(base_dir),
    })?;

    let report = pipeline::run_once(&config, &settings).await?;
    log::info!(
        "Run complete: {} records, {} rendered lines, {} delta lines, {} reports, {:?}",
        report.records,
        report.rendered_lines,
        report.delta_lines,
        report.report_count,
        report.outcome
    );

    Ok(())
}

/// Main entry point for the CLI application.
#[tokio::main(flavor = "current_thread")]
async fn main() -> ExitCode {
    let cli = Cli::parse();
    init_logging(cli.verbose);

    match run(cli).await {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) if e.is_connection() => {
            log::error!("[-] connection failed: {}", e);
            ExitCode::FAILURE
        }
        Err(e) => {
            log::error!("{}", e);
            ExitCode::FAILURE
        }
    }
}
