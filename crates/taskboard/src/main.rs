//! Taskboard CLI binary.

use anyhow::Result;
use taskboard::cli::Cli;
use tracing_subscriber::EnvFilter;

/// Main entry point for the taskboard shell.
fn main() -> Result<()> {
    // Logs go to stderr so they never mix with command output.
    // Example: RUST_LOG=taskboard=debug taskboard --seed
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("taskboard=warn")),
        )
        .with_target(false)
        .with_writer(std::io::stderr)
        .init();

    tracing::debug!("Starting taskboard shell");

    let cli = Cli::parse_args();
    let summary = cli.execute()?;

    tracing::debug!(
        succeeded = summary.succeeded,
        failed = summary.failed,
        "Taskboard shell finished"
    );
    Ok(())
}
