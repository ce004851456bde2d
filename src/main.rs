use anyhow::Context;
use clap::Parser;

use visit_notifier::cli::{self, Cli, Commands};

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();

    let settings = cli::load_and_merge_config(&cli).context("Failed to load configuration")?;

    // check-config writes its report to stdout only
    if !matches!(cli.command, Some(Commands::CheckConfig)) {
        cli::init_logger_from_settings(&settings).context("Failed to initialize logger")?;
    }

    cli::execute_command(&cli, settings).await.inspect_err(|e| {
        tracing::error!(error = %e, "Command failed");
    })
}
