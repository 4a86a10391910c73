//! Longshore CLI binary entrypoint.
//!
//! This is the main entry point for the `longshore` command-line tool.

use std::io;
use std::process::ExitCode;

use clap::Parser;
use tracing_subscriber::EnvFilter;

use longshore_api::PlatformClient;
use longshore_cli::cli::{Cli, Commands};
use longshore_cli::commands::{
    ContainerCommand, NodeClusterCommand, NodeCommand, ServiceCommand,
};
use longshore_cli::output::OutputFormat;

fn main() -> ExitCode {
    // Initialize tracing
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::from_default_env())
        .with_writer(io::stderr)
        .init();

    // Parse CLI arguments
    let cli = Cli::parse();

    // Run async runtime
    let runtime = match tokio::runtime::Runtime::new() {
        Ok(rt) => rt,
        Err(e) => {
            eprintln!("Failed to create async runtime: {e}");
            return ExitCode::FAILURE;
        }
    };

    match runtime.block_on(run(cli)) {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            eprintln!("Error: {e}");
            ExitCode::FAILURE
        }
    }
}

async fn run(cli: Cli) -> Result<(), longshore_cli::CliError> {
    let client = PlatformClient::new(&cli.host, cli.token.clone())?;
    tracing::debug!(host = %cli.host, "connecting to platform");
    let format = OutputFormat::new(cli.format);
    let mut stdout = io::stdout().lock();

    match cli.command {
        Commands::Container { command } => {
            let cmd = ContainerCommand::new(&client);
            cmd.execute(&mut stdout, &format, &command).await?;
        }
        Commands::Service { command } => {
            let cmd = ServiceCommand::new(&client);
            cmd.execute(&mut stdout, &format, &command).await?;
        }
        Commands::Node { command } => {
            let cmd = NodeCommand::new(&client);
            cmd.execute(&mut stdout, &format, &command).await?;
        }
        Commands::NodeCluster { command } => {
            let cmd = NodeClusterCommand::new(&client);
            cmd.execute(&mut stdout, &format, &command).await?;
        }
    }

    Ok(())
}
