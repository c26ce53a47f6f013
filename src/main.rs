// ABOUTME: Entry point for the eb CLI application.
// ABOUTME: Parses arguments and dispatches to appropriate command handlers.

mod cli;
mod commands;

use clap::Parser;
use cli::{Cli, Commands};
use ebcli::config::{self, Config, Overrides};
use ebcli::error::Result;
use ebcli::output::{Output, OutputMode};
use std::env;
use tracing_subscriber::EnvFilter;

#[tokio::main]
async fn main() {
    let cli = Cli::parse();

    // Initialize tracing subscriber based on verbose flag
    let filter = if cli.verbose {
        EnvFilter::new("debug")
    } else {
        EnvFilter::new("warn")
    };
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_target(true)
        .with_writer(std::io::stderr)
        .init();

    let mut output = Output::new(OutputMode::from_flags(cli.quiet, cli.json));
    let result = run(cli, &mut output).await;

    if let Err(e) = result {
        output.error(&e.to_string());
        std::process::exit(1);
    }
}

async fn run(cli: Cli, output: &mut Output) -> Result<()> {
    let cwd = env::current_dir()?;
    let overrides = Overrides {
        region: cli.connection.region,
        endpoint: cli.connection.endpoint,
        application: None,
    };

    match cli.command {
        Commands::Init { application, force } => {
            config::init_config(&cwd, application.as_deref(), overrides.region.as_deref(), force)?;
            output.progress(&format!("Created {}", config::CONFIG_FILENAME));
            Ok(())
        }
        Commands::Call {
            service,
            operation,
            params,
            params_json,
        } => {
            let config = Config::discover_or_default(&cwd)?.with_overrides(&overrides)?;
            commands::call(&config, &service, &operation, &params, params_json.as_deref(), output)
                .await
        }
        Commands::List => {
            let config = Config::discover_or_default(&cwd)?.with_overrides(&overrides)?;
            commands::list(&config, output).await
        }
        Commands::Status { application } => {
            let overrides = Overrides {
                application,
                ..overrides
            };
            let config = Config::discover_or_default(&cwd)?.with_overrides(&overrides)?;
            commands::status(&config, output).await
        }
    }
}
