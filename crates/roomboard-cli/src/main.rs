//! roomboard CLI entry point.

use std::process::ExitCode;

use clap::Parser;

use roomboard_cli::cli::{Cli, Command, ConfigAction};
use roomboard_cli::commands;
use roomboard_cli::config::AppConfig;
use roomboard_cli::error::CliResult;
use roomboard_core::{TracingConfig, TracingOutputFormat, init_tracing};

#[tokio::main]
async fn main() -> ExitCode {
    let cli = Cli::parse();

    if let Err(e) = setup_tracing(&cli) {
        eprintln!("error: {}", e);
        return ExitCode::FAILURE;
    }

    match run(cli).await {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            eprintln!("error: {}", e);
            ExitCode::FAILURE
        }
    }
}

fn setup_tracing(cli: &Cli) -> CliResult<()> {
    let mut config = match cli.command {
        Command::Serve { .. } => TracingConfig::server(),
        _ => TracingConfig::default(),
    };
    if let Some(ref format) = cli.log_format {
        config = config.with_format(format.parse::<TracingOutputFormat>()?);
    }
    if cli.debug {
        config = config.debug();
    }
    init_tracing(config)?;
    Ok(())
}

async fn run(cli: Cli) -> CliResult<()> {
    let config_path = cli.config.clone().unwrap_or_else(AppConfig::default_path);
    let config = match cli.config {
        Some(ref path) => AppConfig::load_from(path)?,
        None => AppConfig::load()?,
    };

    match cli.command {
        Command::Serve { bind, rooms } => commands::serve::run(&config, bind, rooms).await,
        Command::Check {
            room,
            rooms,
            output,
        } => commands::check::run(&config, &room, rooms, &output).await,
        Command::Fetch {
            url,
            username,
            password,
            output,
        } => commands::fetch::run(&config, &url, &username, &password, &output).await,
        Command::Rooms { rooms, json } => commands::rooms::run(&config, rooms, json),
        Command::Config { action } => match action {
            ConfigAction::Dump => commands::config::dump(&config, &config_path),
            ConfigAction::Validate => commands::config::validate(&config),
            ConfigAction::Path => commands::config::path(&config_path),
        },
    }
}
