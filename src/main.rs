//! MAX Falcon-8 programmer CLI
//!
//! Writes button bindings and macro programs into the keypad's firmware
//! image.

use anyhow::Result;
use clap::Parser;
use falcon8::FalconConfig;
use tracing::debug;

// CLI definitions
mod cli;
use cli::{Cli, Commands, ConfigCommands};

// Command handlers
mod commands;

fn main() -> Result<()> {
    let cli = Cli::parse();

    let config_path = cli.config.clone().unwrap_or_else(FalconConfig::default_path);
    let config = FalconConfig::load(&config_path)?;

    // Initialize logging: RUST_LOG, then flags, then the config file
    let level = if cli.debug {
        "debug".to_string()
    } else {
        cli.log_level.clone().unwrap_or_else(|| config.log_level.clone())
    };
    let filter = tracing_subscriber::EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new(&level));
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_target(false)
        .with_writer(std::io::stderr)
        .init();

    debug!("Using config {:?}", config_path);

    match cli.command {
        Commands::Program {
            bindings,
            firmware,
            verify_only,
        } => commands::program::program(&config, bindings, firmware, verify_only),
        Commands::Verify { bindings } => commands::program::verify(&config, bindings),
        Commands::Show {
            firmware,
            format,
            output,
        } => commands::show::show(&config, firmware, format, output),
        Commands::Keys => commands::keys::keys(),
        Commands::Config { action } => match action {
            ConfigCommands::Init {
                firmware,
                bindings,
                force,
            } => commands::config::init(&config_path, firmware, bindings, force),
            ConfigCommands::Show => commands::config::show(&config_path, &config),
        },
    }
}
