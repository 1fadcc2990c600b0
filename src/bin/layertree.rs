//! Layertree CLI Binary
//!
//! Command-line interface for querying stacked configuration files.

use anyhow::Context;
use clap::Parser;
use layertree::cli::{map_error, Cli, RunContext};
use layertree::config::{ConfigLoader, LayertreeConfig};
use layertree::logging::{init_logging, LoggingConfig};
use std::process;
use tracing::{error, info};

fn main() {
    let cli = Cli::parse();

    let config = match load_config(&cli) {
        Ok(config) => config,
        Err(e) => {
            eprintln!("{e:#}");
            process::exit(2);
        }
    };

    let logging_config = build_logging_config(&cli, &config);
    if let Err(e) = init_logging(Some(&logging_config)) {
        eprintln!("Failed to initialize logging: {}", e);
        process::exit(1);
    }

    info!("Layertree CLI starting");

    let mut context = match RunContext::new(&config, &cli.layers, &cli.set) {
        Ok(ctx) => ctx,
        Err(e) => {
            error!("Error loading layers: {}", e);
            eprintln!("{}", map_error(&e));
            process::exit(1);
        }
    };

    match context.execute(&cli.command) {
        Ok(output) => {
            info!("Command completed successfully");
            if !output.is_empty() {
                println!("{}", output);
            }
        }
        Err(e) => {
            error!("Command failed: {}", e);
            eprintln!("{}", map_error(&e));
            process::exit(1);
        }
    }
}

fn load_config(cli: &Cli) -> anyhow::Result<LayertreeConfig> {
    let config = ConfigLoader::load(cli.config.as_deref())
        .context("failed to load layertree configuration")?;
    Ok(config)
}

/// Build logging configuration from CLI args on top of the loaded config
fn build_logging_config(cli: &Cli, config: &LayertreeConfig) -> LoggingConfig {
    let mut logging = config.logging.clone();

    if cli.verbose {
        logging.level = "debug".to_string();
    }
    if let Some(ref level) = cli.log_level {
        logging.level = level.clone();
    }
    if let Some(ref format) = cli.log_format {
        logging.format = format.clone();
    }
    logging
}
