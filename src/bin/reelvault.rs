//! Reelvault CLI Binary
//!
//! Command-line interface for movie metadata lookup and the identifier
//! vault.

use clap::Parser;
use reelvault::config::ConfigLoader;
use reelvault::logging;
use reelvault::tooling::cli::{Cli, CliContext};
use std::process;

fn main() {
    let cli = Cli::parse();

    // Load configuration
    let config = match &cli.config {
        Some(path) => ConfigLoader::load_from_file(path),
        None => ConfigLoader::load(),
    };
    let config = match config {
        Ok(config) => config,
        Err(e) => {
            eprintln!("Error loading configuration: {}", e);
            process::exit(1);
        }
    };

    // CLI log flags override the config file
    let mut logging_config = config.logging.clone();
    if let Some(level) = &cli.log_level {
        logging_config.level = level.clone();
    }
    if let Some(format) = &cli.log_format {
        logging_config.format = format.clone();
    }
    if let Some(output) = &cli.log_output {
        logging_config.output = output.clone();
    }
    if let Some(file) = &cli.log_file {
        logging_config.file = Some(file.clone());
    }
    if let Err(e) = logging::init_logging(Some(&logging_config)) {
        eprintln!("Error initializing logging: {}", e);
        process::exit(1);
    }

    // Create CLI context
    let mut context = match CliContext::new(&config, cli.vault_file.clone()) {
        Ok(ctx) => ctx,
        Err(e) => {
            eprintln!("Error initializing vault: {}", e);
            process::exit(1);
        }
    };

    // Execute command
    match context.execute(&cli.command) {
        Ok(output) => {
            if !output.is_empty() {
                println!("{}", output);
            }
        }
        Err(e) => {
            eprintln!("Error: {}", e);
            process::exit(1);
        }
    }
}
