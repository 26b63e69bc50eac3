// Copyright (c) 2025 Ronan LE MEILLAT, SCTG Development
// This file is part of the nego-dashboard project and is licensed under the
// SCTG Development Non-Commercial License v1.0 (see LICENSE.md for details).

// Main entry point for the Nego dashboard server

use std::path::PathBuf;
use std::sync::Arc;

use anyhow::Result;
use clap::Parser;
use log::info;

use nego_dashboard::config::{self, Config};
use nego_dashboard::server::{build_rocket, figment_from_config};

/// Discord login and battlepass API for the Nego dashboard
#[derive(Debug, Parser)]
#[command(author, version, about, long_about = None)]
struct Args {
    /// Web server port
    #[arg(short = 'p')]
    web_port: Option<u16>,

    /// Web server address
    #[arg(short)]
    web_address: Option<String>,

    /// Secret used to sign session tokens
    #[arg(long)]
    jwt_secret: Option<String>,

    /// Base URL of the external data backend
    #[arg(long)]
    backend_url: Option<String>,

    /// Path to configuration file (YAML format)
    #[arg(long)]
    config: Option<PathBuf>,

    /// Path to a configuration to validate and exit
    #[arg(long)]
    validate_config: Option<PathBuf>,

    /// Output the configuration schema as JSON and exit
    #[arg(long)]
    show_config_schema: bool,

    /// Enable verbose logging (debug level)
    #[arg(short = 'v', long = "verbose")]
    verbose: bool,

    /// Disable all logging output
    #[arg(short = 'q', long = "quiet")]
    quiet: bool,
}

#[rocket::main]
async fn main() -> Result<()> {
    let args = Args::parse();

    let log_level = if args.quiet {
        log::LevelFilter::Off
    } else if args.verbose {
        log::LevelFilter::Debug
    } else {
        log::LevelFilter::Info
    };

    env_logger::Builder::from_default_env()
        .filter_level(log_level)
        .init();

    if args.show_config_schema {
        return config::output_config_schema();
    }

    if let Some(validate_path) = args.validate_config {
        if !validate_path.exists() {
            return Err(anyhow::anyhow!(
                "Configuration file does not exist: {}",
                validate_path.display()
            ));
        }

        Config::from_file(&validate_path)
            .map_err(|err| anyhow::anyhow!("Configuration validation failed: {}", err))?;
        println!("Configuration file is valid: {}", validate_path.display());
        return Ok(());
    }

    let config_path = args
        .config
        .clone()
        .unwrap_or_else(|| PathBuf::from("config.yaml"));
    let mut config = Config::from_file(&config_path)?;

    config.apply_env();
    config.apply_args(
        args.web_port,
        args.web_address.clone(),
        args.jwt_secret.clone(),
        args.backend_url.clone(),
    );
    config.validate()?;

    info!(
        "Starting web server on {}:{}",
        config.server.address, config.server.port
    );

    let figment = figment_from_config(&config)?;
    let rocket = build_rocket(figment, Arc::new(config))?;
    rocket.launch().await?;

    Ok(())
}
