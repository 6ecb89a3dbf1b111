// SPDX-License-Identifier: Apache-2.0 OR MIT
// Copyright (c) 2025-2026 naskel.com

//! HDDS JMS Destination CLI
//!
//! Command-line tool for binding JMS destinations into a naming context.
//!
//! # Usage
//!
//! ```bash
//! # Bind every configured destination until Ctrl+C
//! hdds-jms run --config destinations.toml
//!
//! # Check a configuration without binding anything
//! hdds-jms validate --config destinations.toml
//!
//! # Show the destination management table
//! hdds-jms describe
//! ```

use anyhow::{bail, Context, Result};
use clap::{Parser, Subcommand};
use hdds_jms::management::DESTINATION_INFO;
use hdds_jms::{DestinationService, DestinationsConfig, InMemoryContext, NamingContext};
use std::path::{Path, PathBuf};
use std::sync::{mpsc, Arc};
use tracing_subscriber::EnvFilter;

/// HDDS JMS destination management
#[derive(Parser, Debug)]
#[command(name = "hdds-jms")]
#[command(about = "HDDS JMS destination management - bind DDS topics into a naming directory")]
#[command(version)]
struct Args {
    /// Log level (trace, debug, info, warn, error); overrides the config file
    #[arg(long, global = true)]
    log_level: Option<String>,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand, Debug)]
enum Commands {
    /// Bind all configured destinations and wait for Ctrl+C
    Run {
        /// Configuration file path
        #[arg(short, long)]
        config: PathBuf,
    },

    /// Validate a configuration file
    Validate {
        /// Configuration file path
        #[arg(short, long)]
        config: PathBuf,
    },

    /// Print the destination management table
    Describe,

    /// Generate example configuration file
    GenConfig {
        /// Output file path
        #[arg(short, long, default_value = "destinations.toml")]
        output: PathBuf,
    },
}

fn main() -> Result<()> {
    let args = Args::parse();

    match args.command {
        Commands::Run { config } => {
            let config = load_config(&config)?;
            init_logging(args.log_level.as_deref().unwrap_or(&config.log_level));
            cmd_run(&config)
        }
        Commands::Validate { config } => {
            init_logging(args.log_level.as_deref().unwrap_or("warn"));
            cmd_validate(&config)
        }
        Commands::Describe => {
            cmd_describe();
            Ok(())
        }
        Commands::GenConfig { output } => cmd_gen_config(&output),
    }
}

fn init_logging(level: &str) {
    let filter = EnvFilter::try_new(level).unwrap_or_else(|_| EnvFilter::new("info"));
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_target(false)
        .init();
}

fn load_config(path: &Path) -> Result<DestinationsConfig> {
    DestinationsConfig::from_file(path)
        .with_context(|| format!("Failed to load {}", path.display()))
}

fn cmd_run(config: &DestinationsConfig) -> Result<()> {
    let naming = Arc::new(InMemoryContext::new());
    let mut service = DestinationService::new(config.domain.clone(), naming.clone());
    service.deploy(config)?;
    service.start_all()?;

    for name in naming.list() {
        tracing::info!("Bound: {}", name);
    }

    let (tx, rx) = mpsc::channel();
    ctrlc::set_handler(move || {
        tracing::info!("Received Ctrl+C, shutting down...");
        let _ = tx.send(());
    })
    .context("Failed to install Ctrl+C handler")?;
    let _ = rx.recv();

    let failures = service.stop_all();
    if !failures.is_empty() {
        bail!("{} destination(s) failed to stop", failures.len());
    }
    Ok(())
}

fn cmd_validate(path: &Path) -> Result<()> {
    let config = load_config(path)?;
    let naming = Arc::new(InMemoryContext::new());
    let mut service = DestinationService::new(config.domain.clone(), naming);
    let names = service.deploy(&config)?;

    println!("Configuration is valid: {}", path.display());
    for name in names {
        println!("  {}", name);
    }
    Ok(())
}

fn cmd_describe() {
    let info = &DESTINATION_INFO;
    println!("{}", info.description);
    println!();
    println!("Attributes:");
    for attr in info.attributes {
        let mut flags = vec![if attr.is_writable() { "rw" } else { "ro" }];
        if attr.required {
            flags.push("required");
        }
        if attr.key.is_some() {
            flags.push("key");
        }
        println!(
            "  {:<22} {:<20} {}",
            attr.name,
            flags.join(","),
            attr.description
        );
    }
    println!();
    println!("Operations:");
    for op in info.operations {
        println!("  {:<22} {}", op.name, op.description);
    }
}

fn cmd_gen_config(output: &Path) -> Result<()> {
    let text = toml::to_string_pretty(&DestinationsConfig::example())
        .context("Failed to serialize example configuration")?;
    std::fs::write(output, text).with_context(|| format!("Failed to write {}", output.display()))?;
    println!("Wrote example configuration to {}", output.display());
    Ok(())
}
