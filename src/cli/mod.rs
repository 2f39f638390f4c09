//! CLI interface and argument parsing
//!
//! This module provides the command-line interface for RxLedger using clap.

pub mod commands;

use clap::{Parser, Subcommand};

/// RxLedger - Pharmacy claims analytics
#[derive(Parser, Debug)]
#[command(name = "rxledger")]
#[command(version, about, long_about = None)]
pub struct Cli {
    /// Path to configuration file
    #[arg(short, long, default_value = "rxledger.toml", env = "RXLEDGER_CONFIG")]
    pub config: String,

    /// Log level (trace, debug, info, warn, error)
    #[arg(short, long, env = "RXLEDGER_LOG_LEVEL")]
    pub log_level: Option<String>,

    /// Subcommand to execute
    #[command(subcommand)]
    pub command: Commands,
}

/// Available commands
#[derive(Subcommand, Debug)]
pub enum Commands {
    /// Load claims, reverts and pharmacies and write the analytics reports
    Run(commands::run::RunArgs),

    /// Validate configuration file
    ValidateConfig(commands::validate::ValidateArgs),

    /// Initialize a new configuration file
    Init(commands::init::InitArgs),
}
