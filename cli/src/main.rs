// Copyright (c) 2026 100monkeys.ai
// SPDX-License-Identifier: AGPL-3.0

//! # mazebot
//!
//! Finds a path through a grid maze with either a single backtracking Scout
//! or a Swarm of forking crawlers coordinated by a Queen.
//!
//! ## Commands
//!
//! - `mazebot solve <FILE>` - Navigate a maze document
//! - `mazebot random` - Generate and navigate a random maze
//! - `mazebot compare <FILE>` - Run both modes and check they agree
//! - `mazebot config show|validate|generate` - Configuration management

use anyhow::{Context, Result};
use clap::{Parser, Subcommand};
use colored::Colorize;
use std::path::PathBuf;

use mazebot::commands::{self, CompareArgs, ConfigCommand, RandomArgs, SolveArgs};
use mazebot_core::domain::crawler_config::CrawlerConfig;

/// mazebot - Maze crawler with Scout and Swarm navigation
#[derive(Parser)]
#[command(name = "mazebot")]
#[command(version, about, long_about = None)]
#[command(propagate_version = true)]
struct Cli {
    /// Path to configuration file (overrides discovery)
    #[arg(
        short,
        long,
        global = true,
        env = "MAZEBOT_CONFIG_PATH",
        value_name = "FILE"
    )]
    config: Option<PathBuf>,

    /// Log level (trace, debug, info, warn, error). Defaults to the configured level.
    #[arg(long, global = true)]
    log_level: Option<String>,

    #[command(subcommand)]
    command: Option<Commands>,
}

#[derive(Subcommand)]
enum Commands {
    /// Navigate a maze document
    #[command(name = "solve")]
    Solve {
        #[command(flatten)]
        args: SolveArgs,
    },

    /// Generate and navigate a random maze
    #[command(name = "random")]
    Random {
        #[command(flatten)]
        args: RandomArgs,
    },

    /// Navigate a maze document in both modes
    #[command(name = "compare")]
    Compare {
        #[command(flatten)]
        args: CompareArgs,
    },

    /// Configuration management
    #[command(name = "config")]
    Config {
        #[command(subcommand)]
        command: ConfigCommand,
    },
}

#[tokio::main]
async fn main() -> Result<()> {
    let cli = Cli::parse();

    let level = match &cli.log_level {
        Some(level) => level.clone(),
        None => CrawlerConfig::load_or_default(cli.config.clone())
            .map(|config| config.spec.logging.level)
            .unwrap_or_else(|_| "info".to_string()),
    };
    init_logging(&level)?;

    match cli.command {
        Some(Commands::Solve { args }) => commands::solve::solve(args, cli.config).await,
        Some(Commands::Random { args }) => commands::solve::random(args, cli.config).await,
        Some(Commands::Compare { args }) => commands::solve::compare(args, cli.config).await,
        Some(Commands::Config { command }) => {
            commands::config::handle_command(command, cli.config).await
        }
        None => {
            // No command provided - show help
            eprintln!("{}", "No command specified. Use --help for usage.".yellow());
            std::process::exit(1);
        }
    }
}

/// Initialize tracing subscriber for logging
fn init_logging(level: &str) -> Result<()> {
    let filter = tracing_subscriber::EnvFilter::try_from_default_env()
        .or_else(|_| tracing_subscriber::EnvFilter::try_new(level))
        .context("Failed to create log filter")?;

    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_target(false)
        .with_thread_ids(false)
        .with_file(false)
        .with_line_number(false)
        .compact()
        .init();

    Ok(())
}
