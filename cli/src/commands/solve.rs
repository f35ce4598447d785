// Copyright (c) 2026 100monkeys.ai
// SPDX-License-Identifier: AGPL-3.0

//! Navigation commands
//!
//! Commands: solve, random, compare

use anyhow::{Context, Result};
use clap::Args;
use colored::Colorize;
use std::path::PathBuf;
use std::sync::Arc;
use std::time::Duration;
use tokio_util::sync::CancellationToken;
use tracing::{info, warn};

use mazebot_core::application::MazeSupplier;
use mazebot_core::domain::crawler_config::CrawlerConfig;
use mazebot_core::infrastructure::{EventBus, FileMazeSupplier, RandomMazeSupplier};
use mazebot_core::{Maze, NavigationMode, NavigationReport, NavigationResult};
use mazebot_swarm::application::{DefaultSpawner, Queen};

#[derive(Args)]
pub struct SolveArgs {
    /// Path to maze document (JSON)
    #[arg(value_name = "FILE")]
    pub file: PathBuf,

    /// Navigation mode (default: from configuration)
    #[arg(short, long, value_name = "MODE")]
    pub mode: Option<NavigationMode>,

    /// Print the maze with the path drawn in
    #[arg(long)]
    pub render: bool,
}

#[derive(Args)]
pub struct RandomArgs {
    /// Maze width (rounded up to an odd number)
    #[arg(long, default_value = "21")]
    pub width: usize,

    /// Maze height (rounded up to an odd number)
    #[arg(long, default_value = "21")]
    pub height: usize,

    /// Seed for a reproducible maze
    #[arg(long)]
    pub seed: Option<u64>,

    /// Navigation mode (default: from configuration)
    #[arg(short, long, value_name = "MODE")]
    pub mode: Option<NavigationMode>,

    /// Print the maze with the path drawn in
    #[arg(long)]
    pub render: bool,
}

#[derive(Args)]
pub struct CompareArgs {
    /// Path to maze document (JSON)
    #[arg(value_name = "FILE")]
    pub file: PathBuf,
}

pub async fn solve(args: SolveArgs, config_path: Option<PathBuf>) -> Result<()> {
    let config = CrawlerConfig::load_or_default(config_path).context("Failed to load configuration")?;
    let supplier = FileMazeSupplier::new(&args.file);
    let maze = next_maze(&supplier).await?;
    let mode = args.mode.unwrap_or(config.spec.navigation.mode);

    let result = run(&maze, mode, &config).await?;
    print_result(&maze, mode, &result, args.render)
}

pub async fn random(args: RandomArgs, config_path: Option<PathBuf>) -> Result<()> {
    let config = CrawlerConfig::load_or_default(config_path).context("Failed to load configuration")?;
    let supplier = match args.seed {
        Some(seed) => RandomMazeSupplier::with_seed(args.width, args.height, seed),
        None => RandomMazeSupplier::new(args.width, args.height),
    };
    let maze = next_maze(&supplier).await?;
    let mode = args.mode.unwrap_or(config.spec.navigation.mode);

    let result = run(&maze, mode, &config).await?;
    print_result(&maze, mode, &result, args.render)
}

pub async fn compare(args: CompareArgs, config_path: Option<PathBuf>) -> Result<()> {
    let config = CrawlerConfig::load_or_default(config_path).context("Failed to load configuration")?;
    let supplier = FileMazeSupplier::new(&args.file);
    let maze = next_maze(&supplier).await?;

    println!("{} {}", "Maze:".bold(), maze.name);
    let mut outcomes = Vec::new();
    for mode in [NavigationMode::Scout, NavigationMode::Swarm] {
        let result = run(&maze, mode, &config).await?;
        println!("  {:<6} {}", mode.to_string(), describe(&result));
        outcomes.push(result.arrived());
    }

    if outcomes.windows(2).all(|pair| pair[0] == pair[1]) {
        println!("{}", "✓ Modes agree on reachability".green());
        Ok(())
    } else {
        anyhow::bail!("Scout and Swarm disagree on whether the destination is reachable")
    }
}

async fn next_maze(supplier: &dyn MazeSupplier) -> Result<Maze> {
    supplier
        .next_maze()
        .await
        .context("Failed to load maze")?
        .context("No maze to solve")
}

/// Run one navigation session, cancelling it when the configured deadline passes.
async fn run(maze: &Maze, mode: NavigationMode, config: &CrawlerConfig) -> Result<NavigationResult> {
    let queen = Arc::new(Queen::new(
        Arc::new(DefaultSpawner),
        EventBus::new(config.spec.events.capacity),
    ));
    queen.scan_maze(maze).context("Invalid maze")?;

    let cancellation = CancellationToken::new();
    let watchdog = config.spec.navigation.deadline_ms.map(|deadline_ms| {
        let token = cancellation.clone();
        tokio::spawn(async move {
            tokio::time::sleep(Duration::from_millis(deadline_ms)).await;
            warn!(deadline_ms, "Navigation deadline expired, cancelling");
            token.cancel();
        })
    });

    info!(maze = %maze.name, mode = %mode, "Navigating");
    let result = queen.navigate_with_cancellation(mode, cancellation).await;

    if let Some(watchdog) = watchdog {
        watchdog.abort();
    }

    Ok(result?)
}

fn describe(result: &NavigationResult) -> String {
    match result {
        NavigationResult::Arrived { path } => format!("{} {}", "arrived".green(), path),
        NavigationResult::NotArrived => "no path".yellow().to_string(),
    }
}

fn print_result(maze: &Maze, mode: NavigationMode, result: &NavigationResult, render: bool) -> Result<()> {
    println!("{} {} ({})", "Maze:".bold(), maze.name, mode);
    println!("  {}", describe(result));

    if render {
        let (map, start, _) = maze.survey().context("Invalid maze")?;
        let path = result.path().unwrap_or_default();
        println!();
        println!("{}", map.render_with_path(start, path));
    }

    let report = NavigationReport::from(result.clone());
    println!("{}", serde_json::to_string(&report)?);
    Ok(())
}
