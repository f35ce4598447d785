// Copyright (c) 2026 100monkeys.ai
// SPDX-License-Identifier: AGPL-3.0
//! # Maze Supplier Contract
//!
//! Where mazes come from. Implementations live in
//! `crate::infrastructure` (`FileMazeSupplier`, `RandomMazeSupplier`).
//!
//! | Outcome | Meaning |
//! |---------|---------|
//! | `Ok(Some(maze))` | A maze to solve |
//! | `Ok(None)` | Nothing to solve (source exhausted) |
//! | `Err(_)` | Source failed; callers that only want a maze use [`MazeSupplier::poll_maze`] |

use async_trait::async_trait;
use thiserror::Error;
use tracing::warn;

use crate::domain::grid::MapError;
use crate::domain::maze::Maze;

#[derive(Debug, Error)]
pub enum SupplierError {
    #[error("Failed to read maze: {0}")]
    Io(#[from] std::io::Error),

    #[error("Failed to parse maze document: {0}")]
    Parse(#[from] serde_json::Error),

    #[error("Maze document is invalid: {0}")]
    InvalidMaze(#[from] MapError),
}

#[async_trait]
pub trait MazeSupplier: Send + Sync {
    async fn next_maze(&self) -> Result<Option<Maze>, SupplierError>;

    /// Like `next_maze`, but a failing source is logged and reported as "no maze".
    async fn poll_maze(&self) -> Option<Maze> {
        match self.next_maze().await {
            Ok(maze) => maze,
            Err(e) => {
                warn!(error = %e, "Maze supplier failed; nothing to solve");
                None
            }
        }
    }
}
