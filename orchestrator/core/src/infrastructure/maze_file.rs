// Copyright (c) 2026 100monkeys.ai
// SPDX-License-Identifier: AGPL-3.0

// File Maze Supplier
//
// Reads a maze document (JSON) from disk on every request, so edits to the
// file are picked up between navigations.

use async_trait::async_trait;
use std::path::{Path, PathBuf};
use tracing::debug;

use crate::application::maze_supplier::{MazeSupplier, SupplierError};
use crate::domain::maze::Maze;

pub struct FileMazeSupplier {
    path: PathBuf,
}

impl FileMazeSupplier {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Parse and validate a maze document.
    pub fn parse(json: &str) -> Result<Maze, SupplierError> {
        let maze = Maze::from_json_str(json)?;
        maze.survey()?;
        Ok(maze)
    }
}

#[async_trait]
impl MazeSupplier for FileMazeSupplier {
    async fn next_maze(&self) -> Result<Option<Maze>, SupplierError> {
        debug!(path = %self.path.display(), "Reading maze document");
        let content = tokio::fs::read_to_string(&self.path).await?;
        Self::parse(&content).map(Some)
    }
}
