// Copyright (c) 2026 100monkeys.ai
// SPDX-License-Identifier: AGPL-3.0
//! Mod
//!
//! Provides the maze domain model.
//!
//! # Architecture
//!
//! - **Layer:** Domain Layer
//! - **Purpose:** Grid, heuristic, path and navigation value types

pub mod direction;
pub mod grid;
pub mod path;
pub mod navigation;
pub mod maze;
pub mod events;
pub mod crawler_config;

pub use crawler_config::CrawlerConfig;
pub use direction::{preferences, Direction};
pub use events::NavigationEvent;
pub use grid::{Cell, Coordinate, Map, MapError};
pub use maze::Maze;
pub use navigation::{CrawlerId, NavigationMode, NavigationReport, NavigationResult, QueenId};
pub use path::{simplify, simplify_path};
