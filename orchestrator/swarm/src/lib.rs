// Copyright (c) 2026 100monkeys.ai
// SPDX-License-Identifier: AGPL-3.0
//! # `mazebot-swarm`: Crawlers and the Coordinating Queen
//!
//! Searches a [`Map`](mazebot_core::Map) for a path from start to destination,
//! either with one backtracking crawler (**Scout**) or with crawlers that fork
//! into concurrent children at every junction (**Swarm**).
//!
//! ## Crate Layout
//!
//! | Module | Layer | Contents |
//! |--------|-------|----------|
//! | [`domain`] | Domain | `Crawler`, `NavigationContext`, coordinator seams, Scout route queue |
//! | [`application`] | Application | `Queen`, `DefaultSpawner` |
//!
//! ## Key Concepts
//!
//! - **Canonical map**: the queen's record of every cell any crawler has walked.
//!   It only ever gains `Track` cells, and only through debriefs.
//! - **Masking**: every crawler starts on a two-symbol copy of the canonical map,
//!   so earlier exploration reads as wall.
//! - **Sibling group**: the children spawned at one fork share a cancellation
//!   token. The first accepted arrival cancels the rest; cancelled crawlers stop
//!   between steps and report `NotArrived`.
//!
//! ```no_run
//! use std::sync::Arc;
//! use mazebot_core::{Coordinate, Map, NavigationMode};
//! use mazebot_core::infrastructure::EventBus;
//! use mazebot_swarm::application::{DefaultSpawner, Queen};
//!
//! # async fn run() -> Result<(), mazebot_swarm::NavigationError> {
//! let map = Map::parse(&["A  ", "X X", "  B"])?;
//! let queen = Arc::new(Queen::new(Arc::new(DefaultSpawner), EventBus::default()));
//! queen.scan_map(Coordinate::new(0, 0), Coordinate::new(2, 2), &map)?;
//! let result = queen.navigate(NavigationMode::Swarm).await?;
//! assert!(result.arrived());
//! # Ok(())
//! # }
//! ```

pub mod domain;
pub mod application;

pub use domain::*;
