// Copyright (c) 2026 100monkeys.ai
// SPDX-License-Identifier: AGPL-3.0
//! # Swarm Domain Layer
//!
//! Crawler behaviour and the contracts crawlers use to reach their coordinator.
//! No I/O dependencies.
//!
//! | Module | Key Types |
//! |--------|-----------|
//! | [`context`] | `NavigationContext`, `NavigationError` |
//! | [`coordinator`] | `CrawlerCoordinator`, `SwarmCoordinator`, `CrawlerSpawner` |
//! | [`crawler`] | `Crawler`, `Routes` |
//! | [`route_queue`] | Scout branch queue |

pub mod context;
pub mod coordinator;
pub mod crawler;
pub mod route_queue;

pub use context::{NavigationContext, NavigationError};
pub use coordinator::{CrawlerCoordinator, CrawlerSpawner, SwarmCoordinator};
pub use crawler::{Crawler, Routes};
