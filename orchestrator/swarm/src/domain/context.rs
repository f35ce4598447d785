// Copyright (c) 2026 100monkeys.ai
// SPDX-License-Identifier: AGPL-3.0
//! Navigation context handed to a crawler at creation.

use std::sync::Arc;
use thiserror::Error;
use tokio_util::sync::CancellationToken;

use mazebot_core::{Coordinate, Map, MapError, NavigationMode};

use crate::domain::coordinator::CrawlerCoordinator;

#[derive(Debug, Error)]
pub enum NavigationError {
    #[error("Invalid input: {0}")]
    InvalidInput(#[from] MapError),

    #[error("No map has been scanned")]
    MapNotScanned,
}

/// Everything a crawler needs to start: endpoints, its own working map, mode,
/// coordinator and the cancellation signal of its sibling group.
pub struct NavigationContext {
    pub(crate) start: Coordinate,
    pub(crate) destination: Coordinate,
    pub(crate) map: Map,
    pub(crate) mode: NavigationMode,
    pub(crate) coordinator: Arc<dyn CrawlerCoordinator>,
    pub(crate) cancellation: CancellationToken,
}

impl NavigationContext {
    pub fn new(
        start: Coordinate,
        destination: Coordinate,
        map: Map,
        mode: NavigationMode,
        coordinator: Arc<dyn CrawlerCoordinator>,
        cancellation: CancellationToken,
    ) -> Result<Self, NavigationError> {
        map.check(start)?;
        map.check(destination)?;
        Ok(Self {
            start,
            destination,
            map,
            mode,
            coordinator,
            cancellation,
        })
    }

    pub fn start(&self) -> Coordinate {
        self.start
    }

    pub fn destination(&self) -> Coordinate {
        self.destination
    }

    pub fn map(&self) -> &Map {
        &self.map
    }

    pub fn mode(&self) -> NavigationMode {
        self.mode
    }

    pub fn cancellation(&self) -> &CancellationToken {
        &self.cancellation
    }
}

impl std::fmt::Debug for NavigationContext {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("NavigationContext")
            .field("start", &self.start)
            .field("destination", &self.destination)
            .field("mode", &self.mode)
            .field("cancelled", &self.cancellation.is_cancelled())
            .finish_non_exhaustive()
    }
}
