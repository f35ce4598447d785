// Copyright (c) 2026 100monkeys.ai
// SPDX-License-Identifier: AGPL-3.0
//! # Coordinator Contracts
//!
//! The seams between crawlers and whoever owns the canonical map.
//!
//! | Trait | Used by | Implementations |
//! |-------|---------|-----------------|
//! | [`CrawlerCoordinator`] | every crawler | `Queen` |
//! | [`SwarmCoordinator`] | a crawler standing on a fork | `Queen` |
//! | [`CrawlerSpawner`] | the coordinator | `DefaultSpawner` |

use crate::domain::context::NavigationContext;
use crate::domain::crawler::Crawler;

pub trait CrawlerCoordinator: Send + Sync {
    /// Merge the requestor's tracks and hand back the party able to build its swarm.
    fn request_swarm(&self, requestor: &Crawler) -> &dyn SwarmCoordinator;

    /// Merge the requestor's tracks into the canonical map.
    fn debrief(&self, requestor: &Crawler);

    /// Debrief an arrival. Returns `true` if the requestor is the first arrival
    /// in its sibling group, in which case the rest of the group is cancelled.
    fn report_arrival(&self, requestor: &Crawler) -> bool;
}

pub trait SwarmCoordinator: Send + Sync {
    /// One crawler per direction viable from the requestor's position, each
    /// already moved one step in its direction.
    fn get_swarm(&self, requestor: &Crawler) -> Vec<Crawler>;
}

pub trait CrawlerSpawner: Send + Sync {
    fn spawn(&self, context: NavigationContext) -> Crawler;
}
