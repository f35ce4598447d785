// Copyright (c) 2026 100monkeys.ai
// SPDX-License-Identifier: AGPL-3.0

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::domain::direction::Direction;
use crate::domain::grid::Coordinate;
use crate::domain::navigation::{CrawlerId, NavigationMode, QueenId};

/// Coordinator-side lifecycle of a navigation session.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub enum NavigationEvent {
    MapScanned {
        queen_id: QueenId,
        width: usize,
        height: usize,
        start: Coordinate,
        destination: Coordinate,
        scanned_at: DateTime<Utc>,
    },
    CrawlerSpawned {
        queen_id: QueenId,
        crawler_id: CrawlerId,
        mode: NavigationMode,
        position: Coordinate,
        spawned_at: DateTime<Utc>,
    },
    SwarmRequested {
        queen_id: QueenId,
        requestor: CrawlerId,
        position: Coordinate,
        directions: Vec<Direction>,
        requested_at: DateTime<Utc>,
    },
    /// A crawler's tracks were merged into the canonical map.
    Debriefed {
        queen_id: QueenId,
        crawler_id: CrawlerId,
        merged_cells: usize,
        debriefed_at: DateTime<Utc>,
    },
    ArrivalReported {
        queen_id: QueenId,
        crawler_id: CrawlerId,
        /// False when a sibling group had already produced a winner.
        accepted: bool,
        reported_at: DateTime<Utc>,
    },
    NavigationCompleted {
        queen_id: QueenId,
        mode: NavigationMode,
        arrived: bool,
        path: Option<String>,
        completed_at: DateTime<Utc>,
    },
}

impl NavigationEvent {
    pub fn queen_id(&self) -> QueenId {
        match self {
            NavigationEvent::MapScanned { queen_id, .. }
            | NavigationEvent::CrawlerSpawned { queen_id, .. }
            | NavigationEvent::SwarmRequested { queen_id, .. }
            | NavigationEvent::Debriefed { queen_id, .. }
            | NavigationEvent::ArrivalReported { queen_id, .. }
            | NavigationEvent::NavigationCompleted { queen_id, .. } => *queen_id,
        }
    }

    /// The crawler an event concerns, if it concerns a single one.
    pub fn crawler_id(&self) -> Option<CrawlerId> {
        match self {
            NavigationEvent::CrawlerSpawned { crawler_id, .. }
            | NavigationEvent::Debriefed { crawler_id, .. }
            | NavigationEvent::ArrivalReported { crawler_id, .. } => Some(*crawler_id),
            NavigationEvent::SwarmRequested { requestor, .. } => Some(*requestor),
            NavigationEvent::MapScanned { .. } | NavigationEvent::NavigationCompleted { .. } => None,
        }
    }
}
