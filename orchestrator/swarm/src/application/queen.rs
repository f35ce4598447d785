// Copyright (c) 2026 100monkeys.ai
// SPDX-License-Identifier: AGPL-3.0
//! # Queen
//!
//! Owns the canonical map of a navigation session and is the only party that
//! ever touches it. Crawlers reach it through [`CrawlerCoordinator`] and
//! [`SwarmCoordinator`]; callers through [`Queen::scan_map`] and
//! [`Queen::navigate`].
//!
//! | Operation | Canonical map | Side effects |
//! |-----------|---------------|--------------|
//! | `scan_map` | replaced by a private copy | `MapScanned` |
//! | `request_swarm` | requestor's tracks merged | - |
//! | `get_swarm` | read (masked) | `CrawlerSpawned` per child, `SwarmRequested` |
//! | `debrief` | requestor's tracks merged | `Debriefed` |
//! | `report_arrival` | requestor's tracks merged | sibling group cancelled if first, `ArrivalReported` |
//!
//! Merging, masking and arrival arbitration all run under one lock, so of two
//! siblings arriving together the one that takes the lock first wins.
//!
//! # Architecture
//!
//! - **Layer:** Application Layer
//! - **Purpose:** Coordinate crawlers over a shared canonical map

use chrono::Utc;
use parking_lot::Mutex;
use std::sync::Arc;
use tokio_util::sync::CancellationToken;
use tracing::{debug, info, trace, warn};

use mazebot_core::events::NavigationEvent;
use mazebot_core::infrastructure::EventBus;
use mazebot_core::{
    Coordinate, Direction, Map, Maze, NavigationMode, NavigationResult, QueenId,
};

use crate::domain::context::{NavigationContext, NavigationError};
use crate::domain::coordinator::{CrawlerCoordinator, CrawlerSpawner, SwarmCoordinator};
use crate::domain::crawler::Crawler;

struct Survey {
    start: Coordinate,
    destination: Coordinate,
    map: Map,
}

pub struct Queen {
    id: QueenId,
    spawner: Arc<dyn CrawlerSpawner>,
    events: EventBus,
    survey: Mutex<Option<Survey>>,
}

impl Queen {
    pub fn new(spawner: Arc<dyn CrawlerSpawner>, events: EventBus) -> Self {
        Self {
            id: QueenId::new(),
            spawner,
            events,
            survey: Mutex::new(None),
        }
    }

    pub fn id(&self) -> QueenId {
        self.id
    }

    pub fn events(&self) -> &EventBus {
        &self.events
    }

    /// Start a session on a private copy of `map`.
    pub fn scan_map(
        &self,
        start: Coordinate,
        destination: Coordinate,
        map: &Map,
    ) -> Result<(), NavigationError> {
        map.check(start)?;
        map.check(destination)?;

        *self.survey.lock() = Some(Survey {
            start,
            destination,
            map: map.clone(),
        });

        trace!(queen = %self.id, "Scanned map:\n{}", map);
        self.events.publish(NavigationEvent::MapScanned {
            queen_id: self.id,
            width: map.width(),
            height: map.height(),
            start,
            destination,
            scanned_at: Utc::now(),
        });
        Ok(())
    }

    /// Validate a maze document and scan it.
    pub fn scan_maze(&self, maze: &Maze) -> Result<(), NavigationError> {
        let (map, start, destination) = maze.survey()?;
        self.scan_map(start, destination, &map)
    }

    /// Copy of the canonical map, including every merged track.
    pub fn map(&self) -> Option<Map> {
        self.survey.lock().as_ref().map(|survey| survey.map.clone())
    }

    pub fn start(&self) -> Option<Coordinate> {
        self.survey.lock().as_ref().map(|survey| survey.start)
    }

    pub fn destination(&self) -> Option<Coordinate> {
        self.survey.lock().as_ref().map(|survey| survey.destination)
    }

    pub async fn navigate(
        self: &Arc<Self>,
        mode: NavigationMode,
    ) -> Result<NavigationResult, NavigationError> {
        self.navigate_with_cancellation(mode, CancellationToken::new())
            .await
    }

    /// Navigate until a path is found, the search is exhausted or `cancellation`
    /// fires. The returned path is simplified.
    pub async fn navigate_with_cancellation(
        self: &Arc<Self>,
        mode: NavigationMode,
        cancellation: CancellationToken,
    ) -> Result<NavigationResult, NavigationError> {
        let (start, destination, masked) = {
            let survey = self.survey.lock();
            let survey = survey.as_ref().ok_or(NavigationError::MapNotScanned)?;
            (survey.start, survey.destination, survey.map.masked())
        };

        info!(queen = %self.id, mode = %mode, start = %start, destination = %destination, "Navigation started");

        let coordinator: Arc<dyn CrawlerCoordinator> = self.clone();
        let context = NavigationContext::new(
            start,
            destination,
            masked,
            mode,
            coordinator,
            cancellation.child_token(),
        )?;
        let crawler = self.spawn(context);

        let result = crawler.navigate().await.simplified();

        metrics::counter!(
            "mazebot_navigations_total",
            "mode" => mode.to_string(),
            "arrived" => result.arrived().to_string()
        )
        .increment(1);
        self.events.publish(NavigationEvent::NavigationCompleted {
            queen_id: self.id,
            mode,
            arrived: result.arrived(),
            path: result.path().map(str::to_string),
            completed_at: Utc::now(),
        });
        info!(queen = %self.id, mode = %mode, arrived = result.arrived(), path = ?result.path(), "Navigation finished");

        Ok(result)
    }

    fn spawn(&self, context: NavigationContext) -> Crawler {
        let crawler = self.spawner.spawn(context);
        metrics::counter!("mazebot_crawlers_spawned_total").increment(1);
        self.events.publish(NavigationEvent::CrawlerSpawned {
            queen_id: self.id,
            crawler_id: crawler.id(),
            mode: crawler.mode(),
            position: crawler.position(),
            spawned_at: Utc::now(),
        });
        crawler
    }

    /// Merge the requestor's tracks under the lock. Returns newly tracked cells.
    fn merge(&self, survey: &mut Option<Survey>, requestor: &Crawler) -> usize {
        let Some(survey) = survey.as_mut() else {
            warn!(queen = %self.id, crawler = %requestor.id(), "Debrief without a scanned map");
            return 0;
        };
        match survey.map.merge_tracks(requestor.map()) {
            Ok(merged) => merged,
            Err(e) => {
                warn!(queen = %self.id, crawler = %requestor.id(), error = %e, "Ignoring tracks from a foreign map");
                0
            }
        }
    }
}

impl CrawlerCoordinator for Queen {
    fn request_swarm(&self, requestor: &Crawler) -> &dyn SwarmCoordinator {
        trace!(queen = %self.id, crawler = %requestor.id(), "Crawler requested a swarm");
        let mut survey = self.survey.lock();
        self.merge(&mut survey, requestor);
        self
    }

    fn debrief(&self, requestor: &Crawler) {
        let merged = {
            let mut survey = self.survey.lock();
            self.merge(&mut survey, requestor)
        };

        trace!(queen = %self.id, crawler = %requestor.id(), merged, "Updated findings from crawler");
        metrics::counter!("mazebot_debriefs_total").increment(1);
        self.events.publish(NavigationEvent::Debriefed {
            queen_id: self.id,
            crawler_id: requestor.id(),
            merged_cells: merged,
            debriefed_at: Utc::now(),
        });
    }

    fn report_arrival(&self, requestor: &Crawler) -> bool {
        let (merged, accepted) = {
            let mut survey = self.survey.lock();
            let merged = self.merge(&mut survey, requestor);
            let group = requestor.cancellation();
            let accepted = !group.is_cancelled();
            if accepted {
                group.cancel();
            }
            (merged, accepted)
        };

        debug!(queen = %self.id, crawler = %requestor.id(), accepted, "Crawler reported arrival");
        metrics::counter!("mazebot_debriefs_total").increment(1);
        self.events.publish(NavigationEvent::Debriefed {
            queen_id: self.id,
            crawler_id: requestor.id(),
            merged_cells: merged,
            debriefed_at: Utc::now(),
        });
        self.events.publish(NavigationEvent::ArrivalReported {
            queen_id: self.id,
            crawler_id: requestor.id(),
            accepted,
            reported_at: Utc::now(),
        });
        accepted
    }
}

impl SwarmCoordinator for Queen {
    fn get_swarm(&self, requestor: &Crawler) -> Vec<Crawler> {
        let origin = requestor.position();
        let (destination, masked) = {
            let survey = self.survey.lock();
            let Some(survey) = survey.as_ref() else {
                warn!(queen = %self.id, crawler = %requestor.id(), "Swarm requested without a scanned map");
                return Vec::new();
            };
            (survey.destination, survey.map.masked())
        };

        let directions: Vec<Direction> = Direction::ALL
            .into_iter()
            .filter(|direction| masked.can_move(origin, *direction))
            .collect();
        for direction in &directions {
            trace!(queen = %self.id, crawler = %requestor.id(), direction = %direction, "Crawler can move");
        }

        let group = requestor.cancellation().child_token();
        let mut swarm = Vec::with_capacity(directions.len());
        for direction in &directions {
            let context = match NavigationContext::new(
                origin,
                destination,
                masked.clone(),
                requestor.mode(),
                Arc::clone(requestor.coordinator()),
                group.clone(),
            ) {
                Ok(context) => context,
                Err(e) => {
                    warn!(queen = %self.id, crawler = %requestor.id(), error = %e, "Cannot spawn swarm crawler");
                    continue;
                }
            };

            let mut crawler = self.spawn(context);
            trace!(queen = %self.id, crawler = %crawler.id(), direction = %direction, "Moving crawler into position");
            crawler.step_unchecked(*direction);
            swarm.push(crawler);
        }

        metrics::counter!("mazebot_swarms_requested_total").increment(1);
        self.events.publish(NavigationEvent::SwarmRequested {
            queen_id: self.id,
            requestor: requestor.id(),
            position: origin,
            directions,
            requested_at: Utc::now(),
        });
        swarm
    }
}
