// Copyright (c) 2026 100monkeys.ai
// SPDX-License-Identifier: AGPL-3.0
//! # Crawler
//!
//! A single search agent. It owns its working map outright, walks it one step
//! at a time and records every step as a compass letter. Vacated cells become
//! `Track` in the crawler's own map, which is what keeps it from walking in
//! circles.
//!
//! | Mode | Behaviour |
//! |------|-----------|
//! | Scout | Explores alone with an explicit [`RouteQueue`]; runs on the blocking pool |
//! | Swarm | Follows corridors, forks into concurrent children at junctions |
//!
//! Everything that mutates a crawler is crate-private; the public surface is a
//! read-only view used by coordinators, spawners and tests.
//!
//! # Architecture
//!
//! - **Layer:** Domain Layer
//! - **Purpose:** Scout and Swarm search behaviour

use futures::future::BoxFuture;
use std::sync::Arc;
use tokio::task::JoinSet;
use tokio_util::sync::CancellationToken;
use tracing::{debug, trace, warn};

use mazebot_core::{
    preferences, Coordinate, CrawlerId, Direction, Map, NavigationMode, NavigationResult,
};

use crate::domain::context::NavigationContext;
use crate::domain::coordinator::CrawlerCoordinator;
use crate::domain::route_queue::RouteQueue;

/// What the crawler can do from where it stands.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Routes {
    /// Standing on the destination.
    Destination,
    /// No passable direction.
    DeadEnd,
    /// Passable directions, most preferred first.
    Open(Vec<Direction>),
}

pub struct Crawler {
    id: CrawlerId,
    mode: NavigationMode,
    map: Map,
    destination: Coordinate,
    current: Coordinate,
    steps: String,
    preference: [Direction; 4],
    coordinator: Arc<dyn CrawlerCoordinator>,
    cancellation: CancellationToken,
}

impl Crawler {
    pub fn new(context: NavigationContext) -> Self {
        let NavigationContext {
            start,
            destination,
            map,
            mode,
            coordinator,
            cancellation,
        } = context;

        Self {
            id: CrawlerId::new(),
            mode,
            map,
            destination,
            current: start,
            steps: String::new(),
            preference: preferences(start, destination),
            coordinator,
            cancellation,
        }
    }

    pub fn id(&self) -> CrawlerId {
        self.id
    }

    pub fn mode(&self) -> NavigationMode {
        self.mode
    }

    pub fn position(&self) -> Coordinate {
        self.current
    }

    /// The crawler's working map, including its own tracks.
    pub fn map(&self) -> &Map {
        &self.map
    }

    pub fn can_move(&self, direction: Direction) -> bool {
        self.map.can_move(self.current, direction)
    }

    /// Steps recorded since the last time the crawler committed its path.
    pub fn trace_steps(&self) -> &str {
        &self.steps
    }

    pub fn preferences(&self) -> [Direction; 4] {
        self.preference
    }

    /// `Destination` when standing on it, otherwise the passable directions in
    /// preference order (empty means dead end).
    pub fn next_routes(&self) -> Routes {
        if self.current == self.destination {
            return Routes::Destination;
        }

        let open: Vec<Direction> = self
            .preference
            .iter()
            .copied()
            .filter(|direction| self.can_move(*direction))
            .collect();

        if open.is_empty() {
            Routes::DeadEnd
        } else {
            Routes::Open(open)
        }
    }

    /// Run the search to completion. The returned future owns the crawler.
    pub fn navigate(self) -> BoxFuture<'static, NavigationResult> {
        Box::pin(async move {
            debug!(crawler = %self.id, mode = ?self.mode, position = %self.current, "Crawler navigating");
            match self.mode {
                NavigationMode::Scout => {
                    let id = self.id;
                    match tokio::task::spawn_blocking(move || self.scout()).await {
                        Ok(result) => result,
                        Err(e) => {
                            warn!(crawler = %id, error = %e, "Scout task failed");
                            NavigationResult::NotArrived
                        }
                    }
                }
                NavigationMode::Swarm => self.swarm().await,
            }
        })
    }

    pub(crate) fn coordinator(&self) -> &Arc<dyn CrawlerCoordinator> {
        &self.coordinator
    }

    pub(crate) fn cancellation(&self) -> &CancellationToken {
        &self.cancellation
    }

    /// Move if `direction` is passable. Returns whether the crawler moved.
    pub(crate) fn step(&mut self, direction: Direction) -> bool {
        if !self.can_move(direction) {
            return false;
        }
        self.step_unchecked(direction)
    }

    /// Move without consulting the working map. Still refuses to leave the grid.
    pub(crate) fn step_unchecked(&mut self, direction: Direction) -> bool {
        let Some(next) = self.map.neighbor(self.current, direction) else {
            return false;
        };

        self.map.mark_track(self.current);
        self.current = next;
        self.steps.push(direction.as_char());

        if self.mode == NavigationMode::Scout && self.map.exits(self.current) > 1 {
            self.preference = preferences(self.current, self.destination);
        }
        true
    }

    fn take_steps(&mut self) -> String {
        std::mem::take(&mut self.steps)
    }

    fn scout(mut self) -> NavigationResult {
        let result = self.explore();
        self.coordinator.debrief(&self);
        debug!(crawler = %self.id, arrived = result.arrived(), "Scout finished");
        result
    }

    fn explore(&mut self) -> NavigationResult {
        if self.cancellation.is_cancelled() {
            return NavigationResult::NotArrived;
        }

        let routes = match self.next_routes() {
            Routes::Destination => return NavigationResult::arrived_with(self.take_steps()),
            Routes::DeadEnd => return NavigationResult::NotArrived,
            Routes::Open(routes) => routes,
        };

        let committed = self.take_steps();
        let mut queue = RouteQueue::seeded(self.current, &committed, &routes);

        while let Some(item) = queue.pop() {
            if self.cancellation.is_cancelled() {
                debug!(crawler = %self.id, pending = queue.len(), "Scout cancelled");
                return NavigationResult::NotArrived;
            }

            self.current = item.origin;
            if !self.step(item.direction) {
                // An earlier branch already walked this cell.
                trace!(crawler = %self.id, origin = %item.origin, direction = %item.direction, "Skipping consumed branch");
                continue;
            }

            let mut routes = self.next_routes();
            while let Routes::Open(directions) = routes {
                if self.cancellation.is_cancelled() {
                    return NavigationResult::NotArrived;
                }

                let path_so_far = format!("{}{}", item.steps, self.steps);
                queue.push_front(self.current, &path_so_far, &directions[1..]);

                self.step(directions[0]);
                routes = self.next_routes();
            }

            let walked = self.take_steps();
            if routes == Routes::Destination {
                return NavigationResult::arrived_with(format!("{}{}", item.steps, walked));
            }
            trace!(crawler = %self.id, position = %self.current, "Scout branch hit a dead end");
        }

        NavigationResult::NotArrived
    }

    async fn swarm(mut self) -> NavigationResult {
        let routes = loop {
            if self.cancellation.is_cancelled() {
                debug!(crawler = %self.id, position = %self.current, "Crawler cancelled");
                self.coordinator.debrief(&self);
                return NavigationResult::NotArrived;
            }

            match self.next_routes() {
                Routes::Open(directions) if directions.len() == 1 => {
                    self.step(directions[0]);
                    tokio::task::yield_now().await;
                }
                routes => break routes,
            }
        };

        match routes {
            Routes::Destination => {
                if self.coordinator.report_arrival(&self) {
                    debug!(crawler = %self.id, "Crawler arrived");
                    NavigationResult::arrived_with(self.take_steps())
                } else {
                    debug!(crawler = %self.id, "Crawler arrived after a sibling");
                    NavigationResult::NotArrived
                }
            }
            Routes::DeadEnd => {
                trace!(crawler = %self.id, position = %self.current, "Crawler hit a dead end");
                self.coordinator.debrief(&self);
                NavigationResult::NotArrived
            }
            Routes::Open(_) => self.fork().await,
        }
    }

    async fn fork(mut self) -> NavigationResult {
        let coordinator = Arc::clone(&self.coordinator);
        let swarm = coordinator.request_swarm(&self).get_swarm(&self);
        debug!(crawler = %self.id, position = %self.current, children = swarm.len(), "Crawler forked");

        let mut children = JoinSet::new();
        for child in swarm {
            children.spawn(child.navigate());
        }

        let mut winner: Option<NavigationResult> = None;
        while let Some(joined) = children.join_next().await {
            match joined {
                Ok(result) if result.arrived() && winner.is_none() => winner = Some(result),
                Ok(_) => {}
                Err(e) => warn!(crawler = %self.id, error = %e, "Child crawler failed"),
            }
        }

        match winner {
            Some(result) if self.coordinator.report_arrival(&self) => {
                let prefix = self.take_steps();
                result.prefixed(&prefix)
            }
            Some(_) => NavigationResult::NotArrived,
            None => {
                self.coordinator.debrief(&self);
                NavigationResult::NotArrived
            }
        }
    }
}

impl std::fmt::Debug for Crawler {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Crawler")
            .field("id", &self.id)
            .field("mode", &self.mode)
            .field("position", &self.current)
            .field("steps", &self.steps)
            .finish_non_exhaustive()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::coordinator::SwarmCoordinator;
    use mazebot_core::Cell;
    use parking_lot::Mutex;

    /// Records debriefs, accepts every arrival and never builds a swarm.
    #[derive(Default)]
    struct RecordingCoordinator {
        debriefs: Mutex<Vec<CrawlerId>>,
        arrivals: Mutex<Vec<CrawlerId>>,
        swarm_requests: Mutex<usize>,
    }

    impl CrawlerCoordinator for RecordingCoordinator {
        fn request_swarm(&self, _requestor: &Crawler) -> &dyn SwarmCoordinator {
            *self.swarm_requests.lock() += 1;
            self
        }

        fn debrief(&self, requestor: &Crawler) {
            self.debriefs.lock().push(requestor.id());
        }

        fn report_arrival(&self, requestor: &Crawler) -> bool {
            self.arrivals.lock().push(requestor.id());
            true
        }
    }

    impl SwarmCoordinator for RecordingCoordinator {
        fn get_swarm(&self, _requestor: &Crawler) -> Vec<Crawler> {
            Vec::new()
        }
    }

    fn crawler(
        rows: &[&str],
        start: (usize, usize),
        destination: (usize, usize),
        mode: NavigationMode,
        coordinator: Arc<RecordingCoordinator>,
    ) -> Crawler {
        let map = Map::parse(rows).unwrap().masked();
        let context = NavigationContext::new(
            Coordinate::new(start.0, start.1),
            Coordinate::new(destination.0, destination.1),
            map,
            mode,
            coordinator,
            CancellationToken::new(),
        )
        .unwrap();
        Crawler::new(context)
    }

    #[test]
    fn test_routes_at_destination_dead_end_and_open() {
        let coordinator = Arc::new(RecordingCoordinator::default());

        let at_destination = crawler(&["A"], (0, 0), (0, 0), NavigationMode::Scout, coordinator.clone());
        assert_eq!(at_destination.next_routes(), Routes::Destination);

        let boxed_in = crawler(&["XXX", "XAX", "XXX", "B  "], (1, 1), (0, 3), NavigationMode::Scout, coordinator.clone());
        assert_eq!(boxed_in.next_routes(), Routes::DeadEnd);

        // Destination south-west: vertical distance dominates.
        let open = crawler(&["   ", " A ", "   ", "   ", "B  "], (1, 1), (0, 4), NavigationMode::Scout, coordinator);
        assert_eq!(
            open.next_routes(),
            Routes::Open(vec![Direction::South, Direction::West, Direction::East, Direction::North])
        );
    }

    #[test]
    fn test_routes_skip_blocked_directions_in_preference_order() {
        let coordinator = Arc::new(RecordingCoordinator::default());
        let crawler = crawler(&[" X ", " A ", " X ", "  B"], (1, 1), (2, 3), NavigationMode::Swarm, coordinator);
        assert_eq!(crawler.preferences()[0], Direction::South);
        assert_eq!(crawler.next_routes(), Routes::Open(vec![Direction::East, Direction::West]));
    }

    #[test]
    fn test_step_marks_vacated_cell_and_records_path() {
        let coordinator = Arc::new(RecordingCoordinator::default());
        let mut crawler = crawler(&["A  B"], (0, 0), (3, 0), NavigationMode::Swarm, coordinator);

        assert!(crawler.step(Direction::East));
        assert!(!crawler.step(Direction::West), "vacated cell must be blocked");
        assert!(!crawler.step(Direction::North), "grid edge must be blocked");

        assert_eq!(crawler.position(), Coordinate::new(1, 0));
        assert_eq!(crawler.trace_steps(), "E");
        assert_eq!(crawler.map().get(Coordinate::new(0, 0)), Some(Cell::Track));
        assert_eq!(crawler.map().get(Coordinate::new(1, 0)), Some(Cell::Empty));
    }

    #[test]
    fn test_unchecked_step_ignores_walls_but_not_edges() {
        let coordinator = Arc::new(RecordingCoordinator::default());
        let mut crawler = crawler(&["AXB"], (0, 0), (2, 0), NavigationMode::Swarm, coordinator);

        assert!(!crawler.can_move(Direction::East));
        assert!(crawler.step_unchecked(Direction::East));
        assert_eq!(crawler.position(), Coordinate::new(1, 0));
        assert!(!crawler.step_unchecked(Direction::North));
    }

    #[test]
    fn test_scout_recalibrates_at_junctions() {
        let coordinator = Arc::new(RecordingCoordinator::default());
        let mut crawler = crawler(&["A   ", "XXB "], (0, 0), (2, 1), NavigationMode::Scout, coordinator);
        let initial = [Direction::East, Direction::South, Direction::North, Direction::West];
        assert_eq!(crawler.preferences(), initial);

        // Single exit: heading kept.
        assert!(crawler.step(Direction::East));
        assert_eq!(crawler.preferences(), initial);

        // Junction directly above the destination: heading re-read from here.
        assert!(crawler.step(Direction::East));
        assert_eq!(
            crawler.preferences(),
            [Direction::South, Direction::East, Direction::West, Direction::North]
        );
    }

    #[test]
    fn test_swarm_keeps_its_initial_heading() {
        let coordinator = Arc::new(RecordingCoordinator::default());
        let mut crawler = crawler(&["A   ", "XXB "], (0, 0), (2, 1), NavigationMode::Swarm, coordinator);
        let initial = crawler.preferences();

        assert!(crawler.step(Direction::East));
        assert!(crawler.step(Direction::East));
        assert_eq!(crawler.preferences(), initial);
    }

    #[tokio::test]
    async fn test_swarm_corridor_arrives_and_reports() {
        let coordinator = Arc::new(RecordingCoordinator::default());
        let crawler = crawler(&["A", " ", " ", " ", "B"], (0, 0), (0, 4), NavigationMode::Swarm, coordinator.clone());
        let id = crawler.id();

        let result = crawler.navigate().await;

        assert_eq!(result, NavigationResult::arrived_with("SSSS"));
        assert_eq!(*coordinator.arrivals.lock(), vec![id]);
        assert_eq!(*coordinator.swarm_requests.lock(), 0);
    }

    #[tokio::test]
    async fn test_swarm_dead_end_debriefs() {
        let coordinator = Arc::new(RecordingCoordinator::default());
        let crawler = crawler(&["A  X", "XXXB"], (0, 0), (3, 1), NavigationMode::Swarm, coordinator.clone());
        let id = crawler.id();

        assert_eq!(crawler.navigate().await, NavigationResult::NotArrived);
        assert_eq!(*coordinator.debriefs.lock(), vec![id]);
        assert!(coordinator.arrivals.lock().is_empty());
    }

    #[tokio::test]
    async fn test_swarm_fork_without_children_is_not_arrived() {
        let coordinator = Arc::new(RecordingCoordinator::default());
        let crawler = crawler(&["   ", " A ", "   ", "X B"], (1, 1), (2, 3), NavigationMode::Swarm, coordinator.clone());

        assert_eq!(crawler.navigate().await, NavigationResult::NotArrived);
        assert_eq!(*coordinator.swarm_requests.lock(), 1);
        assert_eq!(coordinator.debriefs.lock().len(), 1);
    }

    #[tokio::test]
    async fn test_scout_cancelled_before_start() {
        let coordinator = Arc::new(RecordingCoordinator::default());
        let crawler = crawler(&["A", " ", "B"], (0, 0), (0, 2), NavigationMode::Scout, coordinator.clone());
        crawler.cancellation().cancel();

        assert_eq!(crawler.navigate().await, NavigationResult::NotArrived);
        assert_eq!(coordinator.debriefs.lock().len(), 1);
    }
}
