// Copyright (c) 2026 100monkeys.ai
// SPDX-License-Identifier: AGPL-3.0
//! Pending Scout branches.
//!
//! Seeded branches are served first-in first-out. Alternatives discovered while
//! following a branch go to the front, in preference order, so the most recent
//! junction is exhausted before older ones are resumed.

use std::collections::VecDeque;

use mazebot_core::{Coordinate, Direction};

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RouteQueueItem {
    /// Where the branch leaves from.
    pub origin: Coordinate,
    /// Path walked from the crawler's start up to `origin`.
    pub steps: String,
    pub direction: Direction,
}

#[derive(Debug, Default)]
pub struct RouteQueue {
    items: VecDeque<RouteQueueItem>,
}

impl RouteQueue {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn seeded(origin: Coordinate, steps: &str, directions: &[Direction]) -> Self {
        let mut queue = Self::new();
        queue.items.extend(directions.iter().map(|direction| RouteQueueItem {
            origin,
            steps: steps.to_string(),
            direction: *direction,
        }));
        queue
    }

    /// Put `directions` ahead of everything queued, keeping their order.
    pub fn push_front(&mut self, origin: Coordinate, steps: &str, directions: &[Direction]) {
        for direction in directions.iter().rev() {
            self.items.push_front(RouteQueueItem {
                origin,
                steps: steps.to_string(),
                direction: *direction,
            });
        }
    }

    pub fn pop(&mut self) -> Option<RouteQueueItem> {
        self.items.pop_front()
    }

    pub fn len(&self) -> usize {
        self.items.len()
    }

    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use Direction::*;

    #[test]
    fn test_seeded_queue_is_fifo() {
        let origin = Coordinate::new(1, 1);
        let mut queue = RouteQueue::seeded(origin, "E", &[North, South, West]);

        assert_eq!(queue.len(), 3);
        let order: Vec<Direction> = std::iter::from_fn(|| queue.pop()).map(|i| i.direction).collect();
        assert_eq!(order, vec![North, South, West]);
        assert!(queue.is_empty());
    }

    #[test]
    fn test_alternatives_jump_the_queue_in_order() {
        let mut queue = RouteQueue::seeded(Coordinate::new(0, 0), "", &[East, South]);
        let first = queue.pop().unwrap();
        assert_eq!(first.direction, East);

        queue.push_front(Coordinate::new(2, 0), "EE", &[North, West]);

        let next = queue.pop().unwrap();
        assert_eq!(
            next,
            RouteQueueItem {
                origin: Coordinate::new(2, 0),
                steps: "EE".to_string(),
                direction: North
            }
        );
        assert_eq!(queue.pop().unwrap().direction, West);
        assert_eq!(queue.pop().unwrap().direction, South);
        assert_eq!(queue.pop(), None);
    }

    #[test]
    fn test_pushing_nothing_is_a_no_op() {
        let mut queue = RouteQueue::new();
        queue.push_front(Coordinate::new(0, 0), "N", &[]);
        assert!(queue.is_empty());
    }
}
