// Copyright (c) 2026 100monkeys.ai
// SPDX-License-Identifier: AGPL-3.0
//! # Random Maze Supplier
//!
//! Generates perfect mazes (exactly one simple path between any two open cells)
//! by depth-first carving. Rooms sit on even coordinates and walls between them
//! are knocked out as the carver advances, so both dimensions are forced odd.
//! The start is the top-left cell and the destination the bottom-right one.
//!
//! A seeded supplier is deterministic: the same seed yields the same sequence
//! of mazes.

use async_trait::async_trait;
use parking_lot::Mutex;
use rand::rngs::StdRng;
use rand::seq::SliceRandom;
use rand::SeedableRng;
use std::sync::atomic::{AtomicU64, Ordering};

use crate::application::maze_supplier::{MazeSupplier, SupplierError};
use crate::domain::direction::Direction;
use crate::domain::grid::{Cell, Coordinate};
use crate::domain::maze::Maze;

pub const MIN_DIMENSION: usize = 3;

pub struct RandomMazeSupplier {
    width: usize,
    height: usize,
    rng: Mutex<StdRng>,
    generated: AtomicU64,
}

impl RandomMazeSupplier {
    /// Dimensions are rounded up to the next odd value of at least 3.
    pub fn new(width: usize, height: usize) -> Self {
        Self::with_rng(width, height, StdRng::from_os_rng())
    }

    pub fn with_seed(width: usize, height: usize, seed: u64) -> Self {
        Self::with_rng(width, height, StdRng::seed_from_u64(seed))
    }

    fn with_rng(width: usize, height: usize, rng: StdRng) -> Self {
        Self {
            width: odd_dimension(width),
            height: odd_dimension(height),
            rng: Mutex::new(rng),
            generated: AtomicU64::new(0),
        }
    }

    pub fn width(&self) -> usize {
        self.width
    }

    pub fn height(&self) -> usize {
        self.height
    }

    pub fn generate(&self) -> Maze {
        let markers = {
            let mut rng = self.rng.lock();
            carve(self.width, self.height, &mut rng)
        };
        let number = self.generated.fetch_add(1, Ordering::Relaxed) + 1;

        Maze {
            name: format!("Random maze #{} ({}x{})", number, self.width, self.height),
            maze_path: None,
            starting_position: [0, 0],
            ending_position: [(self.width - 1) as i64, (self.height - 1) as i64],
            map: markers,
        }
    }
}

#[async_trait]
impl MazeSupplier for RandomMazeSupplier {
    async fn next_maze(&self) -> Result<Option<Maze>, SupplierError> {
        Ok(Some(self.generate()))
    }
}

fn odd_dimension(value: usize) -> usize {
    let value = value.max(MIN_DIMENSION);
    if value % 2 == 0 {
        value + 1
    } else {
        value
    }
}

/// Carve a `width` x `height` perfect maze. Both dimensions must be odd.
fn carve(width: usize, height: usize, rng: &mut StdRng) -> Vec<Vec<char>> {
    let mut cells = vec![vec![Cell::OCCUPIED; width]; height];
    let room = |c: Coordinate, direction: Direction| -> Option<(Coordinate, Coordinate)> {
        let (dx, dy) = direction.offset();
        let wall = Coordinate::new(c.x.checked_add_signed(dx)?, c.y.checked_add_signed(dy)?);
        let next = Coordinate::new(wall.x.checked_add_signed(dx)?, wall.y.checked_add_signed(dy)?);
        (next.x < width && next.y < height).then_some((wall, next))
    };

    let origin = Coordinate::new(0, 0);
    cells[origin.y][origin.x] = Cell::EMPTY;
    let mut stack = vec![origin];

    while let Some(&current) = stack.last() {
        let mut directions = Direction::ALL;
        directions.shuffle(rng);

        let unvisited = directions
            .into_iter()
            .filter_map(|direction| room(current, direction))
            .find(|(_, next)| cells[next.y][next.x] == Cell::OCCUPIED);

        match unvisited {
            Some((wall, next)) => {
                cells[wall.y][wall.x] = Cell::EMPTY;
                cells[next.y][next.x] = Cell::EMPTY;
                stack.push(next);
            }
            None => {
                stack.pop();
            }
        }
    }

    cells[0][0] = Cell::START;
    cells[height - 1][width - 1] = Cell::DESTINATION;
    cells
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::grid::Map;
    use std::collections::{HashSet, VecDeque};

    fn open_cells(map: &Map) -> usize {
        map.count(Cell::Empty) + map.count(Cell::Start) + map.count(Cell::Destination)
    }

    /// Reachable cells from `start`, treating start and destination as open.
    fn reachable(map: &Map, start: Coordinate) -> HashSet<Coordinate> {
        let open = map.masked();
        let mut seen = HashSet::from([start]);
        let mut queue = VecDeque::from([start]);
        while let Some(current) = queue.pop_front() {
            for direction in Direction::ALL {
                if let Some(next) = open.neighbor(current, direction) {
                    if open.get(next) == Some(Cell::Empty) && seen.insert(next) {
                        queue.push_back(next);
                    }
                }
            }
        }
        seen
    }

    #[test]
    fn test_dimensions_are_forced_odd() {
        let supplier = RandomMazeSupplier::with_seed(10, 2, 1);
        assert_eq!((supplier.width(), supplier.height()), (11, 3));

        let maze = supplier.generate();
        assert_eq!(maze.map.len(), 3);
        assert!(maze.map.iter().all(|row| row.len() == 11));
        assert_eq!(maze.ending_position, [10, 2]);
    }

    #[test]
    fn test_every_open_cell_is_reachable_and_tree_shaped() {
        for seed in 0..20 {
            let maze = RandomMazeSupplier::with_seed(15, 11, seed).generate();
            let (map, start, destination) = maze.survey().unwrap();

            let seen = reachable(&map, start);
            assert!(seen.contains(&destination), "seed {} unreachable", seed);
            assert_eq!(seen.len(), open_cells(&map), "seed {} has islands", seed);

            // A spanning tree over the open cells has exactly n - 1 adjacencies.
            let masked = map.masked();
            let edges: usize = seen
                .iter()
                .map(|c| {
                    [Direction::East, Direction::South]
                        .into_iter()
                        .filter(|d| masked.can_move(*c, *d))
                        .count()
                })
                .sum();
            assert_eq!(edges, seen.len() - 1, "seed {} has a cycle", seed);
        }
    }

    #[test]
    fn test_seeded_supplier_is_deterministic() {
        let a = RandomMazeSupplier::with_seed(9, 9, 42);
        let b = RandomMazeSupplier::with_seed(9, 9, 42);
        assert_eq!(a.generate().map, b.generate().map);
        assert_eq!(a.generate().map, b.generate().map);
    }

    #[tokio::test]
    async fn test_supplier_always_has_a_maze() {
        let supplier = RandomMazeSupplier::new(5, 5);
        let maze = supplier.next_maze().await.unwrap().unwrap();
        assert_eq!(maze.name, "Random maze #1 (5x5)");
        assert!(maze.survey().is_ok());
    }
}
