// Copyright (c) 2026 100monkeys.ai
// SPDX-License-Identifier: AGPL-3.0
//! # Compass Directions and the Preference Heuristic
//!
//! [`Direction`] is the unit of movement on a [`Map`](crate::domain::grid::Map) and
//! the alphabet of every path string (`N`, `S`, `E`, `W`).
//!
//! [`preferences`] orders the four directions by how directly they close the gap
//! towards a destination:
//!
//! | Distance | Order |
//! |----------|-------|
//! | `dx >= dy` | horizontal, vertical, opposite vertical, opposite horizontal |
//! | `dx < dy` | vertical, horizontal, opposite horizontal, opposite vertical |
//!
//! Horizontal sign is East when `start.x <= destination.x`, vertical sign is North
//! when `start.y >= destination.y`, so a shared row still lists North before South
//! and a shared column lists East before West.

use serde::{Deserialize, Serialize};
use std::fmt;

use crate::domain::grid::Coordinate;

/// One of the four compass moves. North decreases `y`, East increases `x`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Direction {
    North,
    South,
    East,
    West,
}

impl Direction {
    /// Fixed scan order used when a coordinator enumerates viable moves.
    pub const ALL: [Direction; 4] = [
        Direction::North,
        Direction::South,
        Direction::East,
        Direction::West,
    ];

    /// Path-encoding character.
    pub const fn as_char(self) -> char {
        match self {
            Direction::North => 'N',
            Direction::South => 'S',
            Direction::East => 'E',
            Direction::West => 'W',
        }
    }

    pub const fn from_char(c: char) -> Option<Self> {
        match c {
            'N' => Some(Direction::North),
            'S' => Some(Direction::South),
            'E' => Some(Direction::East),
            'W' => Some(Direction::West),
            _ => None,
        }
    }

    pub const fn opposite(self) -> Self {
        match self {
            Direction::North => Direction::South,
            Direction::South => Direction::North,
            Direction::East => Direction::West,
            Direction::West => Direction::East,
        }
    }

    pub const fn is_horizontal(self) -> bool {
        matches!(self, Direction::East | Direction::West)
    }

    pub const fn is_perpendicular(self, other: Direction) -> bool {
        self.is_horizontal() != other.is_horizontal()
    }

    /// Column and row delta of a single step.
    pub const fn offset(self) -> (isize, isize) {
        match self {
            Direction::North => (0, -1),
            Direction::South => (0, 1),
            Direction::East => (1, 0),
            Direction::West => (-1, 0),
        }
    }
}

impl fmt::Display for Direction {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_char())
    }
}

/// Order the four directions from most to least preferred for travelling from
/// `start` towards `destination`. Pure; ties favour the horizontal axis.
pub fn preferences(start: Coordinate, destination: Coordinate) -> [Direction; 4] {
    let horizontal = if start.x <= destination.x {
        Direction::East
    } else {
        Direction::West
    };
    let vertical = if start.y >= destination.y {
        Direction::North
    } else {
        Direction::South
    };

    let distance_x = start.x.abs_diff(destination.x);
    let distance_y = start.y.abs_diff(destination.y);

    if distance_x >= distance_y {
        [horizontal, vertical, vertical.opposite(), horizontal.opposite()]
    } else {
        [vertical, horizontal, horizontal.opposite(), vertical.opposite()]
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashSet;

    fn at(x: usize, y: usize) -> Coordinate {
        Coordinate::new(x, y)
    }

    #[test]
    fn test_horizontal_component_decides_first_and_last() {
        let west = preferences(at(3, 0), at(0, 0));
        assert_eq!(west[0], Direction::West);
        assert_eq!(west[3], Direction::East);

        let east = preferences(at(1, 0), at(2, 0));
        assert_eq!(east[0], Direction::East);
        assert_eq!(east[3], Direction::West);
    }

    #[test]
    fn test_vertical_component_decides_first_and_last() {
        let north = preferences(at(0, 3), at(0, 0));
        assert_eq!(north[0], Direction::North);
        assert_eq!(north[3], Direction::South);

        let south = preferences(at(0, 1), at(0, 2));
        assert_eq!(south[0], Direction::South);
        assert_eq!(south[3], Direction::North);
    }

    #[test]
    fn test_same_row_prefers_north_before_south() {
        let order = preferences(at(1, 1), at(5, 1));
        assert_eq!(order[1], Direction::North);
        assert_eq!(order[2], Direction::South);
    }

    #[test]
    fn test_same_column_prefers_east_before_west() {
        let order = preferences(at(1, 5), at(1, 1));
        assert_eq!(order[1], Direction::East);
        assert_eq!(order[2], Direction::West);
    }

    #[test]
    fn test_distance_decides_primary_axis() {
        let start = at(2, 2);
        let cases = [
            (at(4, 1), Direction::East, Direction::North),
            (at(5, 3), Direction::East, Direction::South),
            (at(4, 10), Direction::South, Direction::East),
            (at(3, 0), Direction::North, Direction::East),
            (at(0, 1), Direction::West, Direction::North),
            (at(0, 3), Direction::West, Direction::South),
            (at(1, 0), Direction::North, Direction::West),
            (at(1, 4), Direction::South, Direction::West),
        ];

        for (destination, first, second) in cases {
            let order = preferences(start, destination);
            assert_eq!(order[0], first, "first preference towards {}", destination);
            assert_eq!(order[1], second, "second preference towards {}", destination);
        }
    }

    #[test]
    fn test_tie_resolves_horizontal_first() {
        assert_eq!(
            preferences(at(2, 2), at(4, 4)),
            [Direction::East, Direction::South, Direction::North, Direction::West]
        );
        assert_eq!(
            preferences(at(3, 3), at(3, 3)),
            [Direction::East, Direction::North, Direction::South, Direction::West]
        );
    }

    #[test]
    fn test_preferences_are_a_pure_permutation() {
        for sx in 0..5 {
            for sy in 0..5 {
                for dx in 0..5 {
                    for dy in 0..5 {
                        let order = preferences(at(sx, sy), at(dx, dy));
                        let unique: HashSet<Direction> = order.iter().copied().collect();
                        assert_eq!(unique.len(), 4, "not a permutation: {:?}", order);
                        assert_eq!(order[3], order[0].opposite());
                        assert_eq!(order, preferences(at(sx, sy), at(dx, dy)));
                    }
                }
            }
        }
    }

    #[test]
    fn test_char_encoding() {
        for direction in Direction::ALL {
            assert_eq!(Direction::from_char(direction.as_char()), Some(direction));
            assert!(direction.is_perpendicular(Direction::ALL[if direction.is_horizontal() { 0 } else { 2 }]));
        }
        assert_eq!(Direction::from_char('x'), None);
    }
}
