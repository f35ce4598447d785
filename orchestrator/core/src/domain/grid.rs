// Copyright (c) 2026 100monkeys.ai
// SPDX-License-Identifier: AGPL-3.0
//! # Grid Domain Model
//!
//! A [`Map`] is a fixed-size rectangular grid of [`Cell`]s. Passability is decided
//! solely by `Cell::Empty`; `Start` and `Destination` are informational markers.
//!
//! Two operations exist for the coordinator's canonical map:
//!
//! - [`Map::masked`]: the two-symbol view handed to new crawlers
//!   (`Empty | Start | Destination → Empty`, `Track | Occupied → Occupied`).
//! - [`Map::merge_tracks`]: copies only `Track` cells from a crawler's working
//!   copy; a canonical `Track` cell is never downgraded.
//!
//! # Architecture
//!
//! - **Layer:** Domain Layer
//! - **Purpose:** Cell semantics, bounds checking, masking and merging

use serde::{Deserialize, Serialize};
use std::fmt;
use thiserror::Error;

use crate::domain::direction::Direction;

/// Column (`x`) and row (`y`) of a cell; row 0 is the top row.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Coordinate {
    pub x: usize,
    pub y: usize,
}

impl Coordinate {
    pub const fn new(x: usize, y: usize) -> Self {
        Self { x, y }
    }
}

impl fmt::Display for Coordinate {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "({}, {})", self.x, self.y)
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Cell {
    Empty,
    Occupied,
    Start,
    Destination,
    /// Already traversed by some crawler in the current session.
    Track,
}

impl Cell {
    pub const EMPTY: char = ' ';
    pub const OCCUPIED: char = 'X';
    pub const START: char = 'A';
    pub const DESTINATION: char = 'B';
    pub const TRACK: char = '.';

    /// Parse a maze marker. Directional track markers are read as plain `Track`.
    pub const fn from_marker(marker: char) -> Option<Self> {
        match marker {
            Self::EMPTY => Some(Cell::Empty),
            Self::OCCUPIED => Some(Cell::Occupied),
            Self::START => Some(Cell::Start),
            Self::DESTINATION => Some(Cell::Destination),
            Self::TRACK | '^' | 'V' | 'v' | '>' | '<' => Some(Cell::Track),
            _ => None,
        }
    }

    pub const fn marker(self) -> char {
        match self {
            Cell::Empty => Self::EMPTY,
            Cell::Occupied => Self::OCCUPIED,
            Cell::Start => Self::START,
            Cell::Destination => Self::DESTINATION,
            Cell::Track => Self::TRACK,
        }
    }

    pub const fn is_empty(self) -> bool {
        matches!(self, Cell::Empty)
    }

    /// Collapse to the passable/blocked alphabet seen by freshly spawned crawlers.
    pub const fn masked(self) -> Self {
        match self {
            Cell::Empty | Cell::Start | Cell::Destination => Cell::Empty,
            Cell::Occupied | Cell::Track => Cell::Occupied,
        }
    }
}

/// Malformed grid input. Reported at construction, never searched around.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum MapError {
    #[error("Map has no cells")]
    Empty,

    #[error("Map row {row} has {found} cells, expected {expected}")]
    NonRectangular {
        row: usize,
        expected: usize,
        found: usize,
    },

    #[error("Coordinate ({x}, {y}) is outside the {width}x{height} map")]
    OutOfBounds {
        x: i64,
        y: i64,
        width: usize,
        height: usize,
    },

    #[error("Unknown map marker {marker:?} at ({x}, {y})")]
    UnknownMarker { marker: char, x: usize, y: usize },

    #[error("Map dimensions differ: {expected:?} vs {found:?}")]
    DimensionMismatch {
        expected: (usize, usize),
        found: (usize, usize),
    },
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Map {
    width: usize,
    height: usize,
    cells: Vec<Cell>,
}

impl Map {
    /// Build a map from rows of cells. Rows must be non-empty and of equal length.
    pub fn new(rows: Vec<Vec<Cell>>) -> Result<Self, MapError> {
        let height = rows.len();
        let width = rows.first().map(Vec::len).unwrap_or(0);
        if height == 0 || width == 0 {
            return Err(MapError::Empty);
        }

        let mut cells = Vec::with_capacity(width * height);
        for (row, line) in rows.into_iter().enumerate() {
            if line.len() != width {
                return Err(MapError::NonRectangular {
                    row,
                    expected: width,
                    found: line.len(),
                });
            }
            cells.extend(line);
        }

        Ok(Self { width, height, cells })
    }

    /// Build a map from rows of maze markers (`' '`, `'X'`, `'A'`, `'B'`, track markers).
    pub fn from_markers<R: AsRef<[char]>>(rows: &[R]) -> Result<Self, MapError> {
        let rows = rows
            .iter()
            .enumerate()
            .map(|(y, row)| {
                row.as_ref()
                    .iter()
                    .enumerate()
                    .map(|(x, marker)| {
                        Cell::from_marker(*marker).ok_or(MapError::UnknownMarker {
                            marker: *marker,
                            x,
                            y,
                        })
                    })
                    .collect::<Result<Vec<_>, _>>()
            })
            .collect::<Result<Vec<_>, _>>()?;
        Self::new(rows)
    }

    /// Convenience parser for one string per row.
    pub fn parse(rows: &[&str]) -> Result<Self, MapError> {
        let rows: Vec<Vec<char>> = rows.iter().map(|row| row.chars().collect()).collect();
        Self::from_markers(&rows)
    }

    /// A `width` x `height` map with every cell set to `cell`.
    pub fn filled(width: usize, height: usize, cell: Cell) -> Result<Self, MapError> {
        if width == 0 || height == 0 {
            return Err(MapError::Empty);
        }
        Ok(Self {
            width,
            height,
            cells: vec![cell; width * height],
        })
    }

    pub fn width(&self) -> usize {
        self.width
    }

    pub fn height(&self) -> usize {
        self.height
    }

    pub fn contains(&self, coordinate: Coordinate) -> bool {
        coordinate.x < self.width && coordinate.y < self.height
    }

    /// Validate a signed coordinate pair as supplied by a maze document.
    pub fn coordinate(&self, x: i64, y: i64) -> Result<Coordinate, MapError> {
        let out_of_bounds = MapError::OutOfBounds {
            x,
            y,
            width: self.width,
            height: self.height,
        };
        let (Ok(column), Ok(row)) = (usize::try_from(x), usize::try_from(y)) else {
            return Err(out_of_bounds);
        };
        let coordinate = Coordinate::new(column, row);
        if self.contains(coordinate) {
            Ok(coordinate)
        } else {
            Err(out_of_bounds)
        }
    }

    /// Reject a coordinate that does not lie on this map.
    pub fn check(&self, coordinate: Coordinate) -> Result<Coordinate, MapError> {
        if self.contains(coordinate) {
            Ok(coordinate)
        } else {
            Err(MapError::OutOfBounds {
                x: coordinate.x as i64,
                y: coordinate.y as i64,
                width: self.width,
                height: self.height,
            })
        }
    }

    pub fn get(&self, coordinate: Coordinate) -> Option<Cell> {
        self.index(coordinate).map(|i| self.cells[i])
    }

    pub fn set(&mut self, coordinate: Coordinate, cell: Cell) -> Result<(), MapError> {
        let coordinate = self.check(coordinate)?;
        self.cells[coordinate.y * self.width + coordinate.x] = cell;
        Ok(())
    }

    /// Mark a cell as traversed. Out-of-bounds coordinates are ignored.
    pub fn mark_track(&mut self, coordinate: Coordinate) {
        if let Some(i) = self.index(coordinate) {
            self.cells[i] = Cell::Track;
        }
    }

    /// The in-bounds cell one step from `coordinate`, if any.
    pub fn neighbor(&self, coordinate: Coordinate, direction: Direction) -> Option<Coordinate> {
        let (dx, dy) = direction.offset();
        let x = coordinate.x.checked_add_signed(dx)?;
        let y = coordinate.y.checked_add_signed(dy)?;
        let target = Coordinate::new(x, y);
        self.contains(target).then_some(target)
    }

    /// True iff the target cell is in-bounds and currently `Empty`.
    pub fn can_move(&self, coordinate: Coordinate, direction: Direction) -> bool {
        self.neighbor(coordinate, direction)
            .and_then(|target| self.get(target))
            .is_some_and(Cell::is_empty)
    }

    /// Number of directions currently passable from `coordinate`.
    pub fn exits(&self, coordinate: Coordinate) -> usize {
        Direction::ALL
            .iter()
            .filter(|direction| self.can_move(coordinate, **direction))
            .count()
    }

    pub fn masked(&self) -> Map {
        Map {
            width: self.width,
            height: self.height,
            cells: self.cells.iter().map(|cell| cell.masked()).collect(),
        }
    }

    /// Copy `Track` cells from `tracks` into this map. Returns how many cells
    /// became newly tracked.
    pub fn merge_tracks(&mut self, tracks: &Map) -> Result<usize, MapError> {
        if (self.width, self.height) != (tracks.width, tracks.height) {
            return Err(MapError::DimensionMismatch {
                expected: (self.width, self.height),
                found: (tracks.width, tracks.height),
            });
        }

        let mut merged = 0;
        for (cell, update) in self.cells.iter_mut().zip(&tracks.cells) {
            if *update == Cell::Track && *cell != Cell::Track {
                *cell = Cell::Track;
                merged += 1;
            }
        }
        Ok(merged)
    }

    pub fn count(&self, cell: Cell) -> usize {
        self.cells.iter().filter(|c| **c == cell).count()
    }

    pub fn rows(&self) -> impl Iterator<Item = &[Cell]> {
        self.cells.chunks(self.width)
    }

    /// Bracketed text form, one row per line: `[X][ ][A][B]`.
    pub fn render(&self) -> String {
        let mut out = String::with_capacity((self.width * 3 + 1) * self.height);
        for row in self.rows() {
            for cell in row {
                out.push('[');
                out.push(cell.marker());
                out.push(']');
            }
            out.push('\n');
        }
        out
    }

    /// Render with `path` walked from `start` overlaid as track markers.
    /// Walking stops at the first unknown character or boundary.
    pub fn render_with_path(&self, start: Coordinate, path: &str) -> String {
        let mut overlay = self.clone();
        let mut current = start;
        for step in path.chars() {
            let Some(next) = Direction::from_char(step).and_then(|d| self.neighbor(current, d)) else {
                break;
            };
            current = next;
            if matches!(overlay.get(current), Some(Cell::Empty)) {
                overlay.mark_track(current);
            }
        }
        overlay.render()
    }

    fn index(&self, coordinate: Coordinate) -> Option<usize> {
        self.contains(coordinate)
            .then(|| coordinate.y * self.width + coordinate.x)
    }
}

impl fmt::Display for Map {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.render())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn can_move_map() -> Map {
        Map::parse(&[
            " XXX ",
            "X   X",
            "X   X",
            "X   X",
            " XXX ",
        ])
        .unwrap()
    }

    #[test]
    fn test_can_move_table() {
        let map = can_move_map();
        let cases = [
            (3, 1, Direction::North, false),
            (2, 2, Direction::North, true),
            (4, 0, Direction::South, false),
            (1, 1, Direction::South, true),
            (1, 3, Direction::East, true),
            (0, 0, Direction::East, false),
            (3, 3, Direction::West, true),
            (0, 4, Direction::West, false),
            (0, 0, Direction::North, false),
            (4, 4, Direction::East, false),
        ];

        for (x, y, direction, expected) in cases {
            assert_eq!(
                map.can_move(Coordinate::new(x, y), direction),
                expected,
                "can_move from ({}, {}) {:?}",
                x,
                y,
                direction
            );
        }
    }

    #[test]
    fn test_non_rectangular_rows_are_rejected() {
        let err = Map::parse(&["  ", " "]).unwrap_err();
        assert_eq!(
            err,
            MapError::NonRectangular {
                row: 1,
                expected: 2,
                found: 1
            }
        );
        assert_eq!(Map::parse(&[]).unwrap_err(), MapError::Empty);
    }

    #[test]
    fn test_unknown_marker_is_rejected() {
        let err = Map::parse(&[" ?"]).unwrap_err();
        assert_eq!(err, MapError::UnknownMarker { marker: '?', x: 1, y: 0 });
    }

    #[test]
    fn test_coordinate_bounds() {
        let mut map = can_move_map();
        assert_eq!(map.coordinate(4, 4).unwrap(), Coordinate::new(4, 4));
        assert!(matches!(map.coordinate(5, 0), Err(MapError::OutOfBounds { .. })));
        assert!(matches!(map.coordinate(-1, 0), Err(MapError::OutOfBounds { .. })));
        assert!(map.set(Coordinate::new(9, 9), Cell::Track).is_err());
    }

    #[test]
    fn test_masking_collapses_to_two_symbols() {
        let map = Map::parse(&["XA.B", " <>X"]).unwrap();
        let masked = map.masked();

        assert_eq!(masked, Map::parse(&["X X ", " XXX"]).unwrap());
        assert_eq!(
            masked.count(Cell::Empty) + masked.count(Cell::Occupied),
            masked.width() * masked.height()
        );
    }

    #[test]
    fn test_merge_copies_only_track_cells() {
        let mut canonical = Map::parse(&["X AB", ".   "]).unwrap();
        let crawler = Map::parse(&["X. X", "  . "]).unwrap();

        let merged = canonical.merge_tracks(&crawler).unwrap();

        assert_eq!(merged, 2);
        assert_eq!(canonical, Map::parse(&["X.AB", ". . "]).unwrap());
    }

    #[test]
    fn test_merge_rejects_other_dimensions() {
        let mut canonical = Map::parse(&["  "]).unwrap();
        let other = Map::parse(&["   "]).unwrap();
        assert!(matches!(
            canonical.merge_tracks(&other),
            Err(MapError::DimensionMismatch { .. })
        ));
    }

    #[test]
    fn test_render() {
        let map = Map::parse(&["X AB", "  XX", "    "]).unwrap();
        assert_eq!(map.render(), "[X][ ][A][B]\n[ ][ ][X][X]\n[ ][ ][ ][ ]\n");
    }

    #[test]
    fn test_render_with_path_marks_walked_cells() {
        let map = Map::parse(&["A  ", "X  ", "  B"]).unwrap();
        let rendered = map.render_with_path(Coordinate::new(0, 0), "EESS");
        assert_eq!(rendered, "[A][.][.]\n[X][ ][.]\n[ ][ ][B]\n");
    }
}
