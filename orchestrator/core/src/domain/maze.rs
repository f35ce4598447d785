// Copyright (c) 2026 100monkeys.ai
// SPDX-License-Identifier: AGPL-3.0
//! Maze document
//!
//! The data contract produced by maze suppliers: a grid of single-character
//! markers plus `[x, y]` start and end positions, in the JSON shape used by the
//! remote maze challenge:
//!
//! ```json
//! {
//!   "name": "Maze #1",
//!   "mazePath": "/mazebot/mazes/abc",
//!   "startingPosition": [0, 0],
//!   "endingPosition": [2, 2],
//!   "map": [["A", " ", "X"], ...]
//! }
//! ```

use serde::{Deserialize, Serialize};

use crate::domain::grid::{Coordinate, Map, MapError};

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Maze {
    #[serde(default)]
    pub name: String,

    /// Supplier-side identifier used when submitting a solution.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub maze_path: Option<String>,

    pub starting_position: [i64; 2],

    pub ending_position: [i64; 2],

    pub map: Vec<Vec<char>>,
}

impl Maze {
    pub fn from_json_str(json: &str) -> serde_json::Result<Self> {
        serde_json::from_str(json)
    }

    pub fn to_map(&self) -> Result<Map, MapError> {
        Map::from_markers(&self.map)
    }

    pub fn start(&self) -> Result<Coordinate, MapError> {
        self.position(self.starting_position)
    }

    pub fn destination(&self) -> Result<Coordinate, MapError> {
        self.position(self.ending_position)
    }

    /// Validated grid, start and destination in one step.
    pub fn survey(&self) -> Result<(Map, Coordinate, Coordinate), MapError> {
        let map = self.to_map()?;
        let start = map.coordinate(self.starting_position[0], self.starting_position[1])?;
        let destination = map.coordinate(self.ending_position[0], self.ending_position[1])?;
        Ok((map, start, destination))
    }

    fn position(&self, [x, y]: [i64; 2]) -> Result<Coordinate, MapError> {
        self.to_map()?.coordinate(x, y)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::grid::Cell;

    const SAMPLE: &str = r#"{
        "name": "Maze #236 (10x10)",
        "mazePath": "/mazebot/mazes/ikTcNQMwKhux3bWjV3SSYKfyaVHcL0FXsvbwVGk5ns8",
        "startingPosition": [0, 0],
        "endingPosition": [2, 2],
        "map": [
            ["A", " ", "X"],
            ["X", " ", "X"],
            ["X", " ", "B"]
        ]
    }"#;

    #[test]
    fn test_parse_sample_document() {
        let maze = Maze::from_json_str(SAMPLE).unwrap();
        assert_eq!(maze.name, "Maze #236 (10x10)");
        assert_eq!(maze.starting_position, [0, 0]);

        let (map, start, destination) = maze.survey().unwrap();
        assert_eq!((map.width(), map.height()), (3, 3));
        assert_eq!(map.get(start), Some(Cell::Start));
        assert_eq!(map.get(destination), Some(Cell::Destination));
    }

    #[test]
    fn test_out_of_bounds_positions_are_invalid_input() {
        let mut maze = Maze::from_json_str(SAMPLE).unwrap();
        maze.ending_position = [3, 0];
        assert!(matches!(maze.survey(), Err(MapError::OutOfBounds { x: 3, y: 0, .. })));

        maze.ending_position = [0, -1];
        assert!(matches!(maze.survey(), Err(MapError::OutOfBounds { .. })));
    }

    #[test]
    fn test_ragged_map_is_invalid_input() {
        let mut maze = Maze::from_json_str(SAMPLE).unwrap();
        maze.map[1].pop();
        assert!(matches!(maze.survey(), Err(MapError::NonRectangular { row: 1, .. })));
    }
}
