// Copyright (c) 2026 100monkeys.ai
// SPDX-License-Identifier: AGPL-3.0
//! Path simplifier.
//!
//! Collapses "there and back" detours: a compass letter, a perpendicular letter,
//! then the opposite of the first letter (`NES`, `SWN`, `ENW`, `WSE`, ...) reduce
//! to the middle letter. Reduction runs to a fixed point, so a collapse that
//! exposes a new reducible window is reduced as well.

use crate::domain::direction::Direction;

/// Simplify an optional path. Absent input stays absent.
pub fn simplify_path(path: Option<&str>) -> Option<String> {
    path.map(simplify)
}

/// Reduce `path` until no detour window remains. Characters outside `N/S/E/W`
/// never take part in a window and are passed through.
pub fn simplify(path: &str) -> String {
    // Reducing on a stack as characters arrive reaches the same fixed point as
    // rescanning the whole string after every collapse.
    let mut reduced: Vec<char> = Vec::with_capacity(path.len());
    for step in path.chars() {
        reduced.push(step);
        while let [.., first, middle, last] = reduced[..] {
            if !is_detour(first, middle, last) {
                break;
            }
            reduced.truncate(reduced.len() - 3);
            reduced.push(middle);
        }
    }
    reduced.into_iter().collect()
}

fn is_detour(first: char, middle: char, last: char) -> bool {
    let (Some(first), Some(middle), Some(last)) = (
        Direction::from_char(first),
        Direction::from_char(middle),
        Direction::from_char(last),
    ) else {
        return false;
    };
    last == first.opposite() && middle.is_perpendicular(first)
}
