// Copyright (c) 2026 100monkeys.ai
// SPDX-License-Identifier: AGPL-3.0

pub mod maze_supplier;

// Re-export contracts for convenience
pub use maze_supplier::{MazeSupplier, SupplierError};
