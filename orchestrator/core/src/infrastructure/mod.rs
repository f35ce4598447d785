// Copyright (c) 2026 100monkeys.ai
// SPDX-License-Identifier: AGPL-3.0

pub mod event_bus;
pub mod maze_file;
pub mod random_maze;

pub use event_bus::{CrawlerEventReceiver, EventBus, EventBusError, EventReceiver};
pub use maze_file::FileMazeSupplier;
pub use random_maze::RandomMazeSupplier;
