// Copyright (c) 2026 100monkeys.ai
// SPDX-License-Identifier: AGPL-3.0

//! Command implementations for mazebot CLI

pub mod config;
pub mod solve;

pub use self::config::ConfigCommand;
pub use self::solve::{CompareArgs, RandomArgs, SolveArgs};
