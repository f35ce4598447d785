// Copyright (c) 2026 100monkeys.ai
// SPDX-License-Identifier: AGPL-3.0
//! Mod
//!
//! Coordinator and crawler factory.
//!
//! # Architecture
//!
//! - **Layer:** Application Layer
//! - **Purpose:** Owns the canonical map and runs navigation sessions

pub mod queen;
pub mod spawner;

pub use queen::Queen;
pub use spawner::DefaultSpawner;
