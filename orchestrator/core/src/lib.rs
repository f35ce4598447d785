// Copyright (c) 2026 100monkeys.ai
// SPDX-License-Identifier: AGPL-3.0
//! # `mazebot-core`: Maze Model and Contracts
//!
//! Leaf building blocks shared by every crawler and by the coordinating queen.
//!
//! ## Crate Layout
//!
//! | Module | Layer | Contents |
//! |--------|-------|----------|
//! | [`domain`] | Domain | `Map`, `Cell`, `Coordinate`, `Direction`, path simplifier, navigation results, maze document, events, configuration |
//! | [`application`] | Application | `MazeSupplier` contract |
//! | [`infrastructure`] | Infrastructure | `EventBus`, file and random maze suppliers |
//!
//! # Architecture
//!
//! - **Layer:** Core System
//! - **Purpose:** Grid semantics and data contracts consumed by `mazebot-swarm`

pub mod domain;
pub mod application;
pub mod infrastructure;

pub use domain::*;
