// Copyright (c) 2026 100monkeys.ai
// SPDX-License-Identifier: AGPL-3.0
//! Navigation identities, modes and outcomes.
//!
//! # Architecture
//!
//! - **Layer:** Domain Layer
//! - **Purpose:** Value types exchanged between crawlers, the queen and callers

use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;
use uuid::Uuid;

use crate::domain::path::simplify;

/// Unique identifier for a crawler.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct CrawlerId(pub Uuid);

impl CrawlerId {
    pub fn new() -> Self {
        Self(Uuid::new_v4())
    }
}

impl Default for CrawlerId {
    fn default() -> Self {
        Self::new()
    }
}

impl fmt::Display for CrawlerId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        self.0.fmt(f)
    }
}

/// Unique identifier for a queen (one per navigation session owner).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct QueenId(pub Uuid);

impl QueenId {
    pub fn new() -> Self {
        Self(Uuid::new_v4())
    }
}

impl Default for QueenId {
    fn default() -> Self {
        Self::new()
    }
}

impl fmt::Display for QueenId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        self.0.fmt(f)
    }
}

/// How a crawler searches.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum NavigationMode {
    /// Single agent, sequential backtracking over an explicit route queue.
    Scout,
    /// Forks into one concurrent child crawler per viable direction.
    #[default]
    Swarm,
}

impl fmt::Display for NavigationMode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            NavigationMode::Scout => f.write_str("scout"),
            NavigationMode::Swarm => f.write_str("swarm"),
        }
    }
}

impl FromStr for NavigationMode {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_ascii_lowercase().as_str() {
            "scout" => Ok(NavigationMode::Scout),
            "swarm" => Ok(NavigationMode::Swarm),
            other => Err(format!(
                "Unknown navigation mode '{}'. Supported: scout, swarm",
                other
            )),
        }
    }
}

/// Outcome of a navigation attempt. Not arriving is a normal outcome, not an error.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum NavigationResult {
    Arrived { path: String },
    NotArrived,
}

impl NavigationResult {
    pub fn arrived_with(path: impl Into<String>) -> Self {
        NavigationResult::Arrived { path: path.into() }
    }

    pub fn arrived(&self) -> bool {
        matches!(self, NavigationResult::Arrived { .. })
    }

    pub fn path(&self) -> Option<&str> {
        match self {
            NavigationResult::Arrived { path } => Some(path),
            NavigationResult::NotArrived => None,
        }
    }

    /// Apply the path simplifier to an arrived result.
    pub fn simplified(self) -> Self {
        match self {
            NavigationResult::Arrived { path } => NavigationResult::Arrived {
                path: simplify(&path),
            },
            NavigationResult::NotArrived => NavigationResult::NotArrived,
        }
    }

    /// Prepend the steps walked before the branch that produced this result.
    pub fn prefixed(self, prefix: &str) -> Self {
        match self {
            NavigationResult::Arrived { path } => NavigationResult::Arrived {
                path: format!("{}{}", prefix, path),
            },
            NavigationResult::NotArrived => NavigationResult::NotArrived,
        }
    }
}

/// Boundary form handed to result consumers: `{"arrived": true, "path": "EES"}`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct NavigationReport {
    pub arrived: bool,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub path: Option<String>,
}

impl From<NavigationResult> for NavigationReport {
    fn from(result: NavigationResult) -> Self {
        match result {
            NavigationResult::Arrived { path } => Self {
                arrived: true,
                path: Some(path),
            },
            NavigationResult::NotArrived => Self {
                arrived: false,
                path: None,
            },
        }
    }
}
