// Copyright (c) 2026 100monkeys.ai
// SPDX-License-Identifier: AGPL-3.0

use crate::domain::context::NavigationContext;
use crate::domain::coordinator::CrawlerSpawner;
use crate::domain::crawler::Crawler;

/// Allocates a fresh crawler per request.
#[derive(Debug, Default, Clone, Copy)]
pub struct DefaultSpawner;

impl CrawlerSpawner for DefaultSpawner {
    fn spawn(&self, context: NavigationContext) -> Crawler {
        Crawler::new(context)
    }
}
