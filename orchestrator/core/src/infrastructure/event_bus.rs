// Copyright (c) 2026 100monkeys.ai
// SPDX-License-Identifier: AGPL-3.0

// Event Bus Implementation - Pub/Sub for Navigation Events
//
// In-memory event streaming using tokio broadcast channels. The queen publishes
// while crawlers run; the CLI and tests observe.
//
// Events are not persisted. A subscriber that falls more than `capacity`
// events behind loses the oldest ones.

use crate::domain::events::NavigationEvent;
use crate::domain::navigation::CrawlerId;
use std::sync::Arc;
use tokio::sync::broadcast;
use tracing::{trace, warn};

/// Event bus for publishing and subscribing to navigation events
#[derive(Clone)]
pub struct EventBus {
    sender: Arc<broadcast::Sender<NavigationEvent>>,
}

impl EventBus {
    /// Create a new event bus with specified channel capacity
    pub fn new(capacity: usize) -> Self {
        let (sender, _) = broadcast::channel(capacity.max(1));
        Self {
            sender: Arc::new(sender),
        }
    }

    /// Create event bus with default capacity (1000)
    pub fn with_default_capacity() -> Self {
        Self::new(1000)
    }

    /// Publish an event to all subscribers. Having none is not an error.
    pub fn publish(&self, event: NavigationEvent) {
        trace!("Publishing event: {:?}", event);

        let receiver_count = self.sender.send(event).unwrap_or(0);
        if receiver_count == 0 {
            trace!("No subscribers listening to event");
        }
    }

    pub fn subscribe(&self) -> EventReceiver {
        EventReceiver {
            receiver: self.sender.subscribe(),
        }
    }

    /// Subscribe to events concerning a single crawler
    pub fn subscribe_crawler(&self, crawler_id: CrawlerId) -> CrawlerEventReceiver {
        CrawlerEventReceiver {
            receiver: self.sender.subscribe(),
            crawler_id,
        }
    }

    pub fn subscriber_count(&self) -> usize {
        self.sender.receiver_count()
    }
}

impl Default for EventBus {
    fn default() -> Self {
        Self::with_default_capacity()
    }
}

/// Receiver for all navigation events
pub struct EventReceiver {
    receiver: broadcast::Receiver<NavigationEvent>,
}

impl EventReceiver {
    /// Receive the next event (waits until one is available)
    pub async fn recv(&mut self) -> Result<NavigationEvent, EventBusError> {
        self.receiver.recv().await.map_err(EventBusError::from)
    }

    /// Try to receive an event without waiting
    pub fn try_recv(&mut self) -> Result<NavigationEvent, EventBusError> {
        self.receiver.try_recv().map_err(EventBusError::from)
    }

    /// Everything buffered right now, stopping at the first empty read.
    pub fn drain(&mut self) -> Vec<NavigationEvent> {
        let mut events = Vec::new();
        loop {
            match self.try_recv() {
                Ok(event) => events.push(event),
                Err(EventBusError::Lagged(_)) => continue,
                Err(EventBusError::Empty | EventBusError::Closed) => return events,
            }
        }
    }
}

/// Receiver filtered to one crawler
pub struct CrawlerEventReceiver {
    receiver: broadcast::Receiver<NavigationEvent>,
    crawler_id: CrawlerId,
}

impl CrawlerEventReceiver {
    pub async fn recv(&mut self) -> Result<NavigationEvent, EventBusError> {
        loop {
            let event = self.receiver.recv().await.map_err(EventBusError::from)?;
            if event.crawler_id() == Some(self.crawler_id) {
                return Ok(event);
            }
        }
    }

    /// This crawler's buffered events, stopping at the first empty read.
    pub fn drain(&mut self) -> Vec<NavigationEvent> {
        let mut events = Vec::new();
        loop {
            match self.receiver.try_recv().map_err(EventBusError::from) {
                Ok(event) if event.crawler_id() == Some(self.crawler_id) => events.push(event),
                Ok(_) | Err(EventBusError::Lagged(_)) => continue,
                Err(EventBusError::Empty | EventBusError::Closed) => return events,
            }
        }
    }
}

/// Errors that can occur when receiving events
#[derive(Debug, thiserror::Error, PartialEq, Eq)]
pub enum EventBusError {
    #[error("Event bus is closed")]
    Closed,

    #[error("No events available")]
    Empty,

    #[error("Receiver lagged by {0} events (events were dropped)")]
    Lagged(u64),
}

impl From<broadcast::error::RecvError> for EventBusError {
    fn from(e: broadcast::error::RecvError) -> Self {
        match e {
            broadcast::error::RecvError::Closed => EventBusError::Closed,
            broadcast::error::RecvError::Lagged(n) => {
                warn!("Event receiver lagged by {} events", n);
                EventBusError::Lagged(n)
            }
        }
    }
}

impl From<broadcast::error::TryRecvError> for EventBusError {
    fn from(e: broadcast::error::TryRecvError) -> Self {
        match e {
            broadcast::error::TryRecvError::Empty => EventBusError::Empty,
            broadcast::error::TryRecvError::Closed => EventBusError::Closed,
            broadcast::error::TryRecvError::Lagged(n) => {
                warn!("Event receiver lagged by {} events", n);
                EventBusError::Lagged(n)
            }
        }
    }
}
