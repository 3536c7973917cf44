//! Typed system event bus.
//!
//! Lifecycle and composition signals are published here by the window
//! lifecycle core and consumed by the composition layer above it. The bus is
//! a plain queue: publishing never runs handlers inline, so a handler that
//! publishes while routing cannot corrupt iteration — consumers drain a
//! snapshot and route from that.

use std::collections::VecDeque;

use log::debug;

/// Signals published by the lifecycle core.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SystemEvent {
    /// A window was constructed and inserted into the registry.
    Created { origin: String },
    /// A window released its browsing-context resource.
    Terminated { origin: String },
    /// Composition request: bring the window for `origin` to the foreground.
    DisplayApp { origin: String },
    /// Composition request: tear down the window for `origin`.
    KillApp { origin: String },
    /// Viewport geometry changed; windows should re-query the layout manager.
    SystemResize,
    /// A window's content document changed its title.
    TitleChanged { origin: String, title: String },
    /// The rocketbar became visible.
    RocketbarShown,
    /// The rocketbar was hidden.
    RocketbarHidden,
}

/// Ordered queue of pending system events.
#[derive(Debug, Default)]
pub struct EventBus {
    queue: VecDeque<SystemEvent>,
}

impl EventBus {
    pub fn new() -> Self {
        Self::default()
    }

    /// Append an event to the queue.
    pub fn publish(&mut self, event: SystemEvent) {
        debug!("publish: {:?}", event);
        self.queue.push_back(event);
    }

    /// Take a snapshot of all pending events, leaving the queue empty.
    ///
    /// Routing from the returned `Vec` keeps re-entrant publishes (a consumer
    /// publishing while it routes) out of the batch being iterated.
    pub fn drain(&mut self) -> Vec<SystemEvent> {
        self.queue.drain(..).collect()
    }

    pub fn iter(&self) -> impl Iterator<Item = &SystemEvent> {
        self.queue.iter()
    }

    pub fn len(&self) -> usize {
        self.queue.len()
    }

    pub fn is_empty(&self) -> bool {
        self.queue.is_empty()
    }
}
