//! Driver - the two entry points a host calls.
//!
//! The engine knows nothing about frames or terminals. Whatever embeds it
//! calls [`Driver::initialize`] once when it boots and [`Driver::tick`] on
//! every frame (or whatever cadence it owns).

use crate::engine::{ComponentManager, TickSummary};
use crate::error::InitializeError;

/// Boot-once, tick-many entry points.
pub trait Driver {
    /// Boot trigger. Must be idempotent.
    fn initialize(&mut self) -> Result<(), InitializeError>;

    /// Per-frame trigger.
    fn tick(&mut self) -> TickSummary;
}

impl Driver for ComponentManager {
    fn initialize(&mut self) -> Result<(), InitializeError> {
        self.initialize_tree()
    }

    fn tick(&mut self) -> TickSummary {
        ComponentManager::tick(self)
    }
}
