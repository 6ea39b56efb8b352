//! Coalescing of evasion triggers into logical dodges.
//!
//! A single tap can surface as several events (pointer-down followed by
//! touch-start, or pointer-enter immediately followed by focus). The
//! [`TriggerCoordinator`] accepts the first event of such a burst and drops
//! the rest, so the dodge counter advances exactly once per interaction.

use std::time::{Duration, Instant};

use log::trace;
use serde::Deserialize;

use crate::config::TriggerConfig;

/// Host events that make the control evade.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum TriggerKind {
    PointerEnter,
    PointerDown,
    TouchStart,
    Focus,
}

/// Owns the dodge counter and debounces duplicate triggers.
#[derive(Debug)]
pub struct TriggerCoordinator {
    window: Duration,
    last_accepted: Option<Instant>,
    dodges: u32,
}

impl TriggerCoordinator {
    /// Creates a coordinator with no dodges recorded.
    pub fn new(config: &TriggerConfig) -> Self {
        Self {
            window: config.debounce_window(),
            last_accepted: None,
            dodges: 0,
        }
    }

    /// Number of logical dodges since the session started.
    pub fn dodge_count(&self) -> u32 {
        self.dodges
    }

    /// Handles a trigger happening now.
    ///
    /// See [`handle_at`](Self::handle_at).
    pub fn handle(&mut self, kind: TriggerKind) -> Option<u32> {
        self.handle_at(kind, Instant::now())
    }

    /// Handles a trigger observed at `now`.
    ///
    /// Returns the new dodge count when the trigger starts a new interaction,
    /// or `None` when it falls within the debounce window of the last
    /// accepted trigger.
    pub fn handle_at(&mut self, kind: TriggerKind, now: Instant) -> Option<u32> {
        if let Some(last) = self.last_accepted {
            let elapsed = now.saturating_duration_since(last);
            if elapsed < self.window {
                trace!(kind:?, elapsed_ms = elapsed.as_millis() as u64; "Coalesced duplicate trigger");
                return None;
            }
        }

        self.last_accepted = Some(now);
        self.dodges = self.dodges.saturating_add(1);
        trace!(kind:?, dodge_count = self.dodges; "Accepted trigger");
        Some(self.dodges)
    }
}
