// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! Starts the task once enough workers have joined

use shoal_core::Event;

/// Counts live workers and fires once when `min_workers` are present
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TaskTrigger {
    min_workers: usize,
    joined: usize,
    fired: bool,
}

impl TaskTrigger {
    pub fn new(min_workers: usize) -> Self {
        Self {
            min_workers,
            joined: 0,
            fired: false,
        }
    }

    /// Track membership; true exactly once, on the event that reaches the threshold
    pub fn observe(&mut self, event: &Event) -> bool {
        match event {
            Event::WorkerJoined { .. } => self.joined += 1,
            Event::WorkerLeft { .. } => self.joined = self.joined.saturating_sub(1),
            Event::WorkCompleted { .. } | Event::TaskRequested { .. } => return false,
        }
        if self.fired || self.joined < self.min_workers {
            return false;
        }
        self.fired = true;
        tracing::info!(
            joined = self.joined,
            min_workers = self.min_workers,
            "enough workers joined"
        );
        true
    }

    pub fn has_fired(&self) -> bool {
        self.fired
    }

    pub fn joined(&self) -> usize {
        self.joined
    }
}

#[cfg(test)]
#[path = "trigger_tests.rs"]
mod tests;
