// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! Events delivered to the coordinator loop

use crate::completion::Completion;
use crate::dataset::Dataset;
use crate::id::WorkerId;

/// Inputs to the coordinator, delivered one at a time
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Event {
    /// A worker connected and is ready for work
    WorkerJoined { worker: WorkerId },
    /// A worker disconnected or could not be reached
    WorkerLeft { worker: WorkerId },
    /// A worker finished its assigned item
    WorkCompleted {
        worker: WorkerId,
        completion: Completion,
    },
    /// Start the task over the given dataset
    TaskRequested { dataset: Dataset },
}

impl Event {
    /// Short name for log lines
    pub fn name(&self) -> &'static str {
        match self {
            Event::WorkerJoined { .. } => "worker_joined",
            Event::WorkerLeft { .. } => "worker_left",
            Event::WorkCompleted { .. } => "work_completed",
            Event::TaskRequested { .. } => "task_requested",
        }
    }

    /// Worker the event concerns, if any
    pub fn worker(&self) -> Option<&WorkerId> {
        match self {
            Event::WorkerJoined { worker }
            | Event::WorkerLeft { worker }
            | Event::WorkCompleted { worker, .. } => Some(worker),
            Event::TaskRequested { .. } => None,
        }
    }
}

#[cfg(test)]
#[path = "event_tests.rs"]
mod tests;
