// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! Effects requested by the coordinator

use crate::id::WorkerId;
use crate::report::TaskReport;
use crate::traced::TracedEffect;
use crate::work::WorkItem;
use serde::{Deserialize, Serialize};

/// Side effects the coordinator asks the shell to perform
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum Effect {
    /// Send a work item to a worker that was just marked busy
    Dispatch { worker: WorkerId, item: WorkItem },
    /// Tell a worker to shut down
    Stop { worker: WorkerId },
    /// Publish the final task report
    Report { report: Box<TaskReport> },
    /// Stop the coordinator itself
    Shutdown,
}

impl TracedEffect for Effect {
    fn name(&self) -> &'static str {
        match self {
            Effect::Dispatch { .. } => "dispatch",
            Effect::Stop { .. } => "stop",
            Effect::Report { .. } => "report",
            Effect::Shutdown => "shutdown",
        }
    }

    fn fields(&self) -> Vec<(&'static str, String)> {
        match self {
            Effect::Dispatch { worker, item } => vec![
                ("worker", worker.to_string()),
                ("kind", item.kind().to_string()),
                ("item", item.summary()),
            ],
            Effect::Stop { worker } => vec![("worker", worker.to_string())],
            Effect::Report { report } => vec![
                ("run_id", report.run_id.clone()),
                ("records", report.final_hash_by_id.len().to_string()),
            ],
            Effect::Shutdown => vec![],
        }
    }
}

#[cfg(test)]
#[path = "effect_tests.rs"]
mod tests;
