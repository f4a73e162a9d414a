// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! Final task report

use crate::dataset::RecordId;
use crate::pipeline::Overlap;
use crate::work::Sign;
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use std::time::Duration;

/// How a task run ended
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "status", rename_all = "snake_case")]
pub enum TaskOutcome {
    Completed,
    Failed { reason: String },
}

impl TaskOutcome {
    pub fn is_completed(&self) -> bool {
        matches!(self, TaskOutcome::Completed)
    }
}

/// Summary of one task run, emitted once when the pipeline reaches a terminal phase
///
/// Maps hold whatever was accumulated before the run ended, so a failed
/// report may be partially populated.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TaskReport {
    pub run_id: String,
    pub outcome: TaskOutcome,
    pub final_hash_by_id: BTreeMap<RecordId, String>,
    pub plaintext_by_id: BTreeMap<RecordId, String>,
    pub sign_by_id: BTreeMap<RecordId, Sign>,
    pub best_overlap_by_id: BTreeMap<RecordId, Overlap>,
    #[serde(with = "humantime_serde")]
    pub elapsed: Duration,
    pub finished_at: DateTime<Utc>,
}

impl TaskReport {
    /// Plain-text rendering: one `ID <id> HASH <hash>` line per record, then the elapsed time
    pub fn render_lines(&self) -> Vec<String> {
        let mut lines: Vec<String> = self
            .final_hash_by_id
            .iter()
            .map(|(id, hash)| format!("ID {id} HASH {hash}"))
            .collect();
        lines.push(format!("ELAPSED {:.3}s", self.elapsed.as_secs_f64()));
        lines
    }
}

#[cfg(test)]
#[path = "report_tests.rs"]
mod tests;
