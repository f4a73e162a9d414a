// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! Report sink that writes to the tracing log

use super::{ReportAdapter, ReportError};
use async_trait::async_trait;
use shoal_core::{TaskOutcome, TaskReport};

#[derive(Clone, Copy, Debug, Default)]
pub struct LogReportAdapter;

#[async_trait]
impl ReportAdapter for LogReportAdapter {
    async fn publish(&self, report: &TaskReport) -> Result<(), ReportError> {
        for (id, hash) in &report.final_hash_by_id {
            tracing::info!(run_id = %report.run_id, id, hash = %hash, "final hash");
        }
        let elapsed_secs = report.elapsed.as_secs_f64();
        match &report.outcome {
            TaskOutcome::Completed => {
                tracing::info!(run_id = %report.run_id, elapsed_secs, "task completed")
            }
            TaskOutcome::Failed { reason } => {
                tracing::error!(run_id = %report.run_id, elapsed_secs, reason = %reason, "task failed")
            }
        }
        Ok(())
    }
}
