// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! Traced adapter wrappers for consistent observability

use crate::report::{ReportAdapter, ReportError};
use crate::worker::{WorkerAdapter, WorkerError};
use async_trait::async_trait;
use shoal_core::{TaskReport, WorkItem, WorkerId};

/// Wrapper that adds tracing to any WorkerAdapter
#[derive(Clone)]
pub struct TracedWorkerAdapter<W> {
    inner: W,
}

impl<W> TracedWorkerAdapter<W> {
    pub fn new(inner: W) -> Self {
        Self { inner }
    }

    pub fn inner(&self) -> &W {
        &self.inner
    }
}

#[async_trait]
impl<W: WorkerAdapter> WorkerAdapter for TracedWorkerAdapter<W> {
    async fn dispatch(&self, worker: &WorkerId, item: WorkItem) -> Result<(), WorkerError> {
        let span = tracing::info_span!("worker.dispatch", %worker, kind = %item.kind());
        let _guard = span.enter();

        tracing::debug!(item = %item.summary(), "sending");
        let start = std::time::Instant::now();
        let result = self.inner.dispatch(worker, item).await;
        let elapsed = start.elapsed();

        match &result {
            Ok(()) => tracing::debug!(elapsed_ms = elapsed.as_millis() as u64, "sent"),
            Err(e) => tracing::error!(
                elapsed_ms = elapsed.as_millis() as u64,
                error = %e,
                "dispatch failed"
            ),
        }

        result
    }

    async fn stop(&self, worker: &WorkerId) -> Result<(), WorkerError> {
        let span = tracing::info_span!("worker.stop", %worker);
        let _guard = span.enter();

        let result = self.inner.stop(worker).await;
        // Stopping a worker that already left is expected during shutdown
        match &result {
            Ok(()) => tracing::info!("stopped"),
            Err(e) => tracing::warn!(error = %e, "stop failed (may be expected)"),
        }

        result
    }
}

/// Wrapper that adds tracing to any ReportAdapter
#[derive(Clone)]
pub struct TracedReportAdapter<R> {
    inner: R,
}

impl<R> TracedReportAdapter<R> {
    pub fn new(inner: R) -> Self {
        Self { inner }
    }
}

#[async_trait]
impl<R: ReportAdapter> ReportAdapter for TracedReportAdapter<R> {
    async fn publish(&self, report: &TaskReport) -> Result<(), ReportError> {
        let span = tracing::info_span!("report.publish", run_id = %report.run_id);
        let _guard = span.enter();

        tracing::info!(records = report.final_hash_by_id.len(), "publishing");
        let start = std::time::Instant::now();
        let result = self.inner.publish(report).await;
        let elapsed = start.elapsed();

        match &result {
            Ok(()) => tracing::info!(elapsed_ms = elapsed.as_millis() as u64, "published"),
            Err(e) => tracing::error!(
                elapsed_ms = elapsed.as_millis() as u64,
                error = %e,
                "publish failed"
            ),
        }

        result
    }
}

#[cfg(test)]
#[path = "traced_tests.rs"]
mod tests;
