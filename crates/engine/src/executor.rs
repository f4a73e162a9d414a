// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! Effect executor

use crate::RuntimeDeps;
use shoal_adapters::{ReportAdapter, WorkerAdapter};
use shoal_core::{Effect, Event, TaskReport};
use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Mutex;
use thiserror::Error;

/// Errors that can occur during effect execution
#[derive(Debug, Error)]
pub enum ExecuteError {
    #[error("report error: {0}")]
    Report(#[from] shoal_adapters::ReportError),
}

/// Executes effects using the configured adapters
pub struct Executor<W, R> {
    workers: W,
    reports: R,
    shutdown: AtomicBool,
    last_report: Mutex<Option<TaskReport>>,
}

impl<W, R> Executor<W, R>
where
    W: WorkerAdapter,
    R: ReportAdapter,
{
    /// Create a new executor
    pub fn new(deps: RuntimeDeps<W, R>) -> Self {
        Self {
            workers: deps.workers,
            reports: deps.reports,
            shutdown: AtomicBool::new(false),
            last_report: Mutex::new(None),
        }
    }

    /// Execute a single effect with tracing
    ///
    /// Returns an optional event that should be fed back into the event loop.
    pub async fn execute(&self, effect: Effect) -> Result<Option<Event>, ExecuteError> {
        use shoal_core::TracedEffect;

        let op_name = effect.name();
        let span = tracing::info_span!("effect", effect = op_name);
        let _guard = span.enter();

        tracing::info!(fields = ?effect.fields(), "executing");

        let start = std::time::Instant::now();
        let result = self.execute_inner(effect).await;
        let elapsed = start.elapsed();

        match &result {
            Ok(event) => tracing::info!(
                elapsed_ms = elapsed.as_millis() as u64,
                has_event = event.is_some(),
                "completed"
            ),
            Err(e) => tracing::error!(
                elapsed_ms = elapsed.as_millis() as u64,
                error = %e,
                "failed"
            ),
        }

        result
    }

    /// Inner execution logic for a single effect
    async fn execute_inner(&self, effect: Effect) -> Result<Option<Event>, ExecuteError> {
        match effect {
            Effect::Dispatch { worker, item } => {
                // An unreachable worker is reported lost so its item is requeued
                match self.workers.dispatch(&worker, item).await {
                    Ok(()) => Ok(None),
                    Err(e) => {
                        tracing::warn!(%worker, error = %e, "dispatch failed, dropping worker");
                        Ok(Some(Event::WorkerLeft { worker }))
                    }
                }
            }

            Effect::Stop { worker } => {
                // TracedWorkerAdapter logs failures; a worker that already left is fine
                let _ = self.workers.stop(&worker).await;
                Ok(None)
            }

            Effect::Report { report } => {
                let report = *report;
                let result = self.reports.publish(&report).await;
                *self.last_report.lock().unwrap_or_else(|e| e.into_inner()) = Some(report);
                result?;
                Ok(None)
            }

            Effect::Shutdown => {
                self.shutdown.store(true, Ordering::SeqCst);
                Ok(None)
            }
        }
    }

    /// Execute multiple effects in order
    ///
    /// Returns any events that were produced by effects (to be fed back into the event loop).
    pub async fn execute_all(&self, effects: Vec<Effect>) -> Result<Vec<Event>, ExecuteError> {
        let mut result_events = Vec::new();
        for effect in effects {
            if let Some(event) = self.execute(effect).await? {
                result_events.push(event);
            }
        }
        Ok(result_events)
    }

    /// Whether a shutdown effect has run
    pub fn shutdown_requested(&self) -> bool {
        self.shutdown.load(Ordering::SeqCst)
    }

    /// The most recent report, published or not
    pub fn last_report(&self) -> Option<TaskReport> {
        self.last_report
            .lock()
            .unwrap_or_else(|e| e.into_inner())
            .clone()
    }
}

#[cfg(test)]
#[path = "executor_tests.rs"]
mod tests;
