// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! Coordinator: the work queue driven by the phase pipeline
//!
//! All state is owned here and mutated one call at a time. Every call
//! returns the effects the shell must perform, in order.

use crate::clock::Clock;
use crate::completion::Completion;
use crate::config::TaskConfig;
use crate::dataset::Dataset;
use crate::effect::Effect;
use crate::id::WorkerId;
use crate::pipeline::{Phase, PhasePipeline, Recorded};
use crate::queue::{Assignment, WorkQueue};
use crate::work::WorkItem;
use chrono::Utc;
use std::time::{Duration, Instant};
use thiserror::Error;

#[derive(Debug, Error, PartialEq, Eq)]
pub enum CoordinatorError {
    #[error("task {run_id} already started")]
    AlreadyStarted { run_id: String },
}

/// Single-owner coordinator state
pub struct Coordinator<C: Clock> {
    queue: WorkQueue,
    pipeline: PhasePipeline,
    clock: C,
    run_id: Option<String>,
    started_at: Option<Instant>,
    reported: bool,
}

impl<C: Clock> Coordinator<C> {
    pub fn new(config: TaskConfig, clock: C) -> Self {
        Self {
            queue: WorkQueue::new(),
            pipeline: PhasePipeline::new(config),
            clock,
            run_id: None,
            started_at: None,
            reported: false,
        }
    }

    pub fn phase(&self) -> Phase {
        self.pipeline.phase()
    }

    pub fn queue(&self) -> &WorkQueue {
        &self.queue
    }

    pub fn pipeline(&self) -> &PhasePipeline {
        &self.pipeline
    }

    pub fn run_id(&self) -> Option<&str> {
        self.run_id.as_deref()
    }

    /// Whether the final report has been emitted
    pub fn is_finished(&self) -> bool {
        self.reported
    }

    /// Wall-clock time since the task started
    pub fn elapsed(&self) -> Duration {
        self.started_at
            .map(|t| self.clock.elapsed_since(t))
            .unwrap_or_default()
    }

    /// Begin the cracking phase over `dataset`
    pub fn start_task(
        &mut self,
        run_id: impl Into<String>,
        dataset: Dataset,
    ) -> Result<Vec<Effect>, CoordinatorError> {
        if let Some(run_id) = &self.run_id {
            return Err(CoordinatorError::AlreadyStarted {
                run_id: run_id.clone(),
            });
        }
        let run_id = run_id.into();
        tracing::info!(
            run_id = %run_id,
            records = dataset.len(),
            workers = self.queue.worker_count(),
            "starting task"
        );
        self.run_id = Some(run_id);
        self.started_at = Some(self.clock.now());

        let items = self.pipeline.start(dataset);
        let mut effects = self.submit_all(items);
        effects.extend(self.settle());
        Ok(effects)
    }

    /// A worker joined; hand it work or park it idle
    pub fn register_worker(&mut self, worker: WorkerId) -> Vec<Effect> {
        if self.reported {
            tracing::info!(%worker, "worker joined after task finished, stopping it");
            return vec![Effect::Stop { worker }];
        }
        tracing::info!(%worker, phase = %self.phase(), "worker registered");
        self.queue.register_worker(worker)
    }

    /// A worker went away; its item, if any, goes back on the queue unless
    /// its phase has already ended
    pub fn worker_lost(&mut self, worker: &WorkerId) -> Vec<Effect> {
        let phase = self.phase();
        let stale = self.queue.assignment(worker).is_some_and(|item| {
            self.pipeline.is_terminal() || Phase::for_kind(item.kind()) != phase
        });
        if stale {
            if let Some(Some(assignment)) = self.queue.forget_worker(worker) {
                tracing::debug!(
                    %worker,
                    item = %assignment.item.summary(),
                    "worker lost, dropping item from a finished phase"
                );
            }
            return self.settle();
        }

        match self.queue.worker_lost(worker) {
            None => {
                tracing::debug!(%worker, "lost worker was not tracked");
                vec![]
            }
            Some((Some(item), effects)) => {
                tracing::warn!(%worker, item = %item.summary(), "worker lost, requeued its item");
                effects
            }
            Some((None, effects)) => {
                tracing::info!(%worker, "idle worker left");
                effects
            }
        }
    }

    /// A worker finished its item
    pub fn on_completion(&mut self, worker: WorkerId, completion: Completion) -> Vec<Effect> {
        let Some(assignment) = self.queue.release(&worker) else {
            tracing::warn!(
                %worker,
                status = ?completion.status(),
                "completion from worker without an assignment, ignoring"
            );
            return vec![];
        };

        let mut effects = Vec::new();
        match completion {
            Completion::Success { result } => {
                match self.pipeline.record(&assignment.item, result) {
                    Ok(Recorded::Progress) => {}
                    Ok(Recorded::Stale) => {
                        tracing::debug!(
                            %worker,
                            item = %assignment.item.summary(),
                            phase = %self.phase(),
                            "ignoring result from a finished phase"
                        );
                    }
                    Ok(Recorded::RangeExhausted) => {
                        let items = self.pipeline.refill_ranges(self.queue.unassigned_len());
                        effects.extend(self.submit_all(items));
                    }
                    Ok(Recorded::SignsFound) => {
                        let dropped = self.queue.clear_unassigned();
                        tracing::info!(dropped, "discarded pending sign-search ranges");
                        let items = self.pipeline.begin_gene_compare();
                        effects.extend(self.submit_all(items));
                    }
                    Err(e) => {
                        tracing::error!(
                            %worker,
                            item = %assignment.item.summary(),
                            error = %e,
                            "invalid result, treating as failed"
                        );
                        effects.extend(self.retry(assignment, e.to_string()));
                    }
                }
            }
            Completion::Failed { reason } => {
                effects.extend(self.retry(assignment, reason));
            }
        }

        if self.pipeline.is_terminal() {
            self.queue.clear_unassigned();
        }
        effects.extend(self.queue.assign_to_worker(worker));
        effects.extend(self.settle());
        effects
    }

    /// Resubmit a failed item unless it is stale or out of attempts
    fn retry(&mut self, assignment: Assignment, reason: String) -> Vec<Effect> {
        if Phase::for_kind(assignment.item.kind()) != self.phase() {
            tracing::debug!(
                item = %assignment.item.summary(),
                reason = %reason,
                "dropping failed item from a finished phase"
            );
            return vec![];
        }

        let assignment = assignment.with_incremented_attempts();
        if let Some(max) = self.pipeline.config().retry.max_attempts {
            if assignment.attempts >= max {
                self.pipeline.fail(format!(
                    "{} ({}) failed {} times, last error: {}",
                    assignment.item.kind(),
                    assignment.item.summary(),
                    assignment.attempts,
                    reason
                ));
                return vec![];
            }
        }

        tracing::warn!(
            item = %assignment.item.summary(),
            attempts = assignment.attempts,
            reason = %reason,
            "resubmitting failed item"
        );
        self.queue.submit_assignment(assignment)
    }

    fn submit_all(&mut self, items: Vec<WorkItem>) -> Vec<Effect> {
        let mut effects = Vec::new();
        for item in items {
            effects.extend(self.queue.submit(item));
        }
        effects
    }

    /// Advance through drained phases, then report once terminal
    fn settle(&mut self) -> Vec<Effect> {
        let mut effects = Vec::new();
        while self.pipeline.is_started() && !self.pipeline.is_terminal() && self.queue.is_drained()
        {
            let items = self.pipeline.advance();
            tracing::info!(phase = %self.phase(), items = items.len(), "phase work generated");
            effects.extend(self.submit_all(items));
        }
        if self.pipeline.is_terminal() && !self.reported {
            effects.extend(self.finish());
        }
        effects
    }

    /// Emit the report, stop every tracked worker, then stop ourselves
    fn finish(&mut self) -> Vec<Effect> {
        self.reported = true;
        self.queue.clear_unassigned();

        let elapsed = self.elapsed();
        let run_id = self.run_id.clone().unwrap_or_default();
        let report = self.pipeline.report(run_id, elapsed, Utc::now());
        tracing::info!(
            run_id = %report.run_id,
            outcome = ?report.outcome,
            elapsed_ms = elapsed.as_millis() as u64,
            "task finished"
        );

        let mut effects = vec![Effect::Report {
            report: Box::new(report),
        }];
        effects.extend(
            self.queue
                .workers()
                .into_iter()
                .map(|worker| Effect::Stop { worker }),
        );
        effects.push(Effect::Shutdown);
        effects
    }
}

#[cfg(test)]
#[path = "coordinator_tests.rs"]
mod tests;
