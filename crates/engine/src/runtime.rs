// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! Runtime for the shoal coordinator

use crate::{error::RuntimeError, Executor};
use shoal_adapters::{ReportAdapter, WorkerAdapter};
use shoal_core::{Clock, Coordinator, Effect, Event, IdGen, Phase, TaskConfig, TaskReport};
use std::sync::Mutex;

/// Runtime adapter dependencies
pub struct RuntimeDeps<W, R> {
    pub workers: W,
    pub reports: R,
}

/// Runtime that feeds events to the coordinator and executes its effects
///
/// The coordinator is only touched while handling one event. The lock is
/// released before any effect runs.
pub struct Runtime<W, R, C: Clock, I: IdGen> {
    executor: Executor<W, R>,
    coordinator: Mutex<Coordinator<C>>,
    id_gen: I,
}

impl<W, R, C, I> Runtime<W, R, C, I>
where
    W: WorkerAdapter,
    R: ReportAdapter,
    C: Clock,
    I: IdGen,
{
    /// Create a new runtime
    pub fn new(deps: RuntimeDeps<W, R>, config: TaskConfig, clock: C, id_gen: I) -> Self {
        Self {
            executor: Executor::new(deps),
            coordinator: Mutex::new(Coordinator::new(config, clock)),
            id_gen,
        }
    }

    /// Handle an incoming event
    ///
    /// Returns any events that were produced by effects (to be fed back into the event loop).
    pub async fn handle_event(&self, event: Event) -> Result<Vec<Event>, RuntimeError> {
        tracing::debug!(event = event.name(), worker = ?event.worker(), "handling event");
        let effects = self.apply(event)?;
        Ok(self.executor.execute_all(effects).await?)
    }

    fn apply(&self, event: Event) -> Result<Vec<Effect>, RuntimeError> {
        let mut coordinator = self.coordinator.lock().unwrap_or_else(|e| e.into_inner());
        let effects = match event {
            Event::WorkerJoined { worker } => coordinator.register_worker(worker),
            Event::WorkerLeft { worker } => coordinator.worker_lost(&worker),
            Event::WorkCompleted { worker, completion } => {
                coordinator.on_completion(worker, completion)
            }
            Event::TaskRequested { dataset } => {
                coordinator.start_task(self.id_gen.next(), dataset)?
            }
        };
        Ok(effects)
    }

    /// Current pipeline phase
    pub fn phase(&self) -> Phase {
        self.coordinator
            .lock()
            .unwrap_or_else(|e| e.into_inner())
            .phase()
    }

    /// Number of workers the coordinator is tracking
    pub fn worker_count(&self) -> usize {
        self.coordinator
            .lock()
            .unwrap_or_else(|e| e.into_inner())
            .queue()
            .worker_count()
    }

    /// Whether the coordinator has stopped itself
    pub fn shutdown_requested(&self) -> bool {
        self.executor.shutdown_requested()
    }

    /// The final report, once the task has finished
    pub fn last_report(&self) -> Option<TaskReport> {
        self.executor.last_report()
    }
}

#[cfg(test)]
#[path = "runtime_tests.rs"]
mod tests;
