// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! Daemon lifecycle management: startup, event processing, shutdown.

use std::collections::VecDeque;
use std::path::PathBuf;
use std::time::Instant;

use shoal_adapters::{
    ChainReportAdapter, JsonReportAdapter, LocalWorkerPool, LogReportAdapter,
    TracedReportAdapter, TracedWorkerAdapter,
};
use shoal_core::{Dataset, Event, SystemClock, TaskReport, UuidIdGen};
use shoal_engine::{Runtime, RuntimeDeps};
use shoal_worker::WorkExecutor;
use thiserror::Error;
use tokio::sync::mpsc;
use tracing::{info, warn};

use crate::config::{DaemonConfig, DaemonConfigError};
use crate::dataset::{self, LoadError};
use crate::trigger::TaskTrigger;

/// Report sink: always the log, plus a JSON file when configured
pub type DaemonReports = ChainReportAdapter<LogReportAdapter, Option<JsonReportAdapter>>;

/// Daemon runtime with concrete adapter types (wrapped with tracing)
pub type DaemonRuntime = Runtime<
    TracedWorkerAdapter<LocalWorkerPool>,
    TracedReportAdapter<DaemonReports>,
    SystemClock,
    UuidIdGen,
>;

/// Minimum capacity of the event channel
const EVENT_BUFFER: usize = 256;

/// Daemon configuration
#[derive(Debug, Clone)]
pub struct Config {
    /// Dataset file
    pub input: PathBuf,
    /// Where to write the JSON report, if anywhere
    pub report_path: Option<PathBuf>,
    /// File settings with command-line overrides applied
    pub settings: DaemonConfig,
}

/// Daemon state during operation
pub struct DaemonState {
    /// Configuration
    pub config: Config,
    /// Runtime for event processing
    pub runtime: DaemonRuntime,
    /// In-process workers
    pub pool: LocalWorkerPool,
    /// Channel for worker events
    pub internal_events: mpsc::Receiver<Event>,
    /// Fires the task once enough workers joined
    trigger: TaskTrigger,
    /// Handed to the runtime when the trigger fires
    dataset: Option<Dataset>,
    /// When daemon started
    pub start_time: Instant,
    /// Shutdown requested flag
    pub shutdown_requested: bool,
}

impl DaemonState {
    /// Process an event through the runtime
    ///
    /// Any events produced by the runtime (e.g., a worker that could not be
    /// reached) are fed back in arrival order.
    pub async fn process_event(&mut self, event: Event) -> Result<(), LifecycleError> {
        let mut pending_events = VecDeque::from([event]);

        while let Some(event) = pending_events.pop_front() {
            let fire = self.trigger.observe(&event);

            let result = self.runtime.handle_event(event).await;
            if self.runtime.shutdown_requested() {
                self.shutdown_requested = true;
            }
            let result_events = match result {
                Ok(events) => events,
                Err(e) => {
                    // The task is over even if publishing its report failed
                    if self.runtime.last_report().is_some() {
                        self.shutdown_requested = true;
                    }
                    return Err(LifecycleError::Runtime(e.to_string()));
                }
            };
            pending_events.extend(result_events);

            if fire {
                if let Some(dataset) = self.dataset.take() {
                    info!(
                        records = dataset.len(),
                        workers = self.runtime.worker_count(),
                        "starting task"
                    );
                    pending_events.push_back(Event::TaskRequested { dataset });
                }
            }
        }

        Ok(())
    }

    /// Whether the task has been handed to the coordinator
    pub fn task_started(&self) -> bool {
        self.trigger.has_fired()
    }

    /// The final report, once the task has finished
    pub fn report(&self) -> Option<TaskReport> {
        self.runtime.last_report()
    }

    /// Shutdown the daemon gracefully
    pub async fn shutdown(&mut self) -> Result<(), LifecycleError> {
        info!("Shutting down daemon...");

        // Workers already stopped by the coordinator are gone from the pool
        let remaining = self.pool.len();
        if remaining > 0 {
            warn!(remaining, "stopping workers still running");
        }
        self.pool.stop_all();

        info!(
            elapsed_ms = self.start_time.elapsed().as_millis() as u64,
            "Daemon shutdown complete"
        );
        Ok(())
    }
}

/// Lifecycle errors
#[derive(Debug, Error)]
pub enum LifecycleError {
    #[error("Configuration error: {0}")]
    Config(#[from] DaemonConfigError),

    #[error("Dataset error: {0}")]
    Dataset(#[from] LoadError),

    #[error("only {joined} of {required} workers joined within {timeout}")]
    JoinTimeout {
        joined: usize,
        required: usize,
        timeout: String,
    },

    #[error("Runtime error: {0}")]
    Runtime(String),
}

impl LifecycleError {
    pub fn join_timeout(state: &DaemonState) -> Self {
        LifecycleError::JoinTimeout {
            joined: state.trigger.joined(),
            required: state.config.settings.cluster.min_workers(),
            timeout: humantime::format_duration(state.config.settings.cluster.join_timeout)
                .to_string(),
        }
    }
}

/// Start the daemon
///
/// Validates everything before any worker starts.
pub async fn startup(config: &Config) -> Result<DaemonState, LifecycleError> {
    // 1. Validate settings and load the dataset (fail fast)
    config.settings.validate()?;
    let dataset = dataset::load(&config.input)?;
    let task = config.settings.task();
    let cluster = &config.settings.cluster;

    // 2. Set up internal event channel
    let (internal_tx, internal_events) = mpsc::channel(EVENT_BUFFER.max(cluster.workers * 2));

    // 3. Set up adapters (wrapped with tracing for observability)
    let pool = LocalWorkerPool::new(WorkExecutor::new(task.mining.clone()), internal_tx);
    let reports = ChainReportAdapter::new(
        LogReportAdapter,
        config.report_path.clone().map(JsonReportAdapter::new),
    );

    // 4. Create runtime
    let runtime = Runtime::new(
        RuntimeDeps {
            workers: TracedWorkerAdapter::new(pool.clone()),
            reports: TracedReportAdapter::new(reports),
        },
        task,
        SystemClock,
        UuidIdGen,
    );

    // 5. Start local workers; their joins arrive on the event channel
    for _ in 0..cluster.workers {
        pool.spawn_worker().await;
    }

    info!(
        input = %config.input.display(),
        workers = cluster.workers,
        min_workers = cluster.min_workers(),
        "Daemon started"
    );

    Ok(DaemonState {
        config: config.clone(),
        runtime,
        pool,
        internal_events,
        trigger: TaskTrigger::new(cluster.min_workers()),
        dataset: Some(dataset),
        start_time: Instant::now(),
        shutdown_requested: false,
    })
}

#[cfg(test)]
#[path = "lifecycle_tests.rs"]
mod tests;
