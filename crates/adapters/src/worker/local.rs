// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! In-process worker pool
//!
//! Each worker is a tokio task that runs one item at a time on the blocking
//! pool and reports back through the coordinator's event channel.

use super::{WorkerAdapter, WorkerError};
use async_trait::async_trait;
use shoal_core::{Completion, Event, SequentialIdGen, WorkItem, WorkerId};
use shoal_worker::WorkExecutor;
use std::collections::HashMap;
use std::sync::{Arc, Mutex};
use tokio::sync::mpsc;
use tokio::task::JoinHandle;

enum Command {
    Run(WorkItem),
    Stop,
}

struct LocalWorker {
    commands: mpsc::UnboundedSender<Command>,
    task: JoinHandle<()>,
}

/// Pool of workers living in this process
#[derive(Clone)]
pub struct LocalWorkerPool {
    executor: WorkExecutor,
    events: mpsc::Sender<Event>,
    ids: SequentialIdGen,
    workers: Arc<Mutex<HashMap<WorkerId, LocalWorker>>>,
}

impl LocalWorkerPool {
    pub fn new(executor: WorkExecutor, events: mpsc::Sender<Event>) -> Self {
        Self {
            executor,
            events,
            ids: SequentialIdGen::new("worker"),
            workers: Arc::new(Mutex::new(HashMap::new())),
        }
    }

    /// Start a worker and announce it with [`Event::WorkerJoined`]
    pub async fn spawn_worker(&self) -> WorkerId {
        let worker = self.ids.next_worker();
        let (tx, rx) = mpsc::unbounded_channel();
        let task = tokio::spawn(run_worker(
            worker.clone(),
            self.executor.clone(),
            rx,
            self.events.clone(),
        ));
        self.workers
            .lock()
            .unwrap_or_else(|e| e.into_inner())
            .insert(worker.clone(), LocalWorker { commands: tx, task });

        tracing::info!(%worker, "local worker started");
        let _ = self
            .events
            .send(Event::WorkerJoined {
                worker: worker.clone(),
            })
            .await;
        worker
    }

    /// Abort a worker mid-item and report it lost, as a crash would
    #[cfg(any(test, feature = "test-support"))]
    pub async fn kill(&self, worker: &WorkerId) -> bool {
        let removed = self
            .workers
            .lock()
            .unwrap_or_else(|e| e.into_inner())
            .remove(worker);
        let Some(local) = removed else {
            return false;
        };
        local.task.abort();
        tracing::warn!(%worker, "local worker killed");
        let _ = self
            .events
            .send(Event::WorkerLeft {
                worker: worker.clone(),
            })
            .await;
        true
    }

    /// Number of live workers
    pub fn len(&self) -> usize {
        self.workers.lock().unwrap_or_else(|e| e.into_inner()).len()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// Stop every remaining worker
    pub fn stop_all(&self) {
        let drained: Vec<(WorkerId, LocalWorker)> = self
            .workers
            .lock()
            .unwrap_or_else(|e| e.into_inner())
            .drain()
            .collect();
        for (worker, local) in drained {
            if local.task.is_finished() {
                tracing::debug!(%worker, "worker already exited");
                continue;
            }
            let _ = local.commands.send(Command::Stop);
            tracing::debug!(%worker, "stop requested");
        }
    }
}

#[async_trait]
impl WorkerAdapter for LocalWorkerPool {
    async fn dispatch(&self, worker: &WorkerId, item: WorkItem) -> Result<(), WorkerError> {
        let commands = self
            .workers
            .lock()
            .unwrap_or_else(|e| e.into_inner())
            .get(worker)
            .map(|w| w.commands.clone())
            .ok_or_else(|| WorkerError::UnknownWorker(worker.clone()))?;
        commands
            .send(Command::Run(item))
            .map_err(|_| WorkerError::Disconnected(worker.clone()))
    }

    async fn stop(&self, worker: &WorkerId) -> Result<(), WorkerError> {
        let removed = self
            .workers
            .lock()
            .unwrap_or_else(|e| e.into_inner())
            .remove(worker)
            .ok_or_else(|| WorkerError::UnknownWorker(worker.clone()))?;
        removed
            .commands
            .send(Command::Stop)
            .map_err(|_| WorkerError::Disconnected(worker.clone()))
    }
}

async fn run_worker(
    worker: WorkerId,
    executor: WorkExecutor,
    mut commands: mpsc::UnboundedReceiver<Command>,
    events: mpsc::Sender<Event>,
) {
    while let Some(command) = commands.recv().await {
        let item = match command {
            Command::Run(item) => item,
            Command::Stop => break,
        };

        let executor = executor.clone();
        let summary = item.summary();
        let start = std::time::Instant::now();
        let completion = match tokio::task::spawn_blocking(move || executor.execute(&item)).await {
            Ok(completion) => completion,
            Err(e) => {
                tracing::error!(%worker, item = %summary, error = %e, "work item panicked");
                Completion::failed(format!("execution aborted: {}", e))
            }
        };
        tracing::debug!(
            %worker,
            item = %summary,
            status = ?completion.status(),
            elapsed_ms = start.elapsed().as_millis() as u64,
            "item finished"
        );

        let event = Event::WorkCompleted {
            worker: worker.clone(),
            completion,
        };
        if events.send(event).await.is_err() {
            break;
        }
    }
    tracing::info!(%worker, "local worker stopped");
}

#[cfg(test)]
#[path = "local_tests.rs"]
mod tests;
