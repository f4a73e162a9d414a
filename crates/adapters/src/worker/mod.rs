// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! Worker transport adapters

mod local;

pub use local::LocalWorkerPool;

// Test support - only compiled for tests or when explicitly requested
#[cfg(any(test, feature = "test-support"))]
mod fake;
#[cfg(any(test, feature = "test-support"))]
pub use fake::{FakeWorkerAdapter, WorkerCall};

use async_trait::async_trait;
use shoal_core::{WorkItem, WorkerId};
use thiserror::Error;

/// Errors from worker operations
#[derive(Debug, Error, PartialEq, Eq)]
pub enum WorkerError {
    #[error("unknown worker: {0}")]
    UnknownWorker(WorkerId),
    #[error("worker {0} is not accepting commands")]
    Disconnected(WorkerId),
}

/// Delivery of commands to workers
///
/// Completions travel back on the event channel, not through this trait.
#[async_trait]
pub trait WorkerAdapter: Clone + Send + Sync + 'static {
    /// Hand a work item to a worker
    async fn dispatch(&self, worker: &WorkerId, item: WorkItem) -> Result<(), WorkerError>;

    /// Ask a worker to shut down
    async fn stop(&self, worker: &WorkerId) -> Result<(), WorkerError>;
}
