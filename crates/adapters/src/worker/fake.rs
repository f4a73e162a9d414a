// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! Fake worker adapter for testing
#![cfg_attr(coverage_nightly, coverage(off))]

use super::{WorkerAdapter, WorkerError};
use async_trait::async_trait;
use shoal_core::{WorkItem, WorkerId};
use std::collections::HashSet;
use std::sync::{Arc, Mutex};

/// Recorded worker call
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum WorkerCall {
    Dispatch { worker: WorkerId, item: WorkItem },
    Stop { worker: WorkerId },
}

/// Fake worker adapter that records calls instead of running work
#[derive(Clone, Default)]
pub struct FakeWorkerAdapter {
    calls: Arc<Mutex<Vec<WorkerCall>>>,
    unreachable: Arc<Mutex<HashSet<WorkerId>>>,
}

impl FakeWorkerAdapter {
    pub fn new() -> Self {
        Self::default()
    }

    /// Get all recorded calls
    pub fn calls(&self) -> Vec<WorkerCall> {
        self.calls.lock().unwrap_or_else(|e| e.into_inner()).clone()
    }

    /// Recorded dispatches, oldest first
    pub fn dispatched(&self) -> Vec<(WorkerId, WorkItem)> {
        self.calls()
            .into_iter()
            .filter_map(|call| match call {
                WorkerCall::Dispatch { worker, item } => Some((worker, item)),
                WorkerCall::Stop { .. } => None,
            })
            .collect()
    }

    /// Workers that received a stop
    pub fn stopped(&self) -> Vec<WorkerId> {
        self.calls()
            .into_iter()
            .filter_map(|call| match call {
                WorkerCall::Stop { worker } => Some(worker),
                WorkerCall::Dispatch { .. } => None,
            })
            .collect()
    }

    /// Make every later call to `worker` fail as if it disconnected
    pub fn set_unreachable(&self, worker: &WorkerId) {
        self.unreachable
            .lock()
            .unwrap_or_else(|e| e.into_inner())
            .insert(worker.clone());
    }

    fn check(&self, worker: &WorkerId) -> Result<(), WorkerError> {
        if self
            .unreachable
            .lock()
            .unwrap_or_else(|e| e.into_inner())
            .contains(worker)
        {
            return Err(WorkerError::Disconnected(worker.clone()));
        }
        Ok(())
    }
}

#[async_trait]
impl WorkerAdapter for FakeWorkerAdapter {
    async fn dispatch(&self, worker: &WorkerId, item: WorkItem) -> Result<(), WorkerError> {
        self.check(worker)?;
        self.calls
            .lock()
            .unwrap_or_else(|e| e.into_inner())
            .push(WorkerCall::Dispatch {
                worker: worker.clone(),
                item,
            });
        Ok(())
    }

    async fn stop(&self, worker: &WorkerId) -> Result<(), WorkerError> {
        self.check(worker)?;
        self.calls
            .lock()
            .unwrap_or_else(|e| e.into_inner())
            .push(WorkerCall::Stop {
                worker: worker.clone(),
            });
        Ok(())
    }
}

#[cfg(test)]
#[path = "fake_tests.rs"]
mod tests;
