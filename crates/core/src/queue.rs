// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! Work distribution bookkeeping
//!
//! Tracks unassigned work, idle workers and busy workers, and pairs them
//! greedily in FIFO order on both sides. A registered worker is always in
//! exactly one of the idle queue or the busy map.

use crate::effect::Effect;
use crate::id::WorkerId;
use crate::work::WorkItem;
use std::collections::{HashMap, VecDeque};

/// A work item together with its failed-attempt count
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Assignment {
    pub item: WorkItem,
    pub attempts: u32,
}

impl Assignment {
    pub fn new(item: WorkItem) -> Self {
        Self { item, attempts: 0 }
    }

    /// The same item with one more failed attempt recorded
    pub fn with_incremented_attempts(self) -> Self {
        Self {
            attempts: self.attempts.saturating_add(1),
            ..self
        }
    }
}

/// Queue of unassigned work plus the idle and busy worker registries
#[derive(Debug, Default)]
pub struct WorkQueue {
    unassigned: VecDeque<Assignment>,
    idle: VecDeque<WorkerId>,
    busy: HashMap<WorkerId, Assignment>,
}

impl WorkQueue {
    pub fn new() -> Self {
        Self::default()
    }

    /// Start tracking a worker and try to hand it queued work
    ///
    /// Registering a worker that is already tracked is a no-op.
    pub fn register_worker(&mut self, worker: WorkerId) -> Vec<Effect> {
        if self.contains(&worker) {
            tracing::warn!(%worker, "worker already registered");
            return vec![];
        }
        self.assign_to_worker(worker)
    }

    /// Forget a worker, requeueing its assignment at the tail
    ///
    /// Returns `None` for untracked workers. Otherwise returns the
    /// requeued assignment (if the worker was busy) and any dispatches the
    /// requeue enabled for idle workers.
    pub fn worker_lost(
        &mut self,
        worker: &WorkerId,
    ) -> Option<(Option<WorkItem>, Vec<Effect>)> {
        if let Some(assignment) = self.busy.remove(worker) {
            let item = assignment.item.clone();
            self.unassigned.push_back(assignment);
            return Some((Some(item), self.drain_idle()));
        }
        let position = self.idle.iter().position(|w| w == worker)?;
        self.idle.remove(position);
        Some((None, vec![]))
    }

    /// Forget a worker and discard whatever it was holding
    ///
    /// Returns `None` for untracked workers, otherwise the dropped
    /// assignment if the worker was busy.
    pub fn forget_worker(&mut self, worker: &WorkerId) -> Option<Option<Assignment>> {
        if let Some(assignment) = self.busy.remove(worker) {
            return Some(Some(assignment));
        }
        let position = self.idle.iter().position(|w| w == worker)?;
        self.idle.remove(position);
        Some(None)
    }

    /// Hand new work to the oldest idle worker, or queue it
    pub fn submit(&mut self, item: WorkItem) -> Vec<Effect> {
        self.submit_assignment(Assignment::new(item))
    }

    /// Like [`WorkQueue::submit`] but keeps the attempt count of a retried item
    pub fn submit_assignment(&mut self, assignment: Assignment) -> Vec<Effect> {
        match self.idle.pop_front() {
            Some(worker) => vec![self.dispatch(worker, assignment)],
            None => {
                self.unassigned.push_back(assignment);
                vec![]
            }
        }
    }

    /// Take a busy worker's assignment, leaving the worker untracked
    ///
    /// The caller must follow up with [`WorkQueue::assign_to_worker`] to
    /// put the worker back into rotation. Returns `None` when the worker
    /// holds no assignment.
    pub fn release(&mut self, worker: &WorkerId) -> Option<Assignment> {
        self.busy.remove(worker)
    }

    /// Give the worker the oldest queued item, or park it as idle
    pub fn assign_to_worker(&mut self, worker: WorkerId) -> Vec<Effect> {
        match self.unassigned.pop_front() {
            Some(assignment) => vec![self.dispatch(worker, assignment)],
            None => {
                self.idle.push_back(worker);
                vec![]
            }
        }
    }

    /// Drop all unstarted work, returning how many items were discarded
    pub fn clear_unassigned(&mut self) -> usize {
        let dropped = self.unassigned.len();
        self.unassigned.clear();
        dropped
    }

    /// No queued work and no work in flight
    pub fn is_drained(&self) -> bool {
        self.unassigned.is_empty() && self.busy.is_empty()
    }

    pub fn unassigned_len(&self) -> usize {
        self.unassigned.len()
    }

    pub fn idle_len(&self) -> usize {
        self.idle.len()
    }

    pub fn busy_len(&self) -> usize {
        self.busy.len()
    }

    /// Number of tracked workers
    pub fn worker_count(&self) -> usize {
        self.idle.len() + self.busy.len()
    }

    /// Every tracked worker, idle ones first in queue order
    pub fn workers(&self) -> Vec<WorkerId> {
        let mut busy: Vec<WorkerId> = self.busy.keys().cloned().collect();
        busy.sort();
        self.idle.iter().cloned().chain(busy).collect()
    }

    pub fn is_idle(&self, worker: &WorkerId) -> bool {
        self.idle.contains(worker)
    }

    pub fn is_busy(&self, worker: &WorkerId) -> bool {
        self.busy.contains_key(worker)
    }

    pub fn contains(&self, worker: &WorkerId) -> bool {
        self.is_idle(worker) || self.is_busy(worker)
    }

    /// Item currently assigned to a busy worker
    pub fn assignment(&self, worker: &WorkerId) -> Option<&WorkItem> {
        self.busy.get(worker).map(|a| &a.item)
    }

    /// Unassigned items in queue order
    pub fn unassigned(&self) -> impl Iterator<Item = &WorkItem> {
        self.unassigned.iter().map(|a| &a.item)
    }

    /// Pair idle workers with queued work until one side runs out
    fn drain_idle(&mut self) -> Vec<Effect> {
        let mut effects = Vec::new();
        while !self.unassigned.is_empty() {
            let Some(worker) = self.idle.pop_front() else {
                break;
            };
            effects.extend(self.assign_to_worker(worker));
        }
        effects
    }

    fn dispatch(&mut self, worker: WorkerId, assignment: Assignment) -> Effect {
        let item = assignment.item.clone();
        self.busy.insert(worker.clone(), assignment);
        Effect::Dispatch { worker, item }
    }
}

#[cfg(test)]
#[path = "queue_tests.rs"]
mod tests;
