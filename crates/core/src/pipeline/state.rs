// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! Phase pipeline state and accumulators

use super::phase::Phase;
use crate::completion::CompletionResult;
use crate::config::TaskConfig;
use crate::dataset::{Dataset, RecordId};
use crate::report::{TaskOutcome, TaskReport};
use crate::work::{Sign, TargetBit, WorkItem, WorkKind};
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::collections::{BTreeMap, HashMap};
use std::time::Duration;
use thiserror::Error;

/// Best gene overlap seen for one record
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct Overlap {
    pub partner_id: RecordId,
    pub length: usize,
}

impl Overlap {
    /// Placeholder for records with no positive overlap
    pub const NONE: Overlap = Overlap {
        partner_id: -1,
        length: 0,
    };
}

/// Phase-scoped results, kept for the lifetime of the run
///
/// Later phases read the final values of earlier ones.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Accumulators {
    pub hash_to_plaintext: HashMap<String, String>,
    pub plaintext_by_id: BTreeMap<RecordId, String>,
    pub cracked_integers: Vec<i64>,
    pub next_range_cursor: u64,
    pub sign_by_id: BTreeMap<RecordId, Sign>,
    pub best_overlap: BTreeMap<RecordId, Overlap>,
    pub final_hash_by_id: BTreeMap<RecordId, String>,
}

impl Accumulators {
    /// Mining seed for a record: its best partner, or -1 without one
    pub fn seed_for(&self, id: RecordId) -> RecordId {
        self.best_overlap
            .get(&id)
            .map(|o| o.partner_id)
            .unwrap_or(Overlap::NONE.partner_id)
    }

    /// Keep the overlap only if it is strictly longer than the stored one
    fn offer_overlap(&mut self, id: RecordId, partner_id: RecordId, length: usize) -> bool {
        let current = self.best_overlap.get(&id).copied().unwrap_or(Overlap::NONE);
        if length > current.length {
            self.best_overlap.insert(id, Overlap { partner_id, length });
            true
        } else {
            false
        }
    }
}

/// What a successful completion did to the pipeline
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Recorded {
    /// Accumulators updated
    Progress,
    /// A sign-search range held no zero sum
    RangeExhausted,
    /// A zero-sum sign assignment was stored
    SignsFound,
    /// The item belongs to a phase the pipeline has left
    Stale,
}

/// A successful completion whose payload does not fit its item
#[derive(Debug, Clone, Error, PartialEq, Eq)]
pub enum ResultError {
    #[error("{result} result returned for {item} item")]
    KindMismatch { item: WorkKind, result: WorkKind },
    #[error("expected {expected} {what}, got {actual}")]
    LengthMismatch {
        what: &'static str,
        expected: usize,
        actual: usize,
    },
    #[error("returned signs sum to {0}, not zero")]
    NonZeroSum(i128),
}

/// Four-phase pipeline over one dataset
///
/// The pipeline only generates work and folds results into its
/// accumulators. Queueing and dispatch belong to the caller, which must
/// call [`PhasePipeline::advance`] whenever no work is queued or in flight.
#[derive(Debug, Clone)]
pub struct PhasePipeline {
    config: TaskConfig,
    phase: Phase,
    dataset: Option<Dataset>,
    acc: Accumulators,
    sign_limit: u64,
    failure: Option<String>,
}

impl PhasePipeline {
    pub fn new(config: TaskConfig) -> Self {
        Self {
            config,
            phase: Phase::Idle,
            dataset: None,
            acc: Accumulators::default(),
            sign_limit: 0,
            failure: None,
        }
    }

    pub fn phase(&self) -> Phase {
        self.phase
    }

    pub fn is_started(&self) -> bool {
        self.phase != Phase::Idle
    }

    pub fn is_terminal(&self) -> bool {
        self.phase.is_terminal()
    }

    pub fn accumulators(&self) -> &Accumulators {
        &self.acc
    }

    pub fn dataset(&self) -> Option<&Dataset> {
        self.dataset.as_ref()
    }

    pub fn config(&self) -> &TaskConfig {
        &self.config
    }

    /// Why the run failed, once it has
    pub fn failure(&self) -> Option<&str> {
        self.failure.as_deref()
    }

    /// Exclusive upper bound of the sign-search counter
    pub fn sign_limit(&self) -> u64 {
        self.sign_limit
    }

    /// Enter the cracking phase and return the keyspace batches
    pub fn start(&mut self, dataset: Dataset) -> Vec<WorkItem> {
        self.dataset = Some(dataset);
        self.acc = Accumulators::default();
        self.failure = None;
        self.enter(Phase::Cracking);
        keyspace_batches(&self.config)
    }

    /// Fold a successful result into the accumulators
    pub fn record(
        &mut self,
        item: &WorkItem,
        result: CompletionResult,
    ) -> Result<Recorded, ResultError> {
        if Phase::for_kind(item.kind()) != self.phase {
            return Ok(Recorded::Stale);
        }
        if result.kind() != item.kind() {
            return Err(ResultError::KindMismatch {
                item: item.kind(),
                result: result.kind(),
            });
        }

        match (item, result) {
            (
                WorkItem::PasswordCrackBatch { candidates },
                CompletionResult::PasswordHashesComputed { hashes },
            ) => {
                check_len("hashes", candidates.len(), hashes.len())?;
                for (candidate, hash) in candidates.iter().zip(hashes) {
                    self.acc.hash_to_plaintext.insert(hash, candidate.clone());
                }
                tracing::debug!(
                    batch = %item.summary(),
                    known = self.acc.hash_to_plaintext.len(),
                    "recorded password hashes"
                );
                Ok(Recorded::Progress)
            }
            (
                WorkItem::SignSearchRange { values, .. },
                CompletionResult::SignSearchCompleted { signs },
            ) => {
                let Some(signs) = signs else {
                    tracing::debug!(range = %item.summary(), "no zero sum in range");
                    return Ok(Recorded::RangeExhausted);
                };
                check_len("signs", values.len(), signs.len())?;
                let sum: i128 = values
                    .iter()
                    .zip(&signs)
                    .map(|(v, s)| i128::from(*v) * i128::from(s.value()))
                    .sum();
                if sum != 0 {
                    return Err(ResultError::NonZeroSum(sum));
                }
                let ids: Vec<RecordId> = self.ids();
                self.acc.sign_by_id = ids.into_iter().zip(signs).collect();
                tracing::info!(range = %item.summary(), "zero-sum sign assignment found");
                Ok(Recorded::SignsFound)
            }
            (
                WorkItem::GenePairCompare { id_a, id_b, .. },
                CompletionResult::GeneOverlapComputed { length },
            ) => {
                self.acc.offer_overlap(*id_a, *id_b, length);
                self.acc.offer_overlap(*id_b, *id_a, length);
                tracing::debug!(id_a, id_b, length, "recorded gene overlap");
                Ok(Recorded::Progress)
            }
            (WorkItem::HashMineRequest { id, .. }, CompletionResult::HashMined { hash }) => {
                tracing::debug!(id, hash = %hash, "recorded mined hash");
                self.acc.final_hash_by_id.insert(*id, hash);
                Ok(Recorded::Progress)
            }
            (item, result) => Err(ResultError::KindMismatch {
                item: item.kind(),
                result: result.kind(),
            }),
        }
    }

    /// Next sign-search ranges, keeping at most `max_queued_ranges` queued
    pub fn refill_ranges(&mut self, queued: usize) -> Vec<WorkItem> {
        if self.phase != Phase::SignSearch {
            return vec![];
        }
        let count = self
            .config
            .sign_search
            .max_queued_ranges
            .saturating_sub(queued);
        let width = self.config.sign_search.range_width;

        let mut items = Vec::with_capacity(count);
        for _ in 0..count {
            let start = self.acc.next_range_cursor;
            if start >= self.sign_limit {
                break;
            }
            let end = start.saturating_add(width).min(self.sign_limit);
            items.push(WorkItem::SignSearchRange {
                values: self.acc.cracked_integers.clone(),
                range_start: start,
                range_end: end,
            });
            self.acc.next_range_cursor = end;
        }
        items
    }

    /// Leave sign search after a solution and return every gene pair
    pub fn begin_gene_compare(&mut self) -> Vec<WorkItem> {
        self.enter(Phase::GeneCompare);
        let genes: Vec<(RecordId, &String)> = self
            .dataset
            .iter()
            .flat_map(|d| d.genes().iter().map(|(id, seq)| (*id, seq)))
            .collect();

        let mut items = Vec::with_capacity(genes.len() * genes.len().saturating_sub(1) / 2);
        for (i, (id_a, seq_a)) in genes.iter().enumerate() {
            for (id_b, seq_b) in &genes[i + 1..] {
                items.push(WorkItem::GenePairCompare {
                    id_a: *id_a,
                    seq_a: (*seq_a).clone(),
                    id_b: *id_b,
                    seq_b: (*seq_b).clone(),
                });
            }
        }
        items
    }

    /// Move past a drained phase, returning the next phase's initial work
    ///
    /// An empty result with a non-terminal phase means the new phase had no
    /// work and the caller should advance again.
    pub fn advance(&mut self) -> Vec<WorkItem> {
        match self.phase {
            Phase::Cracking => match self.finish_cracking() {
                Ok(()) => {
                    self.enter(Phase::SignSearch);
                    self.refill_ranges(0)
                }
                Err(reason) => {
                    self.fail(reason);
                    vec![]
                }
            },
            Phase::SignSearch => {
                let items = self.refill_ranges(0);
                if items.is_empty() {
                    self.fail(format!(
                        "no zero-sum sign assignment within {} counters",
                        self.sign_limit
                    ));
                }
                items
            }
            Phase::GeneCompare => {
                self.enter(Phase::HashMining);
                self.mining_requests()
            }
            Phase::HashMining => {
                self.enter(Phase::Done);
                vec![]
            }
            Phase::Idle | Phase::Done | Phase::Failed => vec![],
        }
    }

    /// End the run without results
    pub fn fail(&mut self, reason: impl Into<String>) {
        let reason = reason.into();
        tracing::error!(phase = %self.phase, reason = %reason, "task failed");
        self.failure = Some(reason);
        self.phase = Phase::Failed;
    }

    /// Summarize the run so far
    pub fn report(
        &self,
        run_id: impl Into<String>,
        elapsed: Duration,
        finished_at: DateTime<Utc>,
    ) -> TaskReport {
        let outcome = match (self.phase, &self.failure) {
            (Phase::Done, _) => TaskOutcome::Completed,
            (_, Some(reason)) => TaskOutcome::Failed {
                reason: reason.clone(),
            },
            (phase, None) => TaskOutcome::Failed {
                reason: format!("task stopped during {}", phase),
            },
        };
        TaskReport {
            run_id: run_id.into(),
            outcome,
            final_hash_by_id: self.acc.final_hash_by_id.clone(),
            plaintext_by_id: self.acc.plaintext_by_id.clone(),
            sign_by_id: self.acc.sign_by_id.clone(),
            best_overlap_by_id: self.acc.best_overlap.clone(),
            elapsed,
            finished_at,
        }
    }

    fn enter(&mut self, phase: Phase) {
        tracing::info!(from = %self.phase, to = %phase, "phase transition");
        self.phase = phase;
    }

    fn ids(&self) -> Vec<RecordId> {
        self.dataset
            .as_ref()
            .map(|d| d.ids().collect())
            .unwrap_or_default()
    }

    /// Resolve every dataset hash to its plaintext and fix the sign-search bound
    fn finish_cracking(&mut self) -> Result<(), String> {
        let Some(dataset) = &self.dataset else {
            return Err("no dataset loaded".to_string());
        };

        let mut plaintext_by_id = BTreeMap::new();
        let mut cracked = Vec::with_capacity(dataset.len());
        for (id, hash) in dataset.password_hashes() {
            let plaintext = self.acc.hash_to_plaintext.get(hash).ok_or_else(|| {
                format!("password hash of record {} not found in keyspace", id)
            })?;
            let value: i64 = plaintext
                .parse()
                .map_err(|e| format!("record {} cracked to non-numeric {:?}: {}", id, plaintext, e))?;
            plaintext_by_id.insert(*id, plaintext.clone());
            cracked.push(value);
        }

        let n = cracked.len();
        self.sign_limit = if !self.config.sign_search.bounded || n > 64 {
            u64::MAX
        } else {
            1u64 << n.saturating_sub(1)
        };
        self.acc.plaintext_by_id = plaintext_by_id;
        self.acc.cracked_integers = cracked;
        self.acc.next_range_cursor = 0;
        tracing::info!(
            records = n,
            sign_limit = self.sign_limit,
            "passwords cracked"
        );
        Ok(())
    }

    fn mining_requests(&self) -> Vec<WorkItem> {
        self.ids()
            .into_iter()
            .map(|id| {
                let sign = self.acc.sign_by_id.get(&id).copied().unwrap_or(Sign::Plus);
                WorkItem::HashMineRequest {
                    id,
                    target_bit: TargetBit::from(sign),
                    seed_value: self.acc.seed_for(id),
                }
            })
            .collect()
    }
}

fn check_len(what: &'static str, expected: usize, actual: usize) -> Result<(), ResultError> {
    if expected == actual {
        Ok(())
    } else {
        Err(ResultError::LengthMismatch {
            what,
            expected,
            actual,
        })
    }
}

/// Zero-padded numeric candidates covering the whole keyspace, in order
fn keyspace_batches(config: &TaskConfig) -> Vec<WorkItem> {
    let width = config.cracking.digits as usize;
    let total = config.cracking.keyspace_size();
    let batch = config.cracking.batch_size as u64;

    let mut items = Vec::new();
    let mut start = 0u64;
    while start < total {
        let end = start.saturating_add(batch).min(total);
        let candidates = (start..end).map(|n| format!("{:0width$}", n)).collect();
        items.push(WorkItem::PasswordCrackBatch { candidates });
        start = end;
    }
    items
}

#[cfg(test)]
#[path = "state_tests.rs"]
mod tests;
