// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! Work item dispatch to the algorithms

use crate::{crack, mining, overlap, sign};
use shoal_core::{Completion, CompletionResult, MiningConfig, WorkItem};
use thiserror::Error;

/// Errors that turn into a FAILED completion
#[derive(Debug, Error, PartialEq, Eq)]
pub enum ExecuteError {
    #[error("no hash with prefix {prefix:?} within {attempts} nonces")]
    MiningExhausted { prefix: String, attempts: u64 },
}

/// Stateless executor for every work kind
#[derive(Debug, Clone, Default)]
pub struct WorkExecutor {
    mining: MiningConfig,
}

impl WorkExecutor {
    pub fn new(mining: MiningConfig) -> Self {
        Self { mining }
    }

    /// Run the item's algorithm
    pub fn run(&self, item: &WorkItem) -> Result<CompletionResult, ExecuteError> {
        let result = match item {
            WorkItem::PasswordCrackBatch { candidates } => {
                CompletionResult::PasswordHashesComputed {
                    hashes: crack::hash_candidates(candidates),
                }
            }
            WorkItem::SignSearchRange {
                values,
                range_start,
                range_end,
            } => CompletionResult::SignSearchCompleted {
                signs: sign::search_range(values, *range_start, *range_end),
            },
            WorkItem::GenePairCompare { seq_a, seq_b, .. } => {
                CompletionResult::GeneOverlapComputed {
                    length: overlap::longest_common_substring(seq_a, seq_b),
                }
            }
            WorkItem::HashMineRequest {
                target_bit,
                seed_value,
                ..
            } => match mining::mine(*seed_value, *target_bit, &self.mining) {
                Some(mined) => {
                    tracing::debug!(seed_value, attempts = mined.attempts, "mined hash");
                    CompletionResult::HashMined { hash: mined.hash }
                }
                None => {
                    return Err(ExecuteError::MiningExhausted {
                        prefix: mining::target_prefix(*target_bit, self.mining.prefix_len),
                        attempts: self.mining.max_nonces.unwrap_or_default(),
                    })
                }
            },
        };
        Ok(result)
    }

    /// Run the item and wrap the outcome for the coordinator
    pub fn execute(&self, item: &WorkItem) -> Completion {
        match self.run(item) {
            Ok(result) => Completion::success(result),
            Err(e) => {
                tracing::warn!(item = %item.summary(), error = %e, "work item failed");
                Completion::failed(e.to_string())
            }
        }
    }
}

#[cfg(test)]
#[path = "executor_tests.rs"]
mod tests;
