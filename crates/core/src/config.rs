// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! Task tunables
//!
//! Every field has a default matching the reference workload, so an empty
//! TOML document deserializes to [`TaskConfig::default`].

use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Errors in user-supplied task configuration
#[derive(Debug, Error, PartialEq, Eq)]
pub enum ConfigError {
    #[error("cracking.digits must be between 1 and {max}, got {value}")]
    Digits { value: u32, max: u32 },
    #[error("{field} must be greater than zero")]
    Zero { field: &'static str },
    #[error("mining.prefix_len must be at most 64, got {0}")]
    PrefixTooLong(usize),
}

/// Configuration for one task run
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct TaskConfig {
    pub cracking: CrackingConfig,
    pub sign_search: SignSearchConfig,
    pub mining: MiningConfig,
    pub retry: RetryConfig,
}

impl TaskConfig {
    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.cracking.digits == 0 || self.cracking.digits > CrackingConfig::MAX_DIGITS {
            return Err(ConfigError::Digits {
                value: self.cracking.digits,
                max: CrackingConfig::MAX_DIGITS,
            });
        }
        if self.cracking.batch_size == 0 {
            return Err(ConfigError::Zero {
                field: "cracking.batch_size",
            });
        }
        if self.sign_search.range_width == 0 {
            return Err(ConfigError::Zero {
                field: "sign_search.range_width",
            });
        }
        if self.sign_search.max_queued_ranges == 0 {
            return Err(ConfigError::Zero {
                field: "sign_search.max_queued_ranges",
            });
        }
        if self.mining.prefix_len == 0 {
            return Err(ConfigError::Zero {
                field: "mining.prefix_len",
            });
        }
        if self.mining.prefix_len > 64 {
            return Err(ConfigError::PrefixTooLong(self.mining.prefix_len));
        }
        if self.retry.max_attempts == Some(0) {
            return Err(ConfigError::Zero {
                field: "retry.max_attempts",
            });
        }
        Ok(())
    }
}

/// Keyspace enumeration for the cracking phase
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct CrackingConfig {
    /// Width of the zero-padded numeric candidates
    pub digits: u32,
    /// Candidates per work item
    pub batch_size: usize,
}

impl CrackingConfig {
    pub const MAX_DIGITS: u32 = 9;

    /// Number of candidates in the keyspace (`10^digits`)
    pub fn keyspace_size(&self) -> u64 {
        10u64.pow(self.digits)
    }
}

impl Default for CrackingConfig {
    fn default() -> Self {
        Self {
            digits: 6,
            batch_size: 100,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct SignSearchConfig {
    /// Counters per dispatched range
    pub range_width: u64,
    /// Upper bound on ranges waiting in the unassigned queue
    pub max_queued_ranges: usize,
    /// Stop at `2^(n-1)` counters and fail the task if no zero sum exists
    pub bounded: bool,
}

impl Default for SignSearchConfig {
    fn default() -> Self {
        Self {
            range_width: 10_000,
            max_queued_ranges: 50,
            bounded: true,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct MiningConfig {
    /// Number of repetitions of the target bit the digest must start with
    pub prefix_len: usize,
    /// Seed of the nonce generator, re-applied for every request
    pub seed: u64,
    /// Nonces drawn before the request fails; unbounded when unset
    pub max_nonces: Option<u64>,
}

impl Default for MiningConfig {
    fn default() -> Self {
        Self {
            prefix_len: 5,
            seed: 42,
            max_nonces: None,
        }
    }
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct RetryConfig {
    /// Failed attempts after which an item fails the task; unbounded when unset
    pub max_attempts: Option<u32>,
}

#[cfg(test)]
#[path = "config_tests.rs"]
mod tests;
