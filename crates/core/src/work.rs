// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! Work items dispatched to workers

use crate::dataset::RecordId;
use serde::{Deserialize, Serialize};
use std::fmt;

/// One dispatchable unit of computation
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum WorkItem {
    /// Hash every candidate plaintext
    PasswordCrackBatch { candidates: Vec<String> },
    /// Scan sign patterns for counters in `[range_start, range_end)`
    SignSearchRange {
        values: Vec<i64>,
        range_start: u64,
        range_end: u64,
    },
    /// Longest common substring of two gene sequences (`id_a < id_b`)
    GenePairCompare {
        id_a: RecordId,
        seq_a: String,
        id_b: RecordId,
        seq_b: String,
    },
    /// Mine a hash whose hex digest starts with a run of the target bit
    HashMineRequest {
        id: RecordId,
        target_bit: TargetBit,
        seed_value: RecordId,
    },
}

impl WorkItem {
    pub fn kind(&self) -> WorkKind {
        match self {
            WorkItem::PasswordCrackBatch { .. } => WorkKind::PasswordCrack,
            WorkItem::SignSearchRange { .. } => WorkKind::SignSearch,
            WorkItem::GenePairCompare { .. } => WorkKind::GeneCompare,
            WorkItem::HashMineRequest { .. } => WorkKind::HashMine,
        }
    }

    /// Short human-readable description for logs
    pub fn summary(&self) -> String {
        match self {
            WorkItem::PasswordCrackBatch { candidates } => format!(
                "{} candidates from {}",
                candidates.len(),
                candidates.first().map(String::as_str).unwrap_or("-")
            ),
            WorkItem::SignSearchRange {
                range_start,
                range_end,
                ..
            } => format!("counters [{}, {})", range_start, range_end),
            WorkItem::GenePairCompare { id_a, id_b, .. } => format!("genes {} vs {}", id_a, id_b),
            WorkItem::HashMineRequest {
                id,
                target_bit,
                seed_value,
            } => format!("id {} bit {} seed {}", id, target_bit, seed_value),
        }
    }
}

/// Discriminant of a [`WorkItem`]
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum WorkKind {
    PasswordCrack,
    SignSearch,
    GeneCompare,
    HashMine,
}

impl fmt::Display for WorkKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            WorkKind::PasswordCrack => "password_crack",
            WorkKind::SignSearch => "sign_search",
            WorkKind::GeneCompare => "gene_compare",
            WorkKind::HashMine => "hash_mine",
        };
        f.write_str(name)
    }
}

/// Coefficient applied to a cracked integer in the zero-sum search
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Sign {
    Plus,
    Minus,
}

impl Sign {
    pub fn value(self) -> i64 {
        match self {
            Sign::Plus => 1,
            Sign::Minus => -1,
        }
    }
}

impl fmt::Display for Sign {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Sign::Plus => f.write_str("+1"),
            Sign::Minus => f.write_str("-1"),
        }
    }
}

/// Character repeated to form the mining prefix
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum TargetBit {
    Zero,
    One,
}

impl TargetBit {
    pub fn as_char(self) -> char {
        match self {
            TargetBit::Zero => '0',
            TargetBit::One => '1',
        }
    }
}

impl From<Sign> for TargetBit {
    fn from(sign: Sign) -> Self {
        match sign {
            Sign::Plus => TargetBit::One,
            Sign::Minus => TargetBit::Zero,
        }
    }
}

impl fmt::Display for TargetBit {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_char())
    }
}

#[cfg(test)]
#[path = "work_tests.rs"]
mod tests;
