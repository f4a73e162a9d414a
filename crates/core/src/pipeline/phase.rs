// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! Pipeline phase definitions

use crate::work::WorkKind;
use serde::{Deserialize, Serialize};
use std::fmt;

/// Stage of a task run
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Phase {
    /// No task started yet
    Idle,
    /// Hashing the numeric keyspace
    Cracking,
    /// Searching for a zero-sum sign assignment
    SignSearch,
    /// Pairwise longest common substring
    GeneCompare,
    /// Mining one final hash per record
    HashMining,
    /// Every record has a final hash
    Done,
    /// The run cannot complete
    Failed,
}

impl Phase {
    /// Phase whose work items have the given kind
    pub fn for_kind(kind: WorkKind) -> Phase {
        match kind {
            WorkKind::PasswordCrack => Phase::Cracking,
            WorkKind::SignSearch => Phase::SignSearch,
            WorkKind::GeneCompare => Phase::GeneCompare,
            WorkKind::HashMine => Phase::HashMining,
        }
    }

    pub fn is_terminal(self) -> bool {
        matches!(self, Phase::Done | Phase::Failed)
    }

    pub fn as_str(self) -> &'static str {
        match self {
            Phase::Idle => "idle",
            Phase::Cracking => "cracking",
            Phase::SignSearch => "sign_search",
            Phase::GeneCompare => "gene_compare",
            Phase::HashMining => "hash_mining",
            Phase::Done => "done",
            Phase::Failed => "failed",
        }
    }
}

impl fmt::Display for Phase {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}
