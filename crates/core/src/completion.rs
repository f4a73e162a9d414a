// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! Completion messages returned by workers

use crate::work::{Sign, WorkKind};
use serde::{Deserialize, Serialize};

/// Outcome of executing one work item
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "status", rename_all = "snake_case")]
pub enum Completion {
    Success { result: CompletionResult },
    Failed { reason: String },
}

impl Completion {
    pub fn success(result: CompletionResult) -> Self {
        Completion::Success { result }
    }

    pub fn failed(reason: impl Into<String>) -> Self {
        Completion::Failed {
            reason: reason.into(),
        }
    }

    pub fn status(&self) -> CompletionStatus {
        match self {
            Completion::Success { .. } => CompletionStatus::Success,
            Completion::Failed { .. } => CompletionStatus::Failed,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum CompletionStatus {
    Success,
    Failed,
}

/// Phase-specific payload of a successful completion
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum CompletionResult {
    /// Hex digests aligned index-for-index with the batch candidates
    PasswordHashesComputed { hashes: Vec<String> },
    /// `signs` is present only when a zero sum was found in the range
    SignSearchCompleted { signs: Option<Vec<Sign>> },
    GeneOverlapComputed { length: usize },
    HashMined { hash: String },
}

impl CompletionResult {
    pub fn kind(&self) -> WorkKind {
        match self {
            CompletionResult::PasswordHashesComputed { .. } => WorkKind::PasswordCrack,
            CompletionResult::SignSearchCompleted { .. } => WorkKind::SignSearch,
            CompletionResult::GeneOverlapComputed { .. } => WorkKind::GeneCompare,
            CompletionResult::HashMined { .. } => WorkKind::HashMine,
        }
    }
}
