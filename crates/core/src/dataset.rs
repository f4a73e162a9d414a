// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! Input dataset: password hashes and gene sequences keyed by record id

use serde::Serialize;
use std::collections::BTreeMap;
use thiserror::Error;

/// Integer key of a dataset record
pub type RecordId = i64;

/// Length of a lowercase hex SHA-256 digest
const DIGEST_HEX_LEN: usize = 64;

/// Errors detected while validating a dataset before a task starts
#[derive(Debug, Error, PartialEq, Eq)]
pub enum DatasetError {
    #[error("dataset is empty")]
    Empty,
    #[error("duplicate record id {0}")]
    DuplicateId(RecordId),
    #[error("record {0} has a password hash but no gene sequence")]
    MissingGene(RecordId),
    #[error("record {0} has a gene sequence but no password hash")]
    MissingHash(RecordId),
    #[error("record {id} has a malformed password hash: {hash:?}")]
    MalformedHash { id: RecordId, hash: String },
}

/// Validated input dataset
///
/// Ids iterate in ascending order. That order fixes the cracked-integer
/// sequence, the sign assignment, and the report layout.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Dataset {
    password_hashes: BTreeMap<RecordId, String>,
    genes: BTreeMap<RecordId, String>,
}

impl Dataset {
    /// Build a dataset from the two id-keyed mappings
    ///
    /// Hashes are normalized to lowercase. Both mappings must cover the same ids.
    pub fn new(
        password_hashes: BTreeMap<RecordId, String>,
        genes: BTreeMap<RecordId, String>,
    ) -> Result<Self, DatasetError> {
        if password_hashes.is_empty() && genes.is_empty() {
            return Err(DatasetError::Empty);
        }
        if let Some(id) = password_hashes.keys().find(|id| !genes.contains_key(id)) {
            return Err(DatasetError::MissingGene(*id));
        }
        if let Some(id) = genes.keys().find(|id| !password_hashes.contains_key(id)) {
            return Err(DatasetError::MissingHash(*id));
        }

        let mut normalized = BTreeMap::new();
        for (id, hash) in password_hashes {
            let hash = hash.trim().to_ascii_lowercase();
            if hash.len() != DIGEST_HEX_LEN || !hash.bytes().all(|b| b.is_ascii_hexdigit()) {
                return Err(DatasetError::MalformedHash { id, hash });
            }
            normalized.insert(id, hash);
        }

        Ok(Self {
            password_hashes: normalized,
            genes,
        })
    }

    /// Build a dataset from `(id, password hash, gene)` rows
    pub fn from_records<I>(records: I) -> Result<Self, DatasetError>
    where
        I: IntoIterator<Item = (RecordId, String, String)>,
    {
        let mut hashes = BTreeMap::new();
        let mut genes = BTreeMap::new();
        for (id, hash, gene) in records {
            if hashes.insert(id, hash).is_some() {
                return Err(DatasetError::DuplicateId(id));
            }
            genes.insert(id, gene);
        }
        Self::new(hashes, genes)
    }

    /// Record ids in ascending order
    pub fn ids(&self) -> impl Iterator<Item = RecordId> + '_ {
        self.password_hashes.keys().copied()
    }

    pub fn len(&self) -> usize {
        self.password_hashes.len()
    }

    pub fn is_empty(&self) -> bool {
        self.password_hashes.is_empty()
    }

    pub fn password_hash(&self, id: RecordId) -> Option<&str> {
        self.password_hashes.get(&id).map(String::as_str)
    }

    pub fn password_hashes(&self) -> &BTreeMap<RecordId, String> {
        &self.password_hashes
    }

    pub fn gene(&self, id: RecordId) -> Option<&str> {
        self.genes.get(&id).map(String::as_str)
    }

    pub fn genes(&self) -> &BTreeMap<RecordId, String> {
        &self.genes
    }
}

#[cfg(test)]
#[path = "dataset_tests.rs"]
mod tests;
