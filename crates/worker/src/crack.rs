// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! Password batch hashing

use crate::digest::sha256_hex;

/// Digest of every candidate, index-aligned with the input
pub fn hash_candidates(candidates: &[String]) -> Vec<String> {
    candidates.iter().map(|c| sha256_hex(c.as_bytes())).collect()
}

#[cfg(test)]
#[path = "crack_tests.rs"]
mod tests;
