// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! Prefix mining
//!
//! The nonce generator is re-seeded with the same constant for every
//! request, so equal inputs always walk the same nonce sequence.

use crate::digest::sha256_hex;
use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};
use shoal_core::{MiningConfig, RecordId, TargetBit};
use std::fmt::Write;

/// A digest that matched the target prefix
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Mined {
    pub hash: String,
    pub nonce: u64,
    /// Nonces drawn, including the winning one
    pub attempts: u64,
}

/// The target bit's character repeated `len` times
pub fn target_prefix(bit: TargetBit, len: usize) -> String {
    std::iter::repeat(bit.as_char()).take(len).collect()
}

/// Draw nonces until `sha256("{seed_value}{nonce}")` starts with the prefix
///
/// Returns `None` once `config.max_nonces` draws fail; never gives up when
/// no limit is configured.
pub fn mine(seed_value: RecordId, bit: TargetBit, config: &MiningConfig) -> Option<Mined> {
    let prefix = target_prefix(bit, config.prefix_len);
    let mut rng = StdRng::seed_from_u64(config.seed);
    let mut input = String::new();
    let mut attempts = 0u64;

    loop {
        if config.max_nonces.is_some_and(|max| attempts >= max) {
            return None;
        }
        let nonce: u64 = rng.gen();
        attempts += 1;

        input.clear();
        let _ = write!(input, "{}{}", seed_value, nonce);
        let hash = sha256_hex(input.as_bytes());
        if hash.starts_with(&prefix) {
            return Some(Mined {
                hash,
                nonce,
                attempts,
            });
        }
    }
}

#[cfg(test)]
#[path = "mining_tests.rs"]
mod tests;
