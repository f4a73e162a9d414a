// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! Zero-sum sign search
//!
//! Counter `a` encodes a sign pattern: position `k` is negative when bit `k`
//! of `a` is set, positive otherwise. Positions past bit 63 are always positive.

use shoal_core::Sign;

/// Sign pattern encoded by `counter` for `len` values
pub fn signs_for(counter: u64, len: usize) -> Vec<Sign> {
    (0..len)
        .map(|k| {
            if bit_set(counter, k) {
                Sign::Minus
            } else {
                Sign::Plus
            }
        })
        .collect()
}

/// Sum of `values` under the pattern encoded by `counter`
pub fn signed_sum(values: &[i64], counter: u64) -> i128 {
    values
        .iter()
        .enumerate()
        .map(|(k, v)| {
            let v = i128::from(*v);
            if bit_set(counter, k) {
                -v
            } else {
                v
            }
        })
        .sum()
}

/// First counter in `[start, end)` whose pattern sums to zero
pub fn first_zero(values: &[i64], start: u64, end: u64) -> Option<u64> {
    (start..end).find(|&a| signed_sum(values, a) == 0)
}

/// Scan `[start, end)` and return the first zero-sum pattern, if any
pub fn search_range(values: &[i64], start: u64, end: u64) -> Option<Vec<Sign>> {
    first_zero(values, start, end).map(|a| signs_for(a, values.len()))
}

fn bit_set(counter: u64, k: usize) -> bool {
    k < 64 && (counter >> k) & 1 == 1
}

#[cfg(test)]
#[path = "sign_tests.rs"]
mod tests;
