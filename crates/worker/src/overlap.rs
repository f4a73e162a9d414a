// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! Longest common substring of two gene sequences

/// Length of the longest contiguous run shared by `a` and `b`
///
/// Dynamic programming over two rolling rows indexed by the shorter
/// sequence, so memory is `O(min(|a|, |b|))`.
pub fn longest_common_substring(a: &str, b: &str) -> usize {
    let a: Vec<char> = a.chars().collect();
    let b: Vec<char> = b.chars().collect();
    let (short, long) = if a.len() <= b.len() { (a, b) } else { (b, a) };
    if short.is_empty() {
        return 0;
    }

    let mut prev = vec![0usize; short.len() + 1];
    let mut curr = vec![0usize; short.len() + 1];
    let mut best = 0;
    for lc in &long {
        for (j, sc) in short.iter().enumerate() {
            curr[j + 1] = if lc == sc { prev[j] + 1 } else { 0 };
            best = best.max(curr[j + 1]);
        }
        std::mem::swap(&mut prev, &mut curr);
    }
    best
}

#[cfg(test)]
#[path = "overlap_tests.rs"]
mod tests;
