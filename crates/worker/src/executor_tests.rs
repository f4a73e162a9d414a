// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

use super::*;
use shoal_core::{CompletionStatus, Sign, TargetBit};

#[test]
fn password_batch_returns_aligned_hashes() {
    let executor = WorkExecutor::default();
    let completion = executor.execute(&WorkItem::PasswordCrackBatch {
        candidates: vec!["000000".to_string(), "000001".to_string()],
    });

    assert_eq!(
        completion,
        Completion::success(CompletionResult::PasswordHashesComputed {
            hashes: vec![
                "91b4d142823f7d20c5f08df69122de43f35f057a988d9619f6d3138485c9a203".to_string(),
                "a7fda0b61e2047f0f1057d1f5f064c272fd5d490961c531f4df64b0dd354683a".to_string(),
            ]
        })
    );
}

#[test]
fn sign_range_reports_found_pattern() {
    let executor = WorkExecutor::default();
    let result = executor
        .run(&WorkItem::SignSearchRange {
            values: vec![3, 2, 5],
            range_start: 0,
            range_end: 8,
        })
        .unwrap();

    assert_eq!(
        result,
        CompletionResult::SignSearchCompleted {
            signs: Some(vec![Sign::Minus, Sign::Minus, Sign::Plus])
        }
    );
}

#[test]
fn gene_pair_returns_overlap_length() {
    let executor = WorkExecutor::default();
    let result = executor
        .run(&WorkItem::GenePairCompare {
            id_a: 1,
            seq_a: "GATTACA".to_string(),
            id_b: 2,
            seq_b: "TACATG".to_string(),
        })
        .unwrap();

    assert_eq!(result, CompletionResult::GeneOverlapComputed { length: 4 });
}

#[test]
fn mining_request_uses_configured_prefix() {
    let executor = WorkExecutor::new(MiningConfig {
        prefix_len: 1,
        seed: 42,
        max_nonces: None,
    });
    let result = executor
        .run(&WorkItem::HashMineRequest {
            id: 1,
            target_bit: TargetBit::One,
            seed_value: 2,
        })
        .unwrap();

    match result {
        CompletionResult::HashMined { hash } => assert!(hash.starts_with('1')),
        other => panic!("unexpected result: {:?}", other),
    }
}

#[test]
fn exhausted_mining_becomes_failed_completion() {
    let executor = WorkExecutor::new(MiningConfig {
        prefix_len: 64,
        seed: 42,
        max_nonces: Some(10),
    });
    let completion = executor.execute(&WorkItem::HashMineRequest {
        id: 1,
        target_bit: TargetBit::Zero,
        seed_value: -1,
    });

    assert_eq!(completion.status(), CompletionStatus::Failed);
    match completion {
        Completion::Failed { reason } => assert!(reason.contains("within 10 nonces")),
        other => panic!("unexpected completion: {:?}", other),
    }
}
