// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

use super::*;
use shoal_core::TaskOutcome;
use std::collections::BTreeMap;
use std::time::Duration;

fn report() -> TaskReport {
    TaskReport {
        run_id: "run-1".to_string(),
        outcome: TaskOutcome::Completed,
        final_hash_by_id: BTreeMap::from([(1, "11111f".to_string())]),
        plaintext_by_id: BTreeMap::from([(1, "042".to_string())]),
        sign_by_id: BTreeMap::new(),
        best_overlap_by_id: BTreeMap::new(),
        elapsed: Duration::from_secs(3),
        finished_at: chrono::Utc::now(),
    }
}

#[tokio::test]
async fn json_adapter_writes_report_file() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("out").join("report.json");
    let adapter = JsonReportAdapter::new(&path);

    adapter.publish(&report()).await.unwrap();

    let written: serde_json::Value =
        serde_json::from_slice(&std::fs::read(&path).unwrap()).unwrap();
    assert_eq!(written["run_id"], "run-1");
    assert_eq!(written["final_hash_by_id"]["1"], "11111f");
    assert_eq!(written["elapsed"], "3s");
}

#[tokio::test]
async fn chain_publishes_to_both_sinks() {
    let first = FakeReportAdapter::new();
    let second = FakeReportAdapter::new();
    let chain = ChainReportAdapter::new(first.clone(), Some(second.clone()));

    chain.publish(&report()).await.unwrap();

    assert_eq!(first.reports().len(), 1);
    assert_eq!(second.reports(), first.reports());
}

#[tokio::test]
async fn absent_sink_accepts_reports() {
    let sink: Option<FakeReportAdapter> = None;
    sink.publish(&report()).await.unwrap();
    LogReportAdapter.publish(&report()).await.unwrap();
}
