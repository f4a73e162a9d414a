// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

use super::*;
use shoal_adapters::{FakeReportAdapter, FakeWorkerAdapter};
use shoal_core::{
    Completion, CompletionResult, CoordinatorError, CrackingConfig, Dataset, FakeClock,
    SequentialIdGen, WorkItem, WorkerId,
};

type TestRuntime = Runtime<FakeWorkerAdapter, FakeReportAdapter, FakeClock, SequentialIdGen>;

fn config() -> TaskConfig {
    TaskConfig {
        cracking: CrackingConfig {
            digits: 1,
            batch_size: 4,
        },
        ..TaskConfig::default()
    }
}

fn setup() -> (TestRuntime, FakeWorkerAdapter) {
    let workers = FakeWorkerAdapter::new();
    let runtime = Runtime::new(
        RuntimeDeps {
            workers: workers.clone(),
            reports: FakeReportAdapter::new(),
        },
        config(),
        FakeClock::new(),
        SequentialIdGen::new("run"),
    );
    (runtime, workers)
}

fn dataset() -> Dataset {
    Dataset::from_records([(1, "a".repeat(64), "GATTACA".to_string())]).unwrap()
}

fn joined(name: &str) -> Event {
    Event::WorkerJoined {
        worker: WorkerId::new(name),
    }
}

#[tokio::test]
async fn task_request_dispatches_to_joined_workers() {
    let (runtime, workers) = setup();
    runtime.handle_event(joined("worker-1")).await.unwrap();
    runtime.handle_event(joined("worker-2")).await.unwrap();

    let events = runtime
        .handle_event(Event::TaskRequested { dataset: dataset() })
        .await
        .unwrap();

    assert!(events.is_empty());
    assert_eq!(runtime.phase(), Phase::Cracking);
    let dispatched = workers.dispatched();
    assert_eq!(dispatched.len(), 2);
    assert_eq!(dispatched[0].0, WorkerId::new("worker-1"));
    assert_eq!(
        dispatched[0].1,
        WorkItem::PasswordCrackBatch {
            candidates: vec!["0", "1", "2", "3"].into_iter().map(String::from).collect()
        }
    );
}

#[tokio::test]
async fn second_task_request_is_rejected() {
    let (runtime, _) = setup();
    runtime
        .handle_event(Event::TaskRequested { dataset: dataset() })
        .await
        .unwrap();

    let err = runtime
        .handle_event(Event::TaskRequested { dataset: dataset() })
        .await
        .unwrap_err();

    assert!(matches!(
        err,
        RuntimeError::Coordinator(CoordinatorError::AlreadyStarted { ref run_id }) if run_id == "run-1"
    ));
}

#[tokio::test]
async fn failed_dispatch_feeds_back_worker_loss() {
    let (runtime, workers) = setup();
    let lost = WorkerId::new("worker-1");
    workers.set_unreachable(&lost);
    runtime.handle_event(joined("worker-1")).await.unwrap();

    let events = runtime
        .handle_event(Event::TaskRequested { dataset: dataset() })
        .await
        .unwrap();
    assert_eq!(events, vec![Event::WorkerLeft { worker: lost.clone() }]);

    for event in events {
        runtime.handle_event(event).await.unwrap();
    }
    assert_eq!(runtime.worker_count(), 0);

    // The undelivered batch was requeued behind the rest
    for name in ["worker-2", "worker-3", "worker-4"] {
        runtime.handle_event(joined(name)).await.unwrap();
    }
    let dispatched = workers.dispatched();
    assert_eq!(dispatched.len(), 3);
    assert_eq!(dispatched[2].0, WorkerId::new("worker-4"));
    assert_eq!(
        dispatched[2].1,
        WorkItem::PasswordCrackBatch {
            candidates: vec!["0", "1", "2", "3"].into_iter().map(String::from).collect()
        }
    );
}

#[tokio::test]
async fn completion_from_unknown_worker_changes_nothing() {
    let (runtime, workers) = setup();
    runtime
        .handle_event(Event::TaskRequested { dataset: dataset() })
        .await
        .unwrap();

    let events = runtime
        .handle_event(Event::WorkCompleted {
            worker: WorkerId::new("stranger"),
            completion: Completion::success(CompletionResult::PasswordHashesComputed {
                hashes: vec![],
            }),
        })
        .await
        .unwrap();

    assert!(events.is_empty());
    assert!(workers.calls().is_empty());
    assert_eq!(runtime.phase(), Phase::Cracking);
    assert!(!runtime.shutdown_requested());
    assert!(runtime.last_report().is_none());
}
