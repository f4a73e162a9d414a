// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! End-to-end task runs through the runtime with fake adapters and the real executor

#![allow(clippy::unwrap_used)]
#![allow(clippy::panic)]

use proptest::prelude::*;
use shoal_adapters::{FakeReportAdapter, FakeWorkerAdapter, WorkerCall};
use shoal_core::{
    Completion, CrackingConfig, Dataset, Event, FakeClock, MiningConfig, Overlap, Phase,
    RetryConfig, SequentialIdGen, Sign, TaskConfig, TaskReport, WorkItem, WorkerId,
};
use shoal_engine::{Runtime, RuntimeDeps};
use shoal_worker::{sha256_hex, WorkExecutor};
use std::collections::{BTreeMap, VecDeque};

/// What happens to the n-th dispatched item
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Fault {
    None,
    Fail,
    Lose,
}

struct Cluster {
    runtime: Runtime<FakeWorkerAdapter, FakeReportAdapter, FakeClock, SequentialIdGen>,
    workers: FakeWorkerAdapter,
    reports: FakeReportAdapter,
    executor: WorkExecutor,
    names: SequentialIdGen,
    pending: VecDeque<Event>,
    seen: usize,
}

impl Cluster {
    fn new(config: TaskConfig) -> Self {
        let workers = FakeWorkerAdapter::new();
        let reports = FakeReportAdapter::new();
        let executor = WorkExecutor::new(config.mining.clone());
        let runtime = Runtime::new(
            RuntimeDeps {
                workers: workers.clone(),
                reports: reports.clone(),
            },
            config,
            FakeClock::new(),
            SequentialIdGen::new("run"),
        );
        Self {
            runtime,
            workers,
            reports,
            executor,
            names: SequentialIdGen::new("worker"),
            pending: VecDeque::new(),
            seen: 0,
        }
    }

    fn join(&mut self) {
        let worker = self.names.next_worker();
        self.pending.push_back(Event::WorkerJoined { worker });
    }

    /// Deliver events until the runtime shuts down or nothing is left to do
    async fn run(&mut self, mut fault_for: impl FnMut(usize) -> Fault) {
        while let Some(event) = self.pending.pop_front() {
            let follow_up = self.runtime.handle_event(event).await.unwrap();
            self.pending.extend(follow_up);
            if self.runtime.shutdown_requested() {
                break;
            }

            let dispatched = self.workers.dispatched();
            for (worker, item) in dispatched.into_iter().skip(self.seen) {
                let n = self.seen;
                self.seen += 1;
                match fault_for(n) {
                    Fault::None => self.complete(worker, &item),
                    Fault::Fail => self.pending.push_back(Event::WorkCompleted {
                        worker,
                        completion: Completion::failed("injected failure"),
                    }),
                    Fault::Lose => {
                        self.pending.push_back(Event::WorkerLeft { worker });
                        self.join();
                    }
                }
            }
        }
    }

    fn complete(&mut self, worker: WorkerId, item: &WorkItem) {
        let completion = self.executor.execute(item);
        self.pending.push_back(Event::WorkCompleted { worker, completion });
    }

    fn report(&self) -> TaskReport {
        let reports = self.reports.reports();
        assert_eq!(reports.len(), 1, "exactly one report is published");
        reports[0].clone()
    }
}

fn config() -> TaskConfig {
    TaskConfig {
        cracking: CrackingConfig {
            digits: 1,
            batch_size: 3,
        },
        mining: MiningConfig {
            prefix_len: 1,
            ..MiningConfig::default()
        },
        ..TaskConfig::default()
    }
}

/// Passwords 5, 3 and 2 balance as -5 + 3 + 2
fn dataset() -> Dataset {
    Dataset::from_records([
        (1, sha256_hex(b"5"), "GATTACA".to_string()),
        (2, sha256_hex(b"3"), "TACATG".to_string()),
        (3, sha256_hex(b"2"), "CATC".to_string()),
    ])
    .unwrap()
}

async fn run_task(
    workers: usize,
    config: TaskConfig,
    fault_for: impl FnMut(usize) -> Fault,
) -> Cluster {
    let mut cluster = Cluster::new(config);
    for _ in 0..workers {
        cluster.join();
    }
    cluster.pending.push_back(Event::TaskRequested { dataset: dataset() });
    cluster.run(fault_for).await;
    cluster
}

fn same_results(a: &TaskReport, b: &TaskReport) {
    assert_eq!(a.outcome, b.outcome);
    assert_eq!(a.plaintext_by_id, b.plaintext_by_id);
    assert_eq!(a.sign_by_id, b.sign_by_id);
    assert_eq!(a.best_overlap_by_id, b.best_overlap_by_id);
    assert_eq!(a.final_hash_by_id, b.final_hash_by_id);
}

#[tokio::test]
async fn clean_run_reaches_done() {
    let cluster = run_task(2, config(), |_| Fault::None).await;
    let report = cluster.report();

    assert!(cluster.runtime.shutdown_requested());
    assert_eq!(cluster.runtime.phase(), Phase::Done);
    assert!(report.outcome.is_completed());
    assert_eq!(
        report.plaintext_by_id,
        BTreeMap::from([
            (1, "5".to_string()),
            (2, "3".to_string()),
            (3, "2".to_string()),
        ])
    );
    assert_eq!(
        report.sign_by_id,
        BTreeMap::from([(1, Sign::Minus), (2, Sign::Plus), (3, Sign::Plus)])
    );
    assert_eq!(
        report.best_overlap_by_id,
        BTreeMap::from([
            (1, Overlap { partner_id: 2, length: 4 }),
            (2, Overlap { partner_id: 1, length: 4 }),
            (3, Overlap { partner_id: 2, length: 3 }),
        ])
    );
    // Minus mines a run of '0', Plus a run of '1'
    assert!(report.final_hash_by_id[&1].starts_with('0'));
    assert!(report.final_hash_by_id[&2].starts_with('1'));
    assert!(report.final_hash_by_id[&3].starts_with('1'));

    let stopped: Vec<WorkerId> = cluster
        .workers
        .calls()
        .into_iter()
        .filter_map(|call| match call {
            WorkerCall::Stop { worker } => Some(worker),
            WorkerCall::Dispatch { .. } => None,
        })
        .collect();
    assert_eq!(stopped.len(), 2);
}

#[tokio::test]
async fn worker_loss_and_failures_give_the_clean_result() {
    let clean = run_task(2, config(), |_| Fault::None).await.report();
    let faulty = run_task(3, config(), |n| match n % 4 {
        1 => Fault::Lose,
        3 => Fault::Fail,
        _ => Fault::None,
    })
    .await
    .report();

    same_results(&clean, &faulty);
}

#[tokio::test]
async fn retry_cap_fails_the_task() {
    let config = TaskConfig {
        retry: RetryConfig {
            max_attempts: Some(3),
        },
        ..config()
    };
    let cluster = run_task(1, config, |_| Fault::Fail).await;
    let report = cluster.report();

    assert!(!report.outcome.is_completed());
    assert_eq!(cluster.runtime.phase(), Phase::Failed);
    assert!(cluster.runtime.shutdown_requested());
}

proptest! {
    #![proptest_config(ProptestConfig::with_cases(16))]

    #[test]
    fn any_loss_schedule_preserves_results(faults in proptest::collection::vec(0u8..3, 1..24)) {
        let rt = tokio::runtime::Builder::new_current_thread().enable_all().build().unwrap();
        let (clean, faulty) = rt.block_on(async {
            let clean = run_task(2, config(), |_| Fault::None).await.report();
            let faulty = run_task(2, config(), |n| match faults.get(n) {
                Some(1) => Fault::Lose,
                Some(2) => Fault::Fail,
                _ => Fault::None,
            })
            .await
            .report();
            (clean, faulty)
        });
        same_results(&clean, &faulty);
    }
}
