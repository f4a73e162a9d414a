// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

// Allow panic!/unwrap/expect in test code
#![cfg_attr(test, allow(clippy::panic))]
#![cfg_attr(test, allow(clippy::unwrap_used))]
#![cfg_attr(test, allow(clippy::expect_used))]

//! shoal-core: pure coordination logic for the shoal compute cluster
//!
//! This crate provides:
//! - The work and completion model exchanged with workers
//! - The work queue (unassigned items, idle workers, busy workers)
//! - The four-phase pipeline and its accumulators
//! - The composed coordinator, which turns events into effects
//!
//! Nothing here performs I/O. Effects are executed by the engine crate.

pub mod clock;
pub mod config;
pub mod id;
pub mod traced;

// Data model (order matters for dependencies)
pub mod work;
pub mod completion;
pub mod dataset;
pub mod report;
pub mod effect;
pub mod event;

// State machines
pub mod queue;
pub mod pipeline;
pub mod coordinator;

// Re-exports
pub use clock::{Clock, FakeClock, SystemClock};
pub use completion::{Completion, CompletionResult, CompletionStatus};
pub use config::{
    ConfigError, CrackingConfig, MiningConfig, RetryConfig, SignSearchConfig, TaskConfig,
};
pub use coordinator::{Coordinator, CoordinatorError};
pub use dataset::{Dataset, DatasetError, RecordId};
pub use effect::Effect;
pub use event::Event;
pub use id::{IdGen, SequentialIdGen, UuidIdGen, WorkerId};
pub use pipeline::{Accumulators, Overlap, Phase, PhasePipeline, Recorded, ResultError};
pub use queue::{Assignment, WorkQueue};
pub use report::{TaskOutcome, TaskReport};
pub use traced::TracedEffect;
pub use work::{Sign, TargetBit, WorkItem, WorkKind};
