// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

// Allow panic!/unwrap/expect in test code
#![cfg_attr(test, allow(clippy::panic))]
#![cfg_attr(test, allow(clippy::unwrap_used))]
#![cfg_attr(test, allow(clippy::expect_used))]

//! shoald process plumbing: configuration, dataset loading, task trigger, lifecycle

pub mod config;
pub mod dataset;
pub mod lifecycle;
pub mod trigger;

pub use config::{ClusterConfig, DaemonConfig};
pub use dataset::LoadError;
pub use lifecycle::{startup, Config, DaemonState, LifecycleError};
pub use trigger::TaskTrigger;
