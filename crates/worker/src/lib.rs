// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

// Allow panic!/unwrap/expect in test code
#![cfg_attr(test, allow(clippy::panic))]
#![cfg_attr(test, allow(clippy::unwrap_used))]
#![cfg_attr(test, allow(clippy::expect_used))]

//! shoal-worker: stateless execution of work items
//!
//! Each algorithm is a plain synchronous function. [`WorkExecutor`] maps a
//! [`shoal_core::WorkItem`] to the matching algorithm and wraps the outcome
//! in a [`shoal_core::Completion`].

pub mod crack;
mod digest;
mod executor;
pub mod mining;
pub mod overlap;
pub mod sign;

pub use digest::sha256_hex;
pub use executor::{ExecuteError, WorkExecutor};
