// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! Phase pipeline state machine

mod phase;
mod state;

pub use phase::Phase;
pub use state::{Accumulators, Overlap, PhasePipeline, Recorded, ResultError};
