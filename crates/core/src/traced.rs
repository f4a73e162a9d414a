// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! Structured naming for effects handed to the executor

/// Anything the executor runs inside a tracing span
pub trait TracedEffect {
    /// Span name (e.g., "dispatch", "stop")
    fn name(&self) -> &'static str;

    /// Key-value pairs recorded when the effect starts
    fn fields(&self) -> Vec<(&'static str, String)>;
}
