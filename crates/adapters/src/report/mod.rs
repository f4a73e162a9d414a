// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! Result sinks for the final task report

mod json;
mod log;

pub use self::json::JsonReportAdapter;
pub use self::log::LogReportAdapter;

// Test support - only compiled for tests or when explicitly requested
#[cfg(any(test, feature = "test-support"))]
mod fake;
#[cfg(any(test, feature = "test-support"))]
pub use fake::FakeReportAdapter;

use async_trait::async_trait;
use shoal_core::TaskReport;
use thiserror::Error;

/// Errors from report publishing
#[derive(Debug, Error)]
pub enum ReportError {
    #[error("io error: {0}")]
    Io(#[from] std::io::Error),
    #[error("serialization error: {0}")]
    Json(#[from] serde_json::Error),
}

/// Destination for the final task report
#[async_trait]
pub trait ReportAdapter: Clone + Send + Sync + 'static {
    async fn publish(&self, report: &TaskReport) -> Result<(), ReportError>;
}

/// An absent sink accepts and drops every report
#[async_trait]
impl<R: ReportAdapter> ReportAdapter for Option<R> {
    async fn publish(&self, report: &TaskReport) -> Result<(), ReportError> {
        match self {
            Some(inner) => inner.publish(report).await,
            None => Ok(()),
        }
    }
}

/// Publishes to `first`, then to `second`
#[derive(Clone)]
pub struct ChainReportAdapter<A, B> {
    first: A,
    second: B,
}

impl<A, B> ChainReportAdapter<A, B> {
    pub fn new(first: A, second: B) -> Self {
        Self { first, second }
    }
}

#[async_trait]
impl<A: ReportAdapter, B: ReportAdapter> ReportAdapter for ChainReportAdapter<A, B> {
    async fn publish(&self, report: &TaskReport) -> Result<(), ReportError> {
        self.first.publish(report).await?;
        self.second.publish(report).await
    }
}

#[cfg(test)]
#[path = "mod_tests.rs"]
mod tests;
