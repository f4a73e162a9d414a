// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! Fake report adapter for testing
#![cfg_attr(coverage_nightly, coverage(off))]

use super::{ReportAdapter, ReportError};
use async_trait::async_trait;
use shoal_core::TaskReport;
use std::sync::{Arc, Mutex};

/// Fake report adapter that keeps every published report
#[derive(Clone, Default)]
pub struct FakeReportAdapter {
    reports: Arc<Mutex<Vec<TaskReport>>>,
}

impl FakeReportAdapter {
    pub fn new() -> Self {
        Self::default()
    }

    /// Get all published reports
    pub fn reports(&self) -> Vec<TaskReport> {
        self.reports.lock().unwrap_or_else(|e| e.into_inner()).clone()
    }
}

#[async_trait]
impl ReportAdapter for FakeReportAdapter {
    async fn publish(&self, report: &TaskReport) -> Result<(), ReportError> {
        self.reports
            .lock()
            .unwrap_or_else(|e| e.into_inner())
            .push(report.clone());
        Ok(())
    }
}
