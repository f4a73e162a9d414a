// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! Report sink that writes a JSON file

use super::{ReportAdapter, ReportError};
use async_trait::async_trait;
use shoal_core::TaskReport;
use std::path::{Path, PathBuf};

#[derive(Clone, Debug)]
pub struct JsonReportAdapter {
    path: PathBuf,
}

impl JsonReportAdapter {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }
}

#[async_trait]
impl ReportAdapter for JsonReportAdapter {
    async fn publish(&self, report: &TaskReport) -> Result<(), ReportError> {
        if let Some(parent) = self.path.parent() {
            if !parent.as_os_str().is_empty() {
                tokio::fs::create_dir_all(parent).await?;
            }
        }
        let json = serde_json::to_vec_pretty(report)?;
        tokio::fs::write(&self.path, json).await?;
        Ok(())
    }
}
