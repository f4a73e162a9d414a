// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! Daemon configuration file

use serde::{Deserialize, Serialize};
use shoal_core::{
    ConfigError, CrackingConfig, MiningConfig, RetryConfig, SignSearchConfig, TaskConfig,
};
use std::path::Path;
use std::time::Duration;
use thiserror::Error;

/// Errors reading or validating the configuration file
#[derive(Debug, Error)]
pub enum DaemonConfigError {
    #[error("cannot read {path}: {source}")]
    Read {
        path: String,
        source: std::io::Error,
    },
    #[error("invalid TOML in {path}: {source}")]
    Parse {
        path: String,
        source: toml::de::Error,
    },
    #[error(transparent)]
    Task(#[from] ConfigError),
    #[error("cluster.workers must be at least 1")]
    NoWorkers,
    #[error("cluster.min_workers must be at least 1")]
    NoMinWorkers,
    #[error("cluster.min_workers ({min}) exceeds cluster.workers ({workers})")]
    MinWorkers { min: usize, workers: usize },
}

/// Task sections plus the `[cluster]` section
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct DaemonConfig {
    pub cracking: CrackingConfig,
    pub sign_search: SignSearchConfig,
    pub mining: MiningConfig,
    pub retry: RetryConfig,
    pub cluster: ClusterConfig,
}

/// Local worker pool and task trigger settings
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct ClusterConfig {
    /// Local workers to start
    pub workers: usize,
    /// Workers that must join before the task starts (defaults to `workers`)
    pub min_workers: Option<usize>,
    /// Give up if `min_workers` have not joined by then
    #[serde(with = "humantime_serde")]
    pub join_timeout: Duration,
}

impl Default for ClusterConfig {
    fn default() -> Self {
        Self {
            workers: 4,
            min_workers: None,
            join_timeout: Duration::from_secs(30),
        }
    }
}

impl ClusterConfig {
    pub fn min_workers(&self) -> usize {
        self.min_workers.unwrap_or(self.workers)
    }
}

impl DaemonConfig {
    /// Read a TOML file; `None` yields the defaults
    pub fn load(path: Option<&Path>) -> Result<Self, DaemonConfigError> {
        let Some(path) = path else {
            return Ok(Self::default());
        };
        let text = std::fs::read_to_string(path).map_err(|source| DaemonConfigError::Read {
            path: path.display().to_string(),
            source,
        })?;
        toml::from_str(&text).map_err(|source| DaemonConfigError::Parse {
            path: path.display().to_string(),
            source,
        })
    }

    /// The sections the coordinator cares about
    pub fn task(&self) -> TaskConfig {
        TaskConfig {
            cracking: self.cracking.clone(),
            sign_search: self.sign_search.clone(),
            mining: self.mining.clone(),
            retry: self.retry.clone(),
        }
    }

    pub fn validate(&self) -> Result<(), DaemonConfigError> {
        self.task().validate()?;
        if self.cluster.workers == 0 {
            return Err(DaemonConfigError::NoWorkers);
        }
        let min = self.cluster.min_workers();
        if min == 0 {
            return Err(DaemonConfigError::NoMinWorkers);
        }
        if min > self.cluster.workers {
            return Err(DaemonConfigError::MinWorkers {
                min,
                workers: self.cluster.workers,
            });
        }
        Ok(())
    }
}

#[cfg(test)]
#[path = "config_tests.rs"]
mod tests;
