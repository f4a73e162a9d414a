// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! shoal daemon (shoald)
//!
//! Loads a dataset, starts local workers, and runs the four-phase task to completion.

use std::path::PathBuf;
use std::time::Duration;

use clap::Parser;
use shoal_core::TaskOutcome;
use shoal_daemon::{startup, Config, DaemonConfig, LifecycleError};
use tokio::signal::unix::{signal, SignalKind};
use tracing::{error, info};

#[derive(Parser)]
#[command(
    name = "shoald",
    version,
    about = "shoal - distributed password, sign, gene and mining pipeline"
)]
struct Args {
    /// Dataset file (`id;name;password hash;gene` rows)
    #[arg(long, short)]
    input: PathBuf,

    /// TOML configuration file
    #[arg(long, short)]
    config: Option<PathBuf>,

    /// Local workers to start (overrides cluster.workers)
    #[arg(long)]
    workers: Option<usize>,

    /// Workers that must join before the task starts (overrides cluster.min_workers)
    #[arg(long)]
    min_workers: Option<usize>,

    /// How long to wait for workers, e.g. "30s" (overrides cluster.join_timeout)
    #[arg(long, value_parser = humantime::parse_duration)]
    join_timeout: Option<Duration>,

    /// Write logs to this file instead of stderr
    #[arg(long)]
    log_file: Option<PathBuf>,

    /// Write the final report as JSON
    #[arg(long)]
    report: Option<PathBuf>,
}

impl Args {
    fn into_config(self) -> Result<(Config, Option<PathBuf>), LifecycleError> {
        let mut settings = DaemonConfig::load(self.config.as_deref())?;
        if let Some(workers) = self.workers {
            settings.cluster.workers = workers;
        }
        if let Some(min_workers) = self.min_workers {
            settings.cluster.min_workers = Some(min_workers);
        }
        if let Some(join_timeout) = self.join_timeout {
            settings.cluster.join_timeout = join_timeout;
        }
        let config = Config {
            input: self.input,
            report_path: self.report,
            settings,
        };
        Ok((config, self.log_file))
    }
}

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    let (config, log_file) = Args::parse().into_config()?;

    // Set up logging
    let _log_guard = setup_logging(log_file.as_ref())?;

    info!("Starting shoald for dataset: {}", config.input.display());

    // Start daemon
    let mut daemon = match startup(&config).await {
        Ok(d) => d,
        Err(e) => {
            error!("Failed to start daemon: {}", e);
            return Err(e.into());
        }
    };

    // Set up signal handlers
    let mut sigterm = signal(SignalKind::terminate())?;
    let mut sigint = signal(SignalKind::interrupt())?;

    let join_deadline = tokio::time::Instant::now() + config.settings.cluster.join_timeout;

    // Main event loop
    loop {
        tokio::select! {
            // Process worker events
            Some(event) = daemon.internal_events.recv() => {
                if let Err(e) = daemon.process_event(event).await {
                    error!("Error processing event: {}", e);
                    if daemon.shutdown_requested {
                        daemon.shutdown().await?;
                        return Err(e.into());
                    }
                }
            }

            // Give up if the cluster never gets big enough
            _ = tokio::time::sleep_until(join_deadline), if !daemon.task_started() => {
                let e = LifecycleError::join_timeout(&daemon);
                error!("{}", e);
                daemon.shutdown().await?;
                return Err(e.into());
            }

            // Graceful shutdown on SIGTERM
            _ = sigterm.recv() => {
                info!("Received SIGTERM, shutting down...");
                daemon.shutdown().await?;
                break;
            }

            // Graceful shutdown on SIGINT
            _ = sigint.recv() => {
                info!("Received SIGINT, shutting down...");
                daemon.shutdown().await?;
                break;
            }
        }

        // Check if the coordinator finished the task
        if daemon.shutdown_requested {
            info!("Task finished, shutting down...");
            daemon.shutdown().await?;
            break;
        }
    }

    let Some(report) = daemon.report() else {
        return Err("interrupted before the task finished".into());
    };
    for line in report.render_lines() {
        println!("{}", line);
    }
    if let TaskOutcome::Failed { reason } = &report.outcome {
        return Err(format!("task failed: {}", reason).into());
    }

    info!("Daemon stopped");
    Ok(())
}

fn setup_logging(
    log_file: Option<&PathBuf>,
) -> Result<tracing_appender::non_blocking::WorkerGuard, Box<dyn std::error::Error>> {
    use tracing_subscriber::{fmt, prelude::*, EnvFilter};

    let (non_blocking, guard) = match log_file {
        Some(path) => {
            // Create log directory if needed
            let dir = match path.parent() {
                Some(parent) if !parent.as_os_str().is_empty() => parent.to_path_buf(),
                _ => PathBuf::from("."),
            };
            std::fs::create_dir_all(&dir)?;
            let file_name = path
                .file_name()
                .ok_or_else(|| format!("log file path has no file name: {}", path.display()))?;
            let file_appender = tracing_appender::rolling::never(dir, file_name);
            tracing_appender::non_blocking(file_appender)
        }
        None => tracing_appender::non_blocking(std::io::stderr()),
    };

    // Set up subscriber with env filter
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"));

    tracing_subscriber::registry()
        .with(filter)
        .with(fmt::layer().with_ansi(false).with_writer(non_blocking))
        .init();

    Ok(guard)
}
