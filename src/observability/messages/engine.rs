// Copyright (c) 2025 Steve Wagner (ciroque@live.com)
// SPDX-License-Identifier: MIT

//! Message types for pipeline run lifecycle events.
//!
//! This module contains message types for logging events related to:
//! * Run start (chain shape)
//! * Run completion with record counts
//! * Run abort with the triggering error

use crate::observability::messages::StructuredLog;
use std::fmt::{Display, Formatter};
use tracing::Span;

/// Pipeline run started.
///
/// # Log Level
/// `info!` - Important operational event
///
/// # Example
/// ```
/// use model_etl::observability::messages::engine::RunStarted;
///
/// let msg = RunStarted {
///     stage_count: 2,
///     stage_ids: "iris -> enrich",
/// };
///
/// tracing::info!("{}", msg);
/// ```
pub struct RunStarted<'a> {
    pub stage_count: usize,
    pub stage_ids: &'a str,
}

impl Display for RunStarted<'_> {
    fn fmt(&self, f: &mut Formatter) -> std::fmt::Result {
        write!(
            f,
            "Starting pipeline run: {} stages [{}]",
            self.stage_count, self.stage_ids
        )
    }
}

impl StructuredLog for RunStarted<'_> {
    fn log(&self) {
        tracing::info!(
            stage_count = self.stage_count,
            stage_ids = self.stage_ids,
            "{}", self
        );
    }

    fn span(&self, name: &str) -> Span {
        tracing::info_span!(
            "pipeline_run",
            span_name = name,
            stage_count = self.stage_count,
            stage_ids = self.stage_ids,
        )
    }
}

/// Pipeline run completed successfully.
///
/// # Log Level
/// `info!` - Important operational event
///
/// # Example
/// ```
/// use model_etl::observability::messages::engine::RunCompleted;
/// use std::time::Duration;
///
/// let msg = RunCompleted {
///     records_read: 150,
///     records_written: 149,
///     records_skipped: 1,
///     duration: Duration::from_millis(12),
/// };
///
/// tracing::info!("{}", msg);
/// ```
pub struct RunCompleted {
    pub records_read: u64,
    pub records_written: u64,
    pub records_skipped: u64,
    pub duration: std::time::Duration,
}

impl Display for RunCompleted {
    fn fmt(&self, f: &mut Formatter) -> std::fmt::Result {
        write!(
            f,
            "Pipeline run completed: read={}, written={}, skipped={} in {:?}",
            self.records_read, self.records_written, self.records_skipped, self.duration
        )
    }
}

impl StructuredLog for RunCompleted {
    fn log(&self) {
        tracing::info!(
            records_read = self.records_read,
            records_written = self.records_written,
            records_skipped = self.records_skipped,
            duration_ms = self.duration.as_millis() as u64,
            "{}", self
        );
    }

    fn span(&self, name: &str) -> Span {
        tracing::info_span!(
            "run_completed",
            span_name = name,
            records_read = self.records_read,
            records_written = self.records_written,
            records_skipped = self.records_skipped,
            duration = ?self.duration,
        )
    }
}

/// Pipeline run aborted.
///
/// # Log Level
/// `error!` - Failure requiring attention
///
/// # Example
/// ```
/// use model_etl::observability::messages::engine::RunAborted;
///
/// let error = std::io::Error::new(std::io::ErrorKind::Other, "disk full");
/// let msg = RunAborted {
///     records_read: 10,
///     records_written: 9,
///     error: &error,
/// };
///
/// tracing::error!("{}", msg);
/// ```
pub struct RunAborted<'a> {
    pub records_read: u64,
    pub records_written: u64,
    pub error: &'a dyn std::error::Error,
}

impl Display for RunAborted<'_> {
    fn fmt(&self, f: &mut Formatter) -> std::fmt::Result {
        write!(
            f,
            "Pipeline run aborted after reading {} and writing {} records: {}",
            self.records_read, self.records_written, self.error
        )
    }
}

impl StructuredLog for RunAborted<'_> {
    fn log(&self) {
        tracing::error!(
            records_read = self.records_read,
            records_written = self.records_written,
            error = %self.error,
            "{}", self
        );
    }

    fn span(&self, name: &str) -> Span {
        tracing::error_span!(
            "run_aborted",
            span_name = name,
            records_read = self.records_read,
            records_written = self.records_written,
            error = %self.error,
        )
    }
}
