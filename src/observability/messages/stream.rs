// Copyright (c) 2025 Steve Wagner (ciroque@live.com)
// SPDX-License-Identifier: MIT

//! Message types for source and sink lifecycle events.

use crate::observability::messages::StructuredLog;
use std::fmt::{Display, Formatter};
use tracing::Span;

/// A stream was opened for reading or writing.
///
/// # Log Level
/// `debug!` - Detailed diagnostic information
pub struct StreamOpened<'a> {
    pub role: &'a str,
    pub location: &'a str,
}

impl Display for StreamOpened<'_> {
    fn fmt(&self, f: &mut Formatter) -> std::fmt::Result {
        write!(f, "Opened {} stream at '{}'", self.role, self.location)
    }
}

impl StructuredLog for StreamOpened<'_> {
    fn log(&self) {
        tracing::debug!(role = self.role, location = self.location, "{}", self);
    }

    fn span(&self, name: &str) -> Span {
        tracing::debug_span!(
            "stream_opened",
            span_name = name,
            role = self.role,
            location = self.location,
        )
    }
}

/// The sink was flushed and released.
///
/// # Log Level
/// `debug!` - Detailed diagnostic information
///
/// # Example
/// ```
/// use model_etl::observability::messages::stream::SinkClosed;
///
/// let msg = SinkClosed { records_written: 42 };
///
/// tracing::debug!("{}", msg);
/// ```
pub struct SinkClosed {
    pub records_written: u64,
}

impl Display for SinkClosed {
    fn fmt(&self, f: &mut Formatter) -> std::fmt::Result {
        write!(f, "Sink closed after {} records", self.records_written)
    }
}

impl StructuredLog for SinkClosed {
    fn log(&self) {
        tracing::debug!(records_written = self.records_written, "{}", self);
    }

    fn span(&self, name: &str) -> Span {
        tracing::debug_span!(
            "sink_closed",
            span_name = name,
            records_written = self.records_written,
        )
    }
}

/// Releasing the sink failed while the run was already aborting.
///
/// # Log Level
/// `warn!` - The original error is still the one reported
pub struct SinkReleaseFailed<'a> {
    pub error: &'a dyn std::error::Error,
}

impl Display for SinkReleaseFailed<'_> {
    fn fmt(&self, f: &mut Formatter) -> std::fmt::Result {
        write!(f, "Failed to release sink during abort: {}", self.error)
    }
}

impl StructuredLog for SinkReleaseFailed<'_> {
    fn log(&self) {
        tracing::warn!(error = %self.error, "{}", self);
    }

    fn span(&self, name: &str) -> Span {
        tracing::warn_span!("sink_release_failed", span_name = name, error = %self.error)
    }
}
