// Copyright (c) 2025 Steve Wagner (ciroque@live.com)
// SPDX-License-Identifier: MIT

//! Message types for stage construction and per-record outcomes.

use crate::observability::messages::StructuredLog;
use std::fmt::{Display, Formatter};
use tracing::Span;

/// A model-backed stage was constructed.
///
/// # Log Level
/// `info!` - Important operational event
///
/// # Example
/// ```
/// use model_etl::observability::messages::stage::StageConstructed;
///
/// let msg = StageConstructed {
///     stage_id: "iris",
///     model: "iris_model",
///     version: "1.0.0",
///     policy: "abort",
/// };
///
/// tracing::info!("{}", msg);
/// ```
pub struct StageConstructed<'a> {
    pub stage_id: &'a str,
    pub model: &'a str,
    pub version: &'a str,
    pub policy: &'a str,
}

impl Display for StageConstructed<'_> {
    fn fmt(&self, f: &mut Formatter) -> std::fmt::Result {
        write!(
            f,
            "Stage '{}' constructed with model {} v{} (on_schema_error={})",
            self.stage_id, self.model, self.version, self.policy
        )
    }
}

impl StructuredLog for StageConstructed<'_> {
    fn log(&self) {
        tracing::info!(
            stage_id = self.stage_id,
            model = self.model,
            version = self.version,
            policy = self.policy,
            "{}", self
        );
    }

    fn span(&self, name: &str) -> Span {
        tracing::info_span!(
            "stage_constructed",
            span_name = name,
            stage_id = self.stage_id,
            model = self.model,
        )
    }
}

/// Stage construction failed.
///
/// # Log Level
/// `error!` - Failure requiring attention
pub struct StageConstructionFailed<'a> {
    pub stage_id: &'a str,
    pub module: &'a str,
    pub type_name: &'a str,
    pub reason: &'a str,
}

impl Display for StageConstructionFailed<'_> {
    fn fmt(&self, f: &mut Formatter) -> std::fmt::Result {
        write!(
            f,
            "Failed to construct stage '{}' from {}::{}: {}",
            self.stage_id, self.module, self.type_name, self.reason
        )
    }
}

impl StructuredLog for StageConstructionFailed<'_> {
    fn log(&self) {
        tracing::error!(
            stage_id = self.stage_id,
            module = self.module,
            type_name = self.type_name,
            reason = self.reason,
            "{}", self
        );
    }

    fn span(&self, name: &str) -> Span {
        tracing::error_span!(
            "stage_construction_failed",
            span_name = name,
            stage_id = self.stage_id,
            module = self.module,
            type_name = self.type_name,
        )
    }
}

/// A record was dropped because it failed model schema validation.
///
/// # Log Level
/// `warn!` - Recoverable, but the record is missing from the output
///
/// # Example
/// ```
/// use model_etl::observability::messages::stage::RecordSkipped;
///
/// let msg = RecordSkipped {
///     stage_id: "iris",
///     record_index: 7,
///     reason: "missing field 'petal_length'",
/// };
///
/// tracing::warn!("{}", msg);
/// ```
pub struct RecordSkipped<'a> {
    pub stage_id: &'a str,
    pub record_index: u64,
    pub reason: &'a str,
}

impl Display for RecordSkipped<'_> {
    fn fmt(&self, f: &mut Formatter) -> std::fmt::Result {
        write!(
            f,
            "Stage '{}' skipped record #{}: {}",
            self.stage_id, self.record_index, self.reason
        )
    }
}

impl StructuredLog for RecordSkipped<'_> {
    fn log(&self) {
        tracing::warn!(
            stage_id = self.stage_id,
            record_index = self.record_index,
            reason = self.reason,
            "{}", self
        );
    }

    fn span(&self, name: &str) -> Span {
        tracing::warn_span!(
            "record_skipped",
            span_name = name,
            stage_id = self.stage_id,
            record_index = self.record_index,
        )
    }
}
