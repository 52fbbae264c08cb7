// Copyright (c) 2025 Steve Wagner (ciroque@live.com)
// SPDX-License-Identifier: MIT

//! Centralized message types for structured logging.
//!
//! Each message type implements `Display` for human-readable output and
//! [`StructuredLog`] to emit a `tracing` event (and optionally a span) with
//! the message fields attached as structured key/value pairs.
//!
//! # Organization
//!
//! * `engine` - Pipeline run lifecycle (start, completion, abort)
//! * `stage` - Stage construction and per-record outcomes
//! * `stream` - Source and sink lifecycle
//! * `validation` - Configuration validation failures
//!
//! # Usage Pattern
//!
//! ```rust
//! use model_etl::observability::messages::engine::RunStarted;
//! use model_etl::observability::messages::StructuredLog;
//!
//! let msg = RunStarted {
//!     stage_count: 1,
//!     stage_ids: "iris",
//! };
//!
//! msg.log();
//! ```

use tracing::Span;

pub mod engine;
pub mod stage;
pub mod stream;
pub mod validation;

/// A log message that knows its own level and structured fields.
pub trait StructuredLog {
    /// Emit the message as a `tracing` event at its natural level.
    fn log(&self);

    /// Build a span carrying the same fields as the event.
    fn span(&self, name: &str) -> Span;
}
