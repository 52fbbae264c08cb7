// Copyright (c) 2025 Steve Wagner (ciroque@live.com)
// SPDX-License-Identifier: MIT

//! Error types for pipeline construction and execution.
//!
//! Every failure the runner can observe is a [`PipelineError`]. Callers that
//! only need to branch on the category use [`PipelineError::kind`].

use thiserror::Error;

/// Maximum number of characters of an offending input line kept in an error.
pub const LINE_EXCERPT_LIMIT: usize = 120;

/// Coarse classification of a [`PipelineError`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ErrorKind {
    Construction,
    Format,
    SchemaValidation,
    Io,
    Model,
    InvalidState,
}

#[derive(Error, Debug)]
pub enum PipelineError {
    /// Model resolution or conformance check failed; the pipeline never starts.
    #[error("Failed to construct stage '{stage_id}': {message}")]
    Construction { stage_id: String, message: String },

    /// An input line is not valid JSON.
    #[error("Malformed JSON at line {line}: {source} (line: {excerpt:?})")]
    MalformedLine {
        line: usize,
        excerpt: String,
        #[source]
        source: serde_json::Error,
    },

    /// An input line is valid JSON but not an object.
    #[error("Expected a JSON object at line {line}, found {found} (line: {excerpt:?})")]
    NotAnObject {
        line: usize,
        found: &'static str,
        excerpt: String,
    },

    /// An output record could not be serialized.
    #[error("Failed to serialize output record #{record_index}: {source}")]
    Serialization {
        record_index: u64,
        #[source]
        source: serde_json::Error,
    },

    /// A record did not satisfy the shape the model expects.
    #[error("Schema validation failed in stage '{stage_id}' for record #{record_index}: {message}")]
    SchemaValidation {
        stage_id: String,
        record_index: u64,
        message: String,
    },

    /// Reading from or writing to a stream backend failed.
    #[error("I/O error on {context}: {source}")]
    Io {
        context: String,
        #[source]
        source: std::io::Error,
    },

    /// The model failed in a way other than schema validation.
    #[error("Model in stage '{stage_id}' failed: {source}")]
    ModelFailure {
        stage_id: String,
        #[source]
        source: anyhow::Error,
    },

    /// An operation was attempted in a state that does not allow it.
    #[error("Cannot {operation} while {state}")]
    InvalidState {
        operation: &'static str,
        state: String,
    },
}

impl PipelineError {
    pub fn kind(&self) -> ErrorKind {
        match self {
            PipelineError::Construction { .. } => ErrorKind::Construction,
            PipelineError::MalformedLine { .. }
            | PipelineError::NotAnObject { .. }
            | PipelineError::Serialization { .. } => ErrorKind::Format,
            PipelineError::SchemaValidation { .. } => ErrorKind::SchemaValidation,
            PipelineError::Io { .. } => ErrorKind::Io,
            PipelineError::ModelFailure { .. } => ErrorKind::Model,
            PipelineError::InvalidState { .. } => ErrorKind::InvalidState,
        }
    }

    pub fn io(context: impl Into<String>, source: std::io::Error) -> Self {
        PipelineError::Io {
            context: context.into(),
            source,
        }
    }
}

/// Truncate a raw input line for inclusion in an error message.
pub fn excerpt(line: &str) -> String {
    if line.chars().count() <= LINE_EXCERPT_LIMIT {
        return line.to_string();
    }
    let mut cut: String = line.chars().take(LINE_EXCERPT_LIMIT).collect();
    cut.push_str("...");
    cut
}

/// Result type alias for pipeline operations.
pub type PipelineResult<T> = Result<T, PipelineError>;
