// Copyright (c) 2025 Steve Wagner (ciroque@live.com)
// SPDX-License-Identifier: MIT

use std::fmt;
use std::path::PathBuf;
use thiserror::Error;

/// Errors that can occur during pipeline configuration validation
#[derive(Debug, Clone, PartialEq)]
pub enum ValidationError {
    /// The pipeline declares no stages at all
    NoStages,
    /// A stage was declared with an empty id
    EmptyStageId {
        /// Zero-based position of the stage in the `stages` list
        position: usize,
    },
    /// Two stages share the same id
    DuplicateStageId {
        /// The duplicate stage ID
        stage_id: String,
    },
    /// A stage does not name the module its model lives in
    MissingModule {
        /// The stage missing its module identifier
        stage_id: String,
    },
    /// A stage does not name the model type to instantiate
    MissingType {
        /// The stage missing its type identifier
        stage_id: String,
    },
}

impl fmt::Display for ValidationError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ValidationError::NoStages => {
                write!(f, "Pipeline must declare at least one stage")
            }
            ValidationError::EmptyStageId { position } => {
                write!(f, "Stage at position {} has an empty id", position)
            }
            ValidationError::DuplicateStageId { stage_id } => {
                write!(f, "Duplicate stage ID: '{}'", stage_id)
            }
            ValidationError::MissingModule { stage_id } => {
                write!(f, "Stage '{}' does not specify a model module", stage_id)
            }
            ValidationError::MissingType { stage_id } => {
                write!(f, "Stage '{}' does not specify a model type", stage_id)
            }
        }
    }
}

impl std::error::Error for ValidationError {}

/// Errors raised while loading a pipeline configuration file.
#[derive(Debug, Error)]
pub enum ConfigError {
    /// The configuration file could not be read.
    #[error("Failed to read config '{path}': {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    /// The configuration file is not valid YAML for a pipeline.
    #[error("Failed to parse config: {0}")]
    Parse(#[from] serde_yaml::Error),

    /// The configuration parsed but describes an invalid pipeline.
    #[error("Configuration validation failed:\n{}", join_lines(.0))]
    Validation(Vec<ValidationError>),
}

fn join_lines(errors: &[ValidationError]) -> String {
    errors
        .iter()
        .map(|e| e.to_string())
        .collect::<Vec<_>>()
        .join("\n")
}
