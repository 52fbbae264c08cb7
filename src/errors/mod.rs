// Copyright (c) 2025 Steve Wagner (ciroque@live.com)
// SPDX-License-Identifier: MIT

mod config;
mod model;
mod pipeline;
mod registry;

pub use config::{ConfigError, ValidationError};
pub use model::ModelError;
pub use pipeline::{excerpt, ErrorKind, PipelineError, PipelineResult, LINE_EXCERPT_LIMIT};
pub use registry::RegistryError;

use serde::Deserialize;

/// What a transform stage does when a record fails model schema validation.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum SchemaErrorPolicy {
    /// Surface the error and abort the whole run.
    #[default]
    Abort,
    /// Drop the record, count it as skipped, and keep going.
    #[serde(alias = "skip-and-continue")]
    SkipAndContinue,
}

impl std::fmt::Display for SchemaErrorPolicy {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            SchemaErrorPolicy::Abort => write!(f, "abort"),
            SchemaErrorPolicy::SkipAndContinue => write!(f, "skip_and_continue"),
        }
    }
}
