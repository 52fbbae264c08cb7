// Copyright (c) 2025 Steve Wagner (ciroque@live.com)
// SPDX-License-Identifier: MIT

use crate::errors::ModelError;
use crate::traits::Record;

/// The capability a prediction model exposes to the pipeline.
///
/// Implementations validate their own input. A record that does not have
/// the expected shape must be rejected with [`ModelError::SchemaValidation`];
/// every other error is treated as a defect and aborts the run.
///
/// The runner never calls `predict` concurrently, so implementations need
/// not be thread-safe.
pub trait Model {
    fn predict(&self, record: &Record) -> Result<Record, ModelError>;

    /// Human readable name, e.g. "Iris Model".
    fn display_name(&self) -> &str;

    /// Stable identifier, e.g. "iris_model".
    fn qualified_name(&self) -> &str;

    fn description(&self) -> &str {
        ""
    }

    fn version(&self) -> &str;

    /// Fields a record must carry for `predict` to accept it.
    fn input_fields(&self) -> &[&'static str] {
        &[]
    }
}

impl std::fmt::Debug for dyn Model {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Model")
            .field("qualified_name", &self.qualified_name())
            .field("version", &self.version())
            .finish()
    }
}
