// Copyright (c) 2025 Steve Wagner (ciroque@live.com)
// SPDX-License-Identifier: MIT

//! Errors a model may return from `predict`.

use thiserror::Error;

/// Failure modes of [`Model::predict`](crate::traits::Model::predict).
///
/// `SchemaValidation` is the only failure the pipeline treats as recoverable.
/// Anything else is a defect in the model and aborts the run.
#[derive(Error, Debug)]
pub enum ModelError {
    #[error("{message}")]
    SchemaValidation { message: String },

    #[error(transparent)]
    Defect(#[from] anyhow::Error),
}

impl ModelError {
    pub fn schema(message: impl Into<String>) -> Self {
        ModelError::SchemaValidation {
            message: message.into(),
        }
    }
}
