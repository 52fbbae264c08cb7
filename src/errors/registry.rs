// Copyright (c) 2025 Steve Wagner (ciroque@live.com)
// SPDX-License-Identifier: MIT

//! Errors for resolving a model from the registry.

use thiserror::Error;

#[derive(Error, Debug)]
pub enum RegistryError {
    #[error("No models registered under module '{module}' (known modules: {known})")]
    UnknownModule { module: String, known: String },

    #[error("Module '{module}' has no model type '{type_name}' (known types: {known})")]
    UnknownType {
        module: String,
        type_name: String,
        known: String,
    },

    #[error("Factory for {module}::{type_name} failed: {source}")]
    FactoryFailed {
        module: String,
        type_name: String,
        #[source]
        source: anyhow::Error,
    },

    #[error("{module}::{type_name} does not satisfy the model contract: {reason}")]
    NonConforming {
        module: String,
        type_name: String,
        reason: String,
    },
}
