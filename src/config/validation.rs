// Copyright (c) 2025 Steve Wagner (ciroque@live.com)
// SPDX-License-Identifier: MIT

//! Structural validation of a pipeline configuration.
//!
//! Validation checks that the configuration describes a buildable chain:
//!
//! 1. **Non-empty chain**: at least one stage is declared
//! 2. **Identity**: every stage id is non-empty and unique
//! 3. **Model reference**: every stage names a module and a type
//!
//! All problems are collected and returned together. Whether the named
//! model actually exists is decided later by the registry, when the stage
//! is built.
//!
//! # Examples
//!
//! ```rust
//! use model_etl::config::{validate_config, PipelineConfig};
//! use model_etl::errors::ValidationError;
//!
//! let mut config = PipelineConfig::default_iris();
//! config.stages.push(config.stages[0].clone());
//!
//! match validate_config(&config) {
//!     Ok(()) => println!("Configuration is valid"),
//!     Err(errors) => {
//!         for error in &errors {
//!             if let ValidationError::DuplicateStageId { stage_id } = error {
//!                 eprintln!("Stage '{}' is declared twice", stage_id);
//!             }
//!         }
//!         assert_eq!(errors.len(), 1);
//!     }
//! }
//! ```

use std::collections::HashSet;

use crate::config::PipelineConfig;
use crate::errors::ValidationError;

/// Validate a configuration, returning every problem found.
pub fn validate_config(config: &PipelineConfig) -> Result<(), Vec<ValidationError>> {
    let mut errors = Vec::new();

    if config.stages.is_empty() {
        errors.push(ValidationError::NoStages);
    }

    validate_stage_ids(config, &mut errors);
    validate_model_references(config, &mut errors);

    if errors.is_empty() {
        Ok(())
    } else {
        Err(errors)
    }
}

fn validate_stage_ids(config: &PipelineConfig, errors: &mut Vec<ValidationError>) {
    let mut seen_ids = HashSet::new();
    let mut reported = HashSet::new();

    for (position, stage) in config.stages.iter().enumerate() {
        if stage.id.trim().is_empty() {
            errors.push(ValidationError::EmptyStageId { position });
            continue;
        }
        if !seen_ids.insert(stage.id.as_str()) && reported.insert(stage.id.as_str()) {
            errors.push(ValidationError::DuplicateStageId {
                stage_id: stage.id.clone(),
            });
        }
    }
}

fn validate_model_references(config: &PipelineConfig, errors: &mut Vec<ValidationError>) {
    for (position, stage) in config.stages.iter().enumerate() {
        let stage_id = if stage.id.trim().is_empty() {
            format!("#{}", position)
        } else {
            stage.id.clone()
        };

        if stage.module.trim().is_empty() {
            errors.push(ValidationError::MissingModule {
                stage_id: stage_id.clone(),
            });
        }
        if stage.type_name.trim().is_empty() {
            errors.push(ValidationError::MissingType { stage_id });
        }
    }
}
