// Copyright (c) 2025 Steve Wagner (ciroque@live.com)
// SPDX-License-Identifier: MIT

use crate::backends::models::{IRIS_MODULE, IRIS_TYPE};
use crate::backends::storage::STDIO_LOCATION;
use crate::config::consts::DEFAULT_STAGE_ID;
use crate::errors::{ConfigError, SchemaErrorPolicy};
use crate::observability::messages::validation::{ConfigLoaded, ConfigValidationFailed};
use crate::observability::messages::StructuredLog;
use serde::Deserialize;
use std::collections::HashMap;
use std::fs;
use std::path::{Path, PathBuf};

/// Factory options passed to a model when its stage is built.
pub type ModelOptions = HashMap<String, serde_yaml::Value>;

/// Main configuration structure for a batch scoring pipeline.
///
/// Describes where records come from, where they go, and the ordered chain
/// of model stages between them. Typically loaded from a YAML file.
///
/// # Fields
/// * `input_file` - Source location (optional, the CLI may supply it)
/// * `output_file` - Sink location (optional, the CLI may supply it)
/// * `on_schema_error` - Default policy for stages that do not override it
/// * `storage` - Stream backend settings (optional)
/// * `stages` - Model stages, applied in order
///
/// # Example
/// ```yaml
/// input_file: iris.jsonl
/// output_file: predictions.jsonl
/// on_schema_error: skip_and_continue
/// storage:
///   root: ./data
/// stages:
///   - id: iris
///     module: iris_model.iris_predict
///     type: IrisModel
/// ```
#[derive(Debug, Clone, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct PipelineConfig {
    pub input_file: Option<String>,
    pub output_file: Option<String>,
    #[serde(default)]
    pub on_schema_error: SchemaErrorPolicy,
    #[serde(default)]
    pub storage: StorageConfig,
    pub stages: Vec<StageConfig>,
}

/// Stream backend settings.
///
/// # Fields
/// * `root` - Base directory relative locations are resolved against
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct StorageConfig {
    pub root: Option<PathBuf>,
}

/// Configuration for a single model stage.
///
/// # Fields
/// * `id` - Unique identifier, used in logs and errors
/// * `module` - Registry module the model lives in
/// * `type_name` - Model type within the module (`type` in YAML)
/// * `on_schema_error` - Per-stage policy override (optional)
/// * `options` - Model-specific factory options
///
/// # Example
/// ```yaml
/// id: iris
/// module: iris_model.iris_predict
/// type: IrisModel
/// on_schema_error: abort
/// options:
///   output_field: label
/// ```
#[derive(Debug, Clone, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct StageConfig {
    pub id: String,
    #[serde(default)]
    pub module: String,
    #[serde(rename = "type", default)]
    pub type_name: String,
    pub on_schema_error: Option<SchemaErrorPolicy>,
    #[serde(default)]
    pub options: ModelOptions,
}

impl StageConfig {
    /// The stage's own policy, falling back to the pipeline default.
    pub fn effective_policy(&self, pipeline_default: SchemaErrorPolicy) -> SchemaErrorPolicy {
        self.on_schema_error.unwrap_or(pipeline_default)
    }
}

impl PipelineConfig {
    /// The single-stage iris pipeline used when no configuration file is given.
    pub fn default_iris() -> Self {
        Self {
            input_file: None,
            output_file: None,
            on_schema_error: SchemaErrorPolicy::default(),
            storage: StorageConfig::default(),
            stages: vec![StageConfig {
                id: DEFAULT_STAGE_ID.to_string(),
                module: IRIS_MODULE.to_string(),
                type_name: IRIS_TYPE.to_string(),
                on_schema_error: None,
                options: ModelOptions::new(),
            }],
        }
    }

    pub fn input_location(&self) -> &str {
        self.input_file.as_deref().unwrap_or(STDIO_LOCATION)
    }

    pub fn output_location(&self) -> &str {
        self.output_file.as_deref().unwrap_or(STDIO_LOCATION)
    }
}

/// Load a config from a YAML file
pub fn load_config<P: AsRef<Path>>(path: P) -> Result<PipelineConfig, ConfigError> {
    let path = path.as_ref();
    let content = fs::read_to_string(path).map_err(|source| ConfigError::Io {
        path: path.to_path_buf(),
        source,
    })?;
    let cfg: PipelineConfig = serde_yaml::from_str(&content)?;
    Ok(cfg)
}

/// Load and validate a config from a YAML file
///
/// Every validation problem is collected before the error is returned, so a
/// single run reports all of them.
pub fn load_and_validate_config<P: AsRef<Path>>(path: P) -> Result<PipelineConfig, ConfigError> {
    let path = path.as_ref();
    let cfg = load_config(path)?;

    if let Err(problems) = crate::config::validate_config(&cfg) {
        let messages: Vec<String> = problems.iter().map(|e| e.to_string()).collect();
        ConfigValidationFailed {
            problems: &messages,
        }
        .log();
        return Err(ConfigError::Validation(problems));
    }

    ConfigLoaded {
        path: &path.display().to_string(),
        stage_count: cfg.stages.len(),
    }
    .log();

    Ok(cfg)
}
