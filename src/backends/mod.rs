// Copyright (c) 2025 Steve Wagner (ciroque@live.com)
// SPDX-License-Identifier: MIT

//! Concrete implementations behind the pipeline's extension points.
//!
//! # Available Backends
//!
//! ## Models
//! Prediction models the registry can hand to a transform stage:
//! - **IrisModel**: Iris species classifier over four flower measurements
//!
//! ## Storage
//! Byte stream providers for sources and sinks:
//! - **LocalFileBackend**: Local filesystem, with `-` mapped to stdin/stdout
//!
//! ## Stub Backend (Test-Only)
//! Testing utilities for runner development (only available in test builds):
//! - **EchoModel / DefectModel / RequiresFieldModel**: Model behaviours
//! - **TaggingStage / ExpandStage / FilterStage**: Stage behaviours
//! - **MemorySink**: Shared in-memory sink, optionally failing
//! - **Note**: NOT available in production builds
//!
//! # Architecture
//!
//! ```text
//! Configuration → ModelRegistry → Model → ModelTransformStage → PipelineRunner
//! ```
//!
//! # Examples
//!
//! ```rust
//! use model_etl::backends::models::IrisModel;
//! use model_etl::traits::Model;
//! use serde_json::json;
//!
//! let model = IrisModel::new();
//! let record = json!({
//!     "sepal_length": 6.3, "sepal_width": 3.3, "petal_length": 6.0, "petal_width": 2.5
//! });
//! let prediction = model.predict(record.as_object().unwrap()).unwrap();
//! assert_eq!(prediction["species"], "virginica");
//! ```

pub mod models;
pub mod storage;
#[cfg(test)]
pub mod stub;
