// Copyright (c) 2025 Steve Wagner (ciroque@live.com)
// SPDX-License-Identifier: MIT

//! Pipeline execution: line-delimited JSON source and sink, the model
//! transform stage, and the runner that drives records between them.

pub mod runner;
pub mod sink;
pub mod source;
pub mod transform;

pub use runner::{AbortedRun, PipelineBuilder, PipelineRunner, RunReport, RunState};
pub use sink::{DeferredSink, LdjsonSink};
pub use source::LdjsonSource;
pub use transform::ModelTransformStage;
