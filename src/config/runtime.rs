// Copyright (c) 2025 Steve Wagner (ciroque@live.com)
// SPDX-License-Identifier: MIT

use crate::backends::storage::{LocalFileBackend, StreamBackend};
use crate::config::{ModelRegistry, PipelineConfig};
use crate::engine::{DeferredSink, LdjsonSink, LdjsonSource, ModelTransformStage, PipelineRunner};
use crate::errors::PipelineResult;
use crate::traits::{RecordSink, Stage};

/// Pipeline runtime builder - turns a validated configuration into a runner.
///
/// Stages are built first, so an unknown or non-conforming model fails the
/// build before any stream is opened. The input is opened at build time so
/// a missing file is reported early. The output is opened only when the
/// runner starts, so building a runner never creates or truncates it.
///
/// # Examples
///
/// ```
/// use model_etl::config::{ModelRegistry, PipelineConfig, RuntimeBuilder};
///
/// let config = PipelineConfig::default_iris();
/// let stages = RuntimeBuilder::build_stages(&config, &ModelRegistry::with_builtin_models()).unwrap();
///
/// assert_eq!(stages.len(), 1);
/// assert_eq!(stages[0].id(), "iris");
/// ```
pub struct RuntimeBuilder;

impl RuntimeBuilder {
    /// Build the stage chain in declaration order.
    ///
    /// Each stage uses its own `on_schema_error` if set, otherwise the
    /// pipeline default.
    pub fn build_stages(
        cfg: &PipelineConfig,
        registry: &ModelRegistry,
    ) -> PipelineResult<Vec<Box<dyn Stage>>> {
        cfg.stages
            .iter()
            .map(|stage| {
                let built = ModelTransformStage::from_registry(
                    &stage.id,
                    registry,
                    &stage.module,
                    &stage.type_name,
                    &stage.options,
                    stage.effective_policy(cfg.on_schema_error),
                )?;
                Ok(Box::new(built) as Box<dyn Stage>)
            })
            .collect()
    }

    /// Storage backend described by the configuration.
    pub fn backend(cfg: &PipelineConfig) -> LocalFileBackend {
        match &cfg.storage.root {
            Some(root) => LocalFileBackend::with_root(root.clone()),
            None => LocalFileBackend::new(),
        }
    }

    /// Build a complete runner from configuration.
    pub fn from_config(
        cfg: &PipelineConfig,
        registry: &ModelRegistry,
    ) -> PipelineResult<PipelineRunner> {
        Self::with_backend(cfg, registry, Self::backend(cfg))
    }

    /// Build a complete runner, reading and writing through `backend`.
    pub fn with_backend<B>(
        cfg: &PipelineConfig,
        registry: &ModelRegistry,
        backend: B,
    ) -> PipelineResult<PipelineRunner>
    where
        B: StreamBackend + 'static,
    {
        let stages = Self::build_stages(cfg, registry)?;
        let source = LdjsonSource::open(&backend, cfg.input_location())?;

        let output = cfg.output_location().to_string();
        let sink = DeferredSink::new(move || {
            let sink = LdjsonSink::create(&backend, &output)?;
            Ok(Box::new(sink) as Box<dyn RecordSink>)
        });

        Ok(PipelineRunner::new(Box::new(source), stages, Box::new(sink)))
    }
}
