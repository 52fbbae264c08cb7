// Copyright (c) 2025 Steve Wagner (ciroque@live.com)
// SPDX-License-Identifier: MIT

//! Model-backed transform stage.

use crate::config::{ModelOptions, ModelRegistry};
use crate::errors::{ModelError, PipelineError, PipelineResult, SchemaErrorPolicy};
use crate::observability::messages::{stage::*, StructuredLog};
use crate::traits::{Model, Record, Stage, StageOutcome};

/// Adapts a [`Model`] into a pipeline [`Stage`].
///
/// Each input record produces exactly one prediction record, except when the
/// model rejects the record's shape and the stage policy is
/// [`SchemaErrorPolicy::SkipAndContinue`]; then nothing is emitted and the
/// runner counts a skip. Any other model failure aborts the run.
pub struct ModelTransformStage {
    id: String,
    model: Box<dyn Model>,
    policy: SchemaErrorPolicy,
}

impl ModelTransformStage {
    pub fn new(id: impl Into<String>, model: Box<dyn Model>, policy: SchemaErrorPolicy) -> Self {
        let stage = Self {
            id: id.into(),
            model,
            policy,
        };
        StageConstructed {
            stage_id: &stage.id,
            model: stage.model.qualified_name(),
            version: stage.model.version(),
            policy: &stage.policy.to_string(),
        }
        .log();
        stage
    }

    /// Resolve the model eagerly. Fails with a construction error if the
    /// registry cannot produce a conforming model.
    pub fn from_registry(
        id: &str,
        registry: &ModelRegistry,
        module: &str,
        type_name: &str,
        options: &ModelOptions,
        policy: SchemaErrorPolicy,
    ) -> PipelineResult<Self> {
        let model = registry.resolve(module, type_name, options).map_err(|e| {
            let reason = e.to_string();
            StageConstructionFailed {
                stage_id: id,
                module,
                type_name,
                reason: &reason,
            }
            .log();
            PipelineError::Construction {
                stage_id: id.to_string(),
                message: reason,
            }
        })?;

        Ok(Self::new(id, model, policy))
    }

    pub fn model(&self) -> &dyn Model {
        self.model.as_ref()
    }

    pub fn policy(&self) -> SchemaErrorPolicy {
        self.policy
    }
}

impl Stage for ModelTransformStage {
    fn id(&self) -> &str {
        &self.id
    }

    fn process(&self, record: Record, record_index: u64) -> PipelineResult<StageOutcome<'_>> {
        match self.model.predict(&record) {
            Ok(prediction) => Ok(StageOutcome::one(prediction)),
            Err(ModelError::SchemaValidation { message }) => match self.policy {
                SchemaErrorPolicy::Abort => Err(PipelineError::SchemaValidation {
                    stage_id: self.id.clone(),
                    record_index,
                    message,
                }),
                SchemaErrorPolicy::SkipAndContinue => Ok(StageOutcome::Skip { reason: message }),
            },
            Err(ModelError::Defect(source)) => Err(PipelineError::ModelFailure {
                stage_id: self.id.clone(),
                source,
            }),
        }
    }
}

impl std::fmt::Debug for ModelTransformStage {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("ModelTransformStage")
            .field("id", &self.id)
            .field("model", &self.model.qualified_name())
            .field("policy", &self.policy)
            .finish()
    }
}
