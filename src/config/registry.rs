// Copyright (c) 2025 Steve Wagner (ciroque@live.com)
// SPDX-License-Identifier: MIT

use std::collections::BTreeMap;
use std::fmt;

use crate::backends::models::{IrisModel, IRIS_MODULE, IRIS_TYPE};
use crate::config::ModelOptions;
use crate::errors::RegistryError;
use crate::traits::Model;

/// Builds a model instance from its stage options.
pub type ModelFactory = Box<dyn Fn(&ModelOptions) -> anyhow::Result<Box<dyn Model>>>;

/// Registry key: the module a model lives in and its type name.
#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct ModelKey {
    pub module: String,
    pub type_name: String,
}

impl fmt::Display for ModelKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}::{}", self.module, self.type_name)
    }
}

/// Maps `(module, type)` pairs to model factories.
///
/// The registry is populated explicitly at startup; there is no discovery.
/// Resolution either returns a live model that passed the conformance check
/// or fails with a [`RegistryError`].
///
/// # Examples
///
/// ```
/// use model_etl::config::{ModelOptions, ModelRegistry};
///
/// let registry = ModelRegistry::with_builtin_models();
/// let model = registry
///     .resolve("iris_model.iris_predict", "IrisModel", &ModelOptions::new())
///     .unwrap();
/// assert_eq!(model.qualified_name(), "iris_model");
/// ```
#[derive(Default)]
pub struct ModelRegistry {
    factories: BTreeMap<ModelKey, ModelFactory>,
}

impl ModelRegistry {
    pub fn new() -> Self {
        Self {
            factories: BTreeMap::new(),
        }
    }

    /// Registry pre-populated with the models shipped in this crate.
    pub fn with_builtin_models() -> Self {
        let mut registry = Self::new();
        registry.register(IRIS_MODULE, IRIS_TYPE, |options| {
            Ok(Box::new(IrisModel::from_options(options)?))
        });
        registry
    }

    /// Register a factory. A later registration under the same key replaces
    /// the earlier one.
    pub fn register<F>(
        &mut self,
        module: impl Into<String>,
        type_name: impl Into<String>,
        factory: F,
    ) -> &mut Self
    where
        F: Fn(&ModelOptions) -> anyhow::Result<Box<dyn Model>> + 'static,
    {
        let key = ModelKey {
            module: module.into(),
            type_name: type_name.into(),
        };
        tracing::debug!(model = %key, "Registering model factory");
        self.factories.insert(key, Box::new(factory));
        self
    }

    pub fn contains(&self, module: &str, type_name: &str) -> bool {
        self.factories.keys().any(|k| k.module == module && k.type_name == type_name)
    }

    /// All registered keys, sorted by module then type.
    pub fn available(&self) -> impl Iterator<Item = &ModelKey> {
        self.factories.keys()
    }

    pub fn len(&self) -> usize {
        self.factories.len()
    }

    pub fn is_empty(&self) -> bool {
        self.factories.is_empty()
    }

    pub fn resolve(
        &self,
        module: &str,
        type_name: &str,
        options: &ModelOptions,
    ) -> Result<Box<dyn Model>, RegistryError> {
        let factory = self
            .factories
            .iter()
            .find(|(k, _)| k.module == module && k.type_name == type_name)
            .map(|(_, f)| f);

        let factory = match factory {
            Some(f) => f,
            None => return Err(self.missing(module, type_name)),
        };

        let model = factory(options).map_err(|source| RegistryError::FactoryFailed {
            module: module.to_string(),
            type_name: type_name.to_string(),
            source,
        })?;

        Self::check_conformance(model.as_ref()).map_err(|reason| RegistryError::NonConforming {
            module: module.to_string(),
            type_name: type_name.to_string(),
            reason,
        })?;

        Ok(model)
    }

    fn check_conformance(model: &dyn Model) -> Result<(), String> {
        if model.qualified_name().trim().is_empty() {
            return Err("qualified_name is empty".to_string());
        }
        if model.version().trim().is_empty() {
            return Err("version is empty".to_string());
        }
        Ok(())
    }

    fn missing(&self, module: &str, type_name: &str) -> RegistryError {
        let types_in_module: Vec<&str> = self
            .factories
            .keys()
            .filter(|k| k.module == module)
            .map(|k| k.type_name.as_str())
            .collect();

        if types_in_module.is_empty() {
            let mut modules: Vec<&str> = self.factories.keys().map(|k| k.module.as_str()).collect();
            modules.dedup();
            RegistryError::UnknownModule {
                module: module.to_string(),
                known: list_or_none(&modules),
            }
        } else {
            RegistryError::UnknownType {
                module: module.to_string(),
                type_name: type_name.to_string(),
                known: list_or_none(&types_in_module),
            }
        }
    }
}

fn list_or_none(items: &[&str]) -> String {
    if items.is_empty() {
        "none".to_string()
    } else {
        items.join(", ")
    }
}

impl fmt::Debug for ModelRegistry {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("ModelRegistry")
            .field("model_count", &self.factories.len())
            .field("models", &self.factories.keys().map(|k| k.to_string()).collect::<Vec<_>>())
            .finish()
    }
}
