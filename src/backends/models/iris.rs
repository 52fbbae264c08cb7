// Copyright (c) 2025 Steve Wagner (ciroque@live.com)
// SPDX-License-Identifier: MIT

use serde_json::Value;

use crate::config::ModelOptions;
use crate::errors::ModelError;
use crate::traits::{Model, Record};
use crate::utils::json::json_type_name;

pub const IRIS_MODULE: &str = "iris_model.iris_predict";
pub const IRIS_TYPE: &str = "IrisModel";

const DEFAULT_OUTPUT_FIELD: &str = "species";
const INPUT_FIELDS: [&str; 4] = ["sepal_length", "sepal_width", "petal_length", "petal_width"];

/// Iris species classifier.
///
/// Expects the four flower measurements (centimetres) as JSON numbers and
/// produces a record with a single prediction field. Classification uses
/// the two petal splits that separate the classic iris data set.
pub struct IrisModel {
    output_field: String,
}

impl IrisModel {
    pub fn new() -> Self {
        Self {
            output_field: DEFAULT_OUTPUT_FIELD.to_string(),
        }
    }

    /// Options:
    /// - `output_field` (string): name of the prediction field, default `species`
    pub fn from_options(options: &ModelOptions) -> anyhow::Result<Self> {
        let output_field = match options.get("output_field") {
            None => DEFAULT_OUTPUT_FIELD.to_string(),
            Some(serde_yaml::Value::String(name)) if !name.trim().is_empty() => name.clone(),
            Some(other) => {
                anyhow::bail!("'output_field' must be a non-empty string, got {:?}", other)
            }
        };
        Ok(Self { output_field })
    }

    fn measurement(record: &Record, field: &str) -> Result<f64, ModelError> {
        match record.get(field) {
            None => Err(ModelError::schema(format!("missing field '{}'", field))),
            Some(Value::Number(n)) => n.as_f64().ok_or_else(|| {
                ModelError::schema(format!("field '{}' is not representable as f64", field))
            }),
            Some(other) => Err(ModelError::schema(format!(
                "field '{}' must be a number, got {}",
                field,
                json_type_name(other)
            ))),
        }
    }

    fn classify(petal_length: f64, petal_width: f64) -> &'static str {
        if petal_length < 2.45 {
            "setosa"
        } else if petal_width < 1.75 {
            "versicolor"
        } else {
            "virginica"
        }
    }
}

impl Default for IrisModel {
    fn default() -> Self {
        Self::new()
    }
}

impl Model for IrisModel {
    fn predict(&self, record: &Record) -> Result<Record, ModelError> {
        let mut values = [0.0_f64; 4];
        for (slot, field) in values.iter_mut().zip(INPUT_FIELDS) {
            *slot = Self::measurement(record, field)?;
        }
        if let Some(pos) = values.iter().position(|v| *v < 0.0) {
            return Err(ModelError::schema(format!(
                "field '{}' must not be negative",
                INPUT_FIELDS[pos]
            )));
        }

        let species = Self::classify(values[2], values[3]);

        let mut prediction = Record::new();
        prediction.insert(self.output_field.clone(), Value::String(species.to_string()));
        Ok(prediction)
    }

    fn display_name(&self) -> &str {
        "Iris Model"
    }

    fn qualified_name(&self) -> &str {
        "iris_model"
    }

    fn description(&self) -> &str {
        "A model that predicts the species of a flower based on its measurements."
    }

    fn version(&self) -> &str {
        env!("CARGO_PKG_VERSION")
    }

    fn input_fields(&self) -> &[&'static str] {
        &INPUT_FIELDS
    }
}
