// Copyright (c) 2025 Steve Wagner (ciroque@live.com)
// SPDX-License-Identifier: MIT

#[cfg(test)]
mod integration_tests {
    use std::fs;

    use crate::backends::storage::LocalFileBackend;
    use crate::config::{load_and_validate_config, ModelRegistry, PipelineConfig, RuntimeBuilder};
    use crate::engine::RunState;
    use crate::errors::{ConfigError, ErrorKind, SchemaErrorPolicy, ValidationError};

    const IRIS_INPUT: &str = concat!(
        r#"{"sepal_length":4.4,"sepal_width":2.9,"petal_length":1.4,"petal_width":0.2}"#,
        "\n",
        r#"{"sepal_length":4.4,"sepal_width":2.9,"petal_width":0.2}"#,
        "\n",
        r#"{"sepal_length":6.3,"sepal_width":3.3,"petal_length":6.0,"petal_width":2.5}"#,
        "\n",
    );

    /// Test that YAML configurations can be loaded and parsed correctly
    #[test]
    fn test_iris_pipeline_yaml_loading() {
        let config = load_and_validate_config("configs/iris-pipeline.yaml").unwrap();

        assert_eq!(config.input_location(), "iris.jsonl");
        assert_eq!(config.output_location(), "predictions.jsonl");
        assert_eq!(config.on_schema_error, SchemaErrorPolicy::Abort);
        assert_eq!(config.stages.len(), 1);
        assert_eq!(config.stages[0].id, "iris");
        assert_eq!(config.stages[0].module, "iris_model.iris_predict");
        assert_eq!(config.stages[0].type_name, "IrisModel");
    }

    /// Test per-stage policy override and model options
    #[test]
    fn test_skip_invalid_yaml_loading() {
        let config = load_and_validate_config("configs/skip-invalid.yaml").unwrap();

        assert_eq!(config.on_schema_error, SchemaErrorPolicy::Abort);
        assert_eq!(
            config.stages[0].effective_policy(config.on_schema_error),
            SchemaErrorPolicy::SkipAndContinue
        );
        assert_eq!(
            config.storage.root.as_deref(),
            Some(std::path::Path::new("./data"))
        );
        assert!(config.stages[0].options.contains_key("output_field"));
    }

    /// Test that every validation problem in a file is reported together
    #[test]
    fn test_invalid_stages_yaml_reports_all_problems() {
        let err = load_and_validate_config("configs/invalid-stages.yaml").unwrap_err();

        let problems = match err {
            ConfigError::Validation(problems) => problems,
            other => panic!("Expected validation error, got: {}", other),
        };
        assert_eq!(problems.len(), 4);
        assert!(problems.contains(&ValidationError::DuplicateStageId {
            stage_id: "iris".to_string()
        }));
        assert!(problems.contains(&ValidationError::EmptyStageId { position: 2 }));
        assert!(problems.contains(&ValidationError::MissingType {
            stage_id: "iris".to_string()
        }));
    }

    /// Test building and running a pipeline from a YAML configuration
    #[test]
    fn test_run_pipeline_from_yaml() {
        struct TestCase {
            name: &'static str,
            config_path: &'static str,
            output_field: &'static str,
            expected_state: RunState,
            expected_output_lines: usize,
        }

        let test_cases = vec![
            TestCase {
                name: "abort on schema error",
                config_path: "configs/iris-pipeline.yaml",
                output_field: "species",
                expected_state: RunState::Aborted,
                expected_output_lines: 1,
            },
            TestCase {
                name: "skip on schema error",
                config_path: "configs/skip-invalid.yaml",
                output_field: "label",
                expected_state: RunState::Completed,
                expected_output_lines: 2,
            },
        ];

        for test_case in test_cases {
            let dir = tempfile::tempdir().unwrap();
            fs::write(dir.path().join("iris.jsonl"), IRIS_INPUT).unwrap();

            let config = load_and_validate_config(test_case.config_path).unwrap();
            let backend = LocalFileBackend::with_root(dir.path());
            let mut runner =
                RuntimeBuilder::with_backend(&config, &ModelRegistry::with_builtin_models(), backend)
                    .unwrap_or_else(|e| panic!("Test case '{}': {}", test_case.name, e));

            let report = match runner.run() {
                Ok(report) => report,
                Err(aborted) => aborted.report,
            };
            assert_eq!(report.state, test_case.expected_state, "Test case '{}'", test_case.name);

            let output = fs::read_to_string(dir.path().join("predictions.jsonl")).unwrap();
            let lines: Vec<&str> = output.lines().collect();
            assert_eq!(lines.len(), test_case.expected_output_lines, "Test case '{}'", test_case.name);
            assert!(
                lines[0].contains(test_case.output_field),
                "Test case '{}': '{}' lacks field '{}'",
                test_case.name,
                lines[0],
                test_case.output_field
            );
        }
    }

    /// Test that an unknown model fails the build before the output is created
    #[test]
    fn test_unknown_model_fails_before_opening_streams() {
        let dir = tempfile::tempdir().unwrap();
        fs::write(dir.path().join("iris.jsonl"), IRIS_INPUT).unwrap();

        let mut config = PipelineConfig::default_iris();
        config.input_file = Some("iris.jsonl".to_string());
        config.output_file = Some("predictions.jsonl".to_string());
        config.stages[0].type_name = "SomeClass".to_string();

        let backend = LocalFileBackend::with_root(dir.path());
        let err = match RuntimeBuilder::with_backend(&config, &ModelRegistry::with_builtin_models(), backend) {
            Ok(_) => panic!("Expected construction failure"),
            Err(e) => e,
        };

        assert_eq!(err.kind(), ErrorKind::Construction);
        assert!(err.to_string().contains("SomeClass"));
        assert!(!dir.path().join("predictions.jsonl").exists());
    }

    /// Test that building a runner leaves an existing output untouched until it runs
    #[test]
    fn test_output_is_opened_when_run_starts() {
        let dir = tempfile::tempdir().unwrap();
        fs::write(dir.path().join("iris.jsonl"), IRIS_INPUT).unwrap();
        fs::write(dir.path().join("predictions.jsonl"), "previous run\n").unwrap();

        let mut config = PipelineConfig::default_iris();
        config.input_file = Some("iris.jsonl".to_string());
        config.output_file = Some("predictions.jsonl".to_string());
        config.on_schema_error = SchemaErrorPolicy::SkipAndContinue;

        let backend = LocalFileBackend::with_root(dir.path());
        let mut runner =
            RuntimeBuilder::with_backend(&config, &ModelRegistry::with_builtin_models(), backend).unwrap();

        assert_eq!(
            fs::read_to_string(dir.path().join("predictions.jsonl")).unwrap(),
            "previous run\n"
        );

        let report = runner.run().unwrap();
        assert_eq!(report.records_written, 2);

        let output = fs::read_to_string(dir.path().join("predictions.jsonl")).unwrap();
        assert!(!output.contains("previous run"));
        assert_eq!(output.lines().count(), 2);
    }

    /// Test that an output that cannot be opened aborts the run before reading
    #[test]
    fn test_unopenable_output_aborts_run() {
        let dir = tempfile::tempdir().unwrap();
        fs::write(dir.path().join("iris.jsonl"), IRIS_INPUT).unwrap();
        fs::write(dir.path().join("blocker"), "not a directory").unwrap();

        let mut config = PipelineConfig::default_iris();
        config.input_file = Some("iris.jsonl".to_string());
        config.output_file = Some("blocker/predictions.jsonl".to_string());

        let backend = LocalFileBackend::with_root(dir.path());
        let mut runner =
            RuntimeBuilder::with_backend(&config, &ModelRegistry::with_builtin_models(), backend).unwrap();

        let aborted = runner.run().unwrap_err();
        assert_eq!(aborted.error.kind(), ErrorKind::Io);
        assert_eq!(aborted.report.state, RunState::Aborted);
        assert_eq!(aborted.report.records_read, 0);
    }

    /// Test that a missing input file is an I/O error naming the location
    #[test]
    fn test_missing_input_is_io_error() {
        let dir = tempfile::tempdir().unwrap();
        let mut config = PipelineConfig::default_iris();
        config.input_file = Some("absent.jsonl".to_string());
        config.output_file = Some("out.jsonl".to_string());
        config.storage.root = Some(dir.path().to_path_buf());

        let err = match RuntimeBuilder::from_config(&config, &ModelRegistry::with_builtin_models()) {
            Ok(_) => panic!("Expected I/O failure"),
            Err(e) => e,
        };

        assert_eq!(err.kind(), ErrorKind::Io);
        assert!(err.to_string().contains("absent.jsonl"));
    }
}
