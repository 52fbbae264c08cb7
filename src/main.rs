// Copyright (c) 2025 Steve Wagner (ciroque@live.com)
// SPDX-License-Identifier: MIT

use std::path::PathBuf;
use std::process::ExitCode;

use anyhow::Context;
use clap::{Parser, ValueEnum};
use model_etl::config::{load_and_validate_config, ModelRegistry, PipelineConfig, RuntimeBuilder};
use model_etl::engine::RunReport;
use model_etl::errors::SchemaErrorPolicy;
use tracing_subscriber::EnvFilter;

const EXIT_ABORTED: u8 = 1;
const EXIT_SETUP_FAILED: u8 = 2;

#[derive(Debug, Parser)]
#[command(name = "model-etl")]
#[command(about = "Score line-delimited JSON records with a chain of prediction models")]
struct Cli {
    /// Pipeline configuration file. Without one, a single iris stage is used.
    #[arg(long)]
    config: Option<PathBuf>,

    /// Input location, `-` for stdin. Overrides the configuration.
    #[arg(short = 'i', long)]
    input_file: Option<String>,

    /// Output location, `-` for stdout. Overrides the configuration.
    #[arg(short = 'o', long)]
    output_file: Option<String>,

    /// Pipeline-wide policy for records a model rejects.
    #[arg(long, value_enum)]
    on_schema_error: Option<OnSchemaError>,

    /// Print the registered models and exit.
    #[arg(long)]
    list_models: bool,
}

#[derive(Debug, Clone, Copy, ValueEnum)]
enum OnSchemaError {
    Abort,
    SkipAndContinue,
}

impl From<OnSchemaError> for SchemaErrorPolicy {
    fn from(value: OnSchemaError) -> Self {
        match value {
            OnSchemaError::Abort => SchemaErrorPolicy::Abort,
            OnSchemaError::SkipAndContinue => SchemaErrorPolicy::SkipAndContinue,
        }
    }
}

fn main() -> ExitCode {
    // Logs go to stderr; stdout may be the sink.
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"));
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .with_target(false)
        .init();

    let cli = Cli::parse();
    let registry = ModelRegistry::with_builtin_models();

    if cli.list_models {
        for key in registry.available() {
            println!("{}", key);
        }
        return ExitCode::SUCCESS;
    }

    let config = match resolve_config(&cli) {
        Ok(config) => config,
        Err(e) => {
            eprintln!("❌ {:#}", e);
            return ExitCode::from(EXIT_SETUP_FAILED);
        }
    };

    let mut runner = match RuntimeBuilder::from_config(&config, &registry) {
        Ok(runner) => runner,
        Err(e) => {
            eprintln!("❌ {}", e);
            return ExitCode::from(EXIT_SETUP_FAILED);
        }
    };

    match runner.run() {
        Ok(report) => {
            print_summary(&report);
            ExitCode::SUCCESS
        }
        Err(aborted) => {
            eprintln!("❌ {}", aborted.error);
            print_summary(&aborted.report);
            ExitCode::from(EXIT_ABORTED)
        }
    }
}

/// Load the configuration file, if any, and apply command-line overrides.
fn resolve_config(cli: &Cli) -> anyhow::Result<PipelineConfig> {
    let mut config = match &cli.config {
        Some(path) => load_and_validate_config(path)
            .with_context(|| format!("Cannot use configuration '{}'", path.display()))?,
        None => PipelineConfig::default_iris(),
    };

    if let Some(input) = &cli.input_file {
        config.input_file = Some(input.clone());
    }
    if let Some(output) = &cli.output_file {
        config.output_file = Some(output.clone());
    }
    if let Some(policy) = cli.on_schema_error {
        config.on_schema_error = policy.into();
    }

    Ok(config)
}

fn print_summary(report: &RunReport) {
    eprintln!(
        "Pipeline {}: read={} written={} skipped={} ({:?})",
        report.state,
        report.records_read,
        report.records_written,
        report.records_skipped,
        report.duration
    );
}
