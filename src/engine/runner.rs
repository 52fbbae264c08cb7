// Copyright (c) 2025 Steve Wagner (ciroque@live.com)
// SPDX-License-Identifier: MIT

//! Single-chain pipeline runner.
//!
//! The runner pulls one record at a time from the source and pushes it
//! through every stage before pulling the next one. When a stage emits more
//! than one record, each output travels the rest of the chain and reaches
//! the sink before the stage is asked for its next output (depth-first).
//! At most one source record, plus the outputs currently travelling the
//! chain for it, is resident at any time.
//!
//! ```text
//! Idle --run()--> Running --source exhausted--> Completed
//!                    |
//!                    +--unrecovered error-----> Aborted
//! ```
//!
//! On abort the sink is still closed (flushed) and everything written before
//! the failure stays written.

use std::fmt;
use std::time::{Duration, Instant};

use thiserror::Error;

use crate::errors::{PipelineError, PipelineResult};
use crate::observability::messages::{engine::*, stage::RecordSkipped, stream::SinkReleaseFailed};
use crate::observability::messages::StructuredLog;
use crate::traits::{Record, RecordSink, RecordSource, Stage, StageOutcome};

/// Lifecycle of a [`PipelineRunner`].
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum RunState {
    #[default]
    Idle,
    Running,
    Completed,
    Aborted,
}

impl fmt::Display for RunState {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            RunState::Idle => "idle",
            RunState::Running => "running",
            RunState::Completed => "completed",
            RunState::Aborted => "aborted",
        };
        write!(f, "{}", name)
    }
}

/// Counters for a single run.
///
/// `records_skipped` counts inputs dropped by a stage under
/// `SchemaErrorPolicy::SkipAndContinue`. Records a stage filters out by
/// emitting nothing are not skips.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct RunReport {
    pub records_read: u64,
    pub records_written: u64,
    pub records_skipped: u64,
    pub state: RunState,
    pub duration: Duration,
}

/// Error returned by [`PipelineRunner::run`], carrying the counts reached
/// before the failure.
#[derive(Error, Debug)]
#[error(
    "Pipeline aborted after reading {} and writing {} records: {error}",
    .report.records_read,
    .report.records_written
)]
pub struct AbortedRun {
    pub report: RunReport,
    #[source]
    pub error: PipelineError,
}

/// Owns one source, an ordered chain of stages, and one sink.
pub struct PipelineRunner {
    source: Box<dyn RecordSource>,
    stages: Vec<Box<dyn Stage>>,
    sink: Box<dyn RecordSink>,
    state: RunState,
    report: RunReport,
}

impl PipelineRunner {
    pub fn new(
        source: Box<dyn RecordSource>,
        stages: Vec<Box<dyn Stage>>,
        sink: Box<dyn RecordSink>,
    ) -> Self {
        Self {
            source,
            stages,
            sink,
            state: RunState::Idle,
            report: RunReport::default(),
        }
    }

    pub fn builder() -> PipelineBuilder {
        PipelineBuilder::default()
    }

    pub fn state(&self) -> RunState {
        self.state
    }

    pub fn report(&self) -> &RunReport {
        &self.report
    }

    pub fn stage_ids(&self) -> Vec<&str> {
        self.stages.iter().map(|s| s.id()).collect()
    }

    /// Drive the pipeline to completion.
    ///
    /// A runner runs once. Calling `run` again returns an `InvalidState`
    /// error and leaves the runner untouched.
    pub fn run(&mut self) -> Result<RunReport, AbortedRun> {
        if self.state != RunState::Idle {
            return Err(AbortedRun {
                report: self.report.clone(),
                error: PipelineError::InvalidState {
                    operation: "run the pipeline",
                    state: self.state.to_string(),
                },
            });
        }

        self.state = RunState::Running;
        let started = Instant::now();

        let stage_ids = self.stage_ids().join(" -> ");
        let start_msg = RunStarted {
            stage_count: self.stages.len(),
            stage_ids: &stage_ids,
        };
        let span = start_msg.span("pipeline_run");
        let _guard = span.enter();
        start_msg.log();

        let outcome = match self.sink.open() {
            Ok(()) => self.drive(),
            Err(e) => Err(e),
        };
        self.release_source();

        let outcome = match outcome {
            Ok(()) => self.sink.close(),
            Err(error) => {
                if let Err(release_error) = self.sink.close() {
                    SinkReleaseFailed {
                        error: &release_error,
                    }
                    .log();
                }
                Err(error)
            }
        };
        self.report.duration = started.elapsed();

        match outcome {
            Ok(()) => {
                self.finish(RunState::Completed);
                RunCompleted {
                    records_read: self.report.records_read,
                    records_written: self.report.records_written,
                    records_skipped: self.report.records_skipped,
                    duration: self.report.duration,
                }
                .log();
                Ok(self.report.clone())
            }
            Err(error) => {
                self.finish(RunState::Aborted);
                RunAborted {
                    records_read: self.report.records_read,
                    records_written: self.report.records_written,
                    error: &error,
                }
                .log();
                Err(AbortedRun {
                    report: self.report.clone(),
                    error,
                })
            }
        }
    }

    fn drive(&mut self) -> PipelineResult<()> {
        while let Some(next) = self.source.next() {
            let record = next?;
            self.report.records_read += 1;
            let record_index = self.report.records_read;
            forward(&self.stages, self.sink.as_mut(), &mut self.report, record, record_index)?;
        }
        Ok(())
    }

    fn release_source(&mut self) {
        self.source = Box::new(std::iter::empty::<PipelineResult<Record>>());
    }

    fn finish(&mut self, state: RunState) {
        self.state = state;
        self.report.state = state;
    }
}

/// Push `record` through `stages` and into `sink`, depth-first.
fn forward(
    stages: &[Box<dyn Stage>],
    sink: &mut dyn RecordSink,
    report: &mut RunReport,
    record: Record,
    record_index: u64,
) -> PipelineResult<()> {
    let (stage, rest) = match stages.split_first() {
        Some(split) => split,
        None => {
            sink.write(&record)?;
            report.records_written += 1;
            return Ok(());
        }
    };

    match stage.process(record, record_index)? {
        StageOutcome::Emit(outputs) => {
            for output in outputs {
                forward(rest, sink, report, output?, record_index)?;
            }
        }
        StageOutcome::Skip { reason } => {
            report.records_skipped += 1;
            RecordSkipped {
                stage_id: stage.id(),
                record_index,
                reason: &reason,
            }
            .log();
        }
    }
    Ok(())
}

/// Assembles a [`PipelineRunner`], enforcing exactly one source and one sink.
#[derive(Default)]
pub struct PipelineBuilder {
    source: Option<Box<dyn RecordSource>>,
    stages: Vec<Box<dyn Stage>>,
    sink: Option<Box<dyn RecordSink>>,
}

impl PipelineBuilder {
    pub fn source<S: RecordSource + 'static>(mut self, source: S) -> Self {
        self.source = Some(Box::new(source));
        self
    }

    pub fn stage<S: Stage + 'static>(mut self, stage: S) -> Self {
        self.stages.push(Box::new(stage));
        self
    }

    pub fn boxed_stage(mut self, stage: Box<dyn Stage>) -> Self {
        self.stages.push(stage);
        self
    }

    pub fn sink<S: RecordSink + 'static>(mut self, sink: S) -> Self {
        self.sink = Some(Box::new(sink));
        self
    }

    pub fn build(self) -> PipelineResult<PipelineRunner> {
        let source = self.source.ok_or_else(|| PipelineError::Construction {
            stage_id: "source".to_string(),
            message: "pipeline has no source".to_string(),
        })?;
        let sink = self.sink.ok_or_else(|| PipelineError::Construction {
            stage_id: "sink".to_string(),
            message: "pipeline has no sink".to_string(),
        })?;
        Ok(PipelineRunner::new(source, self.stages, sink))
    }
}
