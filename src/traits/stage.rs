// Copyright (c) 2025 Steve Wagner (ciroque@live.com)
// SPDX-License-Identifier: MIT

use crate::errors::PipelineResult;
use crate::traits::Record;

/// Lazy, finite sequence of records produced by a stage for one input.
pub type RecordStream<'a> = Box<dyn Iterator<Item = PipelineResult<Record>> + 'a>;

/// What a stage produced for a single input record.
pub enum StageOutcome<'a> {
    /// Zero or more records to forward downstream, pulled one at a time.
    Emit(RecordStream<'a>),
    /// The input was dropped under a recoverable policy. Counted by the runner.
    Skip { reason: String },
}

impl<'a> StageOutcome<'a> {
    pub fn one(record: Record) -> Self {
        StageOutcome::Emit(Box::new(std::iter::once(Ok(record))))
    }

    pub fn none() -> Self {
        StageOutcome::Emit(Box::new(std::iter::empty()))
    }

    pub fn many<I>(records: I) -> Self
    where
        I: IntoIterator<Item = Record>,
        I::IntoIter: 'a,
    {
        StageOutcome::Emit(Box::new(records.into_iter().map(Ok)))
    }
}

/// A pipeline unit that consumes one record and produces a finite sequence.
pub trait Stage {
    /// Identifier used in logs and errors.
    fn id(&self) -> &str;

    /// `record_index` is the 1-based position of the source record that
    /// this input descends from.
    fn process(&self, record: Record, record_index: u64) -> PipelineResult<StageOutcome<'_>>;
}
