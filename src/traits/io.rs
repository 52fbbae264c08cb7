// Copyright (c) 2025 Steve Wagner (ciroque@live.com)
// SPDX-License-Identifier: MIT

use crate::errors::PipelineResult;
use crate::traits::Record;

/// Anything that yields records one at a time.
///
/// A source signals a fatal problem by yielding `Err`; the runner stops
/// pulling at that point.
pub trait RecordSource: Iterator<Item = PipelineResult<Record>> {}

impl<T> RecordSource for T where T: Iterator<Item = PipelineResult<Record>> {}

/// Destination for the records that leave the last stage.
pub trait RecordSink {
    /// Acquire the underlying stream. Called once, when a run starts.
    fn open(&mut self) -> PipelineResult<()> {
        Ok(())
    }

    fn write(&mut self, record: &Record) -> PipelineResult<()>;

    /// Flush and release the underlying stream. Must be safe to call twice.
    fn close(&mut self) -> PipelineResult<()>;
}

impl<S: RecordSink + ?Sized> RecordSink for Box<S> {
    fn open(&mut self) -> PipelineResult<()> {
        (**self).open()
    }

    fn write(&mut self, record: &Record) -> PipelineResult<()> {
        (**self).write(record)
    }

    fn close(&mut self) -> PipelineResult<()> {
        (**self).close()
    }
}
