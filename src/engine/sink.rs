// Copyright (c) 2025 Steve Wagner (ciroque@live.com)
// SPDX-License-Identifier: MIT

//! Line-delimited JSON record sink.

use std::io::{BufWriter, Write};

use crate::backends::storage::StreamBackend;
use crate::errors::{PipelineError, PipelineResult};
use crate::observability::messages::{stream::*, StructuredLog};
use crate::traits::{Record, RecordSink};

/// Writes each record as one compact JSON line.
///
/// Output is buffered. The buffer is flushed by [`RecordSink::close`] and,
/// if the sink is dropped without being closed, on drop.
pub struct LdjsonSink<W: Write> {
    writer: Option<BufWriter<W>>,
    location: String,
    written: u64,
}

impl LdjsonSink<Box<dyn Write>> {
    pub fn create(backend: &dyn StreamBackend, location: &str) -> PipelineResult<Self> {
        let writer = backend.open_write(location)?;
        let described = backend.describe(location);
        StreamOpened {
            role: "sink",
            location: &described,
        }
        .log();
        Ok(Self::with_location(writer, described))
    }
}

impl<W: Write> LdjsonSink<W> {
    pub fn from_writer(writer: W) -> Self {
        Self::with_location(writer, "<writer>".to_string())
    }

    fn with_location(writer: W, location: String) -> Self {
        Self {
            writer: Some(BufWriter::new(writer)),
            location,
            written: 0,
        }
    }

    pub fn written(&self) -> u64 {
        self.written
    }

    pub fn is_closed(&self) -> bool {
        self.writer.is_none()
    }

    /// Close the sink and hand back the underlying writer.
    pub fn into_inner(mut self) -> PipelineResult<W> {
        let writer = self.writer.take().ok_or_else(|| PipelineError::InvalidState {
            operation: "take the writer of a sink",
            state: "closed".to_string(),
        })?;
        writer
            .into_inner()
            .map_err(|e| PipelineError::io(self.location.clone(), e.into_error()))
    }
}

impl<W: Write> RecordSink for LdjsonSink<W> {
    fn write(&mut self, record: &Record) -> PipelineResult<()> {
        let record_index = self.written + 1;
        let writer = self.writer.as_mut().ok_or(PipelineError::InvalidState {
            operation: "write to a sink",
            state: "closed".to_string(),
        })?;

        serde_json::to_writer(&mut *writer, record).map_err(|source| {
            if source.is_io() {
                PipelineError::io(self.location.clone(), source.into())
            } else {
                PipelineError::Serialization {
                    record_index,
                    source,
                }
            }
        })?;
        writer
            .write_all(b"\n")
            .map_err(|e| PipelineError::io(self.location.clone(), e))?;

        self.written = record_index;
        Ok(())
    }

    fn close(&mut self) -> PipelineResult<()> {
        if let Some(mut writer) = self.writer.take() {
            writer
                .flush()
                .map_err(|e| PipelineError::io(self.location.clone(), e))?;
            SinkClosed {
                records_written: self.written,
            }
            .log();
        }
        Ok(())
    }
}

impl<W: Write> Drop for LdjsonSink<W> {
    fn drop(&mut self) {
        if let Some(writer) = self.writer.as_mut() {
            if let Err(e) = writer.flush() {
                SinkReleaseFailed { error: &e }.log();
            }
        }
    }
}

/// Opens the real sink on demand.
pub type SinkOpener = Box<dyn FnOnce() -> PipelineResult<Box<dyn RecordSink>>>;

/// A sink whose stream is acquired in [`RecordSink::open`] rather than at
/// construction, so building a pipeline never creates or truncates output.
///
/// If the run ends before `open` is called, `close` releases the opener
/// without touching the destination.
pub struct DeferredSink {
    opener: Option<SinkOpener>,
    inner: Option<Box<dyn RecordSink>>,
}

impl DeferredSink {
    pub fn new<F>(opener: F) -> Self
    where
        F: FnOnce() -> PipelineResult<Box<dyn RecordSink>> + 'static,
    {
        Self {
            opener: Some(Box::new(opener)),
            inner: None,
        }
    }

    pub fn is_open(&self) -> bool {
        self.inner.is_some()
    }
}

impl RecordSink for DeferredSink {
    fn open(&mut self) -> PipelineResult<()> {
        if let Some(opener) = self.opener.take() {
            self.inner = Some(opener()?);
        }
        Ok(())
    }

    fn write(&mut self, record: &Record) -> PipelineResult<()> {
        match self.inner.as_mut() {
            Some(sink) => sink.write(record),
            None => Err(PipelineError::InvalidState {
                operation: "write to a sink",
                state: "not open".to_string(),
            }),
        }
    }

    fn close(&mut self) -> PipelineResult<()> {
        self.opener = None;
        match self.inner.as_mut() {
            Some(sink) => sink.close(),
            None => Ok(()),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::engine::LdjsonSource;
    use crate::errors::ErrorKind;
    use crate::utils::json::into_record;
    use serde_json::json;
    use std::io::Cursor;

    fn record(value: serde_json::Value) -> Record {
        into_record(value).unwrap()
    }

    #[test]
    fn test_writes_one_line_per_record() {
        let mut sink = LdjsonSink::from_writer(Vec::new());
        sink.write(&record(json!({"a": 1, "b": "x"}))).unwrap();
        sink.write(&record(json!({"c": [1, 2]}))).unwrap();
        assert_eq!(sink.written(), 2);

        let bytes = sink.into_inner().unwrap();
        assert_eq!(
            String::from_utf8(bytes).unwrap(),
            "{\"a\":1,\"b\":\"x\"}\n{\"c\":[1,2]}\n"
        );
    }

    #[test]
    fn test_round_trip_through_source() {
        let originals = vec![
            record(json!({"species": "setosa", "score": 0.97})),
            record(json!({"nested": {"list": [1, "two", null, true]}, "empty": {}})),
            record(json!({"unicode": "caf\u{e9} \u{1f33c}", "escaped": "line\nbreak"})),
        ];

        let mut sink = LdjsonSink::from_writer(Vec::new());
        for r in &originals {
            sink.write(r).unwrap();
        }
        let bytes = sink.into_inner().unwrap();

        let read_back: Vec<Record> = LdjsonSource::from_reader(Cursor::new(bytes))
            .collect::<PipelineResult<_>>()
            .unwrap();
        assert_eq!(read_back, originals);
    }

    #[test]
    fn test_write_after_close_is_invalid_state() {
        let mut sink = LdjsonSink::from_writer(Vec::new());
        sink.close().unwrap();
        assert!(sink.is_closed());

        let err = sink.write(&record(json!({"a": 1}))).unwrap_err();
        assert_eq!(err.kind(), ErrorKind::InvalidState);

        // Closing twice is harmless
        sink.close().unwrap();
    }

    #[test]
    fn test_deferred_sink_opens_only_when_asked() {
        use std::cell::Cell;
        use std::rc::Rc;

        let opened = Rc::new(Cell::new(false));
        let flag = opened.clone();
        let mut sink = DeferredSink::new(move || {
            flag.set(true);
            Ok(Box::new(LdjsonSink::from_writer(Vec::new())) as Box<dyn RecordSink>)
        });

        assert!(!opened.get());
        let err = sink.write(&record(json!({"a": 1}))).unwrap_err();
        assert_eq!(err.kind(), ErrorKind::InvalidState);

        sink.open().unwrap();
        assert!(opened.get());
        assert!(sink.is_open());
        sink.write(&record(json!({"a": 1}))).unwrap();
        sink.close().unwrap();
    }

    #[test]
    fn test_deferred_sink_closed_unopened_never_opens() {
        let mut sink = DeferredSink::new(|| panic!("opener must not run"));
        sink.close().unwrap();
        sink.open().unwrap();
        assert!(!sink.is_open());
    }

    #[test]
    fn test_drop_flushes_buffered_output() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("out.jsonl");

        {
            let file = std::fs::File::create(&path).unwrap();
            let mut sink = LdjsonSink::from_writer(file);
            sink.write(&record(json!({"kept": true}))).unwrap();
            // dropped without close
        }

        assert_eq!(std::fs::read_to_string(&path).unwrap(), "{\"kept\":true}\n");
    }
}
