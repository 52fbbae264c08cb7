// Copyright (c) 2025 Steve Wagner (ciroque@live.com)
// SPDX-License-Identifier: MIT

use std::cell::{Cell, RefCell};
use std::rc::Rc;

use serde_json::{json, Value};

use crate::errors::{ModelError, PipelineError, PipelineResult};
use crate::traits::{Model, Record, RecordSink, Stage, StageOutcome};

/// `n` records of the form `{"n": i}`, numbered from 1.
pub fn records(n: u64) -> Vec<Record> {
    (1..=n).map(numbered).collect()
}

pub fn numbered(n: u64) -> Record {
    let mut record = Record::new();
    record.insert("n".to_string(), json!(n));
    record
}

/// Counts records that exist between the source and the sink.
///
/// Tracked sources add one per record produced, tracked stages subtract one
/// per input and add one per output, tracked sinks subtract one per write.
#[derive(Clone, Default)]
pub struct InFlight {
    current: Rc<Cell<u64>>,
    peak: Rc<Cell<u64>>,
}

impl InFlight {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn current(&self) -> u64 {
        self.current.get()
    }

    pub fn peak(&self) -> u64 {
        self.peak.get()
    }

    fn enter(&self) {
        let now = self.current.get() + 1;
        self.current.set(now);
        if now > self.peak.get() {
            self.peak.set(now);
        }
    }

    fn leave(&self) {
        self.current.set(self.current.get().saturating_sub(1));
    }

    /// Lazily yield the given records, tracking each as it is pulled.
    pub fn track_source<I>(&self, records: I) -> impl Iterator<Item = PipelineResult<Record>>
    where
        I: IntoIterator<Item = Record>,
    {
        let tracker = self.clone();
        records.into_iter().map(move |record| {
            tracker.enter();
            Ok(record)
        })
    }
}

/// Model that returns its input unchanged.
pub struct EchoModel {
    name: String,
}

impl EchoModel {
    pub fn new(name: &str) -> Self {
        Self {
            name: name.to_string(),
        }
    }
}

impl Model for EchoModel {
    fn predict(&self, record: &Record) -> Result<Record, ModelError> {
        Ok(record.clone())
    }

    fn display_name(&self) -> &str {
        "Echo"
    }

    fn qualified_name(&self) -> &str {
        &self.name
    }

    fn version(&self) -> &str {
        "1.0.0"
    }
}

/// Model with no qualified name; fails the registry conformance check.
pub struct NamelessModel;

impl Model for NamelessModel {
    fn predict(&self, record: &Record) -> Result<Record, ModelError> {
        Ok(record.clone())
    }

    fn display_name(&self) -> &str {
        "Nameless"
    }

    fn qualified_name(&self) -> &str {
        ""
    }

    fn version(&self) -> &str {
        "1"
    }
}

/// Model whose every prediction fails with a non-schema error.
pub struct DefectModel;

impl Model for DefectModel {
    fn predict(&self, _record: &Record) -> Result<Record, ModelError> {
        Err(anyhow::anyhow!("model crashed").into())
    }

    fn display_name(&self) -> &str {
        "Defect"
    }

    fn qualified_name(&self) -> &str {
        "defect"
    }

    fn version(&self) -> &str {
        "0.0.1"
    }
}

/// Model that rejects records missing `field` and echoes everything else.
pub struct RequiresFieldModel {
    field: &'static str,
}

impl RequiresFieldModel {
    pub fn new(field: &'static str) -> Self {
        Self { field }
    }
}

impl Model for RequiresFieldModel {
    fn predict(&self, record: &Record) -> Result<Record, ModelError> {
        if record.contains_key(self.field) {
            Ok(record.clone())
        } else {
            Err(ModelError::schema(format!("missing field '{}'", self.field)))
        }
    }

    fn display_name(&self) -> &str {
        "Requires Field"
    }

    fn qualified_name(&self) -> &str {
        "requires_field"
    }

    fn version(&self) -> &str {
        "1.0.0"
    }
}

/// Appends its id to the record's `trail` array.
pub struct TaggingStage {
    id: String,
}

impl TaggingStage {
    pub fn new(id: &str) -> Self {
        Self { id: id.to_string() }
    }
}

impl Stage for TaggingStage {
    fn id(&self) -> &str {
        &self.id
    }

    fn process(&self, mut record: Record, _record_index: u64) -> PipelineResult<StageOutcome<'_>> {
        let trail = record
            .entry("trail")
            .or_insert_with(|| Value::Array(Vec::new()));
        if let Value::Array(items) = trail {
            items.push(Value::String(self.id.clone()));
        }
        Ok(StageOutcome::one(record))
    }
}

/// Emits `copies` clones of each input, each tagged with a `copy` index.
/// Outputs are produced lazily.
pub struct ExpandStage {
    id: String,
    copies: u64,
    tracker: Option<InFlight>,
}

impl ExpandStage {
    pub fn new(id: &str, copies: u64) -> Self {
        Self {
            id: id.to_string(),
            copies,
            tracker: None,
        }
    }

    pub fn tracked(mut self, tracker: &InFlight) -> Self {
        self.tracker = Some(tracker.clone());
        self
    }
}

impl Stage for ExpandStage {
    fn id(&self) -> &str {
        &self.id
    }

    fn process(&self, record: Record, _record_index: u64) -> PipelineResult<StageOutcome<'_>> {
        if let Some(tracker) = &self.tracker {
            tracker.leave();
        }
        let tracker = self.tracker.clone();
        let outputs = (0..self.copies).map(move |copy| {
            if let Some(tracker) = &tracker {
                tracker.enter();
            }
            let mut output = record.clone();
            output.insert("copy".to_string(), json!(copy));
            Ok(output)
        });
        Ok(StageOutcome::Emit(Box::new(outputs)))
    }
}

/// Keeps records whose `n` is odd and emits nothing for the rest.
pub struct FilterStage {
    id: String,
}

impl FilterStage {
    pub fn keep_odd(id: &str) -> Self {
        Self { id: id.to_string() }
    }
}

impl Stage for FilterStage {
    fn id(&self) -> &str {
        &self.id
    }

    fn process(&self, record: Record, _record_index: u64) -> PipelineResult<StageOutcome<'_>> {
        match record.get("n").and_then(Value::as_u64) {
            Some(n) if n % 2 == 1 => Ok(StageOutcome::one(record)),
            _ => Ok(StageOutcome::none()),
        }
    }
}

#[derive(Default)]
struct SinkState {
    records: Vec<Record>,
    closed: bool,
    fail_after: Option<usize>,
}

/// In-memory sink whose clones share the collected records.
#[derive(Clone, Default)]
pub struct MemorySink {
    state: Rc<RefCell<SinkState>>,
    tracker: Option<InFlight>,
    keep_records: bool,
}

impl MemorySink {
    pub fn new() -> Self {
        Self {
            keep_records: true,
            ..Self::default()
        }
    }

    /// Sink that rejects every write after the first `writes` succeed.
    pub fn failing_after(writes: usize) -> Self {
        let sink = Self::new();
        sink.state.borrow_mut().fail_after = Some(writes);
        sink
    }

    /// Sink that only counts, for runs too large to collect.
    pub fn counting() -> Self {
        Self::default()
    }

    pub fn tracked(mut self, tracker: &InFlight) -> Self {
        self.tracker = Some(tracker.clone());
        self
    }

    pub fn records(&self) -> Vec<Record> {
        self.state.borrow().records.clone()
    }

    pub fn is_closed(&self) -> bool {
        self.state.borrow().closed
    }
}

impl RecordSink for MemorySink {
    fn write(&mut self, record: &Record) -> PipelineResult<()> {
        let mut state = self.state.borrow_mut();
        if state.closed {
            return Err(PipelineError::InvalidState {
                operation: "write",
                state: "closed".to_string(),
            });
        }
        if let Some(limit) = state.fail_after {
            if limit == 0 {
                return Err(PipelineError::io(
                    "memory sink",
                    std::io::Error::new(std::io::ErrorKind::Other, "sink is full"),
                ));
            }
            state.fail_after = Some(limit - 1);
        }
        if let Some(tracker) = &self.tracker {
            tracker.leave();
        }
        if self.keep_records {
            state.records.push(record.clone());
        }
        Ok(())
    }

    fn close(&mut self) -> PipelineResult<()> {
        self.state.borrow_mut().closed = true;
        Ok(())
    }
}
