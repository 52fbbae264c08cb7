// Copyright (c) 2025 Steve Wagner (ciroque@live.com)
// SPDX-License-Identifier: MIT

//! Line-delimited JSON record source.

use std::io::BufRead;

use serde_json::Value;

use crate::backends::storage::StreamBackend;
use crate::errors::{excerpt, PipelineError, PipelineResult};
use crate::observability::messages::{stream::StreamOpened, StructuredLog};
use crate::traits::Record;
use crate::utils::json::json_type_name;

/// Reads one JSON object per non-empty line.
///
/// Lines are read as raw bytes, so a line that is not valid UTF-8 is a
/// format error for that line rather than a stream failure.
///
/// The source is lazy: a line is read only when the next record is pulled,
/// and the line buffer is reused between records. Once it yields an error
/// or reaches end of input it is exhausted for good; reading the same input
/// again requires opening a new source.
pub struct LdjsonSource<R> {
    reader: R,
    location: String,
    line_buf: Vec<u8>,
    line_number: usize,
    finished: bool,
}

impl LdjsonSource<Box<dyn BufRead>> {
    pub fn open(backend: &dyn StreamBackend, location: &str) -> PipelineResult<Self> {
        let reader = backend.open_read(location)?;
        let described = backend.describe(location);
        StreamOpened {
            role: "source",
            location: &described,
        }
        .log();
        Ok(Self::with_location(reader, described))
    }
}

impl<R: BufRead> LdjsonSource<R> {
    pub fn from_reader(reader: R) -> Self {
        Self::with_location(reader, "<reader>".to_string())
    }

    fn with_location(reader: R, location: String) -> Self {
        Self {
            reader,
            location,
            line_buf: Vec::new(),
            line_number: 0,
            finished: false,
        }
    }

    /// Number of physical lines consumed so far, blank lines included.
    pub fn line_number(&self) -> usize {
        self.line_number
    }

    fn parse_line(line: &[u8], line_number: usize) -> PipelineResult<Record> {
        match serde_json::from_slice::<Value>(line) {
            Ok(Value::Object(record)) => Ok(record),
            Ok(other) => Err(PipelineError::NotAnObject {
                line: line_number,
                found: json_type_name(&other),
                excerpt: excerpt(&String::from_utf8_lossy(line)),
            }),
            Err(source) => Err(PipelineError::MalformedLine {
                line: line_number,
                excerpt: excerpt(&String::from_utf8_lossy(line)),
                source,
            }),
        }
    }
}

/// Strip leading and trailing ASCII whitespace, `\r` included.
fn trim_line(line: &[u8]) -> &[u8] {
    let start = line
        .iter()
        .position(|b| !b.is_ascii_whitespace())
        .unwrap_or(line.len());
    let end = line
        .iter()
        .rposition(|b| !b.is_ascii_whitespace())
        .map_or(start, |pos| pos + 1);
    &line[start..end]
}

impl<R: BufRead> Iterator for LdjsonSource<R> {
    type Item = PipelineResult<Record>;

    fn next(&mut self) -> Option<Self::Item> {
        if self.finished {
            return None;
        }

        loop {
            self.line_buf.clear();
            match self.reader.read_until(b'\n', &mut self.line_buf) {
                Ok(0) => {
                    self.finished = true;
                    return None;
                }
                Ok(_) => {
                    self.line_number += 1;
                    let line = trim_line(&self.line_buf);
                    if line.is_empty() {
                        continue;
                    }
                    let parsed = Self::parse_line(line, self.line_number);
                    if parsed.is_err() {
                        self.finished = true;
                    }
                    return Some(parsed);
                }
                Err(e) => {
                    self.finished = true;
                    let context = format!("{} (line {})", self.location, self.line_number + 1);
                    return Some(Err(PipelineError::io(context, e)));
                }
            }
        }
    }
}
