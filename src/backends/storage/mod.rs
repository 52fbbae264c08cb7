// Copyright (c) 2025 Steve Wagner (ciroque@live.com)
// SPDX-License-Identifier: MIT

use std::io::{BufRead, Write};

use crate::errors::PipelineResult;

pub mod local;

pub use local::LocalFileBackend;

/// Location that maps to the process's standard input or output.
pub const STDIO_LOCATION: &str = "-";

/// A byte-stream provider that sources and sinks read lines from and write
/// lines to. Where the bytes live is the backend's concern.
pub trait StreamBackend {
    fn open_read(&self, location: &str) -> PipelineResult<Box<dyn BufRead>>;

    fn open_write(&self, location: &str) -> PipelineResult<Box<dyn Write>>;

    /// Human readable form of `location` for logs.
    fn describe(&self, location: &str) -> String {
        location.to_string()
    }
}
