// Copyright (c) 2025 Steve Wagner (ciroque@live.com)
// SPDX-License-Identifier: MIT

pub mod io;
pub mod model;
pub mod stage;

pub use io::{RecordSink, RecordSource};
pub use model::Model;
pub use stage::{RecordStream, Stage, StageOutcome};

/// One unit of pipeline data: an ordered JSON object.
pub type Record = serde_json::Map<String, serde_json::Value>;
