// Copyright (c) 2025 Steve Wagner (ciroque@live.com)
// SPDX-License-Identifier: MIT

pub mod backends;   // models and stream backends
pub mod config;     // config + model registry
pub mod engine;     // source, sink, stages, runner
pub mod errors;     // error handling
pub mod observability;
pub mod traits;     // unified abstractions
pub mod utils;
