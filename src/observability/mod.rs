// Copyright (c) 2025 Steve Wagner (ciroque@live.com)
// SPDX-License-Identifier: MIT

//! Observability module for structured logging and tracing.
//!
//! Diagnostic and operational logging throughout the crate goes through
//! message types that implement `Display` and
//! [`StructuredLog`](messages::StructuredLog). This keeps log wording in one
//! place and attaches the same fields to every event of a kind.
//!
//! Messages are organized by subsystem:
//! * `messages::engine` - Pipeline run lifecycle
//! * `messages::stage` - Stage construction and record skips
//! * `messages::stream` - Source and sink lifecycle
//! * `messages::validation` - Configuration loading and validation
//!
//! The library only emits events; installing a subscriber is left to the
//! binary (see `src/main.rs`).

pub mod messages;
