// Copyright (c) 2025 Steve Wagner (ciroque@live.com)
// SPDX-License-Identifier: MIT

/// Stage id of the built-in pipeline used when no configuration file is given
pub const DEFAULT_STAGE_ID: &str = "iris";
