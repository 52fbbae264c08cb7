// Copyright (c) 2025 Steve Wagner (ciroque@live.com)
// SPDX-License-Identifier: MIT

pub mod iris;

pub use iris::{IrisModel, IRIS_MODULE, IRIS_TYPE};
