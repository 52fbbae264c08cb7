// Copyright (c) 2025 Steve Wagner (ciroque@live.com)
// SPDX-License-Identifier: MIT

use std::fs::{self, File};
use std::io::{self, BufRead, BufReader, Write};
use std::path::{Path, PathBuf};

use super::{StreamBackend, STDIO_LOCATION};
use crate::errors::{PipelineError, PipelineResult};

/// Local filesystem backend.
///
/// Relative locations are resolved against `root` when one is configured.
/// The location `-` maps to stdin for reading and stdout for writing.
#[derive(Debug, Clone, Default)]
pub struct LocalFileBackend {
    root: Option<PathBuf>,
}

impl LocalFileBackend {
    pub fn new() -> Self {
        Self { root: None }
    }

    pub fn with_root<P: Into<PathBuf>>(root: P) -> Self {
        Self {
            root: Some(root.into()),
        }
    }

    pub fn resolve(&self, location: &str) -> PathBuf {
        let path = Path::new(location);
        match &self.root {
            Some(root) if path.is_relative() => root.join(path),
            _ => path.to_path_buf(),
        }
    }
}

impl StreamBackend for LocalFileBackend {
    fn open_read(&self, location: &str) -> PipelineResult<Box<dyn BufRead>> {
        if location == STDIO_LOCATION {
            return Ok(Box::new(BufReader::new(io::stdin())));
        }

        let path = self.resolve(location);
        let file = File::open(&path)
            .map_err(|e| PipelineError::io(format!("input '{}'", path.display()), e))?;
        Ok(Box::new(BufReader::new(file)))
    }

    fn open_write(&self, location: &str) -> PipelineResult<Box<dyn Write>> {
        if location == STDIO_LOCATION {
            return Ok(Box::new(io::stdout()));
        }

        let path = self.resolve(location);
        if let Some(parent) = path.parent().filter(|p| !p.as_os_str().is_empty()) {
            fs::create_dir_all(parent)
                .map_err(|e| PipelineError::io(format!("output directory '{}'", parent.display()), e))?;
        }
        let file = File::create(&path)
            .map_err(|e| PipelineError::io(format!("output '{}'", path.display()), e))?;
        Ok(Box::new(file))
    }

    fn describe(&self, location: &str) -> String {
        if location == STDIO_LOCATION {
            return "<stdio>".to_string();
        }
        self.resolve(location).display().to_string()
    }
}
