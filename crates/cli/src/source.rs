// SPDX-License-Identifier: MIT
// Copyright (c) 2026 Alfred Jean LLC

//! Loading raw source text for the architecture fallback scan.

use std::path::Path;

use ignore::WalkBuilder;

use crate::error::{Error, Result};
use crate::paths::to_posix;

/// A source file's root-relative path and text.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SourceFile {
    pub path: String,
    pub contents: String,
}

impl SourceFile {
    pub fn new(path: impl Into<String>, contents: impl Into<String>) -> Self {
        Self {
            path: path.into(),
            contents: contents.into(),
        }
    }
}

/// Read every `.rs` file under `root/dir`, sorted by path.
///
/// Ignore files are not consulted: a configured-out file is exactly what the
/// scan is looking for. A missing directory yields no files.
pub fn load_sources(root: &Path, dir: &str) -> Result<Vec<SourceFile>> {
    let base = root.join(dir);
    if !base.is_dir() {
        tracing::debug!("{} does not exist, skipping scan", base.display());
        return Ok(Vec::new());
    }

    let walker = WalkBuilder::new(&base)
        .standard_filters(false)
        .sort_by_file_name(|a, b| a.cmp(b))
        .build();

    let mut files = Vec::new();
    for entry in walker {
        let entry = entry.map_err(|e| {
            let message = e.to_string();
            Error::Io {
                path: base.clone(),
                source: e
                    .into_io_error()
                    .unwrap_or_else(|| std::io::Error::other(message)),
            }
        })?;

        let path = entry.path();
        let is_rust = entry.file_type().is_some_and(|t| t.is_file())
            && path.extension().is_some_and(|ext| ext == "rs");
        if !is_rust {
            continue;
        }

        let contents = std::fs::read_to_string(path).map_err(|e| Error::Io {
            path: path.to_path_buf(),
            source: e,
        })?;
        let relative = path.strip_prefix(root).unwrap_or(path);
        files.push(SourceFile::new(to_posix(relative), contents));
    }

    files.sort_by(|a, b| a.path.cmp(&b.path));
    Ok(files)
}

#[cfg(test)]
#[path = "source_tests.rs"]
mod tests;
