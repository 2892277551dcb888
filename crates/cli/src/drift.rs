// SPDX-License-Identifier: MIT
// Copyright (c) 2026 Alfred Jean LLC

//! Detecting stale checked-in artifacts.

use std::io::{self, Write};

use similar::TextDiff;
use termcolor::WriteColor;

use crate::color::scheme;

/// A checked-in artifact differs from freshly generated output.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("generated output differs from checked-in file")]
pub struct Drift {
    diff: String,
}

/// Compare `actual` (checked in) against `expected` (freshly generated).
pub fn check(actual: &str, expected: &str) -> Result<(), Drift> {
    if actual == expected {
        return Ok(());
    }

    let diff = TextDiff::from_lines(actual, expected)
        .unified_diff()
        .header("actual", "expected")
        .to_string();
    Err(Drift { diff })
}

impl Drift {
    /// Unified diff from `actual` to `expected`.
    pub fn diff(&self) -> &str {
        &self.diff
    }

    /// Write the diff, coloring line markers when `out` supports it.
    pub fn write_to<W: WriteColor>(&self, out: &mut W) -> io::Result<()> {
        for line in self.diff.split_inclusive('\n') {
            let spec = if line.starts_with("---") || line.starts_with("+++") {
                Some(scheme::file_header())
            } else if line.starts_with("@@") {
                Some(scheme::hunk())
            } else if line.starts_with('-') {
                Some(scheme::diff_remove())
            } else if line.starts_with('+') {
                Some(scheme::diff_add())
            } else {
                None
            };

            match spec {
                Some(spec) => {
                    out.set_color(&spec)?;
                    out.write_all(line.as_bytes())?;
                    out.reset()?;
                }
                None => out.write_all(line.as_bytes())?,
            }
        }
        Ok(())
    }
}

#[cfg(test)]
#[path = "drift_tests.rs"]
mod tests;
