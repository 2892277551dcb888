// SPDX-License-Identifier: MIT
// Copyright (c) 2026 Alfred Jean LLC

//! External tool invocation.
//!
//! `rustdoc`, `gh`, and `tar` are black boxes: they either produce output or
//! fail with an [`Error::Tool`]. Going through a trait lets tests script them.

use std::path::Path;
use std::process::{Command, Output, Stdio};

use crate::error::{Error, Result};

/// Runs external programs synchronously.
pub trait ToolRunner {
    /// Run `program` in `dir` and capture its stdout.
    ///
    /// A non-zero exit status is an error.
    fn output(&self, program: &str, args: &[String], dir: &Path) -> Result<String>;

    /// Run `program` in `dir` with inherited stdio.
    ///
    /// A non-zero exit status is an error.
    fn status(&self, program: &str, args: &[String], dir: &Path) -> Result<()>;
}

/// Runs programs as child processes.
#[derive(Debug, Default, Clone, Copy)]
pub struct SystemRunner;

impl ToolRunner for SystemRunner {
    fn output(&self, program: &str, args: &[String], dir: &Path) -> Result<String> {
        tracing::debug!("running {} {}", program, args.join(" "));
        let output = Command::new(program)
            .args(args)
            .current_dir(dir)
            .stderr(Stdio::piped())
            .output()
            .map_err(|e| spawn_error(program, e))?;
        check_output(program, &output)?;
        String::from_utf8(output.stdout).map_err(|e| Error::Tool {
            tool: program.to_string(),
            message: format!("output is not utf-8: {}", e),
        })
    }

    fn status(&self, program: &str, args: &[String], dir: &Path) -> Result<()> {
        tracing::debug!("running {} {}", program, args.join(" "));
        let status = Command::new(program)
            .args(args)
            .current_dir(dir)
            .status()
            .map_err(|e| spawn_error(program, e))?;
        if status.success() {
            Ok(())
        } else {
            Err(Error::Tool {
                tool: program.to_string(),
                message: status.to_string(),
            })
        }
    }
}

fn spawn_error(program: &str, err: std::io::Error) -> Error {
    Error::Tool {
        tool: program.to_string(),
        message: format!("could not start: {}", err),
    }
}

fn check_output(program: &str, output: &Output) -> Result<()> {
    if output.status.success() {
        return Ok(());
    }
    let stderr = String::from_utf8_lossy(&output.stderr);
    let detail = stderr.trim();
    let message = if detail.is_empty() {
        output.status.to_string()
    } else {
        format!("{}\n{}", output.status, detail)
    };
    Err(Error::Tool {
        tool: program.to_string(),
        message,
    })
}
