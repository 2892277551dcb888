// SPDX-License-Identifier: MIT
// Copyright (c) 2026 Alfred Jean LLC

//! locate-baseline command implementation.

use anyhow::Context;

use libm_ci::baseline::{self, Outcome};
use libm_ci::cli::{Cli, LocateBaselineArgs};
use libm_ci::discovery::Workspace;
use libm_ci::error::ExitCode;
use libm_ci::tool::SystemRunner;

/// Run the locate-baseline command.
///
/// A missing baseline is never fatal; only config errors fail the command.
pub fn run(cli: &Cli, args: &LocateBaselineArgs) -> anyhow::Result<ExitCode> {
    let cwd = std::env::current_dir().context("failed to read current directory")?;
    let ws = Workspace::open(cli.config.as_deref(), &cwd)?;

    match baseline::locate(&SystemRunner, &ws.config.baseline, args.options(), &cwd) {
        Outcome::Unavailable => eprintln!("no baseline available"),
        Outcome::Located(job) | Outcome::Downloaded(job) => {
            println!("{}", serde_json::to_string(&job)?);
        }
        Outcome::Extracted { job, archive } => {
            println!("{}", serde_json::to_string(&job)?);
            eprintln!("extracted {}", archive.display());
        }
    }
    Ok(ExitCode::Success)
}
