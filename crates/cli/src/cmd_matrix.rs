// SPDX-License-Identifier: MIT
// Copyright (c) 2026 Alfred Jean LLC

//! generate-matrix command implementation.

use anyhow::Context;

use libm_ci::cli::Cli;
use libm_ci::discovery::Workspace;
use libm_ci::error::ExitCode;
use libm_ci::{IgnoreList, Registry, git, resolve};

/// Environment variable holding the ref the workflow was triggered for.
const GITHUB_REF: &str = "GITHUB_REF";

/// Run the generate-matrix command.
pub fn run(cli: &Cli) -> anyhow::Result<ExitCode> {
    let cwd = std::env::current_dir().context("failed to read current directory")?;
    let ws = Workspace::open(cli.config.as_deref(), &cwd)?;

    let registry = Registry::load(&ws.root.join(&ws.config.matrix.definitions))?;
    let gh_ref = std::env::var(GITHUB_REF).ok();
    let changes = git::pr_changed_files(&ws.root, gh_ref.as_deref())?;
    tracing::info!("{} changed file(s)", changes.len());

    let ignore = IgnoreList::new(ws.config.matrix.ignore.iter().cloned());
    let matrix = resolve(&registry, &ignore, &changes);

    let output = matrix.workflow_output();
    tracing::info!("output: {}", output);
    println!("{output}");
    Ok(ExitCode::Success)
}
