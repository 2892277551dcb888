// SPDX-License-Identifier: MIT
// Copyright (c) 2026 Alfred Jean LLC

//! update-api-list command implementation.

use std::io::{ErrorKind, Write};
use std::path::{Path, PathBuf};

use anyhow::Context;
use termcolor::{StandardStream, WriteColor};

use libm_ci::cli::{Cli, UpdateApiListArgs};
use libm_ci::discovery::Workspace;
use libm_ci::error::{Error, ExitCode};
use libm_ci::source::load_sources;
use libm_ci::tool::SystemRunner;
use libm_ci::{ApiExtractor, color, drift, rustdoc};

/// Run the update-api-list command.
pub fn run(cli: &Cli, args: &UpdateApiListArgs) -> anyhow::Result<ExitCode> {
    let cwd = std::env::current_dir().context("failed to read current directory")?;
    let ws = Workspace::open(cli.config.as_deref(), &cwd)?;
    let api = &ws.config.api;

    let index = rustdoc::generate(&SystemRunner, &ws.root, &api.rustdoc_args)?;
    let arch_sources = load_sources(&ws.root, &api.arch_dir)?;
    let registry = ApiExtractor::new(api).extract(&index, &arch_sources);
    tracing::info!("collected {} routines", registry.len());

    let artifacts = [
        (ws.root.join(&api.function_list), registry.function_list()),
        (ws.root.join(&ws.config.matrix.definitions), registry.to_json()?),
    ];

    if !args.check {
        for (path, contents) in &artifacts {
            write_artifact(path, contents)?;
        }
        return Ok(ExitCode::Success);
    }

    let mut out = StandardStream::stdout(color::resolve_color());
    let mut stale: Vec<PathBuf> = Vec::new();
    for (path, expected) in &artifacts {
        let actual = read_artifact(path)?;
        if let Err(drift) = drift::check(&actual, expected) {
            writeln!(out, "{}:", path.display())?;
            drift.write_to(&mut out)?;
            stale.push(path.clone());
        }
    }
    out.reset()?;

    match stale.into_iter().next() {
        Some(path) => {
            eprintln!("mismatched function list");
            Err(Error::Drift { path }.into())
        }
        None => {
            println!("output matches expected; success");
            Ok(ExitCode::Success)
        }
    }
}

/// Checked-in contents of `path`; a missing file reads as empty.
fn read_artifact(path: &Path) -> Result<String, Error> {
    match std::fs::read_to_string(path) {
        Ok(contents) => Ok(contents),
        Err(e) if e.kind() == ErrorKind::NotFound => Ok(String::new()),
        Err(source) => Err(Error::Io {
            path: path.to_path_buf(),
            source,
        }),
    }
}

fn write_artifact(path: &Path, contents: &str) -> Result<(), Error> {
    tracing::info!("writing {}", path.display());
    if let Some(parent) = path.parent() {
        std::fs::create_dir_all(parent).map_err(|source| Error::Io {
            path: parent.to_path_buf(),
            source,
        })?;
    }
    std::fs::write(path, contents).map_err(|source| Error::Io {
        path: path.to_path_buf(),
        source,
    })
}
