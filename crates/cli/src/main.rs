// SPDX-License-Identifier: MIT
// Copyright (c) 2026 Alfred Jean LLC

//! libm-ci entry point.

use clap::Parser;
use tracing_subscriber::{EnvFilter, fmt};

use libm_ci::cli::{Cli, Command};
use libm_ci::error::ExitCode;

mod cmd_baseline;
mod cmd_matrix;
mod cmd_update;

fn init_logging() {
    let filter = EnvFilter::try_from_env("LIBM_CI_LOG").unwrap_or_else(|_| EnvFilter::new("warn"));

    fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .with_target(false)
        .init();
}

fn main() {
    init_logging();

    let exit_code = match run() {
        Ok(code) => code,
        Err(e) => {
            eprintln!("libm-ci: {}", e);
            match e.downcast_ref::<libm_ci::Error>() {
                Some(err) => ExitCode::from(err),
                None => ExitCode::InternalError,
            }
        }
    };

    std::process::exit(exit_code as i32);
}

fn run() -> anyhow::Result<ExitCode> {
    let cli = Cli::parse();

    match &cli.command {
        Command::GenerateMatrix => cmd_matrix::run(&cli),
        Command::LocateBaseline(args) => cmd_baseline::run(&cli, args),
        Command::UpdateApiList(args) => cmd_update::run(&cli, args),
    }
}
