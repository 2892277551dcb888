// SPDX-License-Identifier: MIT
// Copyright (c) 2026 Alfred Jean LLC

//! CLI argument parsing with clap derive.

use std::path::PathBuf;

use clap::{Parser, Subcommand};

use crate::baseline::BaselineOptions;

/// CI helper for scoping libm's exhaustive tests to changed routines
#[derive(Parser)]
#[command(name = "libm-ci")]
#[command(version, about, long_about = None)]
#[command(propagate_version = true, arg_required_else_help = true)]
pub struct Cli {
    /// Use specific config file
    #[arg(short = 'C', long = "config", global = true, env = "LIBM_CI_CONFIG")]
    pub config: Option<PathBuf>,

    #[command(subcommand)]
    pub command: Command,
}

#[derive(Subcommand)]
pub enum Command {
    /// Print a matrix of routines whose sources changed, as a workflow output
    GenerateMatrix,
    /// Locate the most recent benchmark baseline from CI
    LocateBaseline(LocateBaselineArgs),
    /// Regenerate the public function list and definitions
    UpdateApiList(UpdateApiListArgs),
}

#[derive(clap::Args)]
pub struct LocateBaselineArgs {
    /// Download the baseline artifacts
    #[arg(long)]
    pub download: bool,

    /// Extract the newest downloaded archive (overwrites files in place)
    #[arg(long, requires = "download")]
    pub extract: bool,
}

impl LocateBaselineArgs {
    pub fn options(&self) -> BaselineOptions {
        BaselineOptions {
            download: self.download,
            extract: self.extract,
        }
    }
}

#[derive(clap::Args)]
pub struct UpdateApiListArgs {
    /// Compare against the checked-in files instead of overwriting them
    #[arg(long)]
    pub check: bool,
}

#[cfg(test)]
#[path = "cli_tests.rs"]
mod tests;
