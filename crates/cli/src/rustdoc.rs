// SPDX-License-Identifier: MIT
// Copyright (c) 2026 Alfred Jean LLC

//! Running rustdoc to obtain the JSON documentation index.

use std::path::Path;

use crate::doc_index::DocIndex;
use crate::error::{Error, Result};
use crate::tool::ToolRunner;

/// Run `rustdoc` with `args` from `root` and parse its JSON from stdout.
pub fn generate(runner: &dyn ToolRunner, root: &Path, args: &[String]) -> Result<DocIndex> {
    let json = runner.output("rustdoc", args, root)?;
    DocIndex::from_json(&json).map_err(|e| Error::Parse {
        what: "rustdoc output".to_string(),
        message: e.to_string(),
    })
}

#[cfg(test)]
#[path = "rustdoc_tests.rs"]
mod tests;
