// SPDX-License-Identifier: MIT
// Copyright (c) 2026 Alfred Jean LLC

//! Public API extraction.
//!
//! Builds the [`Registry`] from rustdoc's JSON index:
//!
//! 1. Public `use` items in the root re-export modules name the public API.
//! 2. Re-exports that resolve to local functions are the public functions.
//! 3. Every function item sharing a public name contributes its file.
//! 4. Architecture sources are scanned textually for `fn <name>`, since much
//!    of that directory is configured out and invisible to rustdoc.
//! 5. Files under a generic implementation path that define a base routine
//!    are added to each type-suffixed variant of it.
//!
//! The textual scan is a substring match. It can pick up a name mentioned in
//! a comment, and `fn sin` also matches `fn sinf`. Extra sources only make the
//! matrix run more tests, so this stays a heuristic.

use std::collections::{BTreeMap, BTreeSet};
use std::path::Path;

use aho_corasick::AhoCorasick;

use crate::config::ApiConfig;
use crate::doc_index::DocIndex;
use crate::name::base_name;
use crate::paths::to_posix;
use crate::registry::{Registry, Routine};
use crate::source::SourceFile;

type Defs = BTreeMap<String, BTreeSet<String>>;

/// Extracts the public routine registry from a documentation index.
pub struct ApiExtractor<'a> {
    config: &'a ApiConfig,
}

impl<'a> ApiExtractor<'a> {
    pub fn new(config: &'a ApiConfig) -> Self {
        Self { config }
    }

    /// Build the registry from `index` and the architecture `arch_sources`.
    pub fn extract(&self, index: &DocIndex, arch_sources: &[SourceFile]) -> Registry {
        let functions = self.public_functions(index);
        tracing::info!("found {} public functions", functions.len());

        let mut defs = structural_defs(index, &functions);
        scan_arch_sources(arch_sources, &functions, &mut defs);
        propagate_generic(&mut defs, &self.config.generic_marker);

        defs.into_iter()
            .map(|(name, sources)| {
                if sources.is_empty() {
                    tracing::warn!("no definition found for `{}`", name);
                }
                let ty = base_name(&name).1;
                (name, Routine { sources, ty })
            })
            .collect()
    }

    /// Names of functions re-exported from the root modules, sorted.
    pub fn public_functions(&self, index: &DocIndex) -> Vec<String> {
        let is_root_module = |file: &str| {
            self.config
                .reexport_modules
                .iter()
                .any(|module| module == file)
        };

        let names: BTreeSet<String> = index
            .items()
            .filter(|item| item.is_public())
            .filter(|item| item.span_filename().is_some_and(is_root_module))
            .filter_map(|item| item.use_target())
            // Targets missing from the index live in external crates.
            .filter_map(|id| index.get(&id))
            .filter(|target| target.is_function())
            .filter_map(|target| target.name().map(str::to_string))
            .collect();

        names.into_iter().collect()
    }
}

/// Files of every function item whose name is public.
fn structural_defs(index: &DocIndex, functions: &[String]) -> Defs {
    let mut defs: Defs = functions
        .iter()
        .map(|name| (name.clone(), BTreeSet::new()))
        .collect();

    for item in index.items().filter(|item| item.is_function()) {
        let (Some(name), Some(file)) = (item.name(), item.span_filename()) else {
            continue;
        };
        if let Some(sources) = defs.get_mut(name) {
            sources.insert(to_posix(Path::new(file)));
        }
    }

    defs
}

/// Add any architecture file containing `fn <name>` to that name's sources.
fn scan_arch_sources(files: &[SourceFile], functions: &[String], defs: &mut Defs) {
    if files.is_empty() || functions.is_empty() {
        return;
    }

    let patterns: Vec<String> = functions.iter().map(|name| format!("fn {name}")).collect();
    let automaton = match AhoCorasick::new(&patterns) {
        Ok(automaton) => automaton,
        Err(e) => {
            tracing::warn!("skipping architecture scan: {}", e);
            return;
        }
    };

    for file in files {
        for m in automaton.find_overlapping_iter(&file.contents) {
            let name = &functions[m.pattern().as_usize()];
            if let Some(sources) = defs.get_mut(name)
                && sources.insert(file.path.clone())
            {
                tracing::debug!("{} textually defines `{}`", file.path, name);
            }
        }
    }
}

/// Copy generic sources of each base routine into its variants.
fn propagate_generic(defs: &mut Defs, marker: &str) {
    let snapshot = defs.clone();
    for (name, sources) in defs.iter_mut() {
        let (base, _) = base_name(name);
        let Some(base_sources) = snapshot.get(base) else {
            continue;
        };
        for src in base_sources.iter().filter(|s| s.contains(marker)) {
            sources.insert(src.clone());
        }
    }
}

#[cfg(test)]
#[path = "extract_tests.rs"]
mod tests;
