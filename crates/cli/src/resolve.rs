// SPDX-License-Identifier: MIT
// Copyright (c) 2026 Alfred Jean LLC

//! Mapping changed files to affected routines.

use std::collections::{BTreeMap, BTreeSet};
use std::path::Path;

use serde::Serialize;

use crate::name::FloatTy;
use crate::paths::to_posix;
use crate::registry::Registry;

/// Path prefixes whose changes never mark a routine as changed.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct IgnoreList {
    prefixes: Vec<String>,
}

impl IgnoreList {
    pub fn new(prefixes: impl IntoIterator<Item = impl Into<String>>) -> Self {
        Self {
            prefixes: prefixes.into_iter().map(Into::into).collect(),
        }
    }

    pub fn is_ignored(&self, path: &str) -> bool {
        self.prefixes.iter().any(|prefix| path.starts_with(prefix.as_str()))
    }
}

/// Root-relative POSIX paths considered modified.
///
/// Empty means nothing changed or there was no diff to look at.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ChangeSet {
    paths: BTreeSet<String>,
}

impl ChangeSet {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn insert(&mut self, path: &Path) {
        self.paths.insert(to_posix(path));
    }

    pub fn contains(&self, path: &str) -> bool {
        self.paths.contains(path)
    }

    pub fn len(&self) -> usize {
        self.paths.len()
    }

    pub fn is_empty(&self) -> bool {
        self.paths.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = &str> {
        self.paths.iter().map(String::as_str)
    }
}

impl<P: AsRef<Path>> FromIterator<P> for ChangeSet {
    fn from_iter<I: IntoIterator<Item = P>>(iter: I) -> Self {
        let mut set = ChangeSet::new();
        for path in iter {
            set.insert(path.as_ref());
        }
        set
    }
}

/// Changed routine names for each float type.
///
/// Always holds all four types; types with no changes have an empty list.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TypeMatrix {
    changed: BTreeMap<FloatTy, Vec<String>>,
}

#[derive(Serialize)]
struct MatrixJson<'a> {
    matrix: Vec<MatrixEntry<'a>>,
}

#[derive(Serialize)]
struct MatrixEntry<'a> {
    ty: &'a str,
    changed: String,
}

impl TypeMatrix {
    fn empty() -> Self {
        Self {
            changed: FloatTy::ALL.into_iter().map(|ty| (ty, Vec::new())).collect(),
        }
    }

    /// Sorted names of changed routines of type `ty`.
    pub fn changed(&self, ty: FloatTy) -> &[String] {
        self.changed.get(&ty).map(Vec::as_slice).unwrap_or_default()
    }

    /// `(type, names)` pairs in canonical type order.
    pub fn iter(&self) -> impl Iterator<Item = (FloatTy, &[String])> {
        self.changed.iter().map(|(ty, names)| (*ty, names.as_slice()))
    }

    pub fn is_empty(&self) -> bool {
        self.changed.values().all(Vec::is_empty)
    }

    /// Compact JSON: `{"matrix":[{"ty":"f16","changed":"a,b"},...]}`.
    pub fn to_json(&self) -> String {
        let json = MatrixJson {
            matrix: self
                .iter()
                .map(|(ty, names)| MatrixEntry {
                    ty: ty.as_str(),
                    changed: names.join(","),
                })
                .collect(),
        };
        // Only strings and sequences: serialization cannot fail.
        serde_json::to_string(&json).unwrap_or_default()
    }

    /// The `matrix=<json>` line consumed as a workflow output.
    pub fn workflow_output(&self) -> String {
        format!("matrix={}", self.to_json())
    }
}

/// Find routines with at least one non-ignored source in `changes`.
pub fn resolve(registry: &Registry, ignore: &IgnoreList, changes: &ChangeSet) -> TypeMatrix {
    let mut matrix = TypeMatrix::empty();
    if changes.is_empty() {
        return matrix;
    }

    for (name, routine) in registry.iter() {
        let changed: Vec<&str> = routine
            .sources
            .iter()
            .map(String::as_str)
            .filter(|src| !ignore.is_ignored(src))
            .filter(|src| changes.contains(src))
            .collect();

        if changed.is_empty() {
            continue;
        }

        tracing::debug!("changed files for {}: {:?}", name, changed);
        // Registry iteration is name-ordered, so each list stays sorted.
        matrix
            .changed
            .entry(routine.ty)
            .or_default()
            .push(name.to_string());
    }

    matrix
}

#[cfg(test)]
#[path = "resolve_tests.rs"]
mod tests;
