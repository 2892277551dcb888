// SPDX-License-Identifier: MIT
// Copyright (c) 2026 Alfred Jean LLC

//! Git utilities for change detection.
//!
//! Uses git2 (libgit2) for all git operations to avoid subprocess overhead.
//!
//! ## Pull request refs
//!
//! For pull requests, GitHub checks out a synthetic merge commit under a ref
//! like `refs/pull/1234/merge`. Its first parent is the target branch and its
//! second is the PR head, so diffing the two parents yields exactly the files
//! the PR touches. Any other ref (a direct push, a tag, a local run) has no
//! such diff and yields an empty change set.
//!
//! ## File Detection
//!
//! - Added, modified, renamed files: path from `new_file()`
//! - Deleted files: path from `old_file()` (since `new_file()` is empty)

use std::path::Path;

use git2::{Oid, Repository};

use crate::error::{Error, Result};
use crate::resolve::ChangeSet;

/// Extract file path from a diff delta.
///
/// For deleted files, `new_file().path()` is `None`, so fall back to `old_file()`.
fn extract_path<'a>(delta: &'a git2::DiffDelta<'a>) -> Option<&'a Path> {
    delta.new_file().path().or_else(|| delta.old_file().path())
}

/// Whether `gh_ref` names a synthetic pull request merge commit.
pub fn is_merge_ref(gh_ref: &str) -> bool {
    gh_ref.contains("merge")
}

/// Files changed by the pull request behind `gh_ref`.
///
/// Returns an empty set when there is no ref or it is not a merge ref. A merge
/// ref whose commit does not have exactly two parents is an
/// [`Error::Invariant`].
pub fn pr_changed_files(root: &Path, gh_ref: Option<&str>) -> Result<ChangeSet> {
    tracing::info!("using ref `{}`", gh_ref.unwrap_or("<none>"));
    let Some(gh_ref) = gh_ref.filter(|r| is_merge_ref(r)) else {
        tracing::info!("no diff available for ref");
        return Ok(ChangeSet::new());
    };

    let repo = Repository::discover(root)?;
    let merge = repo.revparse_single(gh_ref)?.peel_to_commit()?;
    tracing::info!(
        "merge {}: {}",
        merge.id(),
        merge.summary().unwrap_or_default()
    );

    let (base, incoming) = merge_parents(&merge)?;
    tracing::info!("base: {}, incoming: {}", base, incoming);

    changed_between(&repo, base, incoming)
}

/// The `(base, incoming)` parents of a two-parent merge commit.
fn merge_parents(merge: &git2::Commit<'_>) -> Result<(Oid, Oid)> {
    let parents: Vec<Oid> = merge.parent_ids().collect();
    match parents.as_slice() {
        [base, incoming] => Ok((*base, *incoming)),
        other => Err(Error::Invariant(format!(
            "expected two-parent merge but {} has {} parent(s): {:?}",
            merge.id(),
            other.len(),
            other.iter().map(Oid::to_string).collect::<Vec<_>>()
        ))),
    }
}

/// Paths that differ between the trees of two commits.
pub fn changed_between(repo: &Repository, old: Oid, new: Oid) -> Result<ChangeSet> {
    let old_tree = repo.find_commit(old)?.tree()?;
    let new_tree = repo.find_commit(new)?.tree()?;
    let diff = repo.diff_tree_to_tree(Some(&old_tree), Some(&new_tree), None)?;

    let mut files = ChangeSet::new();
    for delta in diff.deltas() {
        if let Some(path) = extract_path(&delta) {
            files.insert(path);
        }
    }
    tracing::debug!("{} changed files", files.len());
    Ok(files)
}

#[cfg(test)]
#[path = "git_tests.rs"]
mod tests;
