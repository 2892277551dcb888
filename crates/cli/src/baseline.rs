// SPDX-License-Identifier: MIT
// Copyright (c) 2026 Alfred Jean LLC

//! Locating benchmark baselines from previous CI runs.
//!
//! Nothing here returns an error. A missing baseline (artifact expired, first
//! run on a branch, `gh` unavailable) is logged and the run carries on; the
//! [`Outcome`] only records how far the lookup got.

use std::path::{Path, PathBuf};

use globset::Glob;
use serde::{Deserialize, Serialize};

use crate::config::BaselineConfig;
use crate::tool::ToolRunner;

/// Fields requested from `gh run list`.
const RUN_FIELDS: &str =
    "databaseId,url,headSha,conclusion,createdAt,status,workflowDatabaseId,workflowName";

/// What `locate-baseline` should do once the latest run is found.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct BaselineOptions {
    pub download: bool,
    pub extract: bool,
}

/// The most recent CI run on the baseline branch.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct LatestJob {
    pub database_id: Option<u64>,
    pub url: Option<String>,
    pub head_sha: Option<String>,
    pub conclusion: Option<String>,
    pub created_at: Option<String>,
    pub status: Option<String>,
    pub workflow_database_id: Option<u64>,
    pub workflow_name: Option<String>,
}

/// How far [`locate`] got.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Outcome {
    /// No usable run was found.
    Unavailable,
    /// The latest run was found; nothing was downloaded.
    Located(LatestJob),
    /// Artifacts of the run were downloaded but not extracted.
    Downloaded(LatestJob),
    /// The newest archive was extracted into the working directory.
    Extracted { job: LatestJob, archive: PathBuf },
}

/// Find the most recent baseline run and optionally fetch and unpack it.
pub fn locate(
    runner: &dyn ToolRunner,
    config: &BaselineConfig,
    opts: BaselineOptions,
    cwd: &Path,
) -> Outcome {
    let list_args = vec![
        "run".to_string(),
        "list".to_string(),
        format!("--branch={}", config.branch),
        "--limit=1".to_string(),
        format!("--json={RUN_FIELDS}"),
        format!(
            "--jq=select(.[].workflowName == \"{}\")",
            config.workflow
        ),
    ];
    let listing = match runner.output("gh", &list_args, cwd) {
        Ok(out) => out,
        Err(e) => {
            tracing::warn!("failed to run github command: {}", e);
            return Outcome::Unavailable;
        }
    };

    let Some(job) = parse_latest(&listing) else {
        tracing::warn!("no `{}` run found on `{}`", config.workflow, config.branch);
        return Outcome::Unavailable;
    };
    tracing::info!(
        "latest job: {}",
        serde_json::to_string_pretty(&job).unwrap_or_default()
    );

    if !opts.download {
        return Outcome::Located(job);
    }

    let Some(job_id) = job.database_id else {
        tracing::warn!("unable to find job ID");
        return Outcome::Located(job);
    };

    let download_args = vec![
        "run".to_string(),
        "download".to_string(),
        job_id.to_string(),
        format!("--pattern={}", config.artifact_glob),
    ];
    if let Err(e) = runner.status("gh", &download_args, cwd) {
        tracing::warn!("failed to download artifacts: {}", e);
        return Outcome::Located(job);
    }

    if !opts.extract {
        return Outcome::Downloaded(job);
    }

    let Some(archive) = newest_archive(cwd, &config.artifact_glob) else {
        tracing::warn!("no archive matching `{}` was downloaded", config.artifact_glob);
        return Outcome::Downloaded(job);
    };

    tracing::info!("extracting {}", archive.display());
    let tar_args = vec!["xvf".to_string(), archive.to_string_lossy().into_owned()];
    if let Err(e) = runner.status("tar", &tar_args, cwd) {
        tracing::warn!("failed to extract {}: {}", archive.display(), e);
        return Outcome::Downloaded(job);
    }

    Outcome::Extracted { job, archive }
}

/// First run in `gh run list` JSON output.
///
/// `--jq select(...)` re-emits the whole array once per match, so only the
/// first JSON value is read.
fn parse_latest(listing: &str) -> Option<LatestJob> {
    let mut stream = serde_json::Deserializer::from_str(listing).into_iter::<Vec<LatestJob>>();
    match stream.next()? {
        Ok(runs) => runs.into_iter().next(),
        Err(e) => {
            tracing::warn!("unexpected `gh run list` output: {}", e);
            None
        }
    }
}

/// Lexicographically greatest `<glob>/<glob>` file below `cwd`.
///
/// `gh run download` places each artifact in a directory of the same name,
/// e.g. `baseline-icount-1/baseline-icount-1.tar.xz`.
fn newest_archive(cwd: &Path, pattern: &str) -> Option<PathBuf> {
    let matcher = match Glob::new(pattern) {
        Ok(glob) => glob.compile_matcher(),
        Err(e) => {
            tracing::warn!("invalid artifact glob `{}`: {}", pattern, e);
            return None;
        }
    };

    let matching = |dir: &Path| -> Vec<PathBuf> {
        std::fs::read_dir(dir)
            .into_iter()
            .flatten()
            .filter_map(|entry| entry.ok())
            .filter(|entry| matcher.is_match(entry.file_name()))
            .map(|entry| entry.path())
            .collect()
    };

    let mut candidates: Vec<PathBuf> = matching(cwd)
        .into_iter()
        .filter(|dir| dir.is_dir())
        .flat_map(|dir| matching(&dir))
        .filter(|file| file.is_file())
        .filter_map(|file| file.strip_prefix(cwd).ok().map(Path::to_path_buf))
        .collect();

    candidates.sort();
    candidates.pop()
}

#[cfg(test)]
#[path = "baseline_tests.rs"]
mod tests;
