//! Test helpers for behavioral specifications.
//!
//! Provides a small DSL for running the libm-ci binary inside throwaway
//! repositories.

#![allow(clippy::unwrap_used, clippy::expect_used, clippy::panic)]

pub use assert_cmd::prelude::*;
pub use predicates;
pub use predicates::prelude::{Predicate, PredicateBooleanExt};
use std::path::{Path, PathBuf};
use std::process::Command;

/// Trait for converting into a string predicate.
/// Allows passing `&str` (as contains) or any `Predicate<str>`.
pub trait IntoStrPredicate<P: Predicate<str>> {
    fn into_predicate(self) -> P;
}

impl IntoStrPredicate<predicates::str::ContainsPredicate> for &str {
    fn into_predicate(self) -> predicates::str::ContainsPredicate {
        predicates::str::contains(self)
    }
}

impl<P: Predicate<str>> IntoStrPredicate<P> for P {
    fn into_predicate(self) -> P {
        self
    }
}

/// Returns a Command configured to run the libm-ci binary
pub fn libm_ci_cmd() -> Command {
    let mut cmd = Command::new(assert_cmd::cargo::cargo_bin!("libm-ci"));
    cmd.env_remove("GITHUB_REF")
        .env_remove("LIBM_CI_CONFIG")
        .env_remove("LIBM_CI_LOG")
        .env("NO_COLOR", "1");
    cmd
}

/// Create a run builder for a libm-ci invocation
pub fn libm_ci(args: &[&str]) -> RunBuilder {
    RunBuilder {
        args: args.iter().map(|s| s.to_string()).collect(),
        dir: None,
        envs: Vec::new(),
        path_prefix: None,
    }
}

/// Fluent builder for a single invocation
pub struct RunBuilder {
    args: Vec<String>,
    dir: Option<PathBuf>,
    envs: Vec<(String, String)>,
    path_prefix: Option<PathBuf>,
}

#[allow(dead_code)]
impl RunBuilder {
    /// Run from the given directory
    pub fn pwd(mut self, path: impl Into<PathBuf>) -> Self {
        self.dir = Some(path.into());
        self
    }

    /// Set an environment variable
    pub fn env(mut self, key: &str, value: &str) -> Self {
        self.envs.push((key.to_string(), value.to_string()));
        self
    }

    /// Look up tools in `dir` before the inherited PATH
    pub fn tools(mut self, dir: impl Into<PathBuf>) -> Self {
        self.path_prefix = Some(dir.into());
        self
    }

    pub fn passes(self) -> RunAssert {
        self.exits(0)
    }

    pub fn fails(self) -> RunAssert {
        let output = self.command().output().unwrap();
        assert!(
            !output.status.success(),
            "expected failure, got success\nstdout:\n{}",
            String::from_utf8_lossy(&output.stdout)
        );
        RunAssert { output }
    }

    pub fn exits(self, code: i32) -> RunAssert {
        let output = self.command().output().unwrap();
        assert_eq!(
            output.status.code(),
            Some(code),
            "unexpected exit code\nstdout:\n{}\nstderr:\n{}",
            String::from_utf8_lossy(&output.stdout),
            String::from_utf8_lossy(&output.stderr)
        );
        RunAssert { output }
    }

    fn command(self) -> Command {
        let mut cmd = libm_ci_cmd();
        cmd.args(&self.args);

        if let Some(dir) = self.dir {
            cmd.current_dir(dir);
        }

        if let Some(prefix) = self.path_prefix {
            let inherited = std::env::var_os("PATH").unwrap_or_default();
            let mut paths = vec![prefix];
            paths.extend(std::env::split_paths(&inherited));
            cmd.env("PATH", std::env::join_paths(paths).unwrap());
        }

        for (key, value) in &self.envs {
            cmd.env(key, value);
        }

        cmd
    }
}

/// Result of a run for chaining assertions
pub struct RunAssert {
    output: std::process::Output,
}

#[allow(dead_code)]
impl RunAssert {
    /// Get stdout as string
    pub fn stdout(&self) -> String {
        String::from_utf8_lossy(&self.output.stdout).into_owned()
    }

    /// Get stderr as string
    pub fn stderr(&self) -> String {
        String::from_utf8_lossy(&self.output.stderr).into_owned()
    }

    /// Assert stdout equals expected (with diff on failure)
    pub fn stdout_eq(self, expected: &str) -> Self {
        let stdout = String::from_utf8_lossy(&self.output.stdout);
        similar_asserts::assert_eq!(stdout, expected);
        self
    }

    /// Assert stdout matches predicate.
    /// Prefer `stdout_eq` for strict matching.
    ///
    /// ```ignore
    /// .stdout_has("matrix=")  // contains
    /// .stdout_has(predicates::str::is_match(r"^matrix=").unwrap())
    /// ```
    pub fn stdout_has<I, P>(self, predicate: I) -> Self
    where
        I: IntoStrPredicate<P>,
        P: Predicate<str>,
    {
        let stdout = String::from_utf8_lossy(&self.output.stdout);
        assert!(
            predicate.into_predicate().eval(&stdout),
            "stdout predicate failed:\n{}",
            stdout
        );
        self
    }

    /// Assert stdout does not match predicate.
    ///
    /// ```ignore
    /// .stdout_lacks("\x1b[")  // doesn't contain
    /// ```
    pub fn stdout_lacks<I, P>(self, predicate: I) -> Self
    where
        I: IntoStrPredicate<P>,
        P: Predicate<str>,
    {
        let stdout = String::from_utf8_lossy(&self.output.stdout);
        assert!(
            !predicate.into_predicate().eval(&stdout),
            "stdout should NOT match predicate:\n{}",
            stdout
        );
        self
    }

    /// Assert stderr matches predicate.
    pub fn stderr_has<I, P>(self, predicate: I) -> Self
    where
        I: IntoStrPredicate<P>,
        P: Predicate<str>,
    {
        let stderr = String::from_utf8_lossy(&self.output.stderr);
        assert!(
            predicate.into_predicate().eval(&stderr),
            "stderr predicate failed:\n{}",
            stderr
        );
        self
    }
}

// =============================================================================
// Project
// =============================================================================

/// Temporary repository with helper methods.
///
/// Reduces boilerplate by:
/// - Auto-creating parent directories
/// - Adding `version = 1` prefix to config
/// - Panicking on errors (we're in tests)
pub struct Project {
    dir: tempfile::TempDir,
}

#[allow(dead_code)]
impl Project {
    /// Create an empty project with no files
    pub fn empty() -> Self {
        Self {
            dir: tempfile::tempdir().unwrap(),
        }
    }

    pub fn path(&self) -> &Path {
        self.dir.path()
    }

    /// Write `libm-ci.toml`, prefixed with `version = 1`
    pub fn config(&self, body: &str) {
        self.file("libm-ci.toml", &format!("version = 1\n{body}"));
    }

    /// Write a file, creating parent directories
    pub fn file(&self, path: &str, content: &str) {
        let full = self.dir.path().join(path);
        if let Some(parent) = full.parent() {
            std::fs::create_dir_all(parent).unwrap();
        }
        std::fs::write(full, content).unwrap();
    }

    /// Read a file back
    pub fn read(&self, path: &str) -> String {
        std::fs::read_to_string(self.dir.path().join(path)).unwrap()
    }

    pub fn exists(&self, path: &str) -> bool {
        self.dir.path().join(path).exists()
    }

    /// Install an executable shell script as `bin/<name>`, returning `bin/`
    #[cfg(unix)]
    pub fn tool(&self, name: &str, script: &str) -> PathBuf {
        use std::os::unix::fs::PermissionsExt;

        let path = format!("bin/{name}");
        self.file(&path, &format!("#!/bin/sh\n{script}\n"));
        let full = self.dir.path().join(&path);
        let mut perms = std::fs::metadata(&full).unwrap().permissions();
        perms.set_mode(0o755);
        std::fs::set_permissions(&full, perms).unwrap();
        self.dir.path().join("bin")
    }

    /// Run git in the project, panicking on failure
    pub fn git(&self, args: &[&str]) {
        let output = Command::new("git")
            .args(args)
            .current_dir(self.dir.path())
            .output()
            .unwrap();
        assert!(
            output.status.success(),
            "git {:?} failed: {}",
            args,
            String::from_utf8_lossy(&output.stderr)
        );
    }

    /// Initialize a repository on branch `base` with a local identity
    pub fn git_init(&self) {
        self.git(&["init", "-q", "-b", "base"]);
        self.git(&["config", "user.email", "ci@example.com"]);
        self.git(&["config", "user.name", "CI"]);
        self.git(&["config", "commit.gpgsign", "false"]);
    }

    /// Stage everything and commit
    pub fn commit(&self, message: &str) {
        self.git(&["add", "-A"]);
        self.git(&["commit", "-q", "-m", message]);
    }
}
