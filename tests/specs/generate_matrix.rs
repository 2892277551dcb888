//! Behavioral specs for `libm-ci generate-matrix`.

#![allow(clippy::unwrap_used, clippy::expect_used)]

use crate::prelude::*;

const DEFINITIONS: &str = r#"{
    "__comment": "test",
    "sin": {
        "sources": ["src/math/sin.rs", "src/math/support/mod.rs"],
        "type": "f64"
    },
    "sinf": {
        "sources": ["src/math/sinf.rs", "src/math/support/mod.rs"],
        "type": "f32"
    },
    "sinf16": {
        "sources": ["src/math/sinf16.rs"],
        "type": "f16"
    }
}
"#;

const EMPTY_MATRIX: &str = concat!(
    r#"matrix={"matrix":["#,
    r#"{"ty":"f16","changed":""},"#,
    r#"{"ty":"f32","changed":""},"#,
    r#"{"ty":"f64","changed":""},"#,
    r#"{"ty":"f128","changed":""}]}"#,
    "\n"
);

fn libm_repo() -> Project {
    let temp = Project::empty();
    temp.config("");
    temp.file("etc/function-definitions.json", DEFINITIONS);
    temp.file("src/math/sin.rs", "pub fn sin(x: f64) -> f64 { x }\n");
    temp.file("src/math/sinf.rs", "pub fn sinf(x: f32) -> f32 { x }\n");
    temp.file("src/math/sinf16.rs", "pub fn sinf16(x: f16) -> f16 { x }\n");
    temp.file("src/math/support/mod.rs", "pub fn helper() {}\n");
    temp
}

/// Commits `change` on a `pr` branch and merges it into `base` without
/// fast-forwarding, then points `refs/pull/1/merge` at the merge commit.
fn merge_pr(temp: &Project, change: impl FnOnce(&Project)) {
    temp.git_init();
    temp.commit("initial");
    temp.git(&["checkout", "-q", "-b", "pr"]);
    change(temp);
    temp.commit("change");
    temp.git(&["checkout", "-q", "base"]);
    temp.git(&["merge", "-q", "--no-ff", "-m", "merge", "pr"]);
    temp.git(&["update-ref", "refs/pull/1/merge", "HEAD"]);
}

#[test]
fn without_ref_every_type_is_listed_and_empty() {
    let temp = libm_repo();

    libm_ci(&["generate-matrix"])
        .pwd(temp.path())
        .passes()
        .stdout_eq(EMPTY_MATRIX);
}

#[test]
fn non_merge_ref_yields_empty_matrix() {
    let temp = libm_repo();

    libm_ci(&["generate-matrix"])
        .pwd(temp.path())
        .env("GITHUB_REF", "refs/heads/master")
        .passes()
        .stdout_eq(EMPTY_MATRIX);
}

#[test]
fn changed_source_selects_its_routine() {
    let temp = libm_repo();
    merge_pr(&temp, |t| {
        t.file("src/math/sin.rs", "pub fn sin(x: f64) -> f64 { -x }\n");
    });

    libm_ci(&["generate-matrix"])
        .pwd(temp.path())
        .env("GITHUB_REF", "refs/pull/1/merge")
        .passes()
        .stdout_eq(concat!(
            r#"matrix={"matrix":["#,
            r#"{"ty":"f16","changed":""},"#,
            r#"{"ty":"f32","changed":""},"#,
            r#"{"ty":"f64","changed":"sin"},"#,
            r#"{"ty":"f128","changed":""}]}"#,
            "\n"
        ));
}

#[test]
fn changes_across_types_are_grouped() {
    let temp = libm_repo();
    merge_pr(&temp, |t| {
        t.file("src/math/sinf.rs", "pub fn sinf(x: f32) -> f32 { -x }\n");
        t.file("src/math/sinf16.rs", "pub fn sinf16(x: f16) -> f16 { -x }\n");
    });

    libm_ci(&["generate-matrix"])
        .pwd(temp.path())
        .env("GITHUB_REF", "refs/pull/1/merge")
        .passes()
        .stdout_has(r#"{"ty":"f16","changed":"sinf16"}"#)
        .stdout_has(r#"{"ty":"f32","changed":"sinf"}"#)
        .stdout_has(r#"{"ty":"f64","changed":""}"#);
}

#[test]
fn ignored_shared_source_selects_nothing() {
    let temp = libm_repo();
    merge_pr(&temp, |t| {
        t.file("src/math/support/mod.rs", "pub fn helper() { }\n");
    });

    libm_ci(&["generate-matrix"])
        .pwd(temp.path())
        .env("GITHUB_REF", "refs/pull/1/merge")
        .passes()
        .stdout_eq(EMPTY_MATRIX);
}

#[test]
fn configured_ignore_list_replaces_defaults() {
    let temp = libm_repo();
    temp.config("[matrix]\nignore = []\n");
    merge_pr(&temp, |t| {
        t.file("src/math/support/mod.rs", "pub fn helper() { }\n");
    });

    libm_ci(&["generate-matrix"])
        .pwd(temp.path())
        .env("GITHUB_REF", "refs/pull/1/merge")
        .passes()
        .stdout_has(r#"{"ty":"f32","changed":"sinf"}"#)
        .stdout_has(r#"{"ty":"f64","changed":"sin"}"#);
}

#[test]
fn missing_definitions_is_an_internal_error() {
    let temp = Project::empty();
    temp.config("");

    libm_ci(&["generate-matrix"])
        .pwd(temp.path())
        .exits(3)
        .stderr_has("function-definitions.json");
}

#[test]
fn merge_ref_that_is_not_a_merge_is_an_internal_error() {
    let temp = libm_repo();
    temp.git_init();
    temp.commit("initial");
    temp.git(&["update-ref", "refs/pull/2/merge", "HEAD"]);

    libm_ci(&["generate-matrix"])
        .pwd(temp.path())
        .env("GITHUB_REF", "refs/pull/2/merge")
        .exits(3)
        .stderr_has("expected two-parent merge");
}
