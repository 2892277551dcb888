//! Configuration parsing and validation.
//!
//! Handles libm-ci.toml parsing with version validation and unknown key warnings.
//! Every field has a default matching the libm repository layout, so the file
//! is optional.

use std::collections::BTreeMap;
use std::path::{Path, PathBuf};

use serde::Deserialize;

use crate::error::{Error, Result};

/// Config file name looked up during discovery.
pub const CONFIG_FILE: &str = "libm-ci.toml";

/// Currently supported config version.
pub const SUPPORTED_VERSION: i64 = 1;

/// Known top-level keys in the config.
const KNOWN_KEYS: &[&str] = &["version", "matrix", "api", "baseline"];

/// Full configuration.
#[derive(Debug, Clone, Deserialize)]
pub struct Config {
    /// Config file version (must be 1).
    pub version: i64,

    #[serde(default)]
    pub matrix: MatrixConfig,

    #[serde(default)]
    pub api: ApiConfig,

    #[serde(default)]
    pub baseline: BaselineConfig,

    #[serde(flatten)]
    unknown: BTreeMap<String, toml::Value>,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            version: SUPPORTED_VERSION,
            matrix: MatrixConfig::default(),
            api: ApiConfig::default(),
            baseline: BaselineConfig::default(),
            unknown: BTreeMap::new(),
        }
    }
}

/// `generate-matrix` configuration.
#[derive(Debug, Clone, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct MatrixConfig {
    /// Path prefixes whose changes never trigger exhaustive tests, even when
    /// they define a routine.
    pub ignore: Vec<String>,

    /// Checked-in registry, relative to the repository root.
    pub definitions: PathBuf,
}

impl Default for MatrixConfig {
    fn default() -> Self {
        Self {
            ignore: vec![
                "src/math/support/".to_string(),
                "src/libm_helper.rs".to_string(),
                "src/math/arch/intrinsics.rs".to_string(),
            ],
            definitions: PathBuf::from("etc/function-definitions.json"),
        }
    }
}

/// `update-api-list` configuration.
#[derive(Debug, Clone, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct ApiConfig {
    /// Modules whose `pub use` items make up the public API.
    pub reexport_modules: Vec<String>,

    /// Directory of architecture-specific sources, scanned textually.
    pub arch_dir: String,

    /// Path fragment identifying shared generic implementations.
    pub generic_marker: String,

    /// Checked-in function list, relative to the repository root.
    pub function_list: PathBuf,

    /// Arguments passed to `rustdoc`, run from the repository root.
    pub rustdoc_args: Vec<String>,
}

impl Default for ApiConfig {
    fn default() -> Self {
        Self {
            reexport_modules: vec!["src/lib.rs".to_string(), "src/math/mod.rs".to_string()],
            arch_dir: "src/math/arch".to_string(),
            generic_marker: "generic".to_string(),
            function_list: PathBuf::from("etc/function-list.txt"),
            rustdoc_args: [
                "src/lib.rs",
                "--edition=2021",
                "--document-private-items",
                "--output-format=json",
                "--cfg=f16_enabled",
                "--cfg=f128_enabled",
                "-Zunstable-options",
                "-o-",
            ]
            .into_iter()
            .map(String::from)
            .collect(),
        }
    }
}

/// `locate-baseline` configuration.
#[derive(Debug, Clone, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct BaselineConfig {
    /// Branch whose CI runs produce benchmark baselines.
    pub branch: String,

    /// Workflow that uploads the baseline artifacts.
    pub workflow: String,

    /// Glob matching artifact names and the archives inside them.
    pub artifact_glob: String,
}

impl Default for BaselineConfig {
    fn default() -> Self {
        Self {
            branch: "master".to_string(),
            workflow: "CI".to_string(),
            artifact_glob: "baseline-icount*".to_string(),
        }
    }
}

/// Minimum config structure for version checking.
#[derive(Deserialize)]
struct VersionOnly {
    version: Option<i64>,
}

/// Load and validate config from a file path.
pub fn load(path: &Path) -> Result<Config> {
    let content = std::fs::read_to_string(path).map_err(|e| Error::Io {
        path: path.to_path_buf(),
        source: e,
    })?;

    parse(&content, path)
}

/// Parse config from string content, warning on unknown top-level keys.
pub fn parse(content: &str, path: &Path) -> Result<Config> {
    let config_error = |message: String| Error::Config {
        message,
        path: Some(path.to_path_buf()),
    };

    let version_check: VersionOnly =
        toml::from_str(content).map_err(|e| config_error(e.to_string()))?;

    let version = version_check
        .version
        .ok_or_else(|| config_error("missing required field: version".to_string()))?;

    if version != SUPPORTED_VERSION {
        return Err(config_error(format!(
            "unsupported config version {} (supported: {})",
            version, SUPPORTED_VERSION
        )));
    }

    let config: Config = toml::from_str(content).map_err(|e| config_error(e.to_string()))?;

    for key in config.unknown.keys() {
        if !KNOWN_KEYS.contains(&key.as_str()) {
            warn_unknown_key(path, key);
        }
    }

    Ok(config)
}

fn warn_unknown_key(path: &Path, key: &str) {
    eprintln!(
        "libm-ci: warning: {}: unrecognized field `{}` (ignored)",
        path.display(),
        key
    );
}

#[cfg(test)]
#[path = "config_tests.rs"]
mod tests;
