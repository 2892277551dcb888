//! Config file and repository root discovery.
//!
//! Walks from the current directory up to the git root looking for libm-ci.toml.

use std::path::{Path, PathBuf};

use crate::config::{self, CONFIG_FILE, Config};
use crate::error::{Error, Result};

/// Loaded configuration and the root its paths are relative to.
#[derive(Debug, Clone)]
pub struct Workspace {
    pub root: PathBuf,
    pub config: Config,
}

impl Workspace {
    /// Resolve and load the config, then locate the repository root.
    pub fn open(explicit: Option<&Path>, cwd: &Path) -> Result<Self> {
        let config_path = resolve_config(explicit, cwd)?;
        let config = match &config_path {
            Some(path) => {
                tracing::debug!("loading config from {}", path.display());
                config::load(path)?
            }
            None => Config::default(),
        };
        let root = find_root(config_path.as_deref(), cwd);
        tracing::debug!("repository root: {}", root.display());
        Ok(Self { root, config })
    }
}

/// Find libm-ci.toml starting from `start_dir` and walking up to git root.
pub fn find_config(start_dir: &Path) -> Option<PathBuf> {
    let mut current = start_dir.to_path_buf();

    loop {
        let config_path = current.join(CONFIG_FILE);
        if config_path.exists() {
            return Some(config_path);
        }

        // Stop at git root
        if current.join(".git").exists() {
            return None;
        }

        match current.parent() {
            Some(parent) => current = parent.to_path_buf(),
            None => return None,
        }
    }
}

/// Resolve config path from CLI arg, env var, or discovery.
///
/// Priority:
/// 1. CLI flag `-C`/`--config` (handled by clap with env = "LIBM_CI_CONFIG")
/// 2. Discovery from current directory up to git root
/// 3. None (use defaults)
pub fn resolve_config(explicit: Option<&Path>, cwd: &Path) -> Result<Option<PathBuf>> {
    match explicit {
        Some(path) => {
            if path.exists() {
                Ok(Some(path.to_path_buf()))
            } else {
                Err(Error::Config {
                    message: format!("config file not found: {}", path.display()),
                    path: Some(path.to_path_buf()),
                })
            }
        }
        None => Ok(find_config(cwd)),
    }
}

/// Repository root that all configured paths are relative to.
///
/// The directory holding the config wins; otherwise the enclosing git work
/// tree; otherwise `cwd` itself.
pub fn find_root(config_path: Option<&Path>, cwd: &Path) -> PathBuf {
    if let Some(dir) = config_path.and_then(Path::parent) {
        if dir.as_os_str().is_empty() {
            return cwd.to_path_buf();
        }
        return dir.to_path_buf();
    }

    git2::Repository::discover(cwd)
        .ok()
        .and_then(|repo| repo.workdir().map(Path::to_path_buf))
        .unwrap_or_else(|| cwd.to_path_buf())
}

#[cfg(test)]
#[path = "discovery_tests.rs"]
mod tests;
