use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::{Path, PathBuf};
use std::time::Duration;

use crate::url_model;

/// Repository the installer clones.
pub const DEFAULT_REPO_URL: &str = "https://github.com/Form-Library/Form.git";

/// The single file kept after pruning.
pub const DEFAULT_KEEP_FILE: &str = "Form.py";

/// Which files the pruner considers for deletion.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum PruneScope {
    /// Only regular files directly inside the checkout.
    TopLevel,
    /// Every regular file in the checkout tree.
    #[default]
    Recursive,
}

/// Installer settings. Every field has a built-in default; the optional
/// `~/.config/fetchkeep/config.toml` may override any of them.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct InstallerConfig {
    /// Repository to clone.
    pub repo_url: String,
    /// Checkout directory name; derived from `repo_url` when unset.
    pub checkout_dir: Option<String>,
    /// File name kept at the top of the checkout (matched case-insensitively).
    pub keep_file: String,
    pub prune_scope: PruneScope,
    /// Delete the installer executable when done.
    pub self_erase: bool,
    /// Pause before self-erase, in milliseconds.
    pub self_erase_delay_ms: u64,
    /// Version-control client used to clone.
    pub git_program: String,
}

impl Default for InstallerConfig {
    fn default() -> Self {
        Self {
            repo_url: DEFAULT_REPO_URL.to_string(),
            checkout_dir: None,
            keep_file: DEFAULT_KEEP_FILE.to_string(),
            prune_scope: PruneScope::default(),
            self_erase: true,
            self_erase_delay_ms: 1000,
            git_program: "git".to_string(),
        }
    }
}

impl InstallerConfig {
    /// Directory name the clone creates.
    pub fn checkout_dir_name(&self) -> Result<String> {
        match &self.checkout_dir {
            Some(dir) if !dir.trim().is_empty() => Ok(dir.clone()),
            _ => url_model::checkout_dir_name(&self.repo_url).with_context(|| {
                format!("cannot derive a checkout directory from {}", self.repo_url)
            }),
        }
    }

    pub fn self_erase_delay(&self) -> Duration {
        Duration::from_millis(self.self_erase_delay_ms)
    }
}

/// Location of the config file if one exists in any XDG config directory.
pub fn find_config_path() -> Result<Option<PathBuf>> {
    let xdg_dirs = xdg::BaseDirectories::with_prefix("fetchkeep")?;
    Ok(xdg_dirs.find_config_file("config.toml"))
}

/// Load configuration from `path`.
pub fn load_from(path: &Path) -> Result<InstallerConfig> {
    let data =
        fs::read_to_string(path).with_context(|| format!("read config {}", path.display()))?;
    let cfg: InstallerConfig =
        toml::from_str(&data).with_context(|| format!("parse config {}", path.display()))?;
    Ok(cfg)
}

/// Load configuration from disk, or the built-in defaults when there is no
/// config file. Never creates a file: an install run leaves nothing behind
/// except the checkout.
pub fn load() -> Result<InstallerConfig> {
    match find_config_path()? {
        Some(path) => {
            let cfg = load_from(&path)?;
            tracing::info!("loaded config from {}", path.display());
            Ok(cfg)
        }
        None => Ok(InstallerConfig::default()),
    }
}
