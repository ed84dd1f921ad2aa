//! The install run: clone, verify, prune, self-erase.
//!
//! Strictly sequential. The clone is the only step that can fail the run;
//! once the checkout exists every later step is best-effort.

use std::fmt;
use std::path::PathBuf;

use crate::config::InstallerConfig;
use crate::error::InstallError;
use crate::fetch::{self, Fetcher, GitFetcher};
use crate::prune::{self, PruneReport};
use crate::self_erase::{EraseTarget, SelfEraser};

/// Pipeline position, logged on every transition.
///
/// `Start → Cloning → (Failed | Cloned) → Pruning → SelfDeleting → Terminal`
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Stage {
    Start,
    Cloning,
    Failed,
    Cloned,
    Pruning,
    SelfDeleting,
    Terminal,
}

impl fmt::Display for Stage {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let s = match self {
            Stage::Start => "start",
            Stage::Cloning => "cloning",
            Stage::Failed => "failed",
            Stage::Cloned => "cloned",
            Stage::Pruning => "pruning",
            Stage::SelfDeleting => "self-deleting",
            Stage::Terminal => "terminal",
        };
        f.write_str(s)
    }
}

/// Outcome of a completed run.
#[derive(Debug, Clone)]
pub struct InstallReport {
    pub checkout: PathBuf,
    pub prune: PruneReport,
    /// `None` when self-erase is disabled, else whether the installer is gone.
    pub erased: Option<bool>,
}

pub struct Installer<F> {
    config: InstallerConfig,
    fetcher: F,
    workdir: PathBuf,
    eraser: Option<SelfEraser>,
}

impl Installer<GitFetcher> {
    /// Installer that clones with the configured git client into the current
    /// directory and erases the running executable.
    pub fn from_config(config: InstallerConfig) -> Result<Self, InstallError> {
        let workdir = std::env::current_dir().map_err(|source| InstallError::WorkDir {
            path: PathBuf::from("."),
            source,
        })?;
        let fetcher = GitFetcher::new(config.git_program.clone());
        Ok(Self::new(config, fetcher, workdir))
    }
}

impl<F: Fetcher> Installer<F> {
    pub fn new(config: InstallerConfig, fetcher: F, workdir: impl Into<PathBuf>) -> Self {
        let eraser = config
            .self_erase
            .then(|| SelfEraser::new(EraseTarget::CurrentExe, config.self_erase_delay()));
        Self {
            config,
            fetcher,
            workdir: workdir.into(),
            eraser,
        }
    }

    /// Erase `target` instead of the running executable. No-op when self-erase is disabled.
    pub fn with_erase_target(mut self, target: EraseTarget) -> Self {
        if self.eraser.is_some() {
            self.eraser = Some(SelfEraser::new(target, self.config.self_erase_delay()));
        }
        self
    }

    /// Where the clone lands.
    pub fn checkout_path(&self) -> Result<PathBuf, InstallError> {
        let name = self
            .config
            .checkout_dir_name()
            .map_err(|e| InstallError::Config(format!("{e:#}")))?;
        Ok(self.workdir.join(name))
    }

    pub fn run(&self) -> Result<InstallReport, InstallError> {
        enter(Stage::Start);
        let checkout = self.checkout_path()?;

        enter(Stage::Cloning);
        let url = &self.config.repo_url;
        tracing::info!(url = %url, dest = %checkout.display(), "cloning repository");
        let cloned = self
            .fetcher
            .fetch(url, &checkout)
            .and_then(fetch::verify);
        if let Err(source) = cloned {
            enter(Stage::Failed);
            tracing::debug!(url = %url, "clone failed: {}", source);
            return Err(InstallError::Clone {
                url: url.clone(),
                source,
            });
        }
        enter(Stage::Cloned);

        enter(Stage::Pruning);
        let prune = prune::prune(&checkout, &self.config.keep_file, self.config.prune_scope);
        tracing::info!(
            files_removed = prune.files_removed,
            dirs_removed = prune.dirs_removed,
            kept = prune.kept.is_some(),
            "checkout pruned"
        );

        let erased = self.eraser.as_ref().map(|eraser| {
            enter(Stage::SelfDeleting);
            eraser.erase()
        });

        enter(Stage::Terminal);
        Ok(InstallReport {
            checkout,
            prune,
            erased,
        })
    }
}

fn enter(stage: Stage) {
    tracing::debug!(%stage, "stage");
}
