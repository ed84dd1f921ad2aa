//! `git clone` as an external process.

use std::path::Path;
use std::process::Command;

use super::{FetchError, FetchStatus, Fetcher};

/// Clones with the system git client. Output goes straight to the terminal
/// so the user sees git's own progress and error messages.
#[derive(Debug, Clone)]
pub struct GitFetcher {
    program: String,
}

impl GitFetcher {
    pub fn new(program: impl Into<String>) -> Self {
        Self {
            program: program.into(),
        }
    }
}

impl Default for GitFetcher {
    fn default() -> Self {
        Self::new("git")
    }
}

impl Fetcher for GitFetcher {
    fn fetch(&self, url: &str, dest: &Path) -> Result<FetchStatus, FetchError> {
        tracing::debug!(program = %self.program, url, dest = %dest.display(), "spawning clone");
        let status = Command::new(&self.program)
            .arg("clone")
            .arg(url)
            .arg(dest)
            .status()
            .map_err(|source| FetchError::Spawn {
                program: self.program.clone(),
                source,
            })?;
        let status = FetchStatus::from(status);
        tracing::debug!(code = ?status.code, "clone finished");
        Ok(status)
    }
}
