//! Deleting the installer once its work is done.

use std::fs;
use std::io;
use std::path::PathBuf;
use std::thread;
use std::time::Duration;

/// Which file the eraser removes.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum EraseTarget {
    /// The running executable. Uses `self_replace` so this also works on
    /// Windows, where a running image cannot simply be unlinked.
    CurrentExe,
    /// A specific file.
    Path(PathBuf),
}

#[derive(Debug, Clone)]
pub struct SelfEraser {
    target: EraseTarget,
    delay: Duration,
}

impl SelfEraser {
    pub fn new(target: EraseTarget, delay: Duration) -> Self {
        Self { target, delay }
    }

    /// Sleep for the configured delay, then delete the target.
    /// Returns whether the file is gone; failures are logged, not returned.
    pub fn erase(&self) -> bool {
        if !self.delay.is_zero() {
            thread::sleep(self.delay);
        }
        match self.delete() {
            Ok(()) => {
                tracing::info!(file = ?self.target, "installer removed");
                true
            }
            Err(e) => {
                tracing::warn!(file = ?self.target, "could not remove installer: {}", e);
                false
            }
        }
    }

    fn delete(&self) -> io::Result<()> {
        match &self.target {
            EraseTarget::CurrentExe => self_replace::self_delete(),
            EraseTarget::Path(path) => fs::remove_file(path),
        }
    }
}
