//! Repository fetch: the clone step and the check of its termination status.
//!
//! A `Fetcher` only reports how the clone ended; `verify` turns that into the
//! go/no-go decision for the rest of the pipeline.

mod git;
mod verify;

use std::path::Path;
use std::process::ExitStatus;

pub use git::GitFetcher;
pub use verify::{verify, FetchError};

/// How a fetch terminated.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct FetchStatus {
    /// Exit code, or `None` if the process was terminated by a signal.
    pub code: Option<i32>,
}

impl FetchStatus {
    pub const SUCCESS: FetchStatus = FetchStatus { code: Some(0) };

    pub fn from_code(code: i32) -> Self {
        Self { code: Some(code) }
    }

    pub fn success(&self) -> bool {
        self.code == Some(0)
    }
}

impl From<ExitStatus> for FetchStatus {
    fn from(status: ExitStatus) -> Self {
        Self {
            code: status.code(),
        }
    }
}

/// Something that can materialize a repository at `dest`.
///
/// `Err` is reserved for failing to run the fetch at all; a fetch that ran and
/// failed returns `Ok` with a non-zero status.
pub trait Fetcher {
    fn fetch(&self, url: &str, dest: &Path) -> Result<FetchStatus, FetchError>;
}

impl<F: Fetcher + ?Sized> Fetcher for &F {
    fn fetch(&self, url: &str, dest: &Path) -> Result<FetchStatus, FetchError> {
        (**self).fetch(url, dest)
    }
}
