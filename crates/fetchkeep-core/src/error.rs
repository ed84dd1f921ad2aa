//! Error types surfaced by the install pipeline.
//!
//! Only the clone can fail a run; pruning and self-erase report through
//! logs and the `InstallReport` instead.

use std::io;
use std::path::PathBuf;

use crate::fetch::FetchError;

#[derive(Debug, thiserror::Error)]
pub enum InstallError {
    /// The clone could not be started or exited unsuccessfully.
    #[error("Failed to clone {url}")]
    Clone {
        url: String,
        #[source]
        source: FetchError,
    },
    /// The working directory the checkout is created in is unusable.
    #[error("cannot use working directory {}", .path.display())]
    WorkDir {
        path: PathBuf,
        #[source]
        source: io::Error,
    },
    /// No checkout directory name could be derived.
    #[error("invalid installer configuration: {0}")]
    Config(String),
}
