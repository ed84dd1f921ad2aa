use std::io;

use super::FetchStatus;

/// Clone failure. Both variants are fatal for the install run.
#[derive(Debug, thiserror::Error)]
pub enum FetchError {
    /// The clone program could not be started (not installed, not executable).
    #[error("could not run {program}")]
    Spawn {
        program: String,
        #[source]
        source: io::Error,
    },
    /// The clone ran and reported failure.
    #[error("clone exited with {}", describe_exit(.code))]
    Failed { code: Option<i32> },
}

fn describe_exit(code: &Option<i32>) -> String {
    match code {
        Some(code) => format!("status {}", code),
        None => "a signal".to_string(),
    }
}

/// Accept a successful fetch, reject anything else.
pub fn verify(status: FetchStatus) -> Result<(), FetchError> {
    if status.success() {
        Ok(())
    } else {
        Err(FetchError::Failed { code: status.code })
    }
}
