//! CLI error types.

use std::fmt;

use tilegrab::fetch::FetchError;
use tilegrab::store::StoreError;

/// Errors that abort a CLI run.
///
/// Everything here is fatal before or at the start of a run; per-tile
/// download failures are handled in the result loop and never surface as a
/// `CliError`.
#[derive(Debug)]
pub enum CliError {
    /// The output directory could not be prepared.
    Store(StoreError),

    /// The HTTP client could not be constructed.
    Fetcher(FetchError),
}

impl fmt::Display for CliError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            CliError::Store(e) => write!(f, "storage error: {}", e),
            CliError::Fetcher(e) => write!(f, "HTTP client error: {}", e),
        }
    }
}

impl std::error::Error for CliError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            CliError::Store(e) => Some(e),
            CliError::Fetcher(e) => Some(e),
        }
    }
}

impl From<StoreError> for CliError {
    fn from(e: StoreError) -> Self {
        CliError::Store(e)
    }
}

impl From<FetchError> for CliError {
    fn from(e: FetchError) -> Self {
        CliError::Fetcher(e)
    }
}
