//! Error types for modget core

use thiserror::Error;

/// Errors that can occur while resolving or downloading a mod
///
/// Recoverable conditions (non-200 responses, a missing install link) are
/// not errors; they are reported as a `SkipReason` on the outcome.
#[derive(Debug, Error)]
pub enum ModgetError {
    #[error("Network error: {0}")]
    Network(#[from] reqwest::Error),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("Invalid URL: {0}")]
    InvalidUrl(String),

    #[error("Lookup page has no mod link")]
    MissingModLink,

    #[error("Lookup page has no latest version information table")]
    MissingTable,

    #[error("Latest version table has no rows")]
    MissingRow,

    #[error("Latest version row has {found} cells, expected at least 4")]
    MissingCells { found: usize },

    #[error("Malformed file ID: {0:?}")]
    MalformedFileId(String),

    #[error("Invalid selector: {0}")]
    Selector(String),
}

impl ModgetError {
    /// Check if this error should stop the batch
    ///
    /// Page structure and identifier faults mean the lookup site changed
    /// shape, so continuing would only repeat the failure.
    pub fn is_fatal(&self) -> bool {
        match self {
            ModgetError::Network(_)
            | ModgetError::Io(_)
            | ModgetError::InvalidUrl(_)
            | ModgetError::MissingModLink
            | ModgetError::MissingTable
            | ModgetError::MissingRow
            | ModgetError::MissingCells { .. }
            | ModgetError::MalformedFileId(_)
            | ModgetError::Selector(_) => true,
        }
    }

    /// Whether the error comes from the shape of the lookup page
    pub fn is_parse_error(&self) -> bool {
        matches!(
            self,
            ModgetError::MissingModLink
                | ModgetError::MissingTable
                | ModgetError::MissingRow
                | ModgetError::MissingCells { .. }
        )
    }
}
