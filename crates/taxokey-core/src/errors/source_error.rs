//! Errors reported by the external collaborators (taxon source, catalog).

use super::error_code::{self, KeygenErrorCode};

/// Failures of a collaborator round trip.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum SourceError {
    #[error("Source unavailable: {message}")]
    Unavailable { message: String },

    #[error("Source backend error: {0}")]
    Backend(String),

    #[error("Malformed source record for {id}: {message}")]
    Malformed { id: String, message: String },
}

impl KeygenErrorCode for SourceError {
    fn error_code(&self) -> &'static str {
        error_code::SOURCE_ERROR
    }
}

pub type SourceResult<T> = Result<T, SourceError>;
