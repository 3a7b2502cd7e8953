//! Hydration errors.

use super::error_code::{self, KeygenErrorCode};
use super::SourceError;

#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum HydrationError {
    #[error("Hydration root must be a taxon node, got a {found} node")]
    InvalidRoot { found: &'static str },

    #[error("Catalog lookup failed during hydration: {0}")]
    Source(#[from] SourceError),
}

impl KeygenErrorCode for HydrationError {
    fn error_code(&self) -> &'static str {
        match self {
            Self::InvalidRoot { .. } => error_code::INVALID_ROOT,
            Self::Source(e) => e.error_code(),
        }
    }
}
