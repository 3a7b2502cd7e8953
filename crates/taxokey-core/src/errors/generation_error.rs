//! Top-level generation error.

use super::error_code::KeygenErrorCode;
use super::{DiscoveryError, HydrationError, OptionsError, SourceError, SplitError};

/// Errors that abort a key generation request.
/// Aggregates subsystem errors via `From` conversions.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum GenerationError {
    #[error("Options error: {0}")]
    Options(#[from] OptionsError),

    #[error("Discovery error: {0}")]
    Discovery(#[from] DiscoveryError),

    #[error("Split error: {0}")]
    Split(#[from] SplitError),

    #[error("Hydration error: {0}")]
    Hydration(#[from] HydrationError),

    #[error("Source error: {0}")]
    Source(#[from] SourceError),
}

impl KeygenErrorCode for GenerationError {
    fn error_code(&self) -> &'static str {
        match self {
            Self::Options(e) => e.error_code(),
            Self::Discovery(e) => e.error_code(),
            Self::Split(e) => e.error_code(),
            Self::Hydration(e) => e.error_code(),
            Self::Source(e) => e.error_code(),
        }
    }
}
