//! Split resolution and merging errors.

use super::error_code::{self, KeygenErrorCode};

/// Programming-invariant violations raised while combining candidate splits.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum SplitError {
    #[error("Inconsistent partition while merging splits: {details}")]
    InconsistentPartition { details: String },
}

impl KeygenErrorCode for SplitError {
    fn error_code(&self) -> &'static str {
        error_code::INCONSISTENT_PARTITION
    }
}
