//! Options normalization errors.

use super::error_code::{self, KeygenErrorCode};

#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum OptionsError {
    #[error("Invalid option {field}: {message}")]
    InvalidOptions { field: String, message: String },
}

impl KeygenErrorCode for OptionsError {
    fn error_code(&self) -> &'static str {
        error_code::INVALID_OPTIONS
    }
}
