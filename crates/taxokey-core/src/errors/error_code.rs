//! KeygenErrorCode trait for the worker-protocol boundary.

/// Every error enum implements this to provide a stable, machine-readable
/// code alongside its human-readable message.
pub trait KeygenErrorCode {
    /// Returns the error code string (e.g., "EMPTY_SUBTREE").
    fn error_code(&self) -> &'static str;

    /// Returns the formatted wire string: `[ERROR_CODE] message`.
    fn wire_string(&self) -> String
    where
        Self: std::fmt::Display,
    {
        format!("[{}] {}", self.error_code(), self)
    }
}

// Error code constants for the worker boundary.
pub const INVALID_OPTIONS: &str = "INVALID_OPTIONS";
pub const EMPTY_SUBTREE: &str = "EMPTY_SUBTREE";
pub const MISSING_ENTITY: &str = "MISSING_ENTITY";
pub const INCONSISTENT_PARTITION: &str = "INCONSISTENT_PARTITION";
pub const INVALID_ROOT: &str = "INVALID_ROOT";
pub const SOURCE_ERROR: &str = "SOURCE_ERROR";
pub const CONFIG_ERROR: &str = "CONFIG_ERROR";
pub const WORKER_ERROR: &str = "WORKER_ERROR";
