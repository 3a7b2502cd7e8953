//! Error handling for taxokey.
//! One error enum per subsystem, `thiserror` only, zero `anyhow`.

pub mod config_error;
pub mod discovery_error;
pub mod error_code;
pub mod generation_error;
pub mod hydration_error;
pub mod options_error;
pub mod source_error;
pub mod split_error;
pub mod worker_error;

pub use config_error::ConfigError;
pub use discovery_error::DiscoveryError;
pub use error_code::KeygenErrorCode;
pub use generation_error::GenerationError;
pub use hydration_error::HydrationError;
pub use options_error::OptionsError;
pub use source_error::{SourceError, SourceResult};
pub use split_error::SplitError;
pub use worker_error::WorkerError;
