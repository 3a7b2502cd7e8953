//! Configuration system for taxokey.
//! TOML-based, layered resolution: overrides > env > project > user > defaults.

pub mod generation_config;
pub mod hydration_config;
pub mod keygen_config;
pub mod worker_config;

pub use generation_config::GenerationConfig;
pub use hydration_config::HydrationConfig;
pub use keygen_config::{ConfigOverrides, KeygenConfig};
pub use worker_config::WorkerConfig;
