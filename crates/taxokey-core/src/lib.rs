//! # taxokey-core
//!
//! Foundation crate for the taxokey identification-key engine.
//! Defines the data model, collaborator traits, errors, config, events,
//! tracing setup, and constants. Every other crate in the workspace depends on this.

pub mod config;
pub mod constants;
pub mod errors;
pub mod events;
pub mod models;
pub mod tracing;
pub mod traits;
pub mod types;

// Re-export the most commonly used types at the crate root.
pub use config::KeygenConfig;
pub use errors::{GenerationError, KeygenErrorCode};
pub use models::{
    EntityNode, GenerationOptions, KeyBranch, KeyNode, KeyOptions, Observation, Rationale,
    ShapePreference, SplitBranch, SplitResult, Trait,
};
pub use types::{CategoryId, CharacterId, EntityId, TraitId};
