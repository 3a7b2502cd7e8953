//! Data model shared by the discovery, split, build, and hydration stages.

pub mod entity;
pub mod hydrated;
pub mod key_tree;
pub mod options;
pub mod records;
pub mod split;

pub use entity::{EntityNode, EntityRecord, Observation, Trait};
pub use hydrated::{HydratedBranch, HydratedClause, HydratedNode, HydratedRationale, HydratedTrait};
pub use key_tree::{KeyBranch, KeyNode};
pub use options::{GenerationOptions, KeyOptions, ShapePreference};
pub use records::{CategoryRecord, CharacterRecord, TraitValueRecord};
pub use split::{
    PartitionKey, PresenceStatus, Rationale, SplitBranch, SplitOrigin, SplitResult, TraitClause,
};
