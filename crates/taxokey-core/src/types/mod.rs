//! Identifier and collection types for taxokey.
//! FxHashMap, SmallVec, and typed integer IDs.

pub mod collections;
pub mod identifiers;

pub use collections::{FxHashMap, FxHashSet};
pub use identifiers::{CategoryId, CharacterId, EntityId, KeyBranchId, KeyNodeId, TraitId};
