//! Bulk display lookups used by the hydrator.

use crate::errors::SourceResult;
use crate::models::{CategoryRecord, CharacterRecord, EntityRecord, TraitValueRecord};
use crate::types::{CategoryId, CharacterId, EntityId, TraitId};

/// Batched lookups by id. Each call returns records for the ids it knows and
/// silently omits the rest.
pub trait CatalogLookup: Send + Sync {
    fn get_entities_by_ids(&self, ids: &[EntityId]) -> SourceResult<Vec<EntityRecord>>;

    fn get_characters_by_ids(&self, ids: &[CharacterId]) -> SourceResult<Vec<CharacterRecord>>;

    fn get_trait_values_by_ids(&self, ids: &[TraitId]) -> SourceResult<Vec<TraitValueRecord>>;

    fn get_categories_by_ids(&self, ids: &[CategoryId]) -> SourceResult<Vec<CategoryRecord>>;
}
