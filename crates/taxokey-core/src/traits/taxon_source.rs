//! Structural and observation access used by hierarchy discovery.

use crate::errors::SourceResult;
use crate::models::{EntityRecord, Observation};
use crate::types::{EntityId, FxHashMap};

/// Read access to the entity hierarchy and recorded trait observations.
pub trait TaxonSource: Send + Sync {
    /// Fetch one entity's structural record. `Ok(None)` when it does not exist.
    fn get_entity(&self, id: EntityId) -> SourceResult<Option<EntityRecord>>;

    /// Fetch a whole BFS level in one round trip. Unknown ids are omitted.
    ///
    /// The default implementation falls back to one `get_entity` call per id.
    fn get_entities(&self, ids: &[EntityId]) -> SourceResult<Vec<EntityRecord>> {
        let mut out = Vec::with_capacity(ids.len());
        for id in ids {
            if let Some(record) = self.get_entity(*id)? {
                out.push(record);
            }
        }
        Ok(out)
    }

    /// Observations recorded for a single entity.
    fn get_entity_trait_observations(&self, id: EntityId) -> SourceResult<Vec<Observation>>;

    /// Observations for many entities in one round trip.
    /// Entities without observations may be absent from the map.
    fn get_entities_trait_observations(
        &self,
        ids: &[EntityId],
    ) -> SourceResult<FxHashMap<EntityId, Vec<Observation>>> {
        let mut out = FxHashMap::default();
        for id in ids {
            out.insert(*id, self.get_entity_trait_observations(*id)?);
        }
        Ok(out)
    }
}
