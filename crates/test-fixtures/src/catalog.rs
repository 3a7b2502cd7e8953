//! In-memory implementation of [`TaxonSource`] and [`CatalogLookup`].

use std::sync::atomic::{AtomicUsize, Ordering};

use rustc_hash::FxHashMap;
use taxokey_core::errors::{SourceError, SourceResult};
use taxokey_core::models::{
    CategoryRecord, CharacterRecord, EntityRecord, Observation, TraitValueRecord,
};
use taxokey_core::traits::{CatalogLookup, TaxonSource};
use taxokey_core::types::{CategoryId, CharacterId, EntityId, TraitId};

/// Snapshot of how many times each collaborator method was called.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct CallCounts {
    pub get_entity: usize,
    pub get_entities: usize,
    pub observations_single: usize,
    pub observations_bulk: usize,
    pub entities_by_ids: usize,
    pub characters_by_ids: usize,
    pub trait_values_by_ids: usize,
    pub categories_by_ids: usize,
}

#[derive(Debug, Default)]
struct Counters {
    get_entity: AtomicUsize,
    get_entities: AtomicUsize,
    observations_single: AtomicUsize,
    observations_bulk: AtomicUsize,
    entities_by_ids: AtomicUsize,
    characters_by_ids: AtomicUsize,
    trait_values_by_ids: AtomicUsize,
    categories_by_ids: AtomicUsize,
}

fn bump(counter: &AtomicUsize) {
    counter.fetch_add(1, Ordering::SeqCst);
}

#[derive(Debug, Default)]
pub struct InMemoryCatalog {
    pub(crate) entities: FxHashMap<EntityId, EntityRecord>,
    pub(crate) observations: FxHashMap<EntityId, Vec<Observation>>,
    pub(crate) characters: FxHashMap<CharacterId, CharacterRecord>,
    pub(crate) trait_values: FxHashMap<TraitId, TraitValueRecord>,
    pub(crate) categories: FxHashMap<CategoryId, CategoryRecord>,
    counters: Counters,
}

impl InMemoryCatalog {
    pub fn entity_count(&self) -> usize {
        self.entities.len()
    }

    pub fn entity(&self, id: EntityId) -> Option<&EntityRecord> {
        self.entities.get(&id)
    }

    pub fn call_counts(&self) -> CallCounts {
        let c = &self.counters;
        CallCounts {
            get_entity: c.get_entity.load(Ordering::SeqCst),
            get_entities: c.get_entities.load(Ordering::SeqCst),
            observations_single: c.observations_single.load(Ordering::SeqCst),
            observations_bulk: c.observations_bulk.load(Ordering::SeqCst),
            entities_by_ids: c.entities_by_ids.load(Ordering::SeqCst),
            characters_by_ids: c.characters_by_ids.load(Ordering::SeqCst),
            trait_values_by_ids: c.trait_values_by_ids.load(Ordering::SeqCst),
            categories_by_ids: c.categories_by_ids.load(Ordering::SeqCst),
        }
    }

    /// Zero every call counter.
    pub fn reset_counts(&self) {
        let c = &self.counters;
        for counter in [
            &c.get_entity,
            &c.get_entities,
            &c.observations_single,
            &c.observations_bulk,
            &c.entities_by_ids,
            &c.characters_by_ids,
            &c.trait_values_by_ids,
            &c.categories_by_ids,
        ] {
            counter.store(0, Ordering::SeqCst);
        }
    }
}

impl TaxonSource for InMemoryCatalog {
    fn get_entity(&self, id: EntityId) -> SourceResult<Option<EntityRecord>> {
        bump(&self.counters.get_entity);
        Ok(self.entities.get(&id).cloned())
    }

    fn get_entities(&self, ids: &[EntityId]) -> SourceResult<Vec<EntityRecord>> {
        bump(&self.counters.get_entities);
        Ok(ids
            .iter()
            .filter_map(|id| self.entities.get(id).cloned())
            .collect())
    }

    fn get_entity_trait_observations(&self, id: EntityId) -> SourceResult<Vec<Observation>> {
        bump(&self.counters.observations_single);
        Ok(self.observations.get(&id).cloned().unwrap_or_default())
    }

    fn get_entities_trait_observations(
        &self,
        ids: &[EntityId],
    ) -> SourceResult<FxHashMap<EntityId, Vec<Observation>>> {
        bump(&self.counters.observations_bulk);
        Ok(ids
            .iter()
            .filter_map(|id| self.observations.get(id).map(|obs| (*id, obs.clone())))
            .collect())
    }
}

impl CatalogLookup for InMemoryCatalog {
    fn get_entities_by_ids(&self, ids: &[EntityId]) -> SourceResult<Vec<EntityRecord>> {
        bump(&self.counters.entities_by_ids);
        Ok(ids
            .iter()
            .filter_map(|id| self.entities.get(id).cloned())
            .collect())
    }

    fn get_characters_by_ids(&self, ids: &[CharacterId]) -> SourceResult<Vec<CharacterRecord>> {
        bump(&self.counters.characters_by_ids);
        Ok(ids
            .iter()
            .filter_map(|id| self.characters.get(id).cloned())
            .collect())
    }

    fn get_trait_values_by_ids(&self, ids: &[TraitId]) -> SourceResult<Vec<TraitValueRecord>> {
        bump(&self.counters.trait_values_by_ids);
        Ok(ids
            .iter()
            .filter_map(|id| self.trait_values.get(id).cloned())
            .collect())
    }

    fn get_categories_by_ids(&self, ids: &[CategoryId]) -> SourceResult<Vec<CategoryRecord>> {
        bump(&self.counters.categories_by_ids);
        Ok(ids
            .iter()
            .filter_map(|id| self.categories.get(id).cloned())
            .collect())
    }
}

/// A collaborator whose every call fails, for error-path tests.
#[derive(Debug, Clone)]
pub struct FailingSource {
    pub message: String,
}

impl FailingSource {
    pub fn new(message: impl Into<String>) -> Self {
        Self {
            message: message.into(),
        }
    }

    fn fail<T>(&self) -> SourceResult<T> {
        Err(SourceError::Unavailable {
            message: self.message.clone(),
        })
    }
}

impl TaxonSource for FailingSource {
    fn get_entity(&self, _id: EntityId) -> SourceResult<Option<EntityRecord>> {
        self.fail()
    }

    fn get_entity_trait_observations(&self, _id: EntityId) -> SourceResult<Vec<Observation>> {
        self.fail()
    }
}

impl CatalogLookup for FailingSource {
    fn get_entities_by_ids(&self, _ids: &[EntityId]) -> SourceResult<Vec<EntityRecord>> {
        self.fail()
    }

    fn get_characters_by_ids(&self, _ids: &[CharacterId]) -> SourceResult<Vec<CharacterRecord>> {
        self.fail()
    }

    fn get_trait_values_by_ids(&self, _ids: &[TraitId]) -> SourceResult<Vec<TraitValueRecord>> {
        self.fail()
    }

    fn get_categories_by_ids(&self, _ids: &[CategoryId]) -> SourceResult<Vec<CategoryRecord>> {
        self.fail()
    }
}
