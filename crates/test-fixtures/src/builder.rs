//! Fluent construction of in-memory taxonomies.
//!
//! ```ignore
//! let catalog = TaxonomyBuilder::new()
//!     .category(1, "cap")
//!     .character(10, "cap color", 1)
//!     .trait_value(100, "red")
//!     .alias(101, "crimson", 100)
//!     .taxon(1, "genus", "Amanita", &[2, 3])
//!     .taxon(2, "species", "A. muscaria", &[])
//!     .taxon(3, "species", "A. pantherina", &[])
//!     .observe(2, 10, &[100])
//!     .observe(3, 10, &[101])
//!     .build();
//! ```

use taxokey_core::models::{
    CategoryRecord, CharacterRecord, EntityRecord, Observation, Trait, TraitValueRecord,
};
use taxokey_core::types::{CategoryId, CharacterId, EntityId, TraitId};

use crate::catalog::InMemoryCatalog;

#[derive(Debug, Default)]
pub struct TaxonomyBuilder {
    catalog: InMemoryCatalog,
    pending: Vec<(EntityId, CharacterId, Vec<TraitId>)>,
}

impl TaxonomyBuilder {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn category(mut self, id: u64, name: &str) -> Self {
        self.catalog.categories.insert(
            CategoryId(id),
            CategoryRecord {
                id: CategoryId(id),
                name: name.to_string(),
            },
        );
        self
    }

    pub fn character(mut self, id: u64, name: &str, category: u64) -> Self {
        self.catalog.characters.insert(
            CharacterId(id),
            CharacterRecord {
                id: CharacterId(id),
                name: name.to_string(),
                category_id: CategoryId(category),
            },
        );
        self
    }

    pub fn trait_value(self, id: u64, label: &str) -> Self {
        self.alias(id, label, id)
    }

    /// Register a trait value whose canonical identity is `canonical`.
    pub fn alias(mut self, id: u64, label: &str, canonical: u64) -> Self {
        self.catalog.trait_values.insert(
            TraitId(id),
            TraitValueRecord {
                id: TraitId(id),
                canonical_id: TraitId(canonical),
                label: label.to_string(),
            },
        );
        self
    }

    /// Register a taxon. Children may reference ids that are never registered,
    /// which the source then reports as missing.
    pub fn taxon(mut self, id: u64, rank: &str, name: &str, children: &[u64]) -> Self {
        self.catalog.entities.insert(
            EntityId(id),
            EntityRecord {
                id: EntityId(id),
                rank: rank.to_string(),
                display_name: name.to_string(),
                child_ids: children.iter().copied().map(EntityId).collect(),
            },
        );
        self
    }

    /// Record that `entity` shows `traits` for `character`.
    /// Resolved against registered characters and trait values at `build` time.
    pub fn observe(mut self, entity: u64, character: u64, traits: &[u64]) -> Self {
        self.pending.push((
            EntityId(entity),
            CharacterId(character),
            traits.iter().copied().map(TraitId).collect(),
        ));
        self
    }

    pub fn build(mut self) -> InMemoryCatalog {
        for (entity, character_id, trait_ids) in std::mem::take(&mut self.pending) {
            let category_id = self
                .catalog
                .characters
                .get(&character_id)
                .map(|c| c.category_id)
                .unwrap_or(CategoryId(0));
            let trait_values = trait_ids
                .into_iter()
                .map(|id| match self.catalog.trait_values.get(&id) {
                    Some(record) => Trait {
                        id,
                        canonical_id: record.canonical_id,
                        label: record.label.clone(),
                    },
                    None => Trait::canonical(id, format!("trait-{id}")),
                })
                .collect();
            self.catalog
                .observations
                .entry(entity)
                .or_default()
                .push(Observation {
                    character_id,
                    category_id,
                    trait_values,
                });
        }
        self.catalog
    }
}
