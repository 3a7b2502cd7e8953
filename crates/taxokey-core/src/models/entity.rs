//! Taxon entities and their recorded trait observations.

use serde::{Deserialize, Serialize};

use crate::types::{CategoryId, CharacterId, EntityId, TraitId};

/// A discrete value a character can take.
///
/// `canonical_id` resolves aliases to their canonical identity. All set and
/// grouping logic operates on `canonical_id`, never on the raw `id`.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Trait {
    pub id: TraitId,
    pub canonical_id: TraitId,
    pub label: String,
}

impl Trait {
    /// A trait that is its own canonical form.
    pub fn canonical(id: TraitId, label: impl Into<String>) -> Self {
        Self {
            id,
            canonical_id: id,
            label: label.into(),
        }
    }
}

/// Categorical observation of one character on one entity.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Observation {
    pub character_id: CharacterId,
    pub category_id: CategoryId,
    pub trait_values: Vec<Trait>,
}

/// Structural record returned by the taxon source for one entity.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct EntityRecord {
    pub id: EntityId,
    pub rank: String,
    pub display_name: String,
    #[serde(default)]
    pub child_ids: Vec<EntityId>,
}

/// An entity assembled during discovery: structure plus observations.
///
/// Immutable once discovered. `subtaxon_ids` only lists children that were
/// themselves admitted to the same discovery run.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct EntityNode {
    pub id: EntityId,
    pub display_rank: String,
    pub subtaxon_ids: Vec<EntityId>,
    pub trait_observations: Vec<Observation>,
}

impl EntityNode {
    /// Observations recorded for `character_id`, in recorded order.
    pub fn observations_for(
        &self,
        character_id: CharacterId,
    ) -> impl Iterator<Item = &Observation> + '_ {
        self.trait_observations
            .iter()
            .filter(move |o| o.character_id == character_id)
    }

    /// Whether any observation on this entity is tagged with `category_id`.
    pub fn has_category(&self, category_id: CategoryId) -> bool {
        self.trait_observations
            .iter()
            .any(|o| o.category_id == category_id)
    }
}
