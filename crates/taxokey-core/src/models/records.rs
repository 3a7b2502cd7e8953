//! Display records returned by the catalog bulk lookups used in hydration.

use serde::{Deserialize, Serialize};

use crate::types::{CategoryId, CharacterId, TraitId};

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CharacterRecord {
    pub id: CharacterId,
    pub name: String,
    pub category_id: CategoryId,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TraitValueRecord {
    pub id: TraitId,
    pub canonical_id: TraitId,
    pub label: String,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CategoryRecord {
    pub id: CategoryId,
    pub name: String,
}
