//! Display-ready key, produced by hydrating a [`KeyNode`](super::KeyNode) tree.

use serde::{Deserialize, Serialize};

use super::split::PresenceStatus;
use crate::types::{CategoryId, CharacterId, EntityId, KeyBranchId, KeyNodeId, TraitId};

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct HydratedTrait {
    pub id: TraitId,
    pub label: String,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct HydratedClause {
    pub character_id: CharacterId,
    pub character_name: String,
    pub category_id: CategoryId,
    pub category_name: String,
    pub traits: Vec<HydratedTrait>,
    pub inverted: bool,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum HydratedRationale {
    TraitClauses {
        clauses: Vec<HydratedClause>,
    },
    #[serde(rename_all = "camelCase")]
    CategoryPresence {
        category_id: CategoryId,
        category_name: String,
        status: PresenceStatus,
    },
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum HydratedNode {
    #[serde(rename_all = "camelCase")]
    Taxon {
        id: EntityId,
        display_name: String,
        rank: String,
        branches: Vec<HydratedBranch>,
    },
    Diff {
        id: KeyNodeId,
        branches: Vec<HydratedBranch>,
    },
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct HydratedBranch {
    pub id: KeyBranchId,
    pub rationale: Option<HydratedRationale>,
    pub child: HydratedNode,
}

impl HydratedNode {
    pub fn branches(&self) -> &[HydratedBranch] {
        match self {
            Self::Taxon { branches, .. } | Self::Diff { branches, .. } => branches,
        }
    }

    pub fn display_name(&self) -> Option<&str> {
        match self {
            Self::Taxon { display_name, .. } => Some(display_name),
            Self::Diff { .. } => None,
        }
    }
}
