//! Candidate splits of a sibling group and the rationale attached to each branch.

use serde::{Deserialize, Serialize};

use super::entity::Trait;
use crate::types::{CategoryId, CharacterId, EntityId};

/// Whether members of a presence branch carry the category or not.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum PresenceStatus {
    Present,
    Absent,
}

/// One "character has these traits" statement.
///
/// `inverted` clauses read as "none of these traits" and mark a catch-all branch.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TraitClause {
    pub character_id: CharacterId,
    pub category_id: CategoryId,
    pub traits: Vec<Trait>,
    pub inverted: bool,
}

/// Why a set of members was grouped into a branch.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum Rationale {
    /// One or more trait clauses. Several after merging.
    TraitClauses { clauses: Vec<TraitClause> },
    /// Presence or absence of any trait in a category.
    #[serde(rename_all = "camelCase")]
    CategoryPresence {
        category_id: CategoryId,
        status: PresenceStatus,
    },
}

impl Rationale {
    pub fn clause_count(&self) -> usize {
        match self {
            Self::TraitClauses { clauses } => clauses.len(),
            Self::CategoryPresence { .. } => 0,
        }
    }

    pub fn inverted_clause_count(&self) -> usize {
        match self {
            Self::TraitClauses { clauses } => clauses.iter().filter(|c| c.inverted).count(),
            Self::CategoryPresence { .. } => 0,
        }
    }

    /// A catch-all group rather than a positive identification.
    pub fn is_unresolved(&self) -> bool {
        match self {
            Self::TraitClauses { clauses } => clauses.iter().any(|c| c.inverted),
            Self::CategoryPresence { status, .. } => *status == PresenceStatus::Absent,
        }
    }
}

/// One side of a split.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SplitBranch {
    pub members: Vec<EntityId>,
    pub rationale: Rationale,
}

impl SplitBranch {
    pub fn len(&self) -> usize {
        self.members.len()
    }

    pub fn is_empty(&self) -> bool {
        self.members.is_empty()
    }

    /// Members in ascending id order.
    pub fn sorted_members(&self) -> Vec<EntityId> {
        let mut members = self.members.clone();
        members.sort_unstable();
        members
    }
}

/// Which resolver produced a split. Declaration order is the tie-break order.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum SplitOrigin {
    TraitDefinition,
    CategoryPresence,
}

/// A candidate partition of a sibling group.
///
/// Branch member sets are pairwise disjoint, cover the input group, and
/// there are at least two branches.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SplitResult {
    pub branches: Vec<SplitBranch>,
    pub score: f64,
    pub origin: SplitOrigin,
    /// Position in resolver discovery order, used to break score ties.
    pub ordinal: usize,
}

impl SplitResult {
    pub fn branch_sizes(&self) -> Vec<usize> {
        self.branches.iter().map(SplitBranch::len).collect()
    }

    pub fn clause_count(&self) -> usize {
        self.branches.iter().map(|b| b.rationale.clause_count()).sum()
    }

    pub fn inverted_clause_count(&self) -> usize {
        self.branches
            .iter()
            .map(|b| b.rationale.inverted_clause_count())
            .sum()
    }

    pub fn has_unresolved_branch(&self) -> bool {
        self.branches.iter().any(|b| b.rationale.is_unresolved())
    }

    /// Structural identity of the partition, independent of branch order.
    pub fn partition_key(&self) -> PartitionKey {
        let mut parts: Vec<Vec<EntityId>> =
            self.branches.iter().map(SplitBranch::sorted_members).collect();
        parts.sort_unstable();
        PartitionKey(parts)
    }
}

/// Sorted list of each branch's sorted member ids.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct PartitionKey(pub Vec<Vec<EntityId>>);
