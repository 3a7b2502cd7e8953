//! The id-only identification key produced by the key builder.
//!
//! A tree, not a graph: each node is owned by exactly one parent branch.

use serde::{Deserialize, Serialize};

use super::split::Rationale;
use crate::types::{EntityId, KeyBranchId, KeyNodeId};

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum KeyNode {
    /// A resolved taxon.
    Taxon {
        id: EntityId,
        branches: Vec<KeyBranch>,
    },
    /// A group of more than one taxon still being split at the same level.
    Diff {
        id: KeyNodeId,
        branches: Vec<KeyBranch>,
    },
}

/// Edge from a node to a child. `rationale` is `None` for pass-through edges.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct KeyBranch {
    pub id: KeyBranchId,
    pub rationale: Option<Rationale>,
    pub child: KeyNode,
}

impl KeyNode {
    pub fn branches(&self) -> &[KeyBranch] {
        match self {
            Self::Taxon { branches, .. } | Self::Diff { branches, .. } => branches,
        }
    }

    pub fn is_taxon(&self) -> bool {
        matches!(self, Self::Taxon { .. })
    }

    pub fn taxon_id(&self) -> Option<EntityId> {
        match self {
            Self::Taxon { id, .. } => Some(*id),
            Self::Diff { .. } => None,
        }
    }

    /// Every taxon id in the subtree, in pre-order.
    pub fn taxon_ids(&self) -> Vec<EntityId> {
        let mut out = Vec::new();
        self.walk(&mut |node| {
            if let Some(id) = node.taxon_id() {
                out.push(id);
            }
        });
        out
    }

    pub fn taxon_count(&self) -> usize {
        let mut count = 0;
        self.walk(&mut |node| count += usize::from(node.is_taxon()));
        count
    }

    pub fn diff_count(&self) -> usize {
        let mut count = 0;
        self.walk(&mut |node| count += usize::from(!node.is_taxon()));
        count
    }

    /// Longest root-to-leaf path, counted in edges.
    pub fn depth(&self) -> usize {
        self.branches()
            .iter()
            .map(|b| 1 + b.child.depth())
            .max()
            .unwrap_or(0)
    }

    /// Pre-order visit of this node and all descendants.
    pub fn walk<F: FnMut(&KeyNode)>(&self, f: &mut F) {
        f(self);
        for branch in self.branches() {
            branch.child.walk(f);
        }
    }
}
