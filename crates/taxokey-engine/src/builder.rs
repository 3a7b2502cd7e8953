//! Recursive key builder.
//!
//! Walks the discovered hierarchy top-down. At each level the children of a
//! taxon form a sibling group that is split until every branch holds one
//! taxon; each of those taxa then has its own children keyed beneath it.
//! Every call returns an owned subtree; nothing is mutated after it is returned.

use taxokey_core::errors::SplitError;
use taxokey_core::events::{EventDispatcher, SplitSelectedEvent};
use taxokey_core::models::{
    EntityNode, KeyBranch, KeyNode, KeyOptions, Rationale, SplitBranch, SplitOrigin,
};
use taxokey_core::types::{EntityId, KeyBranchId, KeyNodeId};
use tracing::{debug, instrument};

use crate::discovery::DiscoveredHierarchy;
use crate::split;

/// Counters collected while building one key.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct BuildStats {
    /// Positive-scoring candidates considered across all sibling groups.
    pub splits_evaluated: usize,
    pub trait_splits_selected: usize,
    pub category_splits_selected: usize,
    /// Groups of two or more members for which no candidate existed.
    pub unsplit_groups: usize,
}

pub struct KeyBuilder<'a> {
    hierarchy: &'a DiscoveredHierarchy,
    options: KeyOptions,
    events: Option<&'a EventDispatcher>,
    next_node: u64,
    next_branch: u64,
    stats: BuildStats,
}

impl<'a> KeyBuilder<'a> {
    pub fn new(hierarchy: &'a DiscoveredHierarchy, options: KeyOptions) -> Self {
        Self {
            hierarchy,
            options,
            events: None,
            next_node: 0,
            next_branch: 0,
            stats: BuildStats::default(),
        }
    }

    /// Report every selected split to `events`.
    pub fn with_events(mut self, events: &'a EventDispatcher) -> Self {
        self.events = Some(events);
        self
    }

    pub fn stats(&self) -> &BuildStats {
        &self.stats
    }

    /// Build the key rooted at the hierarchy's root taxon.
    #[instrument(skip(self), fields(root = %self.hierarchy.root_id()))]
    pub fn build(&mut self) -> Result<KeyNode, SplitError> {
        let root = self.hierarchy.root_id();
        let branches = self.descend(root)?;
        Ok(KeyNode::Taxon { id: root, branches })
    }

    /// Key the admitted children of `parent`.
    fn descend(&mut self, parent: EntityId) -> Result<Vec<KeyBranch>, SplitError> {
        let hierarchy = self.hierarchy;
        self.key_group(hierarchy.children(parent))
    }

    fn key_group(&mut self, group: &[EntityId]) -> Result<Vec<KeyBranch>, SplitError> {
        match group {
            [] => Ok(Vec::new()),
            [only] => Ok(vec![self.taxon_branch(*only, None)?]),
            _ => self.split_group(group),
        }
    }

    fn split_group(&mut self, group: &[EntityId]) -> Result<Vec<KeyBranch>, SplitError> {
        let hierarchy = self.hierarchy;
        let members: Vec<&EntityNode> = group.iter().filter_map(|id| hierarchy.get(*id)).collect();
        let candidates = split::candidates(&members, &self.options)?;
        self.stats.splits_evaluated += candidates.len();

        let Some(best) = split::select::best(&candidates).cloned() else {
            debug!(size = group.len(), "no split found, listing members individually");
            self.stats.unsplit_groups += 1;
            return group
                .iter()
                .map(|id| self.taxon_branch(*id, None))
                .collect();
        };

        match best.origin {
            SplitOrigin::TraitDefinition => self.stats.trait_splits_selected += 1,
            SplitOrigin::CategoryPresence => self.stats.category_splits_selected += 1,
        }
        debug!(
            size = group.len(),
            branches = best.branches.len(),
            origin = ?best.origin,
            score = best.score,
            "split selected"
        );
        if let Some(events) = self.events {
            events.emit_split_selected(&SplitSelectedEvent {
                group_size: group.len(),
                branch_count: best.branches.len(),
                origin: best.origin,
                score: best.score,
            });
        }

        let mut out = Vec::with_capacity(best.branches.len());
        for SplitBranch { members, rationale } in best.branches {
            match members.as_slice() {
                [only] => out.push(self.taxon_branch(*only, Some(rationale))?),
                subset => out.push(self.diff_branch(subset, rationale)?),
            }
        }
        Ok(out)
    }

    /// A branch to a single taxon, which then has its own children keyed.
    fn taxon_branch(
        &mut self,
        id: EntityId,
        rationale: Option<Rationale>,
    ) -> Result<KeyBranch, SplitError> {
        let branch_id = self.next_branch_id();
        let branches = self.descend(id)?;
        Ok(KeyBranch {
            id: branch_id,
            rationale,
            child: KeyNode::Taxon { id, branches },
        })
    }

    /// A branch to a still-undifferentiated subset, split again at the same level.
    fn diff_branch(
        &mut self,
        members: &[EntityId],
        rationale: Rationale,
    ) -> Result<KeyBranch, SplitError> {
        let branch_id = self.next_branch_id();
        let node_id = self.next_node_id();
        let branches = self.key_group(members)?;
        Ok(KeyBranch {
            id: branch_id,
            rationale: Some(rationale),
            child: KeyNode::Diff {
                id: node_id,
                branches,
            },
        })
    }

    fn next_branch_id(&mut self) -> KeyBranchId {
        self.next_branch += 1;
        KeyBranchId(self.next_branch)
    }

    fn next_node_id(&mut self) -> KeyNodeId {
        self.next_node += 1;
        KeyNodeId(self.next_node)
    }
}
