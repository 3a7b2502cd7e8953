//! Hierarchy discovery: bounded breadth-first traversal from a root entity.
//!
//! Structure is fetched one BFS level per round trip. Observations are fetched
//! once, in bulk, after the structural pass completes. When admitting the next
//! level would exceed the entity limit, traversal stops *before* that level,
//! yielding a shallower complete subtree rather than a deeper ragged one.

use taxokey_core::errors::DiscoveryError;
use taxokey_core::models::{EntityNode, EntityRecord, KeyOptions};
use taxokey_core::traits::TaxonSource;
use taxokey_core::types::{EntityId, FxHashMap, FxHashSet};
use tracing::{debug, instrument, warn};

/// Flat lookup of every entity admitted by one discovery run.
///
/// Always a strict tree rooted at `root_id`: every node except the root was
/// admitted through exactly one parent, which is also present.
#[derive(Debug, Clone)]
pub struct DiscoveredHierarchy {
    root_id: EntityId,
    nodes: FxHashMap<EntityId, EntityNode>,
    order: Vec<EntityId>,
    depth_reached: usize,
    truncated: bool,
    errors: Vec<DiscoveryError>,
}

impl DiscoveredHierarchy {
    pub fn root_id(&self) -> EntityId {
        self.root_id
    }

    pub fn root(&self) -> Option<&EntityNode> {
        self.nodes.get(&self.root_id)
    }

    pub fn get(&self, id: EntityId) -> Option<&EntityNode> {
        self.nodes.get(&id)
    }

    pub fn contains(&self, id: EntityId) -> bool {
        self.nodes.contains_key(&id)
    }

    pub fn len(&self) -> usize {
        self.nodes.len()
    }

    pub fn is_empty(&self) -> bool {
        self.nodes.is_empty()
    }

    /// Entity ids in BFS discovery order.
    pub fn order(&self) -> &[EntityId] {
        &self.order
    }

    /// Admitted children of `id`, or an empty slice.
    pub fn children(&self, id: EntityId) -> &[EntityId] {
        self.nodes
            .get(&id)
            .map(|n| n.subtaxon_ids.as_slice())
            .unwrap_or(&[])
    }

    /// Deepest BFS level (root = 0) from which at least one entity was admitted.
    pub fn depth_reached(&self) -> usize {
        self.depth_reached
    }

    /// Whether the entity limit stopped traversal before the hierarchy was exhausted.
    pub fn is_truncated(&self) -> bool {
        self.truncated
    }

    /// Non-fatal errors collected during traversal.
    pub fn errors(&self) -> &[DiscoveryError] {
        &self.errors
    }

    pub fn skipped(&self) -> impl Iterator<Item = EntityId> + '_ {
        self.errors.iter().filter_map(|e| match e {
            DiscoveryError::MissingEntity { id } => Some(*id),
            _ => None,
        })
    }
}

/// Discover the subtree under `root_id`, bounded by `options.entity_limit()`.
///
/// Fails with [`DiscoveryError::EmptySubtree`] when nothing is reachable.
/// Entities that vanish mid-traversal are skipped and recorded as
/// [`DiscoveryError::MissingEntity`] on the result.
#[instrument(skip(source, options), fields(root = %root_id, limit = options.entity_limit()))]
pub fn discover(
    source: &dyn TaxonSource,
    root_id: EntityId,
    options: &KeyOptions,
) -> Result<DiscoveredHierarchy, DiscoveryError> {
    let limit = options.entity_limit();

    let mut records: FxHashMap<EntityId, EntityRecord> = FxHashMap::default();
    let mut admitted_children: FxHashMap<EntityId, Vec<EntityId>> = FxHashMap::default();
    let mut order: Vec<EntityId> = Vec::new();
    let mut seen: FxHashSet<EntityId> = FxHashSet::default();
    let mut errors = Vec::new();

    // (entity, parent it was reached through)
    let mut frontier: Vec<(EntityId, Option<EntityId>)> = vec![(root_id, None)];
    seen.insert(root_id);

    let mut level = 0usize;
    let mut depth_reached = 0usize;
    let mut truncated = false;

    while !frontier.is_empty() {
        if order.len() + frontier.len() > limit {
            warn!(
                level,
                visited = order.len(),
                frontier = frontier.len(),
                limit,
                "entity limit reached, discarding remaining levels"
            );
            truncated = true;
            break;
        }

        let ids: Vec<EntityId> = frontier.iter().map(|(id, _)| *id).collect();
        let mut fetched: FxHashMap<EntityId, EntityRecord> = source
            .get_entities(&ids)?
            .into_iter()
            .map(|r| (r.id, r))
            .collect();

        let mut next = Vec::new();
        let mut admitted = 0usize;
        for (id, parent) in frontier {
            let Some(record) = fetched.remove(&id) else {
                warn!(entity = %id, level, "entity missing from source, skipping");
                errors.push(DiscoveryError::MissingEntity { id });
                continue;
            };
            if let Some(parent) = parent {
                admitted_children.entry(parent).or_default().push(id);
            }
            for child in &record.child_ids {
                if seen.insert(*child) {
                    next.push((*child, Some(id)));
                }
            }
            order.push(id);
            records.insert(id, record);
            admitted += 1;
        }

        if admitted > 0 {
            depth_reached = level;
        }
        debug!(level, admitted, next = next.len(), "discovery level complete");
        level += 1;
        frontier = next;
    }

    if order.is_empty() {
        return Err(DiscoveryError::EmptySubtree { root_id });
    }

    let mut observations = source.get_entities_trait_observations(&order)?;

    let nodes = order
        .iter()
        .filter_map(|id| {
            let record = records.remove(id)?;
            Some((
                *id,
                EntityNode {
                    id: *id,
                    display_rank: record.rank,
                    subtaxon_ids: admitted_children.remove(id).unwrap_or_default(),
                    trait_observations: observations.remove(id).unwrap_or_default(),
                },
            ))
        })
        .collect();

    Ok(DiscoveredHierarchy {
        root_id,
        nodes,
        order,
        depth_reached,
        truncated,
        errors,
    })
}
