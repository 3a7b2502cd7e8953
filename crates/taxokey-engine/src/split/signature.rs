//! Trait signatures and disjoint grouping with dead-tag propagation.
//!
//! Members are grouped by their exact canonical trait set. Any ambiguity
//! (a partial overlap between two sets, or a set touching an already
//! disqualified trait) kills every trait id involved, and nothing carrying a
//! dead id may ever anchor a clean group again.

use taxokey_core::models::Trait;
use taxokey_core::types::collections::SmallVec4;
use taxokey_core::types::{EntityId, FxHashMap, FxHashSet, TraitId};

/// Sorted, deduplicated canonical trait ids of one observation.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct TraitSignature(SmallVec4<TraitId>);

impl TraitSignature {
    pub fn from_traits(traits: &[Trait]) -> Self {
        let mut ids: SmallVec4<TraitId> = traits.iter().map(|t| t.canonical_id).collect();
        ids.sort_unstable();
        ids.dedup();
        Self(ids)
    }

    pub fn ids(&self) -> &[TraitId] {
        &self.0
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    pub fn contains(&self, id: TraitId) -> bool {
        self.0.binary_search(&id).is_ok()
    }

    pub fn intersects(&self, other: &TraitSignature) -> bool {
        self.0.iter().any(|id| other.contains(*id))
    }

    pub fn touches(&self, ids: &FxHashSet<TraitId>) -> bool {
        self.0.iter().any(|id| ids.contains(id))
    }
}

/// Members sharing one exact signature.
#[derive(Debug, Clone, PartialEq)]
pub struct SignatureGroup {
    pub signature: TraitSignature,
    /// One representative per canonical id, from the founding member.
    pub traits: Vec<Trait>,
    pub members: Vec<EntityId>,
}

impl SignatureGroup {
    pub fn len(&self) -> usize {
        self.members.len()
    }

    pub fn is_empty(&self) -> bool {
        self.members.is_empty()
    }
}

/// Outcome of [`group_disjoint`].
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Grouping {
    /// Clean groups in founding order. Signatures are pairwise disjoint.
    pub groups: Vec<SignatureGroup>,
    /// Members that could not be assigned cleanly, in input order.
    pub rejected: Vec<EntityId>,
}

impl Grouping {
    pub fn clean_count(&self) -> usize {
        self.groups.len()
    }
}

/// Group `entries` by exact signature, evicting anything ambiguous.
pub fn group_disjoint(entries: &[(EntityId, Vec<Trait>)]) -> Grouping {
    let mut groups: FxHashMap<TraitSignature, SignatureGroup> = FxHashMap::default();
    let mut founding: Vec<TraitSignature> = Vec::new();
    let mut dead: FxHashSet<TraitId> = FxHashSet::default();
    let mut rejected: FxHashSet<EntityId> = FxHashSet::default();

    for (id, traits) in entries {
        let signature = TraitSignature::from_traits(traits);

        if signature.touches(&dead) {
            rejected.insert(*id);
            dead.extend(signature.ids().iter().copied());
            let doomed: Vec<TraitSignature> = groups
                .keys()
                .filter(|existing| existing.touches(&dead))
                .cloned()
                .collect();
            evict(&mut groups, doomed, &mut dead, &mut rejected);
            continue;
        }

        if let Some(group) = groups.get_mut(&signature) {
            group.members.push(*id);
            continue;
        }

        let colliding: Vec<TraitSignature> = groups
            .keys()
            .filter(|existing| existing.intersects(&signature))
            .cloned()
            .collect();
        if !colliding.is_empty() {
            rejected.insert(*id);
            dead.extend(signature.ids().iter().copied());
            evict(&mut groups, colliding, &mut dead, &mut rejected);
            continue;
        }

        founding.push(signature.clone());
        groups.insert(
            signature.clone(),
            SignatureGroup {
                signature,
                traits: representatives(traits),
                members: vec![*id],
            },
        );
    }

    Grouping {
        groups: founding.iter().filter_map(|s| groups.remove(s)).collect(),
        rejected: entries
            .iter()
            .map(|(id, _)| *id)
            .filter(|id| rejected.contains(id))
            .collect(),
    }
}

fn evict(
    groups: &mut FxHashMap<TraitSignature, SignatureGroup>,
    keys: Vec<TraitSignature>,
    dead: &mut FxHashSet<TraitId>,
    rejected: &mut FxHashSet<EntityId>,
) {
    for key in keys {
        if let Some(group) = groups.remove(&key) {
            dead.extend(group.signature.ids().iter().copied());
            rejected.extend(group.members);
        }
    }
}

/// First trait seen for each canonical id, in canonical-id order.
fn representatives(traits: &[Trait]) -> Vec<Trait> {
    let mut out: Vec<Trait> = Vec::with_capacity(traits.len());
    for t in traits {
        if !out.iter().any(|o| o.canonical_id == t.canonical_id) {
            out.push(t.clone());
        }
    }
    out.sort_by_key(|t| t.canonical_id);
    out
}
