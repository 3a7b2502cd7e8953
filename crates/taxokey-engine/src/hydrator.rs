//! Hydration: resolve an id-only key into display labels.
//!
//! One pass collects every referenced id by kind, one batched lookup per
//! kind fetches labels, and a second pass rebuilds the tree. The four
//! lookups are independent and run under `rayon::join` when enabled.

use taxokey_core::errors::{HydrationError, SourceResult};
use taxokey_core::models::{
    CategoryRecord, CharacterRecord, EntityRecord, HydratedBranch, HydratedClause, HydratedNode,
    HydratedRationale, HydratedTrait, KeyNode, Rationale, TraitValueRecord,
};
use taxokey_core::traits::CatalogLookup;
use taxokey_core::types::{CategoryId, CharacterId, EntityId, FxHashMap, FxHashSet, TraitId};
use tracing::{debug, instrument, warn};

/// Distinct ids referenced by a key, in first-seen order.
#[derive(Debug, Default)]
struct ReferencedIds {
    entities: Vec<EntityId>,
    characters: Vec<CharacterId>,
    traits: Vec<TraitId>,
    categories: Vec<CategoryId>,
    seen_entities: FxHashSet<EntityId>,
    seen_characters: FxHashSet<CharacterId>,
    seen_traits: FxHashSet<TraitId>,
    seen_categories: FxHashSet<CategoryId>,
}

impl ReferencedIds {
    fn collect(root: &KeyNode) -> Self {
        let mut ids = Self::default();
        root.walk(&mut |node| {
            if let KeyNode::Taxon { id, .. } = node {
                if ids.seen_entities.insert(*id) {
                    ids.entities.push(*id);
                }
            }
            for branch in node.branches() {
                match &branch.rationale {
                    Some(Rationale::TraitClauses { clauses }) => {
                        for clause in clauses {
                            ids.character(clause.character_id);
                            ids.category(clause.category_id);
                            for t in &clause.traits {
                                if ids.seen_traits.insert(t.canonical_id) {
                                    ids.traits.push(t.canonical_id);
                                }
                            }
                        }
                    }
                    Some(Rationale::CategoryPresence { category_id, .. }) => {
                        ids.category(*category_id);
                    }
                    None => {}
                }
            }
        });
        ids
    }

    fn character(&mut self, id: CharacterId) {
        if self.seen_characters.insert(id) {
            self.characters.push(id);
        }
    }

    fn category(&mut self, id: CategoryId) {
        if self.seen_categories.insert(id) {
            self.categories.push(id);
        }
    }
}

/// Labels returned by the batched lookups.
#[derive(Debug, Default)]
struct Labels {
    entities: FxHashMap<EntityId, EntityRecord>,
    characters: FxHashMap<CharacterId, CharacterRecord>,
    traits: FxHashMap<TraitId, TraitValueRecord>,
    categories: FxHashMap<CategoryId, CategoryRecord>,
}

type Fetched = (
    (SourceResult<Vec<EntityRecord>>, SourceResult<Vec<CharacterRecord>>),
    (SourceResult<Vec<TraitValueRecord>>, SourceResult<Vec<CategoryRecord>>),
);

impl Labels {
    fn fetch(
        catalog: &dyn CatalogLookup,
        ids: &ReferencedIds,
        parallel: bool,
    ) -> Result<Self, HydrationError> {
        let entities = || catalog.get_entities_by_ids(&ids.entities);
        let characters = || catalog.get_characters_by_ids(&ids.characters);
        let traits = || catalog.get_trait_values_by_ids(&ids.traits);
        let categories = || catalog.get_categories_by_ids(&ids.categories);

        let ((entities, characters), (traits, categories)): Fetched = if parallel {
            rayon::join(
                || rayon::join(entities, characters),
                || rayon::join(traits, categories),
            )
        } else {
            ((entities(), characters()), (traits(), categories()))
        };

        Ok(Self {
            entities: entities?.into_iter().map(|r| (r.id, r)).collect(),
            characters: characters?.into_iter().map(|r| (r.id, r)).collect(),
            traits: traits?.into_iter().map(|r| (r.id, r)).collect(),
            categories: categories?.into_iter().map(|r| (r.id, r)).collect(),
        })
    }

    fn character_name(&self, id: CharacterId) -> String {
        match self.characters.get(&id) {
            Some(record) => record.name.clone(),
            None => unresolved("character", id.get()),
        }
    }

    fn category_name(&self, id: CategoryId) -> String {
        match self.categories.get(&id) {
            Some(record) => record.name.clone(),
            None => unresolved("category", id.get()),
        }
    }

    fn trait_label(&self, id: TraitId) -> String {
        match self.traits.get(&id) {
            Some(record) => record.label.clone(),
            None => unresolved("trait", id.get()),
        }
    }
}

fn unresolved(kind: &str, id: u64) -> String {
    warn!(kind, id, "label not found in catalog");
    format!("#{id}")
}

/// Resolve `root` into a display-ready tree.
///
/// `root` must be a taxon node; a diff root is rejected before any lookup.
/// Issues at most one lookup per id kind regardless of tree size.
#[instrument(skip(root, catalog))]
pub fn hydrate(
    root: &KeyNode,
    catalog: &dyn CatalogLookup,
    parallel: bool,
) -> Result<HydratedNode, HydrationError> {
    if !root.is_taxon() {
        return Err(HydrationError::InvalidRoot { found: "diff" });
    }

    let ids = ReferencedIds::collect(root);
    debug!(
        entities = ids.entities.len(),
        characters = ids.characters.len(),
        traits = ids.traits.len(),
        categories = ids.categories.len(),
        "collected referenced ids"
    );
    let labels = Labels::fetch(catalog, &ids, parallel)?;
    Ok(hydrate_node(root, &labels))
}

fn hydrate_node(node: &KeyNode, labels: &Labels) -> HydratedNode {
    let branches = node
        .branches()
        .iter()
        .map(|b| HydratedBranch {
            id: b.id,
            rationale: b.rationale.as_ref().map(|r| hydrate_rationale(r, labels)),
            child: hydrate_node(&b.child, labels),
        })
        .collect();

    match node {
        KeyNode::Taxon { id, .. } => {
            let (display_name, rank) = match labels.entities.get(id) {
                Some(record) => (record.display_name.clone(), record.rank.clone()),
                None => (unresolved("entity", id.get()), String::new()),
            };
            HydratedNode::Taxon {
                id: *id,
                display_name,
                rank,
                branches,
            }
        }
        KeyNode::Diff { id, .. } => HydratedNode::Diff { id: *id, branches },
    }
}

fn hydrate_rationale(rationale: &Rationale, labels: &Labels) -> HydratedRationale {
    match rationale {
        Rationale::TraitClauses { clauses } => HydratedRationale::TraitClauses {
            clauses: clauses
                .iter()
                .map(|c| HydratedClause {
                    character_id: c.character_id,
                    character_name: labels.character_name(c.character_id),
                    category_id: c.category_id,
                    category_name: labels.category_name(c.category_id),
                    traits: c
                        .traits
                        .iter()
                        .map(|t| HydratedTrait {
                            id: t.canonical_id,
                            label: labels.trait_label(t.canonical_id),
                        })
                        .collect(),
                    inverted: c.inverted,
                })
                .collect(),
        },
        Rationale::CategoryPresence {
            category_id,
            status,
        } => HydratedRationale::CategoryPresence {
            category_id: *category_id,
            category_name: labels.category_name(*category_id),
            status: *status,
        },
    }
}
