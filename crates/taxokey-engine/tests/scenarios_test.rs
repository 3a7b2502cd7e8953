//! Behavioral scenarios for the resolvers and the key builder.

use taxokey_core::models::{
    EntityNode, GenerationOptions, KeyNode, KeyOptions, PresenceStatus, Rationale, SplitOrigin,
};
use taxokey_core::types::{CategoryId, EntityId, TraitId};
use taxokey_engine::split::{category_presence, trait_definition};
use taxokey_engine::{discover, DiscoveredHierarchy, KeyBuilder};
use test_fixtures::{fixtures, InMemoryCatalog, TaxonomyBuilder};

const RED: u64 = 100;
const BLUE: u64 = 101;

fn hierarchy(catalog: &InMemoryCatalog, options: &KeyOptions) -> DiscoveredHierarchy {
    discover(catalog, EntityId(1), options).unwrap()
}

fn siblings(h: &DiscoveredHierarchy) -> Vec<&EntityNode> {
    h.children(EntityId(1))
        .iter()
        .filter_map(|id| h.get(*id))
        .collect()
}

fn ids(raw: &[u64]) -> Vec<EntityId> {
    raw.iter().copied().map(EntityId).collect()
}

#[test]
fn test_scenario_a_two_clean_groups() {
    let catalog = fixtures::sibling_group(&[&[RED], &[RED], &[BLUE]]);
    let options = KeyOptions::default();
    let h = hierarchy(&catalog, &options);

    let splits = trait_definition::resolve(&siblings(&h), &options);

    assert_eq!(splits.len(), 1);
    let split = &splits[0];
    assert!(split.score > 0.0);
    assert_eq!(split.branches.len(), 2);
    assert_eq!(split.branches[0].members, ids(&[2, 3]));
    assert_eq!(split.branches[1].members, ids(&[4]));
    assert!(split.branches.iter().all(|b| !b.rationale.is_unresolved()));
}

#[test]
fn test_scenario_b_partial_overlap_excludes_character() {
    let catalog = fixtures::sibling_group(&[&[RED], &[RED, BLUE]]);
    let options = KeyOptions::default();
    let h = hierarchy(&catalog, &options);

    assert!(trait_definition::resolve(&siblings(&h), &options).is_empty());
}

#[test]
fn test_scenario_c_branch_ceiling_folds_small_groups() {
    let mut signatures: Vec<&[u64]> = Vec::new();
    signatures.extend(std::iter::repeat(&[200u64][..]).take(5));
    signatures.extend(std::iter::repeat(&[201u64][..]).take(3));
    signatures.extend(std::iter::repeat(&[202u64][..]).take(2));
    signatures.push(&[203]);
    let catalog = fixtures::sibling_group(&signatures);
    let options = GenerationOptions {
        max_branches_per_split: Some(2),
        ..Default::default()
    }
    .normalize()
    .unwrap();
    let h = hierarchy(&catalog, &options);

    let splits = trait_definition::resolve(&siblings(&h), &options);

    assert_eq!(splits.len(), 1);
    let split = &splits[0];
    assert_eq!(split.branch_sizes(), vec![5, 6]);
    assert!(!split.branches[0].rationale.is_unresolved());
    assert!(split.branches[1].rationale.is_unresolved());
    assert_eq!(split.branches[1].members, ids(&[7, 8, 9, 10, 11, 12]));

    let Rationale::TraitClauses { clauses } = &split.branches[1].rationale else {
        panic!("expected trait clauses");
    };
    assert_eq!(clauses[0].traits.len(), 1);
    assert_eq!(clauses[0].traits[0].canonical_id, TraitId(200));
    assert!(clauses[0].inverted);
}

#[test]
fn test_scenario_d_category_presence_scores_product() {
    let children: Vec<u64> = (2..12).collect();
    let mut builder = TaxonomyBuilder::new()
        .category(1, "cap")
        .category(2, "veil")
        .character(10, "cap color", 1)
        .character(20, "veil type", 2)
        .taxon(1, "genus", "Root", &children);
    for child in &children {
        builder = builder
            .taxon(*child, "species", "sp", &[])
            .observe(*child, 10, &[RED]);
        if *child < 6 {
            builder = builder.observe(*child, 20, &[300]);
        }
    }
    let catalog = builder.build();
    let options = KeyOptions::default();
    let h = hierarchy(&catalog, &options);

    let splits = category_presence::resolve(&siblings(&h));

    assert_eq!(splits.len(), 1);
    let split = &splits[0];
    assert_eq!(split.origin, SplitOrigin::CategoryPresence);
    assert_eq!(split.score, 24.0);
    assert_eq!(split.branches[0].members, ids(&[2, 3, 4, 5]));
    assert_eq!(split.branches[1].members.len(), 6);
    assert_eq!(
        split.branches[0].rationale,
        Rationale::CategoryPresence {
            category_id: CategoryId(2),
            status: PresenceStatus::Present
        }
    );
    assert!(split.branches[1].rationale.is_unresolved());
}

#[test]
fn test_scenario_e_single_child_passes_through_and_descends() {
    let catalog = TaxonomyBuilder::new()
        .category(1, "cap")
        .character(10, "cap color", 1)
        .taxon(1, "family", "Root", &[2])
        .taxon(2, "genus", "Only", &[3, 4])
        .taxon(3, "species", "Red one", &[])
        .taxon(4, "species", "Blue one", &[])
        .observe(3, 10, &[RED])
        .observe(4, 10, &[BLUE])
        .build();
    let options = KeyOptions::default();
    let h = hierarchy(&catalog, &options);

    let key = KeyBuilder::new(&h, options).build().unwrap();

    let [pass_through] = key.branches() else {
        panic!("expected one branch under the root");
    };
    assert!(pass_through.rationale.is_none());
    assert_eq!(pass_through.child.taxon_id(), Some(EntityId(2)));

    let grandchildren = pass_through.child.branches();
    assert_eq!(grandchildren.len(), 2);
    assert!(grandchildren.iter().all(|b| b.rationale.is_some()));
    assert_eq!(
        key.taxon_ids(),
        ids(&[1, 2, 3, 4]),
    );
}

#[test]
fn test_multi_member_branch_becomes_diff_node_at_same_level() {
    let catalog = fixtures::sibling_group(&[&[RED], &[RED], &[BLUE]]);
    let options = KeyOptions::default();
    let h = hierarchy(&catalog, &options);

    let key = KeyBuilder::new(&h, options).build().unwrap();

    let branches = key.branches();
    assert_eq!(branches.len(), 2);
    let KeyNode::Diff { branches: inner, .. } = &branches[0].child else {
        panic!("expected a diff node for the two red members");
    };
    // Identical reds cannot be split further: both listed without rationale.
    assert_eq!(inner.len(), 2);
    assert!(inner.iter().all(|b| b.rationale.is_none()));
    assert_eq!(branches[1].child.taxon_id(), Some(EntityId(4)));
}
