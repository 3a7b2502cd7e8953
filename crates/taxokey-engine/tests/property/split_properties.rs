use proptest::prelude::*;
use taxokey_core::models::{
    EntityNode, GenerationOptions, KeyOptions, Observation, Rationale, SplitOrigin, Trait,
};
use taxokey_core::types::{CategoryId, CharacterId, EntityId, FxHashSet, TraitId};
use taxokey_engine::split::{self, category_presence, merger, trait_definition};

/// Members with one or two characters; trait ids drawn from a small pool so
/// collisions and partial overlaps are common.
fn sibling_group() -> impl Strategy<Value = Vec<EntityNode>> {
    prop::collection::vec(
        (
            prop::collection::vec(0u64..6, 1..3),
            prop::option::of(prop::collection::vec(10u64..13, 1..2)),
        ),
        2..14,
    )
    .prop_map(|members| {
        members
            .into_iter()
            .enumerate()
            .map(|(i, (first, second))| {
                let mut observations = vec![observation(1, 1, &first)];
                if let Some(second) = second {
                    observations.push(observation(2, 2, &second));
                }
                EntityNode {
                    id: EntityId(i as u64 + 1),
                    display_rank: "species".into(),
                    subtaxon_ids: Vec::new(),
                    trait_observations: observations,
                }
            })
            .collect()
    })
}

fn observation(character: u64, category: u64, traits: &[u64]) -> Observation {
    Observation {
        character_id: CharacterId(character),
        category_id: CategoryId(category),
        trait_values: traits
            .iter()
            .map(|t| Trait::canonical(TraitId(*t), format!("t{t}")))
            .collect(),
    }
}

fn options(max_branches: u32) -> KeyOptions {
    GenerationOptions {
        max_branches_per_split: Some(max_branches),
        ..Default::default()
    }
    .normalize()
    .unwrap()
}

fn clause_traits(rationale: &Rationale) -> FxHashSet<TraitId> {
    match rationale {
        Rationale::TraitClauses { clauses } => clauses
            .iter()
            .flat_map(|c| c.traits.iter().map(|t| t.canonical_id))
            .collect(),
        Rationale::CategoryPresence { .. } => FxHashSet::default(),
    }
}

proptest! {
    #[test]
    fn clean_branches_never_share_a_trait(nodes in sibling_group(), max in 2u32..=10) {
        let members: Vec<&EntityNode> = nodes.iter().collect();
        for split in trait_definition::resolve(&members, &options(max)) {
            let clean: Vec<FxHashSet<TraitId>> = split
                .branches
                .iter()
                .filter(|b| !b.rationale.is_unresolved())
                .map(|b| clause_traits(&b.rationale))
                .collect();
            for (i, a) in clean.iter().enumerate() {
                for b in &clean[i + 1..] {
                    prop_assert!(a.is_disjoint(b));
                }
            }
        }
    }

    #[test]
    fn inverted_branch_holds_exactly_the_unassigned(nodes in sibling_group(), max in 2u32..=10) {
        let members: Vec<&EntityNode> = nodes.iter().collect();
        for split in trait_definition::resolve(&members, &options(max)) {
            let assigned: FxHashSet<EntityId> = split
                .branches
                .iter()
                .filter(|b| !b.rationale.is_unresolved())
                .flat_map(|b| b.members.iter().copied())
                .collect();
            let expected: FxHashSet<EntityId> = nodes
                .iter()
                .map(|n| n.id)
                .filter(|id| !assigned.contains(id))
                .collect();
            let inverted: FxHashSet<EntityId> = split
                .branches
                .iter()
                .filter(|b| b.rationale.is_unresolved())
                .flat_map(|b| b.members.iter().copied())
                .collect();
            prop_assert_eq!(inverted, expected);
        }
    }

    #[test]
    fn every_candidate_partitions_the_group(nodes in sibling_group(), max in 2u32..=10) {
        let members: Vec<&EntityNode> = nodes.iter().collect();
        let mut input: Vec<EntityId> = nodes.iter().map(|n| n.id).collect();
        input.sort_unstable();

        for split in split::candidates(&members, &options(max)).unwrap() {
            let mut covered: Vec<EntityId> =
                split.branches.iter().flat_map(|b| b.members.iter().copied()).collect();
            covered.sort_unstable();
            prop_assert_eq!(&covered, &input);
            prop_assert!(split.branches.len() >= 2);
            prop_assert!(split.branches.iter().all(|b| !b.is_empty()));
            prop_assert!(split.score > 0.0);
        }
    }

    #[test]
    fn branch_count_respects_ceiling(nodes in sibling_group(), max in 2u32..=10) {
        let members: Vec<&EntityNode> = nodes.iter().collect();
        for split in split::candidates(&members, &options(max)).unwrap() {
            prop_assert!(split.branches.len() <= max as usize);
        }
    }

    #[test]
    fn presence_splits_have_two_sides(nodes in sibling_group()) {
        let members: Vec<&EntityNode> = nodes.iter().collect();
        for split in category_presence::resolve(&members) {
            prop_assert_eq!(split.origin, SplitOrigin::CategoryPresence);
            prop_assert_eq!(split.branches.len(), 2);
            let sizes = split.branch_sizes();
            prop_assert_eq!(split.score, (sizes[0] * sizes[1]) as f64);
        }
    }

    #[test]
    fn merging_one_split_is_identity(nodes in sibling_group(), max in 2u32..=10) {
        let members: Vec<&EntityNode> = nodes.iter().collect();
        let opts = options(max);
        for split in trait_definition::resolve(&members, &opts) {
            let merged = merger::merge(vec![split.clone()], &opts).unwrap();
            prop_assert_eq!(merged, vec![split]);
        }
    }
}
