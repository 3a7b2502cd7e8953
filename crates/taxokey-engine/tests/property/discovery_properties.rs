use proptest::prelude::*;
use taxokey_core::models::GenerationOptions;
use taxokey_core::types::EntityId;
use taxokey_engine::discover;
use test_fixtures::TaxonomyBuilder;

/// Random tree rooted at 1: node `i` picks a parent among `1..i`.
/// Returns each node's child list, indexed by id - 1.
fn random_tree() -> impl Strategy<Value = Vec<Vec<u64>>> {
    prop::collection::vec(any::<prop::sample::Index>(), 0..80).prop_map(|picks| {
        let n = picks.len() + 1;
        let mut children = vec![Vec::new(); n];
        for (i, pick) in picks.iter().enumerate() {
            let id = i as u64 + 2;
            let parent = pick.index(i + 1);
            children[parent].push(id);
        }
        children
    })
}

proptest! {
    #[test]
    fn never_exceeds_limit_and_stays_a_rooted_tree(
        tree in random_tree(),
        limit in 1u32..=100,
    ) {
        let mut builder = TaxonomyBuilder::new();
        for (i, children) in tree.iter().enumerate() {
            builder = builder.taxon(i as u64 + 1, "rank", "taxon", children);
        }
        let catalog = builder.build();
        let options = GenerationOptions { entity_limit: Some(limit), ..Default::default() }
            .normalize()
            .unwrap();

        let hierarchy = discover(&catalog, EntityId(1), &options).unwrap();

        prop_assert!(hierarchy.len() <= limit as usize);
        prop_assert!(hierarchy.root().is_some());
        prop_assert_eq!(hierarchy.order().len(), hierarchy.len());

        for id in hierarchy.order() {
            if *id == EntityId(1) {
                continue;
            }
            let parents = hierarchy
                .order()
                .iter()
                .filter(|p| hierarchy.children(**p).contains(id))
                .count();
            prop_assert_eq!(parents, 1);
        }
        for id in hierarchy.order() {
            for child in hierarchy.children(*id) {
                prop_assert!(hierarchy.contains(*child));
            }
        }
        prop_assert_eq!(hierarchy.is_truncated(), hierarchy.len() < tree.len());
    }
}
