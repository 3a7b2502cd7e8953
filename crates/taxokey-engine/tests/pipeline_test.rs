//! End-to-end generation over the mushroom fixture.

use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::{Arc, Mutex};

use taxokey_core::errors::{DiscoveryError, GenerationError, KeygenErrorCode, SourceError};
use taxokey_core::events::{
    EntityMissingEvent, GenerationCompleteEvent, GenerationFailedEvent, KeygenEventHandler,
    SplitSelectedEvent,
};
use taxokey_core::models::{GenerationOptions, KeyNode, Rationale, SplitOrigin};
use taxokey_core::types::{CharacterId, EntityId};
use taxokey_engine::KeyGenerator;
use test_fixtures::{fixtures, FailingSource};

#[derive(Default)]
struct Recorder {
    splits: Mutex<Vec<SplitOrigin>>,
    missing: Mutex<Vec<EntityId>>,
    completed: AtomicUsize,
    failed: Mutex<Vec<&'static str>>,
}

impl KeygenEventHandler for Recorder {
    fn on_split_selected(&self, event: &SplitSelectedEvent) {
        self.splits.lock().unwrap().push(event.origin);
    }

    fn on_entity_missing(&self, event: &EntityMissingEvent) {
        self.missing.lock().unwrap().push(event.id);
    }

    fn on_generation_complete(&self, _event: &GenerationCompleteEvent) {
        self.completed.fetch_add(1, Ordering::SeqCst);
    }

    fn on_generation_failed(&self, event: &GenerationFailedEvent) {
        self.failed.lock().unwrap().push(event.error_code);
    }
}

fn clause_characters(rationale: &Option<Rationale>) -> Vec<CharacterId> {
    match rationale {
        Some(Rationale::TraitClauses { clauses }) => {
            clauses.iter().map(|c| c.character_id).collect()
        }
        _ => Vec::new(),
    }
}

#[test]
fn test_mushroom_key_shape() {
    let generator = KeyGenerator::new(Arc::new(fixtures::mushrooms()));
    let key = generator
        .generate_key(EntityId(1), &GenerationOptions::default())
        .unwrap();
    let root = &key.root_node;

    // Genera separate on spore print color.
    assert_eq!(root.taxon_id(), Some(EntityId(1)));
    let genera = root.branches();
    assert_eq!(genera.len(), 2);
    assert_eq!(clause_characters(&genera[0].rationale), vec![CharacterId(40)]);
    assert_eq!(genera[0].child.taxon_id(), Some(EntityId(2)));
    assert_eq!(genera[1].child.taxon_id(), Some(EntityId(3)));

    // Amanita: cap color wins the tie with cap surface; scarlet counts as red.
    let amanita = genera[0].child.branches();
    assert_eq!(amanita.len(), 2);
    assert_eq!(clause_characters(&amanita[0].rationale), vec![CharacterId(10)]);
    let KeyNode::Diff { branches: reds, .. } = &amanita[0].child else {
        panic!("expected a diff node for the red-capped pair");
    };
    assert_eq!(clause_characters(&reds[0].rationale), vec![CharacterId(11)]);
    let red_ids: Vec<EntityId> = reds.iter().filter_map(|b| b.child.taxon_id()).collect();
    assert_eq!(red_ids, vec![EntityId(4), EntityId(6)]);
    assert_eq!(amanita[1].child.taxon_id(), Some(EntityId(5)));

    // Agaricus: cap color and cap surface induce the same partition and merge.
    let agaricus = genera[1].child.branches();
    assert_eq!(agaricus.len(), 2);
    assert_eq!(
        clause_characters(&agaricus[0].rationale),
        vec![CharacterId(10), CharacterId(11)]
    );
}

#[test]
fn test_mushroom_diagnostics() {
    let generator = KeyGenerator::new(Arc::new(fixtures::mushrooms()));
    let key = generator
        .generate_key(EntityId(1), &GenerationOptions::default())
        .unwrap();
    let d = &key.diagnostics;

    assert_eq!(d.entities_discovered, 8);
    assert_eq!(d.entities_skipped, 1);
    assert!(!d.truncated);
    assert_eq!(d.depth_reached, 2);
    assert_eq!(d.taxon_nodes, 8);
    assert_eq!(d.diff_nodes, 1);
    assert_eq!(d.trait_splits_selected, 4);
    assert_eq!(d.category_splits_selected, 0);
    assert_eq!(d.splits_evaluated, 7);
    assert_eq!(d.max_key_depth, 3);
}

#[test]
fn test_events_follow_generation() {
    let recorder = Arc::new(Recorder::default());
    let mut generator = KeyGenerator::new(Arc::new(fixtures::mushrooms()));
    generator.register_handler(recorder.clone());

    generator
        .generate_key(EntityId(1), &GenerationOptions::default())
        .unwrap();

    assert_eq!(recorder.splits.lock().unwrap().len(), 4);
    assert_eq!(*recorder.missing.lock().unwrap(), vec![EntityId(99)]);
    assert_eq!(recorder.completed.load(Ordering::SeqCst), 1);
    assert!(recorder.failed.lock().unwrap().is_empty());
}

#[test]
fn test_unknown_root_is_empty_subtree() {
    let recorder = Arc::new(Recorder::default());
    let mut generator = KeyGenerator::new(Arc::new(fixtures::mushrooms()));
    generator.register_handler(recorder.clone());

    let err = generator
        .generate_key(EntityId(404), &GenerationOptions::default())
        .unwrap_err();

    assert_eq!(
        err,
        GenerationError::Discovery(DiscoveryError::EmptySubtree {
            root_id: EntityId(404)
        })
    );
    assert_eq!(err.error_code(), "EMPTY_SUBTREE");
    assert_eq!(*recorder.failed.lock().unwrap(), vec!["EMPTY_SUBTREE"]);
}

#[test]
fn test_invalid_options_fail_before_discovery() {
    let catalog = Arc::new(fixtures::mushrooms());
    let generator = KeyGenerator::new(catalog.clone());
    let options = GenerationOptions {
        max_branches_per_split: Some(11),
        ..Default::default()
    };

    let err = generator.generate_key(EntityId(1), &options).unwrap_err();

    assert_eq!(err.error_code(), "INVALID_OPTIONS");
    assert!(err.wire_string().contains("maxBranchesPerSplit"));
    assert_eq!(catalog.call_counts().get_entities, 0);
}

#[test]
fn test_source_failure_propagates() {
    let generator = KeyGenerator::new(Arc::new(FailingSource::new("db down")));
    let err = generator
        .generate_key(EntityId(1), &GenerationOptions::default())
        .unwrap_err();

    assert_eq!(
        err,
        GenerationError::Discovery(DiscoveryError::Source(SourceError::Unavailable {
            message: "db down".into()
        }))
    );
    assert_eq!(err.error_code(), "SOURCE_ERROR");
}

#[test]
fn test_entity_limit_truncates_key() {
    let generator = KeyGenerator::new(Arc::new(fixtures::mushrooms()));
    let options = GenerationOptions {
        entity_limit: Some(5),
        ..Default::default()
    };
    let key = generator.generate_key(EntityId(1), &options).unwrap();

    assert!(key.diagnostics.truncated);
    assert_eq!(key.root_node.taxon_ids(), vec![EntityId(1), EntityId(2), EntityId(3)]);
}

#[test]
fn test_max_depth_from_root_does_not_change_key() {
    let generator = KeyGenerator::new(Arc::new(fixtures::mushrooms()));
    let unbounded = generator
        .generate_key(EntityId(1), &GenerationOptions::default())
        .unwrap();

    for depth in [1, 10] {
        let options = GenerationOptions {
            max_depth_from_root: Some(depth),
            ..Default::default()
        };
        let key = generator.generate_key(EntityId(1), &options).unwrap();
        assert_eq!(key.root_node, unbounded.root_node);
        assert_eq!(key.diagnostics.max_key_depth, 3);
    }
}
