//! Key generation entrypoint.

use std::sync::Arc;
use std::time::Instant;

use serde::Serialize;
use taxokey_core::config::KeygenConfig;
use taxokey_core::errors::{GenerationError, HydrationError, KeygenErrorCode};
use taxokey_core::events::{
    DiscoveryCompleteEvent, EntityMissingEvent, EventDispatcher, GenerationCompleteEvent,
    GenerationFailedEvent, GenerationStartedEvent, KeygenEventHandler,
};
use taxokey_core::models::{GenerationOptions, HydratedNode, KeyNode};
use taxokey_core::traits::{CatalogLookup, TaxonSource};
use taxokey_core::types::EntityId;
use tracing::{info, instrument, warn};

use crate::builder::KeyBuilder;
use crate::discovery::discover;
use crate::hydrator;

/// Summary of one generation run.
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct GenerationDiagnostics {
    pub entities_discovered: usize,
    pub entities_skipped: usize,
    pub truncated: bool,
    pub depth_reached: usize,
    pub taxon_nodes: usize,
    pub diff_nodes: usize,
    pub splits_evaluated: usize,
    pub trait_splits_selected: usize,
    pub category_splits_selected: usize,
    pub max_key_depth: usize,
    pub elapsed_ms: u64,
}

/// An id-only key and the diagnostics of the run that produced it.
#[derive(Debug, Clone, PartialEq)]
pub struct GeneratedKey {
    pub root_node: KeyNode,
    pub diagnostics: GenerationDiagnostics,
}

/// Generates identification keys over one collaborator.
///
/// Holds no state between requests; a single generator may serve many
/// threads at once.
pub struct KeyGenerator<S> {
    source: Arc<S>,
    config: KeygenConfig,
    events: EventDispatcher,
}

impl<S: TaxonSource + CatalogLookup> KeyGenerator<S> {
    pub fn new(source: Arc<S>) -> Self {
        Self::with_config(source, KeygenConfig::default())
    }

    pub fn with_config(source: Arc<S>, config: KeygenConfig) -> Self {
        Self {
            source,
            config,
            events: EventDispatcher::new(),
        }
    }

    pub fn register_handler(&mut self, handler: Arc<dyn KeygenEventHandler>) {
        self.events.register(handler);
    }

    pub fn config(&self) -> &KeygenConfig {
        &self.config
    }

    pub fn source(&self) -> &Arc<S> {
        &self.source
    }

    /// Discover the subtree under `root_id` and build its key.
    ///
    /// Omitted options fall back to `[generation]` config, then compiled defaults.
    #[instrument(name = "generate_key", skip(self, options), fields(root = %root_id))]
    pub fn generate_key(
        &self,
        root_id: EntityId,
        options: &GenerationOptions,
    ) -> Result<GeneratedKey, GenerationError> {
        let started = Instant::now();
        let result = self.run(root_id, options, started);
        if let Err(e) = &result {
            warn!(code = e.error_code(), error = %e, "key generation failed");
            self.events.emit_generation_failed(&GenerationFailedEvent {
                root_id,
                error_code: e.error_code(),
                message: e.to_string(),
            });
        }
        result
    }

    fn run(
        &self,
        root_id: EntityId,
        options: &GenerationOptions,
        started: Instant,
    ) -> Result<GeneratedKey, GenerationError> {
        let options = options.normalize_with(&self.config.generation)?;
        info!(
            entity_limit = options.entity_limit(),
            shape = %options.shape_preference(),
            max_branches = options.max_branches_per_split(),
            "key generation started"
        );
        self.events.emit_generation_started(&GenerationStartedEvent { root_id, options });

        let hierarchy = discover(self.source.as_ref(), root_id, &options)?;
        let skipped: Vec<EntityId> = hierarchy.skipped().collect();
        for id in &skipped {
            self.events.emit_entity_missing(&EntityMissingEvent { id: *id });
        }
        self.events.emit_discovery_complete(&DiscoveryCompleteEvent {
            root_id,
            entity_count: hierarchy.len(),
            skipped: skipped.len(),
            depth_reached: hierarchy.depth_reached(),
            truncated: hierarchy.is_truncated(),
        });

        let mut builder = KeyBuilder::new(&hierarchy, options).with_events(&self.events);
        let root_node = builder.build()?;
        let stats = builder.stats().clone();

        let diagnostics = GenerationDiagnostics {
            entities_discovered: hierarchy.len(),
            entities_skipped: skipped.len(),
            truncated: hierarchy.is_truncated(),
            depth_reached: hierarchy.depth_reached(),
            taxon_nodes: root_node.taxon_count(),
            diff_nodes: root_node.diff_count(),
            splits_evaluated: stats.splits_evaluated,
            trait_splits_selected: stats.trait_splits_selected,
            category_splits_selected: stats.category_splits_selected,
            max_key_depth: root_node.depth(),
            elapsed_ms: started.elapsed().as_millis() as u64,
        };

        info!(
            taxon_nodes = diagnostics.taxon_nodes,
            diff_nodes = diagnostics.diff_nodes,
            elapsed_ms = diagnostics.elapsed_ms,
            "key generation complete"
        );
        self.events.emit_generation_complete(&GenerationCompleteEvent {
            root_id,
            taxon_nodes: diagnostics.taxon_nodes,
            diff_nodes: diagnostics.diff_nodes,
            elapsed_ms: diagnostics.elapsed_ms,
        });

        Ok(GeneratedKey {
            root_node,
            diagnostics,
        })
    }

    /// Resolve a generated key into display labels.
    pub fn hydrate(&self, root: &KeyNode) -> Result<HydratedNode, HydrationError> {
        hydrator::hydrate(
            root,
            self.source.as_ref(),
            self.config.hydration.effective_parallel_lookups(),
        )
    }
}

impl<S> std::fmt::Debug for KeyGenerator<S> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("KeyGenerator")
            .field("config", &self.config)
            .field("events", &self.events)
            .finish_non_exhaustive()
    }
}
