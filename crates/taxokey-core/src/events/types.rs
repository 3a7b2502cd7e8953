//! Event payload types.

use crate::models::{KeyOptions, SplitOrigin};
use crate::types::EntityId;

/// Payload for `on_generation_started`.
#[derive(Debug, Clone)]
pub struct GenerationStartedEvent {
    pub root_id: EntityId,
    pub options: KeyOptions,
}

/// Payload for `on_discovery_complete`.
#[derive(Debug, Clone)]
pub struct DiscoveryCompleteEvent {
    pub root_id: EntityId,
    pub entity_count: usize,
    pub skipped: usize,
    pub depth_reached: usize,
    pub truncated: bool,
}

/// Payload for `on_entity_missing`.
#[derive(Debug, Clone)]
pub struct EntityMissingEvent {
    pub id: EntityId,
}

/// Payload for `on_split_selected`.
#[derive(Debug, Clone)]
pub struct SplitSelectedEvent {
    pub group_size: usize,
    pub branch_count: usize,
    pub origin: SplitOrigin,
    pub score: f64,
}

/// Payload for `on_generation_complete`.
#[derive(Debug, Clone)]
pub struct GenerationCompleteEvent {
    pub root_id: EntityId,
    pub taxon_nodes: usize,
    pub diff_nodes: usize,
    pub elapsed_ms: u64,
}

/// Payload for `on_generation_failed`.
#[derive(Debug, Clone)]
pub struct GenerationFailedEvent {
    pub root_id: EntityId,
    pub error_code: &'static str,
    pub message: String,
}
