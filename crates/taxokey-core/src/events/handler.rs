//! KeygenEventHandler trait, all methods with no-op defaults.

use super::types::*;

/// Trait for observing key generation.
///
/// Handlers only override the events they care about. `Send + Sync` so a
/// handler can be shared with the worker pool.
pub trait KeygenEventHandler: Send + Sync {
    fn on_generation_started(&self, _event: &GenerationStartedEvent) {}
    fn on_discovery_complete(&self, _event: &DiscoveryCompleteEvent) {}
    fn on_entity_missing(&self, _event: &EntityMissingEvent) {}
    fn on_split_selected(&self, _event: &SplitSelectedEvent) {}
    fn on_generation_complete(&self, _event: &GenerationCompleteEvent) {}
    fn on_generation_failed(&self, _event: &GenerationFailedEvent) {}
}
