//! EventDispatcher — synchronous event dispatch with zero overhead when empty.

use std::sync::Arc;

use super::handler::KeygenEventHandler;
use super::types::*;

/// Synchronous event dispatcher wrapping a list of handlers.
#[derive(Default, Clone)]
pub struct EventDispatcher {
    handlers: Vec<Arc<dyn KeygenEventHandler>>,
}

impl EventDispatcher {
    pub fn new() -> Self {
        Self {
            handlers: Vec::new(),
        }
    }

    pub fn register(&mut self, handler: Arc<dyn KeygenEventHandler>) {
        self.handlers.push(handler);
    }

    pub fn handler_count(&self) -> usize {
        self.handlers.len()
    }

    /// Emit an event to all registered handlers.
    /// A panicking handler does not prevent later handlers from receiving the event.
    fn emit<F: Fn(&dyn KeygenEventHandler)>(&self, f: F) {
        for (index, handler) in self.handlers.iter().enumerate() {
            let result = std::panic::catch_unwind(std::panic::AssertUnwindSafe(|| {
                f(handler.as_ref());
            }));
            if result.is_err() {
                ::tracing::warn!(handler = index, "event handler panicked");
            }
        }
    }

    pub fn emit_generation_started(&self, event: &GenerationStartedEvent) {
        self.emit(|h| h.on_generation_started(event));
    }

    pub fn emit_discovery_complete(&self, event: &DiscoveryCompleteEvent) {
        self.emit(|h| h.on_discovery_complete(event));
    }

    pub fn emit_entity_missing(&self, event: &EntityMissingEvent) {
        self.emit(|h| h.on_entity_missing(event));
    }

    pub fn emit_split_selected(&self, event: &SplitSelectedEvent) {
        self.emit(|h| h.on_split_selected(event));
    }

    pub fn emit_generation_complete(&self, event: &GenerationCompleteEvent) {
        self.emit(|h| h.on_generation_complete(event));
    }

    pub fn emit_generation_failed(&self, event: &GenerationFailedEvent) {
        self.emit(|h| h.on_generation_failed(event));
    }
}

impl std::fmt::Debug for EventDispatcher {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("EventDispatcher")
            .field("handlers", &self.handlers.len())
            .finish()
    }
}
