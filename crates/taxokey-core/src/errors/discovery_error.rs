//! Hierarchy discovery errors.

use super::error_code::{self, KeygenErrorCode};
use super::SourceError;
use crate::types::EntityId;

#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum DiscoveryError {
    #[error("No entities reachable from root {root_id}")]
    EmptySubtree { root_id: EntityId },

    /// Non-fatal: the entity is skipped and traversal continues.
    #[error("Entity {id} vanished during traversal")]
    MissingEntity { id: EntityId },

    #[error("Source error during discovery: {0}")]
    Source(#[from] SourceError),
}

impl DiscoveryError {
    /// Whether discovery can continue past this error.
    pub fn is_recoverable(&self) -> bool {
        matches!(self, Self::MissingEntity { .. })
    }
}

impl KeygenErrorCode for DiscoveryError {
    fn error_code(&self) -> &'static str {
        match self {
            Self::EmptySubtree { .. } => error_code::EMPTY_SUBTREE,
            Self::MissingEntity { .. } => error_code::MISSING_ENTITY,
            Self::Source(e) => e.error_code(),
        }
    }
}
