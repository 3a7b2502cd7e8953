//! Default generation parameters.

use serde::{Deserialize, Serialize};

use crate::constants::{DEFAULT_ENTITY_LIMIT, DEFAULT_MAX_BRANCHES_PER_SPLIT};
use crate::models::ShapePreference;

/// Defaults applied to requests that omit a generation option.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, Default)]
#[serde(default)]
pub struct GenerationConfig {
    /// Entity-count ceiling for discovery. Default: 500.
    pub entity_limit: Option<u32>,
    /// Split shape preference. Default: balanced.
    pub shape_preference: Option<ShapePreference>,
    /// Maximum branches per split. Default: 5.
    pub max_branches_per_split: Option<u32>,
    /// Maximum key depth from the root. Unset by default.
    pub max_depth_from_root: Option<u32>,
}

impl GenerationConfig {
    /// Returns the effective entity limit, defaulting to 500.
    pub fn effective_entity_limit(&self) -> u32 {
        self.entity_limit.unwrap_or(DEFAULT_ENTITY_LIMIT)
    }

    /// Returns the effective shape preference, defaulting to balanced.
    pub fn effective_shape_preference(&self) -> ShapePreference {
        self.shape_preference.unwrap_or_default()
    }

    /// Returns the effective branches-per-split ceiling, defaulting to 5.
    pub fn effective_max_branches_per_split(&self) -> u32 {
        self.max_branches_per_split
            .unwrap_or(DEFAULT_MAX_BRANCHES_PER_SPLIT)
    }
}
