//! Hydration configuration.

use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, Default)]
#[serde(default)]
pub struct HydrationConfig {
    /// Run the four catalog lookups concurrently. Default: true.
    pub parallel_lookups: Option<bool>,
}

impl HydrationConfig {
    pub fn effective_parallel_lookups(&self) -> bool {
        self.parallel_lookups.unwrap_or(true)
    }
}
