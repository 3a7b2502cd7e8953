//! Generation options: the request form and its normalized, immutable form.

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::config::GenerationConfig;
use crate::constants::{
    DEFAULT_ENTITY_LIMIT, DEFAULT_MAX_BRANCHES_PER_SPLIT, MAX_BRANCHES_PER_SPLIT,
    MAX_DEPTH_FROM_ROOT, MAX_ENTITY_LIMIT, MIN_BRANCHES_PER_SPLIT, MIN_DEPTH_FROM_ROOT,
    MIN_ENTITY_LIMIT,
};
use crate::errors::OptionsError;

/// Which split shapes the scorer favors.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ShapePreference {
    /// Many branches of even size.
    #[default]
    Balanced,
    /// One dominant branch.
    Narrow,
    /// Scored like `Balanced`.
    Bushy,
}

impl ShapePreference {
    pub fn as_str(self) -> &'static str {
        match self {
            Self::Balanced => "balanced",
            Self::Narrow => "narrow",
            Self::Bushy => "bushy",
        }
    }
}

impl fmt::Display for ShapePreference {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for ShapePreference {
    type Err = OptionsError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "balanced" => Ok(Self::Balanced),
            "narrow" => Ok(Self::Narrow),
            "bushy" => Ok(Self::Bushy),
            other => Err(OptionsError::InvalidOptions {
                field: "shapePreference".to_string(),
                message: format!("unknown shape preference '{other}'"),
            }),
        }
    }
}

/// Generation parameters as they arrive on a request. Every field is optional.
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct GenerationOptions {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub entity_limit: Option<u32>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub shape_preference: Option<ShapePreference>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub max_branches_per_split: Option<u32>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub max_depth_from_root: Option<u32>,
}

impl GenerationOptions {
    /// Resolve against compiled defaults only.
    pub fn normalize(&self) -> Result<KeyOptions, OptionsError> {
        self.normalize_with(&GenerationConfig::default())
    }

    /// Resolve omitted fields from `config`, then from compiled defaults,
    /// and reject anything outside the declared bounds.
    pub fn normalize_with(&self, config: &GenerationConfig) -> Result<KeyOptions, OptionsError> {
        let entity_limit = self
            .entity_limit
            .or(config.entity_limit)
            .unwrap_or(DEFAULT_ENTITY_LIMIT);
        check_range("entityLimit", entity_limit, MIN_ENTITY_LIMIT, MAX_ENTITY_LIMIT)?;

        let max_branches = self
            .max_branches_per_split
            .or(config.max_branches_per_split)
            .unwrap_or(DEFAULT_MAX_BRANCHES_PER_SPLIT);
        check_range(
            "maxBranchesPerSplit",
            max_branches,
            MIN_BRANCHES_PER_SPLIT,
            MAX_BRANCHES_PER_SPLIT,
        )?;

        let max_depth = self.max_depth_from_root.or(config.max_depth_from_root);
        if let Some(depth) = max_depth {
            check_range("maxDepthFromRoot", depth, MIN_DEPTH_FROM_ROOT, MAX_DEPTH_FROM_ROOT)?;
        }

        let shape_preference = self
            .shape_preference
            .or(config.shape_preference)
            .unwrap_or_default();

        Ok(KeyOptions {
            entity_limit: entity_limit as usize,
            shape_preference,
            max_branches_per_split: max_branches as usize,
            max_depth_from_root: max_depth.map(|d| d as usize),
        })
    }
}

fn check_range(field: &str, value: u32, min: u32, max: u32) -> Result<(), OptionsError> {
    if (min..=max).contains(&value) {
        Ok(())
    } else {
        Err(OptionsError::InvalidOptions {
            field: field.to_string(),
            message: format!("must be between {min} and {max}, got {value}"),
        })
    }
}

/// Normalized generation options. Only constructible through
/// [`GenerationOptions::normalize`], so `max_branches_per_split >= 2` always holds.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct KeyOptions {
    entity_limit: usize,
    shape_preference: ShapePreference,
    max_branches_per_split: usize,
    max_depth_from_root: Option<usize>,
}

impl KeyOptions {
    pub fn entity_limit(&self) -> usize {
        self.entity_limit
    }

    pub fn shape_preference(&self) -> ShapePreference {
        self.shape_preference
    }

    pub fn max_branches_per_split(&self) -> usize {
        self.max_branches_per_split
    }

    /// Accepted and validated, but not consulted by the key builder.
    pub fn max_depth_from_root(&self) -> Option<usize> {
        self.max_depth_from_root
    }
}

impl Default for KeyOptions {
    fn default() -> Self {
        Self {
            entity_limit: DEFAULT_ENTITY_LIMIT as usize,
            shape_preference: ShapePreference::Balanced,
            max_branches_per_split: DEFAULT_MAX_BRANCHES_PER_SPLIT as usize,
            max_depth_from_root: None,
        }
    }
}
