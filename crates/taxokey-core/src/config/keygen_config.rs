//! Top-level taxokey configuration with layered resolution.

use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};

use super::{GenerationConfig, HydrationConfig, WorkerConfig};
use crate::errors::{ConfigError, OptionsError};
use crate::models::{GenerationOptions, ShapePreference};

/// Project config file name, looked up in the directory passed to [`KeygenConfig::load`].
pub const PROJECT_CONFIG_FILE: &str = "taxokey.toml";

/// Top-level configuration aggregating all sub-configs.
///
/// Resolution order (highest priority first):
/// 1. Explicit overrides (applied via `apply_overrides`)
/// 2. Environment variables (`TAXOKEY_*`)
/// 3. Project config (`taxokey.toml` in the given root)
/// 4. User config (`~/.taxokey/config.toml`)
/// 5. Compiled defaults
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, Default)]
#[serde(default)]
pub struct KeygenConfig {
    pub generation: GenerationConfig,
    pub workers: WorkerConfig,
    pub hydration: HydrationConfig,
}

/// Programmatic overrides, applied above every other layer.
#[derive(Debug, Clone, Default)]
pub struct ConfigOverrides {
    pub entity_limit: Option<u32>,
    pub shape_preference: Option<ShapePreference>,
    pub max_branches_per_split: Option<u32>,
    pub worker_pool_size: Option<usize>,
}

impl KeygenConfig {
    /// Load configuration with layered resolution rooted at `root`.
    pub fn load(root: &Path, overrides: Option<&ConfigOverrides>) -> Result<Self, ConfigError> {
        let mut config = Self::default();

        // Layer 4 (lowest priority): user config
        if let Some(user_config_path) = Self::user_config_path() {
            if user_config_path.exists() {
                match Self::merge_toml_file(&mut config, &user_config_path) {
                    Ok(()) => {}
                    Err(e @ ConfigError::ParseError { .. }) => return Err(e),
                    Err(e) => {
                        tracing::warn!(error = %e, "ignoring unreadable user config");
                    }
                }
            }
        }

        // Layer 3: project config
        let project_config_path = root.join(PROJECT_CONFIG_FILE);
        if project_config_path.exists() {
            Self::merge_toml_file(&mut config, &project_config_path)?;
        }

        // Layer 2: environment variables
        Self::apply_env_overrides(&mut config);

        // Layer 1 (highest priority): explicit overrides
        if let Some(overrides) = overrides {
            Self::apply_overrides(&mut config, overrides);
        }

        Self::validate(&config)?;
        Ok(config)
    }

    /// Load configuration from a TOML string.
    pub fn from_toml(toml_str: &str) -> Result<Self, ConfigError> {
        toml::from_str(toml_str).map_err(|e| ConfigError::ParseError {
            path: "<string>".to_string(),
            message: e.to_string(),
        })
    }

    /// Serialize the config back to TOML.
    pub fn to_toml(&self) -> Result<String, ConfigError> {
        toml::to_string_pretty(self).map_err(|e| ConfigError::ParseError {
            path: "<serialization>".to_string(),
            message: e.to_string(),
        })
    }

    /// Validate the configuration values.
    ///
    /// Generation defaults go through the same bounds as request options.
    pub fn validate(config: &KeygenConfig) -> Result<(), ConfigError> {
        GenerationOptions::default()
            .normalize_with(&config.generation)
            .map_err(|e| match e {
                OptionsError::InvalidOptions { field, message } => ConfigError::ValidationFailed {
                    field: format!("generation.{}", snake_case(&field)),
                    message,
                },
            })?;

        if config.workers.pool_size == Some(0) {
            return Err(ConfigError::ValidationFailed {
                field: "workers.pool_size".to_string(),
                message: "must be greater than 0".to_string(),
            });
        }
        if config.workers.channel_capacity == Some(0) {
            return Err(ConfigError::ValidationFailed {
                field: "workers.channel_capacity".to_string(),
                message: "must be greater than 0".to_string(),
            });
        }
        Ok(())
    }

    /// Returns the user config path: `~/.taxokey/config.toml`.
    fn user_config_path() -> Option<PathBuf> {
        home_dir().map(|h| h.join(".taxokey").join("config.toml"))
    }

    /// Merge a TOML file into the existing config.
    /// Unknown keys are silently ignored (forward-compatible).
    fn merge_toml_file(config: &mut KeygenConfig, path: &Path) -> Result<(), ConfigError> {
        let content = std::fs::read_to_string(path).map_err(|_| ConfigError::FileNotFound {
            path: path.display().to_string(),
        })?;

        let file_config: KeygenConfig =
            toml::from_str(&content).map_err(|e| ConfigError::ParseError {
                path: path.display().to_string(),
                message: e.to_string(),
            })?;

        Self::merge(config, &file_config);
        Ok(())
    }

    /// Merge `other` into `base` wherever `other` has a value.
    fn merge(base: &mut KeygenConfig, other: &KeygenConfig) {
        let (b, o) = (&mut base.generation, &other.generation);
        b.entity_limit = o.entity_limit.or(b.entity_limit);
        b.shape_preference = o.shape_preference.or(b.shape_preference);
        b.max_branches_per_split = o.max_branches_per_split.or(b.max_branches_per_split);
        b.max_depth_from_root = o.max_depth_from_root.or(b.max_depth_from_root);

        let (b, o) = (&mut base.workers, &other.workers);
        b.pool_size = o.pool_size.or(b.pool_size);
        b.channel_capacity = o.channel_capacity.or(b.channel_capacity);

        base.hydration.parallel_lookups = other
            .hydration
            .parallel_lookups
            .or(base.hydration.parallel_lookups);
    }

    /// Apply environment variable overrides. Unparseable values are ignored.
    fn apply_env_overrides(config: &mut KeygenConfig) {
        if let Some(v) = env_parse::<u32>("TAXOKEY_ENTITY_LIMIT") {
            config.generation.entity_limit = Some(v);
        }
        if let Some(v) = env_parse::<ShapePreference>("TAXOKEY_SHAPE_PREFERENCE") {
            config.generation.shape_preference = Some(v);
        }
        if let Some(v) = env_parse::<u32>("TAXOKEY_MAX_BRANCHES") {
            config.generation.max_branches_per_split = Some(v);
        }
        if let Some(v) = env_parse::<usize>("TAXOKEY_WORKER_POOL_SIZE") {
            config.workers.pool_size = Some(v);
        }
    }

    fn apply_overrides(config: &mut KeygenConfig, overrides: &ConfigOverrides) {
        if let Some(v) = overrides.entity_limit {
            config.generation.entity_limit = Some(v);
        }
        if let Some(v) = overrides.shape_preference {
            config.generation.shape_preference = Some(v);
        }
        if let Some(v) = overrides.max_branches_per_split {
            config.generation.max_branches_per_split = Some(v);
        }
        if let Some(v) = overrides.worker_pool_size {
            config.workers.pool_size = Some(v);
        }
    }
}

fn env_parse<T: std::str::FromStr>(key: &str) -> Option<T> {
    std::env::var(key).ok().and_then(|v| v.parse().ok())
}

/// `maxBranchesPerSplit` -> `max_branches_per_split`.
fn snake_case(field: &str) -> String {
    let mut out = String::with_capacity(field.len() + 4);
    for ch in field.chars() {
        if ch.is_ascii_uppercase() {
            out.push('_');
            out.push(ch.to_ascii_lowercase());
        } else {
            out.push(ch);
        }
    }
    out
}

/// Cross-platform home directory resolution.
fn home_dir() -> Option<PathBuf> {
    std::env::var_os("HOME")
        .or_else(|| std::env::var_os("USERPROFILE"))
        .map(PathBuf::from)
}
