//! Shared constants for the taxokey engine.

/// taxokey version string.
pub const VERSION: &str = env!("CARGO_PKG_VERSION");

// ---- Generation option bounds ----

/// Default ceiling on the number of discovered entities.
pub const DEFAULT_ENTITY_LIMIT: u32 = 500;

/// Smallest accepted entity limit.
pub const MIN_ENTITY_LIMIT: u32 = 1;

/// Largest accepted entity limit.
pub const MAX_ENTITY_LIMIT: u32 = 500;

/// Default maximum number of branches a single split may produce.
pub const DEFAULT_MAX_BRANCHES_PER_SPLIT: u32 = 5;

/// Smallest accepted branches-per-split ceiling. A split needs two sides.
pub const MIN_BRANCHES_PER_SPLIT: u32 = 2;

/// Largest accepted branches-per-split ceiling.
pub const MAX_BRANCHES_PER_SPLIT: u32 = 10;

/// Smallest accepted `max_depth_from_root`.
pub const MIN_DEPTH_FROM_ROOT: u32 = 1;

/// Largest accepted `max_depth_from_root`.
pub const MAX_DEPTH_FROM_ROOT: u32 = 10;

// ---- Split scoring ----

/// Floor for the inverted-fraction multiplier on trait splits.
pub const INVERTED_MIN_MULTIPLIER: f64 = 0.2;

/// How strongly the inverted-clause fraction reduces the structural score.
pub const INVERTED_WEIGHT: f64 = 0.5;

/// Flat bonus per rationale clause carried by a trait split.
pub const CLAUSE_BONUS: f64 = 10.0;

/// Multiplier on the structural term of a trait split that has a catch-all branch.
pub const EVICTION_PENALTY: f64 = 0.25;

// ---- Workers ----

/// Default number of key-generation worker threads.
pub const DEFAULT_WORKER_POOL_SIZE: usize = 2;

/// Default request-channel capacity per worker.
pub const DEFAULT_WORKER_CHANNEL_CAPACITY: usize = 1;

/// Environment variable read by `init_tracing`.
pub const LOG_ENV_VAR: &str = "TAXOKEY_LOG";

/// Filter used when `TAXOKEY_LOG` is unset or invalid.
pub const DEFAULT_LOG_FILTER: &str = "taxokey=info";
