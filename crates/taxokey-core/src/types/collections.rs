//! Re-exports of performance-oriented collection types.

pub use rustc_hash::{FxHashMap, FxHashSet};
pub use smallvec::SmallVec;
pub use std::collections::BTreeMap;

/// SmallVec optimized for trait signatures (usually <4 traits per observation).
pub type SmallVec4<T> = SmallVec<[T; 4]>;
