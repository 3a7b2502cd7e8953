//! Shared test support for the taxokey workspace.
//!
//! - [`InMemoryCatalog`]: implements every collaborator trait over hash maps
//!   and counts round trips so tests can assert on batching.
//! - [`TaxonomyBuilder`]: fluent construction of small taxonomies.
//! - [`fixtures`]: canned and generated taxonomies, plus JSON loading.

pub mod builder;
pub mod catalog;
pub mod fixtures;

pub use builder::TaxonomyBuilder;
pub use catalog::{CallCounts, FailingSource, InMemoryCatalog};
