//! Collaborator traits the engine consumes.
//!
//! Storage, schema, and transport live outside the engine; these traits are
//! the whole of what the engine needs from them.

pub mod catalog_lookup;
pub mod taxon_source;

pub use catalog_lookup::CatalogLookup;
pub use taxon_source::TaxonSource;
