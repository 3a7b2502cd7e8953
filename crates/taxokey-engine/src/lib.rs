//! # taxokey-engine
//!
//! Builds identification keys over a taxon hierarchy.
//!
//! Data flows strictly forward:
//! options → [`discovery`] → {[`split`] resolvers → merger → scorer} → [`builder`] → [`hydrator`].
//! [`generator::KeyGenerator`] orchestrates one request; [`worker::WorkerPool`]
//! runs requests off the calling thread.

pub mod builder;
pub mod discovery;
pub mod generator;
pub mod hydrator;
pub mod split;
pub mod worker;

pub use builder::{BuildStats, KeyBuilder};
pub use discovery::{discover, DiscoveredHierarchy};
pub use generator::{GeneratedKey, GenerationDiagnostics, KeyGenerator};
pub use hydrator::hydrate;
pub use worker::{WorkerPool, WorkerRequest, WorkerResponse};
