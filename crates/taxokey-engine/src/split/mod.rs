//! Candidate-split generation for one sibling group.
//!
//! Two independent resolvers produce candidates of the same shape. Trait
//! candidates are merged by partition first, then everything is ranked with
//! [`select::compare`].

pub mod category_presence;
pub mod merger;
pub mod scorer;
pub mod select;
pub mod signature;
pub mod trait_definition;

use taxokey_core::errors::SplitError;
use taxokey_core::models::{EntityNode, KeyOptions, SplitResult};

pub use signature::{group_disjoint, Grouping, SignatureGroup, TraitSignature};

/// Every positive-scoring candidate for `members`, best first.
pub fn candidates(
    members: &[&EntityNode],
    options: &KeyOptions,
) -> Result<Vec<SplitResult>, SplitError> {
    let mut all = merger::merge(trait_definition::resolve(members, options), options)?;
    all.extend(category_presence::resolve(members));
    all.retain(|s| s.score > 0.0);
    select::rank(&mut all);
    Ok(all)
}
