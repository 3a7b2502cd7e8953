//! The single ordering used to pick among candidate splits.

use std::cmp::Ordering;

use taxokey_core::models::SplitResult;

/// Score descending, then resolver origin (trait definition first), then
/// discovery order within the resolver.
pub fn compare(a: &SplitResult, b: &SplitResult) -> Ordering {
    b.score
        .total_cmp(&a.score)
        .then_with(|| a.origin.cmp(&b.origin))
        .then_with(|| a.ordinal.cmp(&b.ordinal))
}

/// Sort candidates best first.
pub fn rank(candidates: &mut [SplitResult]) {
    candidates.sort_by(compare);
}

/// Best candidate, if any.
pub fn best(candidates: &[SplitResult]) -> Option<&SplitResult> {
    candidates.iter().min_by(|a, b| compare(a, b))
}
