//! Split scoring.
//!
//! The structural term depends only on branch sizes and the shape preference.
//! Trait-definition splits are then penalized for inverted clauses and
//! rewarded for every clause they carry, so merged splits outrank their parts.

use taxokey_core::constants::{
    CLAUSE_BONUS, EVICTION_PENALTY, INVERTED_MIN_MULTIPLIER, INVERTED_WEIGHT,
};
use taxokey_core::models::{ShapePreference, SplitOrigin, SplitResult};

/// Size-only desirability of a partition.
pub fn structural_score(sizes: &[usize], shape: ShapePreference) -> f64 {
    match shape {
        ShapePreference::Narrow => sizes.iter().map(|n| (n * n) as f64).sum(),
        ShapePreference::Balanced | ShapePreference::Bushy => {
            let k = sizes.len() as f64;
            if k == 0.0 {
                return 0.0;
            }
            let total: f64 = sizes.iter().map(|n| *n as f64).sum();
            let even = total / k;
            let deviation: f64 = sizes.iter().map(|n| (*n as f64 - even).abs()).sum();
            total * k - deviation
        }
    }
}

/// Presence/absence score: largest when the two sides are even.
pub fn presence_score(present: usize, absent: usize) -> f64 {
    (present * absent) as f64
}

/// Score of a trait-definition split from its sizes and clause counts.
pub fn trait_split_score(
    sizes: &[usize],
    clauses: usize,
    inverted_clauses: usize,
    has_unresolved_branch: bool,
    shape: ShapePreference,
) -> f64 {
    let structural = structural_score(sizes, shape);
    let inverted_fraction = if clauses == 0 {
        0.0
    } else {
        inverted_clauses as f64 / clauses as f64
    };
    let modifier = (1.0 - INVERTED_WEIGHT * inverted_fraction).max(INVERTED_MIN_MULTIPLIER);
    let penalty = if has_unresolved_branch {
        EVICTION_PENALTY
    } else {
        1.0
    };
    (structural * modifier * penalty + clauses as f64 * CLAUSE_BONUS).max(0.0)
}

/// Score an assembled split according to its origin. Never negative.
pub fn score(split: &SplitResult, shape: ShapePreference) -> f64 {
    match split.origin {
        SplitOrigin::TraitDefinition => trait_split_score(
            &split.branch_sizes(),
            split.clause_count(),
            split.inverted_clause_count(),
            split.has_unresolved_branch(),
            shape,
        ),
        SplitOrigin::CategoryPresence => {
            let sizes = split.branch_sizes();
            match sizes.as_slice() {
                [present, absent] => presence_score(*present, *absent),
                _ => 0.0,
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_balanced_prefers_even_branches() {
        let even = structural_score(&[3, 3], ShapePreference::Balanced);
        let skewed = structural_score(&[5, 1], ShapePreference::Balanced);
        assert_eq!(even, 12.0);
        assert_eq!(skewed, 8.0);
    }

    #[test]
    fn test_narrow_prefers_dominant_branch() {
        assert!(
            structural_score(&[5, 1], ShapePreference::Narrow)
                > structural_score(&[3, 3], ShapePreference::Narrow)
        );
    }

    #[test]
    fn test_bushy_scores_like_balanced() {
        assert_eq!(
            structural_score(&[4, 2, 1], ShapePreference::Bushy),
            structural_score(&[4, 2, 1], ShapePreference::Balanced)
        );
    }

    #[test]
    fn test_clean_trait_split_gets_clause_bonus() {
        // 3 members split 2/1: 6 - 1 = 5, plus 2 clauses.
        let s = trait_split_score(&[2, 1], 2, 0, false, ShapePreference::Balanced);
        assert_eq!(s, 25.0);
    }

    #[test]
    fn test_inverted_branch_is_penalized() {
        // 22 - 1 = 21, x0.75 for half inverted, x0.25 eviction, + 20.
        let s = trait_split_score(&[5, 6], 2, 1, true, ShapePreference::Balanced);
        assert!((s - 23.9375).abs() < 1e-9);
    }

    #[test]
    fn test_presence_score_is_product() {
        assert_eq!(presence_score(4, 6), 24.0);
        assert_eq!(presence_score(0, 6), 0.0);
    }
}
