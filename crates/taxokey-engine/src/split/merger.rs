//! Coalesces trait-definition splits that induce the same member partition.
//!
//! Several characters that separate a group identically reinforce one
//! structural split instead of competing: their clauses are unioned branch by
//! branch and the result is rescored once.

use taxokey_core::errors::SplitError;
use taxokey_core::models::{KeyOptions, PartitionKey, Rationale, SplitResult};
use taxokey_core::types::FxHashMap;
use tracing::debug;

use super::scorer;

/// Merge splits sharing a partition. Groups keep the order in which their
/// first split appears; a partition seen once passes through untouched.
pub fn merge(splits: Vec<SplitResult>, options: &KeyOptions) -> Result<Vec<SplitResult>, SplitError> {
    let mut slots: FxHashMap<PartitionKey, usize> = FxHashMap::default();
    let mut groups: Vec<Vec<SplitResult>> = Vec::new();

    for split in splits {
        let key = split.partition_key();
        match slots.get(&key) {
            Some(&slot) => groups[slot].push(split),
            None => {
                slots.insert(key, groups.len());
                groups.push(vec![split]);
            }
        }
    }

    groups
        .into_iter()
        .map(|group| merge_group(group, options))
        .collect()
}

fn merge_group(group: Vec<SplitResult>, options: &KeyOptions) -> Result<SplitResult, SplitError> {
    let mut iter = group.into_iter();
    let Some(mut merged) = iter.next() else {
        return Err(SplitError::InconsistentPartition {
            details: "empty merge group".to_string(),
        });
    };

    let mut absorbed = 0usize;
    for other in iter {
        absorb(&mut merged, other)?;
        absorbed += 1;
    }

    if absorbed > 0 {
        merged.score = scorer::score(&merged, options.shape_preference());
        debug!(
            absorbed,
            clauses = merged.clause_count(),
            score = merged.score,
            "merged splits sharing a partition"
        );
    }
    Ok(merged)
}

/// Append every clause of `other` onto the branch of `target` with the same
/// member set.
fn absorb(target: &mut SplitResult, other: SplitResult) -> Result<(), SplitError> {
    if target.branches.len() != other.branches.len() {
        return Err(SplitError::InconsistentPartition {
            details: format!(
                "branch counts differ: {} vs {}",
                target.branches.len(),
                other.branches.len()
            ),
        });
    }

    for branch in other.branches {
        let members = branch.sorted_members();
        let Some(slot) = target
            .branches
            .iter_mut()
            .find(|b| b.sorted_members() == members)
        else {
            return Err(SplitError::InconsistentPartition {
                details: format!("no branch with members {members:?}"),
            });
        };

        match (&mut slot.rationale, branch.rationale) {
            (Rationale::TraitClauses { clauses }, Rationale::TraitClauses { clauses: more }) => {
                clauses.extend(more);
            }
            _ => {
                return Err(SplitError::InconsistentPartition {
                    details: "only trait-clause rationales can be merged".to_string(),
                });
            }
        }
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use taxokey_core::models::{
        PresenceStatus, SplitBranch, SplitOrigin, Trait, TraitClause,
    };
    use taxokey_core::types::{CategoryId, CharacterId, EntityId, TraitId};

    fn clause(character: u64, trait_id: u64) -> Rationale {
        Rationale::TraitClauses {
            clauses: vec![TraitClause {
                character_id: CharacterId(character),
                category_id: CategoryId(1),
                traits: vec![Trait::canonical(TraitId(trait_id), "t")],
                inverted: false,
            }],
        }
    }

    fn split(character: u64, parts: &[&[u64]], ordinal: usize) -> SplitResult {
        SplitResult {
            branches: parts
                .iter()
                .enumerate()
                .map(|(i, members)| SplitBranch {
                    members: members.iter().copied().map(EntityId).collect(),
                    rationale: clause(character, character * 10 + i as u64),
                })
                .collect(),
            score: 24.0,
            origin: SplitOrigin::TraitDefinition,
            ordinal,
        }
    }

    #[test]
    fn test_single_split_passes_through_unchanged() {
        let input = vec![split(10, &[&[1], &[2]], 0)];
        let merged = merge(input.clone(), &KeyOptions::default()).unwrap();
        assert_eq!(merged, input);
    }

    #[test]
    fn test_same_partition_merges_by_member_set() {
        let a = split(10, &[&[1], &[2]], 0);
        let b = split(11, &[&[2], &[1]], 1);
        let merged = merge(vec![a, b], &KeyOptions::default()).unwrap();

        assert_eq!(merged.len(), 1);
        let m = &merged[0];
        assert_eq!(m.ordinal, 0);
        assert_eq!(m.clause_count(), 4);
        // 2 members split 1/1: 4 structural + 4 clauses.
        assert_eq!(m.score, 44.0);
        let Rationale::TraitClauses { clauses } = &m.branches[0].rationale else {
            panic!("expected trait clauses");
        };
        assert_eq!(clauses[0].character_id, CharacterId(10));
        assert_eq!(clauses[1].character_id, CharacterId(11));
        assert_eq!(clauses[1].traits[0].id, TraitId(111));
    }

    #[test]
    fn test_distinct_partitions_stay_separate_in_order() {
        let a = split(10, &[&[1, 2], &[3]], 0);
        let b = split(11, &[&[1], &[2, 3]], 1);
        let c = split(12, &[&[3], &[1, 2]], 2);
        let merged = merge(vec![a, b, c], &KeyOptions::default()).unwrap();
        assert_eq!(merged.len(), 2);
        assert_eq!(merged[0].ordinal, 0);
        assert_eq!(merged[0].clause_count(), 4);
        assert_eq!(merged[1].ordinal, 1);
    }

    #[test]
    fn test_presence_rationale_cannot_merge() {
        let mut target = split(10, &[&[1], &[2]], 0);
        let mut other = split(11, &[&[1], &[2]], 1);
        other.branches[0].rationale = Rationale::CategoryPresence {
            category_id: CategoryId(1),
            status: PresenceStatus::Present,
        };
        let err = absorb(&mut target, other).unwrap_err();
        assert!(matches!(err, SplitError::InconsistentPartition { .. }));
    }

    #[test]
    fn test_mismatched_members_are_inconsistent() {
        let mut target = split(10, &[&[1], &[2]], 0);
        let other = split(11, &[&[1], &[3]], 1);
        assert!(absorb(&mut target, other).is_err());
    }
}
