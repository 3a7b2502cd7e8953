//! Trait-definition resolver: one candidate split per shared character.

use taxokey_core::models::{
    EntityNode, KeyOptions, Rationale, SplitBranch, SplitOrigin, SplitResult, Trait, TraitClause,
};
use taxokey_core::types::{CategoryId, CharacterId, EntityId};
use tracing::trace;

use super::scorer;
use super::select;
use super::signature::{group_disjoint, Grouping, SignatureGroup};

/// A character observed on every member, with each member's merged traits.
#[derive(Debug, Clone)]
struct NormalizedCharacter {
    character_id: CharacterId,
    category_id: CategoryId,
    entries: Vec<(EntityId, Vec<Trait>)>,
}

/// Candidate splits for `members`, highest score first.
///
/// Characters are tried in order of first appearance; a candidate's
/// `ordinal` is its character's position in that order.
pub fn resolve(members: &[&EntityNode], options: &KeyOptions) -> Vec<SplitResult> {
    if members.len() < 2 {
        return Vec::new();
    }

    let mut results = Vec::new();
    for (ordinal, character_id) in characters_in_order(members).into_iter().enumerate() {
        let Some(normalized) = normalize(members, character_id) else {
            trace!(character = %character_id, "character not shared cleanly, skipped");
            continue;
        };
        if let Some(split) = split_on(normalized, ordinal, options) {
            results.push(split);
        }
    }

    select::rank(&mut results);
    results
}

fn characters_in_order(members: &[&EntityNode]) -> Vec<CharacterId> {
    let mut out: Vec<CharacterId> = Vec::new();
    for member in members {
        for obs in &member.trait_observations {
            if !out.contains(&obs.character_id) {
                out.push(obs.character_id);
            }
        }
    }
    out
}

/// `None` when any member lacks the character, records it with no traits,
/// or the character's category differs between observations.
fn normalize(members: &[&EntityNode], character_id: CharacterId) -> Option<NormalizedCharacter> {
    let mut category_id: Option<CategoryId> = None;
    let mut entries = Vec::with_capacity(members.len());

    for member in members {
        let mut traits: Vec<Trait> = Vec::new();
        let mut seen_any = false;
        for obs in member.observations_for(character_id) {
            seen_any = true;
            if obs.trait_values.is_empty() {
                return None;
            }
            match category_id {
                Some(existing) if existing != obs.category_id => return None,
                _ => category_id = Some(obs.category_id),
            }
            for t in &obs.trait_values {
                if !traits.iter().any(|x| x.canonical_id == t.canonical_id) {
                    traits.push(t.clone());
                }
            }
        }
        if !seen_any {
            return None;
        }
        entries.push((member.id, traits));
    }

    Some(NormalizedCharacter {
        character_id,
        category_id: category_id?,
        entries,
    })
}

fn split_on(
    normalized: NormalizedCharacter,
    ordinal: usize,
    options: &KeyOptions,
) -> Option<SplitResult> {
    let Grouping {
        mut groups,
        mut rejected,
    } = group_disjoint(&normalized.entries);

    if groups.len() < 2 {
        trace!(
            character = %normalized.character_id,
            clean = groups.len(),
            rejected = rejected.len(),
            "too few clean groups"
        );
        return None;
    }

    enforce_max_branches(
        &mut groups,
        &mut rejected,
        options.max_branches_per_split(),
        &normalized.entries,
    );

    let clause = |traits: Vec<Trait>, inverted: bool| Rationale::TraitClauses {
        clauses: vec![TraitClause {
            character_id: normalized.character_id,
            category_id: normalized.category_id,
            traits,
            inverted,
        }],
    };

    let mut kept_traits: Vec<Trait> = Vec::new();
    let mut branches: Vec<SplitBranch> = Vec::with_capacity(groups.len() + 1);
    for group in groups {
        kept_traits.extend(group.traits.iter().cloned());
        branches.push(SplitBranch {
            members: group.members,
            rationale: clause(group.traits, false),
        });
    }
    if !rejected.is_empty() {
        kept_traits.sort_by_key(|t| t.canonical_id);
        branches.push(SplitBranch {
            members: rejected,
            rationale: clause(kept_traits, true),
        });
    }

    let mut split = SplitResult {
        branches,
        score: 0.0,
        origin: SplitOrigin::TraitDefinition,
        ordinal,
    };
    split.score = scorer::score(&split, options.shape_preference());
    (split.score > 0.0).then_some(split)
}

/// Keep the `max - 1` largest groups when the catch-all would push the
/// branch count over `max`, folding the rest into the reject pool.
fn enforce_max_branches(
    groups: &mut Vec<SignatureGroup>,
    rejected: &mut Vec<EntityId>,
    max: usize,
    entries: &[(EntityId, Vec<Trait>)],
) {
    let catch_all = usize::from(!rejected.is_empty());
    if groups.len() + catch_all <= max {
        return;
    }

    groups.sort_by(|a, b| b.len().cmp(&a.len()));
    let folded = groups.split_off(max.saturating_sub(1).max(1));
    for group in folded {
        rejected.extend(group.members);
    }
    // Reject pool stays in input order.
    rejected.sort_by_key(|id| entries.iter().position(|(e, _)| e == id));
}

#[cfg(test)]
mod tests {
    use super::*;
    use taxokey_core::models::{GenerationOptions, Observation};
    use taxokey_core::types::TraitId;

    fn node(id: u64, obs: &[(u64, u64, &[u64])]) -> EntityNode {
        EntityNode {
            id: EntityId(id),
            display_rank: "species".into(),
            subtaxon_ids: Vec::new(),
            trait_observations: obs
                .iter()
                .map(|(character, category, traits)| Observation {
                    character_id: CharacterId(*character),
                    category_id: CategoryId(*category),
                    trait_values: traits
                        .iter()
                        .map(|t| Trait::canonical(TraitId(*t), format!("t{t}")))
                        .collect(),
                })
                .collect(),
        }
    }

    #[test]
    fn test_member_missing_character_rejects_it() {
        let a = node(1, &[(10, 1, &[100]), (11, 1, &[110])]);
        let b = node(2, &[(10, 1, &[101])]);
        let splits = resolve(&[&a, &b], &KeyOptions::default());
        assert_eq!(splits.len(), 1);
        assert_eq!(splits[0].ordinal, 0);
    }

    #[test]
    fn test_empty_trait_list_rejects_character() {
        let a = node(1, &[(10, 1, &[100])]);
        let b = node(2, &[(10, 1, &[])]);
        assert!(resolve(&[&a, &b], &KeyOptions::default()).is_empty());
    }

    #[test]
    fn test_category_disagreement_rejects_character() {
        let a = node(1, &[(10, 1, &[100])]);
        let b = node(2, &[(10, 2, &[101])]);
        assert!(resolve(&[&a, &b], &KeyOptions::default()).is_empty());
    }

    #[test]
    fn test_repeated_observations_are_merged() {
        let a = node(1, &[(10, 1, &[100]), (10, 1, &[101])]);
        let b = node(2, &[(10, 1, &[101, 100])]);
        let c = node(3, &[(10, 1, &[102])]);
        let splits = resolve(&[&a, &b, &c], &KeyOptions::default());
        assert_eq!(splits.len(), 1);
        assert_eq!(splits[0].branches[0].members, vec![EntityId(1), EntityId(2)]);
    }

    #[test]
    fn test_catch_all_carries_union_of_kept_traits() {
        let options = GenerationOptions {
            max_branches_per_split: Some(3),
            ..Default::default()
        }
        .normalize()
        .unwrap();
        let nodes = [
            node(1, &[(10, 1, &[100])]),
            node(2, &[(10, 1, &[101])]),
            node(3, &[(10, 1, &[102])]),
            node(4, &[(10, 1, &[100])]),
            node(5, &[(10, 1, &[103])]),
        ];
        let refs: Vec<&EntityNode> = nodes.iter().collect();
        let split = &resolve(&refs, &options)[0];

        assert_eq!(split.branches.len(), 3);
        assert_eq!(split.branches[0].members, vec![EntityId(1), EntityId(4)]);
        let last = &split.branches[2];
        assert!(last.rationale.is_unresolved());
        let Rationale::TraitClauses { clauses } = &last.rationale else {
            panic!("expected trait clauses");
        };
        let ids: Vec<TraitId> = clauses[0].traits.iter().map(|t| t.canonical_id).collect();
        assert_eq!(ids, vec![TraitId(100), TraitId(101)]);
        assert_eq!(last.members, vec![EntityId(3), EntityId(5)]);
    }
}
