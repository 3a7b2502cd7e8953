//! Category-presence resolver: "has any trait in category G" vs "has none".

use taxokey_core::models::{
    EntityNode, PresenceStatus, Rationale, SplitBranch, SplitOrigin, SplitResult,
};
use taxokey_core::types::CategoryId;

use super::scorer;

/// One two-branch candidate per category that some, but not all, members carry.
/// Returned in order of each category's first appearance.
pub fn resolve(members: &[&EntityNode]) -> Vec<SplitResult> {
    if members.len() < 2 {
        return Vec::new();
    }

    let mut categories: Vec<CategoryId> = Vec::new();
    for member in members {
        for obs in &member.trait_observations {
            if !categories.contains(&obs.category_id) {
                categories.push(obs.category_id);
            }
        }
    }

    categories
        .into_iter()
        .enumerate()
        .filter_map(|(ordinal, category_id)| {
            let (present, absent): (Vec<&EntityNode>, Vec<&EntityNode>) =
                members.iter().copied().partition(|m| m.has_category(category_id));
            if present.is_empty() || absent.is_empty() {
                return None;
            }
            let score = scorer::presence_score(present.len(), absent.len());
            Some(SplitResult {
                branches: vec![
                    branch(&present, category_id, PresenceStatus::Present),
                    branch(&absent, category_id, PresenceStatus::Absent),
                ],
                score,
                origin: SplitOrigin::CategoryPresence,
                ordinal,
            })
        })
        .collect()
}

fn branch(members: &[&EntityNode], category_id: CategoryId, status: PresenceStatus) -> SplitBranch {
    SplitBranch {
        members: members.iter().map(|m| m.id).collect(),
        rationale: Rationale::CategoryPresence {
            category_id,
            status,
        },
    }
}
