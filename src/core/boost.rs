use crate::core::text::overlap_count;
use crate::models::{BoostWeights, PersonProfile};

/// Shared-attribute counts between a seeker and a candidate
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct SharedCounts {
    pub interests: usize,
    pub values: usize,
    pub goals: usize,
}

impl SharedCounts {
    pub fn between(seeker: &PersonProfile, candidate: &PersonProfile) -> Self {
        Self {
            interests: overlap_count(&seeker.interests, &candidate.interests),
            values: overlap_count(&seeker.values, &candidate.values),
            goals: overlap_count(&seeker.relationship_goals, &candidate.relationship_goals),
        }
    }
}

/// Calculate the deterministic overlap boost for a candidate
///
/// Scoring formula:
/// boost = min(
///     shared_interests * 3 +    # hobbies
///     shared_values * 5 +       # long-term signals weigh more
///     shared_goals * 7,         # relationship goals weigh most
///     20
/// )
pub fn deterministic_boost(
    seeker: &PersonProfile,
    candidate: &PersonProfile,
    weights: &BoostWeights,
) -> u32 {
    weighted_boost(SharedCounts::between(seeker, candidate), weights)
}

#[inline]
pub fn weighted_boost(shared: SharedCounts, weights: &BoostWeights) -> u32 {
    let weighted = (shared.interests as u64) * weights.interests as u64
        + (shared.values as u64) * weights.values as u64
        + (shared.goals as u64) * weights.goals as u64;

    weighted.min(weights.max_boost as u64) as u32
}
