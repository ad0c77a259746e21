use serde::{Deserialize, Serialize};
use validator::Validate;

/// A person taking part in a match request, either as seeker or candidate
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, Validate)]
pub struct PersonProfile {
    #[validate(length(min = 1))]
    pub id: String,
    #[validate(length(min = 1))]
    pub name: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    #[validate(range(min = 1))]
    pub age: Option<u32>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    #[validate(length(min = 1))]
    pub location: Option<String>,
    #[serde(default)]
    pub interests: Vec<String>,
    #[serde(default)]
    pub values: Vec<String>,
    #[serde(rename = "relationshipGoals", default)]
    pub relationship_goals: Vec<String>,
    #[serde(rename = "dealBreakers", default)]
    pub deal_breakers: Vec<String>,
}

impl PersonProfile {
    /// Profile with only the identity fields set
    pub fn new(id: impl Into<String>, name: impl Into<String>) -> Self {
        Self {
            id: id.into(),
            name: name.into(),
            age: None,
            location: None,
            interests: Vec::new(),
            values: Vec::new(),
            relationship_goals: Vec::new(),
            deal_breakers: Vec::new(),
        }
    }
}

/// Structured verdict returned by a compatibility scorer
///
/// Produced outside this crate, so it is validated on receipt before any
/// arithmetic touches it.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, Validate)]
pub struct MatchScore {
    #[serde(rename = "compatibilityScore")]
    #[validate(range(min = 0.0, max = 100.0))]
    pub compatibility_score: f64,
    #[serde(rename = "shortSummary")]
    #[validate(length(min = 1))]
    pub short_summary: String,
    #[validate(length(max = 5))]
    pub strengths: Vec<String>,
    #[validate(length(max = 5))]
    pub concerns: Vec<String>,
    #[serde(rename = "suggestedOpeningLine")]
    #[validate(length(min = 1))]
    pub suggested_opening_line: String,
}

/// Ranked outcome for a single candidate
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct MatchResult {
    pub candidate: PersonProfile,
    pub score: MatchScore,
    #[serde(rename = "blockedByDealBreaker")]
    pub blocked_by_deal_breaker: bool,
    #[serde(rename = "hardFilterReasons")]
    pub hard_filter_reasons: Vec<String>,
    #[serde(rename = "finalScore")]
    pub final_score: f64,
}

/// Weights for the deterministic overlap boost
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct BoostWeights {
    pub interests: u32,
    pub values: u32,
    pub goals: u32,
    pub max_boost: u32,
}

impl Default for BoostWeights {
    fn default() -> Self {
        Self {
            interests: 3,
            values: 5,
            goals: 7,
            max_boost: 20,
        }
    }
}
