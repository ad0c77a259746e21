use serde::{Deserialize, Serialize};
use std::borrow::Cow;
use std::collections::HashSet;
use validator::{Validate, ValidationError};
use crate::models::domain::PersonProfile;

/// Upper bound accepted for `topK`
pub const MAX_TOP_K: usize = 100;

/// Request to rank candidates against a seeker
#[derive(Debug, Clone, Serialize, Deserialize, Validate)]
#[validate(schema(function = "validate_unique_ids"))]
pub struct MatchRequest {
    #[validate(nested)]
    pub seeker: PersonProfile,
    #[validate(length(min = 1))]
    #[validate(nested)]
    pub candidates: Vec<PersonProfile>,
    #[serde(rename = "topK", default = "default_top_k")]
    #[validate(range(min = 1, max = 100))]
    pub top_k: usize,
}

impl MatchRequest {
    pub fn new(seeker: PersonProfile, candidates: Vec<PersonProfile>) -> Self {
        Self {
            seeker,
            candidates,
            top_k: default_top_k(),
        }
    }

    pub fn with_top_k(mut self, top_k: usize) -> Self {
        self.top_k = top_k;
        self
    }
}

pub fn default_top_k() -> usize {
    5
}

/// Clamp a user-supplied `topK` into the accepted range, falling back to the default
pub fn sanitize_top_k(raw: Option<i64>) -> usize {
    match raw {
        Some(k) if k > 0 => (k as usize).min(MAX_TOP_K),
        _ => default_top_k(),
    }
}

/// Read a `--top` value the way `parseInt` does: optional leading whitespace
/// and sign, then the leading run of digits. `"3abc"` and `"2.7"` give 3 and 2.
pub fn parse_top_k(raw: &str) -> Option<i64> {
    let trimmed = raw.trim_start();
    let (negative, rest) = match trimmed.strip_prefix('-') {
        Some(rest) => (true, rest),
        None => (false, trimmed.strip_prefix('+').unwrap_or(trimmed)),
    };

    let digits_end = rest
        .char_indices()
        .find(|(_, c)| !c.is_ascii_digit())
        .map(|(i, _)| i)
        .unwrap_or(rest.len());
    let digits = &rest[..digits_end];
    if digits.is_empty() {
        return None;
    }

    // Overlong digit runs saturate; sanitize_top_k clamps them anyway
    let value = digits.parse::<i64>().unwrap_or(i64::MAX);
    Some(if negative { -value } else { value })
}

/// Profile ids must be unique across the seeker and every candidate
fn validate_unique_ids(request: &MatchRequest) -> Result<(), ValidationError> {
    let mut seen = HashSet::with_capacity(request.candidates.len() + 1);
    seen.insert(request.seeker.id.as_str());

    for candidate in &request.candidates {
        if !seen.insert(candidate.id.as_str()) {
            let mut err = ValidationError::new("duplicate_profile_id");
            err.message = Some(Cow::from(format!(
                "profile id \"{}\" appears more than once in the request",
                candidate.id
            )));
            return Err(err);
        }
    }

    Ok(())
}
