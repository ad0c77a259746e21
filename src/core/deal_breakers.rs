use crate::core::text::normalize;
use crate::models::PersonProfile;

/// Build the searchable text for a candidate: location, interests, values and
/// relationship goals, each normalized and joined with a single space
fn candidate_corpus(candidate: &PersonProfile) -> String {
    let location = candidate.location.as_deref().unwrap_or("");

    std::iter::once(location)
        .chain(candidate.interests.iter().map(String::as_str))
        .chain(candidate.values.iter().map(String::as_str))
        .chain(candidate.relationship_goals.iter().map(String::as_str))
        .map(normalize)
        .collect::<Vec<_>>()
        .join(" ")
}

/// Check the seeker's deal-breakers against a candidate
///
/// A deal-breaker matches when its normalized text is a literal substring of
/// the candidate corpus. This is deliberately substring matching, so a phrase
/// can span several words and a short deal-breaker can also hit inside an
/// unrelated word. Returns one human-readable reason per matched deal-breaker,
/// in the seeker's order; an empty list means the candidate is not blocked.
pub fn check_deal_breakers(seeker: &PersonProfile, candidate: &PersonProfile) -> Vec<String> {
    let corpus = candidate_corpus(candidate);

    seeker
        .deal_breakers
        .iter()
        .filter(|deal_breaker| {
            let needle = normalize(deal_breaker);
            !needle.is_empty() && corpus.contains(&needle)
        })
        .map(|deal_breaker| format!("Matched seeker deal-breaker: \"{}\"", deal_breaker))
        .collect()
}
