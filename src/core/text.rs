use std::collections::HashSet;

/// Normalize free text for comparison: trim surrounding whitespace and lowercase
///
/// Inner whitespace is left alone so multi-word phrases keep their meaning.
#[inline]
pub fn normalize(input: &str) -> String {
    input.trim().to_lowercase()
}

/// Count how many entries of `items` appear in `reference` after normalization
///
/// `reference` is treated as a set; duplicates in `items` are counted
/// individually.
pub fn overlap_count<A, B>(reference: &[A], items: &[B]) -> usize
where
    A: AsRef<str>,
    B: AsRef<str>,
{
    let reference: HashSet<String> = reference.iter().map(|s| normalize(s.as_ref())).collect();

    items
        .iter()
        .filter(|item| reference.contains(&normalize(item.as_ref())))
        .count()
}
