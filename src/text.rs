/// Strips leading and trailing whitespace (space, tab, CR, LF, ...).
#[must_use]
pub fn trim(s: &str) -> &str {
    s.trim()
}

/// True when both strings have the same number of characters and each pair
/// matches once uppercased.
#[must_use]
pub fn equals_case_insensitive(a: &str, b: &str) -> bool {
    a.chars().count() == b.chars().count()
        && a
            .chars()
            .zip(b.chars())
            .all(|(x, y)| x.to_uppercase().eq(y.to_uppercase()))
}
