// Text normalization for keyword matching.
//
// Every downstream matcher (polarity lexicon, topic triggers, urgency terms)
// operates on the canonical form produced here, so matching stays insensitive
// to casing, punctuation, and whitespace in the raw feedback.

/// Normalize raw feedback text into canonical matching form.
///
/// Lowercases, drops every character that is not alphanumeric or whitespace,
/// then collapses whitespace runs to a single space and trims. Unicode letters
/// and digits survive — "Schön" becomes "schön", not "schn".
///
/// Total function: empty input yields an empty string.
pub fn normalize(text: &str) -> String {
    let lowered = text.to_lowercase();
    let stripped: String = lowered
        .chars()
        .filter(|c| c.is_alphanumeric() || c.is_whitespace())
        .collect();

    stripped.split_whitespace().collect::<Vec<_>>().join(" ")
}
