// src/grading/normalize.rs

/// Canonical form of a single answer token: surrounding whitespace trimmed,
/// lowercased. Applied identically to key literals and student answers so
/// case or spacing variation never causes a false mismatch.
pub fn normalize(raw: &str) -> String {
    raw.trim().to_lowercase()
}

/// Splits a comma-separated answer list into normalized tokens.
/// Empty tokens (e.g. a trailing comma) are dropped.
pub fn split_answers(raw: &str) -> Vec<String> {
    raw.split(',')
        .map(normalize)
        .filter(|answer| !answer.is_empty())
        .collect()
}
