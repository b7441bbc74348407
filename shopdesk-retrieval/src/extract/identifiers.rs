use std::sync::LazyLock;

use regex::Regex;

static DIGIT_RUN: LazyLock<Option<Regex>> = LazyLock::new(|| Regex::new(r"\b\d+\b").ok());

/// Standalone digit runs in first-occurrence order. Repeats are kept.
pub fn extract_identifiers(text: &str) -> Vec<String> {
    let Some(re) = DIGIT_RUN.as_ref() else {
        return Vec::new();
    };
    re.find_iter(text).map(|m| m.as_str().to_string()).collect()
}
