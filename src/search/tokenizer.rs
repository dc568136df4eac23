use regex::Regex;
use std::collections::HashSet;
use std::sync::LazyLock;

/// Shortest token kept, in characters.
pub const MIN_TOKEN_LEN: usize = 2;

static WORD: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"[\p{L}\p{N}]+").expect("word pattern is valid"));

/// Distinct lower-cased terms of a document field.
pub fn tokenize_text(text: &str) -> HashSet<String> {
    WORD.find_iter(&text.to_lowercase())
        .map(|m| m.as_str().to_string())
        .filter(|word| word.chars().count() >= MIN_TOKEN_LEN)
        .collect()
}

/// Query tokens in input order. Duplicates are dropped so a repeated word
/// does not score twice.
pub fn tokenize_query(query: &str) -> Vec<String> {
    let mut seen = HashSet::new();
    WORD.find_iter(&query.to_lowercase())
        .map(|m| m.as_str().to_string())
        .filter(|word| word.chars().count() >= MIN_TOKEN_LEN)
        .filter(|word| seen.insert(word.clone()))
        .collect()
}
