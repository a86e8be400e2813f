//! Mapping free user text onto canonical coin ids
//!
//! Resolution is exact after normalization: uppercase, trimmed, and as a
//! second attempt with every non-alphanumeric character removed. The raw text
//! is tried before the filler-stripped text. Nothing is guessed; partial or
//! ambiguous names are rejected.

use regex::Regex;
use std::collections::HashMap;
use std::sync::LazyLock;

/// Uppercase lookup key -> canonical coin id
pub type CoinMap = HashMap<String, String>;

static FILLER: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(
        r"(?i)\b(what\s+is|what'?s|how\s+much|prices?|of|check|value|the|show|me|for|please|coin|token)\b",
    )
    .expect("filler pattern is valid")
});

/// Strip filler words and surrounding noise from a message.
///
/// Returns the uppercased remainder, or `None` when nothing alphanumeric is
/// left.
pub fn clean_input(text: &str) -> Option<String> {
    let stripped = FILLER.replace_all(text, " ");
    let collapsed = stripped.split_whitespace().collect::<Vec<_>>().join(" ");
    let cleaned = collapsed.trim_matches(|c: char| c.is_whitespace() || c == '?' || c == '!');

    if cleaned.chars().any(char::is_alphanumeric) {
        Some(cleaned.to_uppercase())
    } else {
        None
    }
}

/// Remove everything that is not a letter or digit
pub fn sanitize(text: &str) -> String {
    text.chars().filter(|c| c.is_alphanumeric()).collect()
}

/// Normalize a directory key the same way queries are normalized
pub fn normalize_key(raw: &str) -> String {
    raw.trim().to_uppercase()
}

/// Resolve user text against a loaded directory.
///
/// The text is first matched as typed, so ids and names that contain filler
/// words ("the-graph", "usd-coin") stay reachable. Only when that misses is
/// the filler-stripped form tried.
pub fn resolve_in(map: &CoinMap, text: &str) -> Option<String> {
    lookup(map, &normalize_key(text)).or_else(|| {
        let cleaned = clean_input(text)?;
        lookup(map, &cleaned)
    })
}

/// Direct key match, then the punctuation-free retry
fn lookup(map: &CoinMap, key: &str) -> Option<String> {
    if key.is_empty() {
        return None;
    }
    if let Some(id) = map.get(key) {
        return Some(id.clone());
    }

    let sanitized = sanitize(key);
    if sanitized.is_empty() || sanitized == key {
        return None;
    }
    map.get(&sanitized).cloned()
}
