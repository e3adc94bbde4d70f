use std::{collections::HashSet, sync::LazyLock};

use regex::Regex;

static DISALLOWED: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"[^A-Za-z0-9_-]+").expect("static pattern compiles"));

/// Reduce a user-entered name to a submission-safe key. Runs of characters
/// outside `[A-Za-z0-9_-]` collapse to `_`; an empty result falls back.
pub fn normalize_name(raw: &str, fallback: &str) -> String {
    let replaced = DISALLOWED.replace_all(raw.trim(), "_");
    let trimmed = replaced.trim_matches('_');
    if trimmed.is_empty() {
        fallback.to_string()
    } else {
        trimmed.to_string()
    }
}

/// `base` if free, otherwise `base_N` for the first free `N >= 1`.
pub fn unique_name(base: &str, taken: &HashSet<&str>) -> String {
    if !taken.contains(base) {
        return base.to_string();
    }
    (1..)
        .map(|suffix: usize| format!("{base}_{suffix}"))
        .find(|candidate| !taken.contains(candidate.as_str()))
        .unwrap_or_else(|| base.to_string())
}
