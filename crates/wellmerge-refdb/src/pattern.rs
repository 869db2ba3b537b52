//! Name matching shared by the store implementations.

use wellmerge_core::config::MatchMode;

/// Escape `LIKE` metacharacters so `value` only matches literally.
pub fn escape_like(value: &str) -> String {
    let mut out = String::with_capacity(value.len());
    for c in value.chars() {
        if matches!(c, '\\' | '%' | '_') {
            out.push('\\');
        }
        out.push(c);
    }
    out
}

/// `%value%` with metacharacters in `value` escaped.
pub fn contains_pattern(value: &str) -> String {
    format!("%{}%", escape_like(value))
}

/// In-process equivalent of the SQL comparison. Case-insensitive, like the
/// default MySQL collations.
pub fn name_matches(mode: MatchMode, stored: &str, probe: &str) -> bool {
    let stored = stored.to_lowercase();
    let probe = probe.to_lowercase();
    match mode {
        MatchMode::Contains => stored.contains(&probe),
        MatchMode::Exact => stored == probe,
    }
}
