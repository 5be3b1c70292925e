//! Helpers for the string-typed integer IDs used at the HTTP boundary.

/// Parses a record ID in canonical decimal form.
///
/// Only strictly positive integers written without sign, padding or
/// surrounding whitespace resolve; `"07"`, `"+7"` and `"0"` do not.
pub fn parse_id(raw: &str) -> Option<u64> {
    let n: u64 = raw.parse().ok()?;
    if n == 0 || n.to_string() != raw {
        return None;
    }
    Some(n)
}

/// Whether `raw` is a (possibly signed) base-10 integer.
pub fn is_int(raw: &str) -> bool {
    raw.parse::<i64>().is_ok()
}

/// Splits a comma separated list, trimming entries and dropping empty ones.
pub fn split_csv(raw: &str) -> Vec<String> {
    raw.split(',')
        .map(str::trim)
        .filter(|s| !s.is_empty())
        .map(str::to_string)
        .collect()
}
