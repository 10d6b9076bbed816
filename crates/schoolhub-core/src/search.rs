//! Helpers for substring search in SQL.

/// Builds an `ILIKE ... ESCAPE '\'` pattern matching `term` anywhere.
///
/// `%`, `_` and `\` in the term are matched literally.
pub fn contains_pattern(term: &str) -> String {
    let mut pattern = String::with_capacity(term.len() + 2);
    pattern.push('%');
    for c in term.chars() {
        if matches!(c, '\\' | '%' | '_') {
            pattern.push('\\');
        }
        pattern.push(c);
    }
    pattern.push('%');
    pattern
}
