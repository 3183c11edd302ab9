// crates/geotz-core/src/text.rs

//! String helpers shared by the pipeline and the query layer.
//!
//! Two different notions of "same string" live here on purpose:
//!
//! - [`collate`] orders names with the Unicode Collation Algorithm (CLDR
//!   root, punctuation not ignored). Base letters compare first, then
//!   accents, then case, so `"Zürich"` sorts next to `"Zurich"` but the two
//!   never compare equal.
//! - [`matches`] answers queries. It normalizes case only; diacritics are
//!   significant, so `"zurich"` does not find `"Zürich"`.

use feruca::{Collator, Locale, Tailoring};
use std::cell::RefCell;
use std::cmp::Ordering;

thread_local! {
    static COLLATOR: RefCell<Collator> =
        RefCell::new(Collator::new(Tailoring::Cldr(Locale::Root), false, true));
}

/// Compares two strings in collation order. Only identical strings compare
/// equal.
///
/// # Examples
///
/// ```rust
/// use geotz_core::text::collate;
///
/// let mut names = vec!["Zurich", "Åland", "aland", "Bern", "Zürich", "AB", "ab"];
/// names.sort_by(|a, b| collate(a, b));
/// assert_eq!(names, vec!["ab", "AB", "aland", "Åland", "Bern", "Zurich", "Zürich"]);
/// ```
pub fn collate(a: &str, b: &str) -> Ordering {
    COLLATOR.with(|collator| collator.borrow_mut().collate(a, b))
}

/// Sorts and deduplicates a list of names in collation order.
pub fn sort_collated(values: &mut Vec<String>) {
    values.sort_by(|a, b| collate(a, b));
    values.dedup();
}

/// Transliterate Unicode → ASCII and lowercase (e.g. `Łódź` → `lodz`).
pub fn fold_key(s: &str) -> String {
    deunicode::deunicode(s).to_lowercase()
}

/// How a query string is compared against a stored value.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum MatchMode {
    /// Equal after lower-casing both sides.
    #[default]
    Exact,
    /// Stored value contains the query after lower-casing both sides.
    Partial,
}

impl MatchMode {
    /// `Partial` when `partial` is set, `Exact` otherwise.
    pub fn from_partial(partial: bool) -> Self {
        if partial {
            MatchMode::Partial
        } else {
            MatchMode::Exact
        }
    }
}

/// Compares a stored `source` value with a user supplied `query`.
///
/// # Examples
///
/// ```rust
/// use geotz_core::text::{matches, MatchMode};
///
/// assert!(matches("Tokyo", "tokyo", MatchMode::Exact));
/// assert!(matches("New York", "york", MatchMode::Partial));
/// assert!(!matches("Zürich", "zurich", MatchMode::Exact));
/// ```
pub fn matches(source: &str, query: &str, mode: MatchMode) -> bool {
    match mode {
        MatchMode::Exact => source.to_lowercase() == query.to_lowercase(),
        MatchMode::Partial => source.to_lowercase().contains(&query.to_lowercase()),
    }
}

/// Case-insensitive equality, diacritics significant.
#[inline]
pub fn equals_ci(a: &str, b: &str) -> bool {
    matches(a, b, MatchMode::Exact)
}

/// Characters of `s` above the ASCII range, in order of appearance.
pub fn non_ascii_chars(s: &str) -> Vec<char> {
    s.chars().filter(|c| !c.is_ascii()).collect()
}

/// `true` when `s` has exactly `len` characters, all ASCII uppercase letters.
pub fn is_upper_code(s: &str, len: usize) -> bool {
    s.len() == len && s.bytes().all(|b| b.is_ascii_uppercase())
}

/// Renders characters as `'ō' (U+014D)` for diagnostics.
pub fn describe_chars(chars: &[char]) -> String {
    chars
        .iter()
        .map(|c| format!("'{c}' (U+{:04X})", *c as u32))
        .collect::<Vec<_>>()
        .join(", ")
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn accent_variants_sort_after_base_and_stay_distinct() {
        assert_eq!(collate("Zurich", "Zürich"), Ordering::Less);
        assert_ne!(collate("Zürich", "Zurich"), Ordering::Equal);
        // base letter decides before the accent does
        assert_eq!(collate("Zürich", "Zz"), Ordering::Less);
    }

    #[test]
    fn lowercase_sorts_before_uppercase() {
        let mut letters = vec!["A".to_string(), "b".to_string(), "a".to_string()];
        sort_collated(&mut letters);
        assert_eq!(letters, vec!["a", "A", "b"]);
    }

    #[test]
    fn underscore_sorts_before_hyphen() {
        let mut tz = vec![
            "America/Port-au-Prince".to_string(),
            "America/Port_of_Spain".to_string(),
        ];
        sort_collated(&mut tz);
        assert_eq!(tz, vec!["America/Port_of_Spain", "America/Port-au-Prince"]);
    }

    #[test]
    fn sort_collated_dedups_exact_duplicates_only() {
        let mut tz = vec![
            "Europe/Paris".to_string(),
            "America/New_York".to_string(),
            "Europe/Paris".to_string(),
        ];
        sort_collated(&mut tz);
        assert_eq!(tz, vec!["America/New_York", "Europe/Paris"]);
    }

    #[test]
    fn codes_must_be_uppercase_and_exact_length() {
        assert!(is_upper_code("JP", 2));
        assert!(!is_upper_code("jp", 2));
        assert!(!is_upper_code("JPN", 2));
        assert!(is_upper_code("JPN", 3));
        assert!(!is_upper_code("J1N", 3));
    }

    #[test]
    fn non_ascii_chars_are_reported_with_code_points() {
        let chars = non_ascii_chars("Tōkyō");
        assert_eq!(chars, vec!['ō', 'ō']);
        assert_eq!(describe_chars(&chars[..1]), "'ō' (U+014D)");
    }
}
