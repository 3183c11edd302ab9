// crates/geotz-core/src/traits.rs
use crate::text::{matches, MatchMode};
use serde::{Deserialize, Serialize};

/// Storage backend for strings and floats used by the query-facing tables.
///
/// This abstraction allows the crate to swap how textual and floating-point
/// data are stored internally (for example to use more compact types) without
/// changing the public API of accessors that return `&str`/`f64` views.
///
/// Implementors must be `Clone + Send + Sync + 'static` and ensure the
/// associated types can be serialized/deserialized so tables can be persisted
/// via bincode.
pub trait GeoBackend: Clone + std::fmt::Debug + PartialEq + Send + Sync + 'static {
    type Str: Clone
        + Send
        + Sync
        + PartialEq
        + std::fmt::Debug
        + Serialize
        + for<'de> Deserialize<'de>
        + AsRef<str>;

    type Float: Copy
        + Send
        + Sync
        + PartialEq
        + std::fmt::Debug
        + Serialize
        + for<'de> Deserialize<'de>;

    /// Convert an `&str` into the backend string representation.
    fn str_from(s: &str) -> Self::Str;
    /// Convert an `f64` into the backend float representation.
    fn float_from(f: f64) -> Self::Float;

    /// Convert backend float to plain `f64`.
    fn float_to_f64(v: Self::Float) -> f64;
}

/// Default backend: plain `String` + `f64`.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct DefaultBackend;

impl GeoBackend for DefaultBackend {
    type Str = String;
    type Float = f64;

    #[inline]
    fn str_from(s: &str) -> Self::Str {
        s.to_owned()
    }

    #[inline]
    fn float_from(f: f64) -> Self::Float {
        f
    }

    fn float_to_f64(v: Self::Float) -> f64 {
        v
    }
}

/// Name-based matching helpers for records that carry a display name and an
/// alternative spelling (official name, ASCII name, ...).
///
/// Comparison is case-insensitive and diacritic-sensitive, see
/// [`crate::text::matches`].
///
/// # Examples
/// ```rust
/// use geotz_core::traits::NameMatch;
///
/// struct Place(&'static str, &'static str);
/// impl NameMatch for Place {
///     fn name_str(&self) -> &str { self.0 }
///     fn alt_name_str(&self) -> Option<&str> { Some(self.1) }
/// }
///
/// let p = Place("Tōkyō", "Tokyo");
/// assert!(p.is_named("tokyo"));
/// assert!(p.is_named("TŌKYŌ"));
/// assert!(p.name_contains("ky"));
/// ```
pub trait NameMatch {
    /// Returns the canonical display name used for matching.
    fn name_str(&self) -> &str;

    /// Optional second spelling checked after the canonical one.
    fn alt_name_str(&self) -> Option<&str> {
        None
    }

    /// Matches either spelling with the given mode.
    fn name_matches(&self, q: &str, mode: MatchMode) -> bool {
        matches(self.name_str(), q, mode)
            || self.alt_name_str().is_some_and(|alt| matches(alt, q, mode))
    }

    /// Case-insensitive equality on either spelling.
    #[inline]
    fn is_named(&self, q: &str) -> bool {
        self.name_matches(q, MatchMode::Exact)
    }

    /// Case-insensitive substring match on either spelling.
    #[inline]
    fn name_contains(&self, q: &str) -> bool {
        self.name_matches(q, MatchMode::Partial)
    }
}
