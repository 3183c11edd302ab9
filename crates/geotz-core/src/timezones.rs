// crates/geotz-core/src/timezones.rs

//! Supported IANA timezone identifiers, taken from the tz database compiled
//! into `chrono-tz`.

use crate::text::sort_collated;

/// Every identifier `chrono-tz` knows, including links, collation-sorted.
///
/// # Examples
///
/// ```rust
/// let zones = geotz_core::timezones::supported();
/// assert!(zones.iter().any(|z| z == "Asia/Tokyo"));
/// ```
pub fn supported() -> Vec<String> {
    let mut zones: Vec<String> = chrono_tz::TZ_VARIANTS
        .iter()
        .map(|tz| tz.name().to_owned())
        .collect();
    sort_collated(&mut zones);
    zones
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn list_is_sorted_and_unique() {
        let zones = supported();
        assert!(zones.len() > 300);
        assert!(zones.windows(2).all(|w| w[0] != w[1]));
        assert!(zones.iter().any(|z| z == "Europe/Belgrade"));
        assert!(zones.iter().any(|z| z == "Indian/Reunion"));
    }
}
