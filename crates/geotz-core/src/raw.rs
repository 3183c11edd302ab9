// crates/geotz-core/src/raw.rs

//! Typed input rows, as produced by the source loader.
//!
//! These mirror the hand-maintained source files. Shape (presence and
//! primitive type of each field) is guaranteed by the time a row exists;
//! content rules are the validator's job.

use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

/// One row of the city/location table.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RawLocation {
    pub city: String,
    pub city_ascii: String,
    pub latitude: f64,
    pub longitude: f64,
    pub country: String,
    pub country_iso2: String,
    pub country_iso3: String,
    /// Free-text administrative area. May be empty, never absent.
    pub province: String,
    /// USPS code, only meaningful for USA rows.
    #[serde(default)]
    pub state_ansi: Option<String>,
    /// Free-text state, used when there is no USPS code.
    #[serde(default)]
    pub state: Option<String>,
    pub timezone: String,
}

impl RawLocation {
    /// The value exposed as `state` on derived records: the USPS code when
    /// set, else the free-text state, else empty.
    pub fn state_label(&self) -> &str {
        self.state_ansi
            .as_deref()
            .filter(|s| !s.is_empty())
            .or_else(|| self.state.as_deref().filter(|s| !s.is_empty()))
            .unwrap_or("")
    }

    pub fn state_ansi(&self) -> &str {
        self.state_ansi.as_deref().unwrap_or("")
    }

    /// "Country / City" for diagnostics.
    pub fn context(&self) -> String {
        format!("{} / {}", self.country, self.city)
    }
}

/// One row of the country → capital table.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RawCapital {
    pub country: String,
    /// `None` or empty when the country has no capital.
    #[serde(default)]
    pub capital: Option<String>,
}

impl RawCapital {
    pub fn capital_name(&self) -> &str {
        self.capital.as_deref().map(str::trim).unwrap_or("")
    }
}

/// US state reference row (census ANSI table).
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct StateAnsi {
    /// Federal Information Processing Standard state code, e.g. `"05"`.
    pub fips_code: String,
    /// United States Postal Service code, e.g. `"AR"`.
    pub usps_code: String,
    pub name: String,
    /// Geographic Names Information System identifier.
    pub gnisid: String,
}

/// Country short name → official name.
pub type FormalNames = BTreeMap<String, String>;

/// Merges the authoritative names with the curated overrides.
/// Overrides win on collision.
pub fn merge_formal_names(official: FormalNames, overrides: FormalNames) -> FormalNames {
    let mut merged = official;
    merged.extend(overrides);
    merged
}

/// Everything the pipeline reads, already typed.
#[derive(Debug, Clone, Default)]
pub struct Sources {
    pub formal_names: FormalNames,
    pub iso2_codes: Vec<String>,
    pub iso3_codes: Vec<String>,
    pub states_ansi: Vec<StateAnsi>,
    pub locations: Vec<RawLocation>,
    pub capitals: Vec<RawCapital>,
    /// Supported IANA identifiers, collation-sorted.
    pub timezones: Vec<String>,
}
