// crates/geotz-core/src/model/domain.rs
use crate::raw::StateAnsi;
use crate::traits::GeoBackend;
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

/// The assembled dataset, one field per persisted table.
///
/// The serde bounds come from [`GeoBackend`]'s associated types, so the
/// marker type `B` itself never needs to be serializable.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(bound = "")]
pub struct GeoDb<B: GeoBackend> {
    /// Sorted by country name.
    pub countries: Vec<Country<B>>,
    /// Sorted by country name, then city.
    pub locations: Vec<Location<B>>,
    /// One entry per country, sorted by country name, then capital name.
    pub capitals: Vec<Capital<B>>,
    pub iso2_by_iso3: BTreeMap<String, String>,
    pub iso3_by_iso2: BTreeMap<String, String>,
    /// Source order.
    pub iso2_codes: Vec<String>,
    /// Source order.
    pub iso3_codes: Vec<String>,
    /// Source order.
    pub states_ansi: Vec<StateAnsi>,
    /// Every IANA identifier known at build time, collation-sorted.
    pub timezones: Vec<String>,
}

impl<B: GeoBackend> Default for GeoDb<B> {
    fn default() -> Self {
        Self {
            countries: Vec::new(),
            locations: Vec::new(),
            capitals: Vec::new(),
            iso2_by_iso3: BTreeMap::new(),
            iso3_by_iso2: BTreeMap::new(),
            iso2_codes: Vec::new(),
            iso3_codes: Vec::new(),
            states_ansi: Vec::new(),
            timezones: Vec::new(),
        }
    }
}

/// Country data embedded in locations and capitals. No capital, so the
/// embedding never nests more than one level.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(bound = "")]
pub struct CountrySnapshot<B: GeoBackend> {
    pub name: B::Str,
    pub official_name: B::Str,
    pub iso2: B::Str,
    pub iso3: B::Str,
    pub timezones: Vec<B::Str>,
}

/// Capital data embedded in a [`Country`]. No country, for the same reason.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(bound = "")]
pub struct CapitalInfo<B: GeoBackend> {
    pub name: B::Str,
    pub name_ascii: B::Str,
    pub latitude: B::Float,
    pub longitude: B::Float,
    pub province: B::Str,
    pub state: B::Str,
    pub timezone: B::Str,
}

/// A Country entry.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(bound = "")]
pub struct Country<B: GeoBackend> {
    pub name: B::Str,
    pub official_name: B::Str,
    pub iso2: B::Str,
    pub iso3: B::Str,
    /// Deduplicated, collation-sorted timezones seen across the country's locations.
    pub timezones: Vec<B::Str>,
    /// `None` when no capital could be resolved.
    pub capital: Option<CapitalInfo<B>>,
}

/// A city-level entry.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(bound = "")]
pub struct Location<B: GeoBackend> {
    pub city: B::Str,
    pub city_ascii: B::Str,
    pub latitude: B::Float,
    pub longitude: B::Float,
    pub province: B::Str,
    /// USPS code for US locations, free text or empty elsewhere.
    pub state: B::Str,
    pub timezone: B::Str,
    pub country: CountrySnapshot<B>,
}

/// A country's capital. Countries without a resolvable capital still get an
/// entry, with empty names and no coordinates.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(bound = "")]
pub struct Capital<B: GeoBackend> {
    pub name: B::Str,
    pub name_ascii: B::Str,
    pub latitude: Option<B::Float>,
    pub longitude: Option<B::Float>,
    pub province: B::Str,
    pub state: B::Str,
    pub timezone: B::Str,
    pub country: CountrySnapshot<B>,
}
