// crates/geotz-core/src/model/mod.rs
pub mod convert;
pub mod domain;
pub mod sort;

pub use crate::traits::DefaultBackend;
pub use domain::{Capital, CapitalInfo, Country, CountrySnapshot, GeoDb, Location};

use crate::raw::StateAnsi;
use crate::traits::{GeoBackend, NameMatch};

/// Convenient alias for the default backend.
pub type DefaultGeoDb = GeoDb<DefaultBackend>;

impl<B: GeoBackend> CountrySnapshot<B> {
    pub fn name(&self) -> &str {
        self.name.as_ref()
    }

    pub fn official_name(&self) -> &str {
        self.official_name.as_ref()
    }

    pub fn iso2(&self) -> &str {
        self.iso2.as_ref()
    }

    pub fn iso3(&self) -> &str {
        self.iso3.as_ref()
    }

    pub fn timezones(&self) -> impl Iterator<Item = &str> {
        self.timezones.iter().map(|t| t.as_ref())
    }
}

impl<B: GeoBackend> Country<B> {
    /// Country display name.
    pub fn name(&self) -> &str {
        self.name.as_ref()
    }

    /// Official (formal) name, e.g. "The French Republic".
    pub fn official_name(&self) -> &str {
        self.official_name.as_ref()
    }

    /// ISO 3166-1 alpha-2 code (e.g. "US", "JP").
    pub fn iso2(&self) -> &str {
        self.iso2.as_ref()
    }

    /// ISO 3166-1 alpha-3 code (e.g. "USA", "JPN").
    pub fn iso3(&self) -> &str {
        self.iso3.as_ref()
    }

    pub fn timezones(&self) -> impl Iterator<Item = &str> {
        self.timezones.iter().map(|t| t.as_ref())
    }

    pub fn capital(&self) -> Option<&CapitalInfo<B>> {
        self.capital.as_ref()
    }
}

impl<B: GeoBackend> CapitalInfo<B> {
    pub fn name(&self) -> &str {
        self.name.as_ref()
    }

    pub fn name_ascii(&self) -> &str {
        self.name_ascii.as_ref()
    }

    pub fn timezone(&self) -> &str {
        self.timezone.as_ref()
    }

    pub fn latitude(&self) -> f64 {
        B::float_to_f64(self.latitude)
    }

    pub fn longitude(&self) -> f64 {
        B::float_to_f64(self.longitude)
    }
}

impl<B: GeoBackend> Location<B> {
    pub fn city(&self) -> &str {
        self.city.as_ref()
    }

    pub fn city_ascii(&self) -> &str {
        self.city_ascii.as_ref()
    }

    pub fn latitude(&self) -> f64 {
        B::float_to_f64(self.latitude)
    }

    pub fn longitude(&self) -> f64 {
        B::float_to_f64(self.longitude)
    }

    pub fn province(&self) -> &str {
        self.province.as_ref()
    }

    pub fn state(&self) -> &str {
        self.state.as_ref()
    }

    pub fn timezone(&self) -> &str {
        self.timezone.as_ref()
    }

    pub fn country(&self) -> &CountrySnapshot<B> {
        &self.country
    }
}

impl<B: GeoBackend> Capital<B> {
    /// Placeholder for a country whose capital could not be resolved.
    pub fn empty(country: CountrySnapshot<B>) -> Self {
        Capital {
            name: B::str_from(""),
            name_ascii: B::str_from(""),
            latitude: None,
            longitude: None,
            province: B::str_from(""),
            state: B::str_from(""),
            timezone: B::str_from(""),
            country,
        }
    }

    pub fn is_empty(&self) -> bool {
        self.name.as_ref().is_empty()
    }

    pub fn name(&self) -> &str {
        self.name.as_ref()
    }

    pub fn name_ascii(&self) -> &str {
        self.name_ascii.as_ref()
    }

    pub fn latitude(&self) -> Option<f64> {
        self.latitude.map(B::float_to_f64)
    }

    pub fn longitude(&self) -> Option<f64> {
        self.longitude.map(B::float_to_f64)
    }

    pub fn province(&self) -> &str {
        self.province.as_ref()
    }

    pub fn state(&self) -> &str {
        self.state.as_ref()
    }

    pub fn timezone(&self) -> &str {
        self.timezone.as_ref()
    }

    pub fn country(&self) -> &CountrySnapshot<B> {
        &self.country
    }
}

impl<B: GeoBackend> NameMatch for CountrySnapshot<B> {
    fn name_str(&self) -> &str {
        self.name()
    }

    fn alt_name_str(&self) -> Option<&str> {
        Some(self.official_name())
    }
}

impl<B: GeoBackend> NameMatch for Country<B> {
    fn name_str(&self) -> &str {
        self.name()
    }

    fn alt_name_str(&self) -> Option<&str> {
        Some(self.official_name())
    }
}

impl<B: GeoBackend> NameMatch for CapitalInfo<B> {
    fn name_str(&self) -> &str {
        self.name()
    }

    fn alt_name_str(&self) -> Option<&str> {
        Some(self.name_ascii())
    }
}

impl<B: GeoBackend> NameMatch for Location<B> {
    fn name_str(&self) -> &str {
        self.city()
    }

    fn alt_name_str(&self) -> Option<&str> {
        Some(self.city_ascii())
    }
}

impl NameMatch for StateAnsi {
    fn name_str(&self) -> &str {
        &self.name
    }
}
