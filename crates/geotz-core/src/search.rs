// crates/geotz-core/src/search.rs

use crate::common::{CoordinateBounds, DbStats, IsoCodeKind};
use crate::model::{Capital, Country, CountrySnapshot, GeoDb, Location};
use crate::raw::StateAnsi;
use crate::text::{matches, MatchMode};
use crate::traits::{GeoBackend, NameMatch};

/// The Logic Trait.
/// Defines the read-only lookups available on a loaded dataset.
///
/// Name arguments are compared case-insensitively with diacritics kept
/// significant; the `partial` flags switch to substring matching. ISO code
/// arguments are case-insensitive and classified against the alpha-2 list
/// first, then the alpha-3 list.
pub trait GeoSearch<B: GeoBackend> {
    fn stats(&self) -> DbStats;

    // --- accessors ---
    fn countries(&self) -> &[Country<B>];
    fn capitals(&self) -> &[Capital<B>];
    fn locations(&self) -> &[Location<B>];
    fn states_ansi(&self) -> &[StateAnsi];
    fn timezones(&self) -> &[String];
    fn iso2_codes(&self) -> &[String];
    fn iso3_codes(&self) -> &[String];

    fn classify_iso_code(&self, code: &str) -> IsoCodeKind;

    // --- countries ---
    fn find_country_by_iso(&self, code: &str) -> Option<&Country<B>>;
    /// Matches the short or the official name.
    fn find_country_by_name(&self, name: &str) -> Option<&Country<B>>;
    /// Matches the capital's name or its ASCII spelling. Blank input finds nothing.
    fn find_country_by_capital_name(&self, name: &str) -> Option<&Country<B>>;
    fn find_capital_of_country_iso(&self, code: &str) -> Option<&Capital<B>>;
    fn find_capital_of_country_name(&self, name: &str) -> Option<&Capital<B>>;
    fn iso2_for_iso3(&self, iso3: &str) -> Option<&str>;
    fn iso3_for_iso2(&self, iso2: &str) -> Option<&str>;

    // --- locations ---
    fn find_locations_by_coordinates(&self, bounds: &CoordinateBounds) -> Vec<&Location<B>>;
    fn find_locations_by_country_iso(&self, code: &str) -> Vec<&Location<B>>;
    fn find_locations_by_country_name(&self, name: &str, partial: bool) -> Vec<&Location<B>>;
    /// Province data is free text and not very reliable.
    fn find_locations_by_province(&self, province: &str, partial: bool) -> Vec<&Location<B>>;
    fn find_locations_by_state(&self, state: &str, partial: bool) -> Vec<&Location<B>>;

    // --- states ANSI ---
    fn find_state_by_fips_code(&self, code: &str) -> Option<&StateAnsi>;
    fn find_state_by_gnisid(&self, id: &str) -> Option<&StateAnsi>;
    fn find_state_by_name(&self, name: &str) -> Option<&StateAnsi>;
    fn find_state_by_usps_code(&self, code: &str) -> Option<&StateAnsi>;

    // --- timezones ---
    fn find_timezone_by_capital_of_country_iso(&self, code: &str) -> Option<&str>;
    fn find_timezone_by_capital_of_country_name(&self, name: &str) -> Option<&str>;
    /// Matches a city name or its ASCII spelling. Blank input finds nothing.
    fn find_timezone_by_city_name(&self, name: &str) -> Option<&str>;
    /// Empty when the country is unknown.
    fn find_timezones_by_country_iso(&self, code: &str) -> Vec<&str>;
    fn find_timezones_by_country_name(&self, name: &str) -> Vec<&str>;
}

/// `true` when `country` carries `code` in the column `kind` selects.
fn has_code<B: GeoBackend>(country: &CountrySnapshot<B>, code: &str, kind: IsoCodeKind) -> bool {
    match kind {
        IsoCodeKind::Alpha2 => country.iso2() == code,
        IsoCodeKind::Alpha3 => country.iso3() == code,
        IsoCodeKind::Invalid => false,
    }
}

/// Codes are 2 characters, compared case-insensitively.
fn two_char_code_matches(source: &str, code: &str) -> bool {
    code.chars().count() == 2 && matches(source, code, MatchMode::Exact)
}

impl<B: GeoBackend> GeoDb<B> {
    /// Uppercased code and its kind.
    fn resolve_iso(&self, code: &str) -> (String, IsoCodeKind) {
        let code = code.trim().to_uppercase();
        let kind = self.classify_iso_code(&code);
        (code, kind)
    }

    fn country_by_code(&self, code: &str) -> Option<&Country<B>> {
        let (code, kind) = self.resolve_iso(code);
        match kind {
            IsoCodeKind::Alpha2 => self.countries.iter().find(|c| c.iso2() == code),
            IsoCodeKind::Alpha3 => self.countries.iter().find(|c| c.iso3() == code),
            IsoCodeKind::Invalid => None,
        }
    }
}

impl<B: GeoBackend> GeoSearch<B> for GeoDb<B> {
    fn stats(&self) -> DbStats {
        DbStats {
            countries: self.countries.len(),
            locations: self.locations.len(),
            capitals: self.capitals.len(),
            states_ansi: self.states_ansi.len(),
            timezones: self.timezones.len(),
        }
    }

    fn countries(&self) -> &[Country<B>] {
        &self.countries
    }

    fn capitals(&self) -> &[Capital<B>] {
        &self.capitals
    }

    fn locations(&self) -> &[Location<B>] {
        &self.locations
    }

    fn states_ansi(&self) -> &[StateAnsi] {
        &self.states_ansi
    }

    fn timezones(&self) -> &[String] {
        &self.timezones
    }

    fn iso2_codes(&self) -> &[String] {
        &self.iso2_codes
    }

    fn iso3_codes(&self) -> &[String] {
        &self.iso3_codes
    }

    fn classify_iso_code(&self, code: &str) -> IsoCodeKind {
        // exact list membership, so "jp" is invalid here; callers uppercase first
        match code.len() {
            2 if self.iso2_codes.iter().any(|c| c == code) => IsoCodeKind::Alpha2,
            2 | 3 if self.iso3_codes.iter().any(|c| c == code) => IsoCodeKind::Alpha3,
            _ => IsoCodeKind::Invalid,
        }
    }

    fn find_country_by_iso(&self, code: &str) -> Option<&Country<B>> {
        self.country_by_code(code)
    }

    fn find_country_by_name(&self, name: &str) -> Option<&Country<B>> {
        self.countries.iter().find(|c| c.is_named(name))
    }

    fn find_country_by_capital_name(&self, name: &str) -> Option<&Country<B>> {
        if name.trim().is_empty() {
            return None;
        }
        self.countries
            .iter()
            .find(|c| c.capital().is_some_and(|capital| capital.is_named(name)))
    }

    fn find_capital_of_country_iso(&self, code: &str) -> Option<&Capital<B>> {
        let (code, kind) = self.resolve_iso(code);
        self.capitals.iter().find(|c| has_code(&c.country, &code, kind))
    }

    fn find_capital_of_country_name(&self, name: &str) -> Option<&Capital<B>> {
        self.capitals.iter().find(|c| c.country.is_named(name))
    }

    fn iso2_for_iso3(&self, iso3: &str) -> Option<&str> {
        self.iso2_by_iso3
            .get(&iso3.trim().to_uppercase())
            .map(String::as_str)
    }

    fn iso3_for_iso2(&self, iso2: &str) -> Option<&str> {
        self.iso3_by_iso2
            .get(&iso2.trim().to_uppercase())
            .map(String::as_str)
    }

    fn find_locations_by_coordinates(&self, bounds: &CoordinateBounds) -> Vec<&Location<B>> {
        let Some(((lat_from, lat_to), (lng_from, lng_to))) = bounds.ranges() else {
            return Vec::new();
        };

        self.locations
            .iter()
            .filter(|l| {
                let (lat, lng) = (l.latitude(), l.longitude());
                lat >= lat_from && lat <= lat_to && lng >= lng_from && lng <= lng_to
            })
            .collect()
    }

    fn find_locations_by_country_iso(&self, code: &str) -> Vec<&Location<B>> {
        let (code, kind) = self.resolve_iso(code);
        self.locations
            .iter()
            .filter(|l| has_code(&l.country, &code, kind))
            .collect()
    }

    fn find_locations_by_country_name(&self, name: &str, partial: bool) -> Vec<&Location<B>> {
        let mode = MatchMode::from_partial(partial);
        self.locations
            .iter()
            .filter(|l| l.country.name_matches(name, mode))
            .collect()
    }

    fn find_locations_by_province(&self, province: &str, partial: bool) -> Vec<&Location<B>> {
        let mode = MatchMode::from_partial(partial);
        self.locations
            .iter()
            .filter(|l| matches(l.province(), province, mode))
            .collect()
    }

    fn find_locations_by_state(&self, state: &str, partial: bool) -> Vec<&Location<B>> {
        let mode = MatchMode::from_partial(partial);
        self.locations
            .iter()
            .filter(|l| matches(l.state(), state, mode))
            .collect()
    }

    fn find_state_by_fips_code(&self, code: &str) -> Option<&StateAnsi> {
        self.states_ansi
            .iter()
            .find(|s| two_char_code_matches(&s.fips_code, code))
    }

    fn find_state_by_gnisid(&self, id: &str) -> Option<&StateAnsi> {
        self.states_ansi
            .iter()
            .find(|s| matches(&s.gnisid, id, MatchMode::Exact))
    }

    fn find_state_by_name(&self, name: &str) -> Option<&StateAnsi> {
        self.states_ansi.iter().find(|s| s.is_named(name))
    }

    fn find_state_by_usps_code(&self, code: &str) -> Option<&StateAnsi> {
        self.states_ansi
            .iter()
            .find(|s| two_char_code_matches(&s.usps_code, code))
    }

    fn find_timezone_by_capital_of_country_iso(&self, code: &str) -> Option<&str> {
        self.find_capital_of_country_iso(code)
            .filter(|c| !c.is_empty())
            .map(|c| c.timezone())
    }

    fn find_timezone_by_capital_of_country_name(&self, name: &str) -> Option<&str> {
        self.find_capital_of_country_name(name)
            .filter(|c| !c.is_empty())
            .map(|c| c.timezone())
    }

    fn find_timezone_by_city_name(&self, name: &str) -> Option<&str> {
        if name.trim().is_empty() {
            return None;
        }
        self.locations
            .iter()
            .find(|l| l.is_named(name))
            .map(|l| l.timezone())
    }

    fn find_timezones_by_country_iso(&self, code: &str) -> Vec<&str> {
        self.country_by_code(code)
            .map(|c| c.timezones().collect())
            .unwrap_or_default()
    }

    fn find_timezones_by_country_name(&self, name: &str) -> Vec<&str> {
        self.find_country_by_name(name)
            .map(|c| c.timezones().collect())
            .unwrap_or_default()
    }
}
