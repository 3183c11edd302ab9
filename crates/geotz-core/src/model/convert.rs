// crates/geotz-core/src/model/convert.rs
use crate::model::domain::{Capital, CapitalInfo, Country, CountrySnapshot, GeoDb, Location};
use crate::raw::{RawLocation, Sources};
use crate::text::sort_collated;
use crate::traits::GeoBackend;
use crate::validate::Validated;
use std::collections::{BTreeMap, BTreeSet};

/// Per-country state gathered on the first pass.
struct CountryDraft<'a> {
    iso2: &'a str,
    iso3: &'a str,
    rows: Vec<&'a RawLocation>,
    timezones: BTreeSet<&'a str>,
}

/// **Assembler:** validated rows -> dataset.
///
/// Runs in three passes so no record ever observes a partially built
/// timezone list:
///
/// 1. group the accepted rows by country and collect each country's
///    timezones,
/// 2. freeze every timezone set into a sorted list and build the country
///    snapshot embedded in that country's locations,
/// 3. derive countries, capitals and the ISO code maps from the snapshots.
///
/// The result is complete but unordered; see [`super::sort::sort_dataset`].
pub fn from_validated<B: GeoBackend>(sources: &Sources, validated: &Validated<'_>) -> GeoDb<B> {
    // Pass 1
    let mut drafts: BTreeMap<&str, CountryDraft<'_>> = BTreeMap::new();
    for &row in &validated.accepted {
        let draft = drafts.entry(row.country.as_str()).or_insert_with(|| CountryDraft {
            iso2: &row.country_iso2,
            iso3: &row.country_iso3,
            rows: Vec::new(),
            timezones: BTreeSet::new(),
        });
        draft.rows.push(row);
        draft.timezones.insert(row.timezone.as_str());
    }

    // Pass 2
    let mut db = GeoDb::<B>::default();
    let mut snapshots: Vec<CountrySnapshot<B>> = Vec::with_capacity(drafts.len());
    for (name, draft) in drafts {
        let mut timezones: Vec<String> = draft.timezones.into_iter().map(String::from).collect();
        sort_collated(&mut timezones);

        let snapshot = CountrySnapshot::<B> {
            name: B::str_from(name),
            official_name: B::str_from(
                sources.formal_names.get(name).map(String::as_str).unwrap_or(""),
            ),
            iso2: B::str_from(draft.iso2),
            iso3: B::str_from(draft.iso3),
            timezones: timezones.iter().map(|t| B::str_from(t)).collect(),
        };

        db.locations
            .extend(draft.rows.iter().map(|row| location_from_raw(row, snapshot.clone())));
        snapshots.push(snapshot);
    }

    // Pass 3
    for snapshot in snapshots {
        let capital_row = validated.capital_of(snapshot.name.as_ref());

        db.iso2_by_iso3
            .insert(snapshot.iso3.as_ref().to_owned(), snapshot.iso2.as_ref().to_owned());
        db.iso3_by_iso2
            .insert(snapshot.iso2.as_ref().to_owned(), snapshot.iso3.as_ref().to_owned());

        db.countries.push(Country {
            name: snapshot.name.clone(),
            official_name: snapshot.official_name.clone(),
            iso2: snapshot.iso2.clone(),
            iso3: snapshot.iso3.clone(),
            timezones: snapshot.timezones.clone(),
            capital: capital_row.map(capital_info_from_raw::<B>),
        });

        db.capitals.push(match capital_row {
            Some(row) => capital_from_raw(row, snapshot),
            None => Capital::empty(snapshot),
        });
    }

    db.iso2_codes = sources.iso2_codes.clone();
    db.iso3_codes = sources.iso3_codes.clone();
    db.states_ansi = sources.states_ansi.clone();
    db.timezones = sources.timezones.clone();
    db
}

fn location_from_raw<B: GeoBackend>(row: &RawLocation, country: CountrySnapshot<B>) -> Location<B> {
    Location {
        city: B::str_from(&row.city),
        city_ascii: B::str_from(&row.city_ascii),
        latitude: B::float_from(row.latitude),
        longitude: B::float_from(row.longitude),
        province: B::str_from(&row.province),
        state: B::str_from(row.state_label()),
        timezone: B::str_from(&row.timezone),
        country,
    }
}

fn capital_info_from_raw<B: GeoBackend>(row: &RawLocation) -> CapitalInfo<B> {
    CapitalInfo {
        name: B::str_from(&row.city),
        name_ascii: B::str_from(&row.city_ascii),
        latitude: B::float_from(row.latitude),
        longitude: B::float_from(row.longitude),
        province: B::str_from(&row.province),
        state: B::str_from(row.state_label()),
        timezone: B::str_from(&row.timezone),
    }
}

fn capital_from_raw<B: GeoBackend>(row: &RawLocation, country: CountrySnapshot<B>) -> Capital<B> {
    Capital {
        name: B::str_from(&row.city),
        name_ascii: B::str_from(&row.city_ascii),
        latitude: Some(B::float_from(row.latitude)),
        longitude: Some(B::float_from(row.longitude)),
        province: B::str_from(&row.province),
        state: B::str_from(row.state_label()),
        timezone: B::str_from(&row.timezone),
        country,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::diagnostics::Report;
    use crate::raw::fixtures::{self, loc};
    use crate::traits::DefaultBackend;
    use crate::validate::validate;

    fn assemble(sources: &Sources) -> GeoDb<DefaultBackend> {
        let mut report = Report::new();
        let validated = validate(sources, &mut report);
        from_validated(sources, &validated)
    }

    #[test]
    fn every_country_location_and_capital_is_assembled() {
        let sources = fixtures::sources();
        let db = assemble(&sources);

        assert_eq!(db.countries.len(), 4);
        assert_eq!(db.capitals.len(), 4);
        assert_eq!(db.locations.len(), sources.locations.len());
        assert_eq!(db.iso2_by_iso3.len(), 4);
        assert_eq!(db.iso3_by_iso2["XK"], "KOS");
        assert_eq!(db.states_ansi, sources.states_ansi);
    }

    #[test]
    fn paris_embeds_timezones_seen_after_it() {
        let db = assemble(&fixtures::sources());

        // Saint-Denis (Indian/Reunion) comes after Paris in the source rows
        let paris = db.locations.iter().find(|l| l.city() == "Paris").expect("Paris");
        assert_eq!(paris.country.timezones, vec!["Europe/Paris", "Indian/Reunion"]);
        assert_eq!(paris.country.official_name(), "The French Republic");

        let france = db.countries.iter().find(|c| c.iso2() == "FR").expect("France");
        assert_eq!(france.timezones, paris.country.timezones);
    }

    #[test]
    fn tokyo_is_the_capital_of_japan() {
        let db = assemble(&fixtures::sources());
        let japan = db.countries.iter().find(|c| c.iso3() == "JPN").expect("Japan");
        let capital = japan.capital().expect("capital");
        assert_eq!(capital.name(), "Tokyo");
        assert_eq!(capital.timezone(), "Asia/Tokyo");
        assert!((capital.latitude() - 35.6897).abs() < 1e-9);

        let entry = db.capitals.iter().find(|c| c.country.iso3() == "JPN").expect("entry");
        assert_eq!(entry.country.timezones, japan.timezones);
        assert_eq!(entry.latitude(), Some(35.6897));
    }

    #[test]
    fn usa_locations_expose_the_usps_code_as_state() {
        let db = assemble(&fixtures::sources());
        let little_rock = db.locations.iter().find(|l| l.city() == "Little Rock").expect("row");
        assert_eq!(little_rock.state(), "AR");
        assert_eq!(little_rock.province(), "Arkansas");

        let paris = db.locations.iter().find(|l| l.city() == "Paris").expect("row");
        assert_eq!(paris.state(), "");
    }

    #[test]
    fn country_without_resolvable_capital_gets_an_empty_capital() {
        let mut sources = fixtures::sources();
        sources.capitals[3].capital = None;

        let db = assemble(&sources);
        let kosovo = db.countries.iter().find(|c| c.iso3() == "KOS").expect("Kosovo");
        assert!(kosovo.capital.is_none());

        let capital = db
            .capitals
            .iter()
            .find(|c| c.country.iso3() == "KOS")
            .expect("placeholder capital");
        assert!(capital.is_empty());
        assert_eq!(capital.latitude(), None);
        assert_eq!(capital.country.timezones, vec!["Europe/Belgrade"]);
        assert_eq!(db.iso2_by_iso3["KOS"], "XK");
    }

    #[test]
    fn rejected_rows_do_not_contribute_timezones() {
        let mut sources = fixtures::sources();
        sources.locations.push(loc("Naha", "Naha", "Japan", "JP", "JPN", "Okinawa", None, "Asia/Naha", 26.2125, 127.6792));

        let db = assemble(&sources);
        assert!(db.locations.iter().all(|l| l.city() != "Naha"));
        let japan = db.countries.iter().find(|c| c.name() == "Japan").expect("Japan");
        assert_eq!(japan.timezones().collect::<Vec<_>>(), vec!["Asia/Tokyo"]);
    }
}
