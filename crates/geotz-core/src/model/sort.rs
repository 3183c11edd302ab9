// crates/geotz-core/src/model/sort.rs
use crate::model::domain::GeoDb;
use crate::text::{collate, sort_collated};
use crate::traits::GeoBackend;

/// Puts every table of `db` in its persisted order.
///
/// Names are compared with [`collate`], so accented variants sit next to
/// their base spelling but never collapse into it. All sorts are stable.
/// The ISO code lists and the state table keep their source order.
pub fn sort_dataset<B: GeoBackend>(db: &mut GeoDb<B>) {
    db.countries.sort_by(|a, b| collate(a.name(), b.name()));
    db.locations.sort_by(|a, b| {
        collate(a.country.name(), b.country.name()).then_with(|| collate(a.city(), b.city()))
    });
    db.capitals.sort_by(|a, b| {
        collate(a.country.name(), b.country.name()).then_with(|| collate(a.name(), b.name()))
    });
    sort_collated(&mut db.timezones);
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::diagnostics::Report;
    use crate::model::convert::from_validated;
    use crate::raw::fixtures::{self, loc};
    use crate::traits::DefaultBackend;
    use crate::validate::validate;
    use std::cmp::Ordering;

    fn sorted(sources: &crate::raw::Sources) -> GeoDb<DefaultBackend> {
        let mut report = Report::new();
        let validated = validate(sources, &mut report);
        let mut db = from_validated(sources, &validated);
        sort_dataset(&mut db);
        db
    }

    #[test]
    fn tables_are_ordered_by_name() {
        let db = sorted(&fixtures::sources());

        let countries: Vec<_> = db.countries.iter().map(|c| c.name()).collect();
        assert_eq!(countries, vec!["France", "Japan", "Kosovo", "United States of America"]);

        // "Ōsaka" folds to "osaka" and sorts before "Tokyo"
        let cities: Vec<_> = db.locations.iter().map(|l| l.city()).collect();
        assert_eq!(
            cities,
            vec!["Paris", "Saint-Denis", "Ōsaka", "Tokyo", "Pristina", "Little Rock", "Washington"]
        );

        let capitals: Vec<_> = db.capitals.iter().map(|c| c.country.iso3()).collect();
        assert_eq!(capitals, vec!["FRA", "JPN", "KOS", "USA"]);
    }

    #[test]
    fn accented_names_stay_next_to_their_base_spelling() {
        let mut sources = fixtures::sources();
        sources.locations.push(loc("Zürich", "Zurich", "France", "FR", "FRA", "", None, "Europe/Paris", 0.0, 0.0));
        sources.locations.push(loc("Zurich", "Zurich", "France", "FR", "FRA", "", None, "Europe/Paris", 0.0, 0.0));
        sources.locations.push(loc("Zz", "Zz", "France", "FR", "FRA", "", None, "Europe/Paris", 0.0, 0.0));

        let db = sorted(&sources);
        let france: Vec<_> = db
            .locations
            .iter()
            .filter(|l| l.country.iso2() == "FR")
            .map(|l| l.city())
            .collect();
        assert_eq!(france, vec!["Paris", "Saint-Denis", "Zurich", "Zürich", "Zz"]);
    }

    #[test]
    fn every_timezone_list_is_collation_sorted() {
        let mut sources = fixtures::sources();
        sources.timezones.reverse();
        let db = sorted(&sources);

        let in_order = |list: &[String]| list.windows(2).all(|w| collate(&w[0], &w[1]) == Ordering::Less);
        assert!(in_order(&db.timezones));
        assert!(db.countries.iter().all(|c| in_order(&c.timezones)));
        assert!(db.locations.iter().all(|l| in_order(&l.country.timezones)));
    }

    #[test]
    fn code_lists_keep_source_order() {
        let sources = fixtures::sources();
        let db = sorted(&sources);
        assert_eq!(db.iso2_codes, vec!["JP", "FR", "US", "XK"]);
        assert_eq!(db.states_ansi, sources.states_ansi);
    }
}
