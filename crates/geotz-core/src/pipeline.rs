// crates/geotz-core/src/pipeline.rs

//! Validator, assembler and sort stages chained together.
//!
//! Reading the sources and writing the tables live in [`crate::loader`];
//! this module is pure and works on already loaded [`Sources`].

use crate::diagnostics::Report;
use crate::model::convert::from_validated;
use crate::model::domain::GeoDb;
use crate::model::sort::sort_dataset;
use crate::raw::Sources;
use crate::traits::GeoBackend;
use crate::validate::validate;
use tracing::info;

/// Validates `sources`, assembles the accepted rows and sorts the result.
///
/// Diagnostics are appended to `report`; the dataset is always produced,
/// built from whatever survived validation.
pub fn run<B: GeoBackend>(sources: &Sources, report: &mut Report) -> GeoDb<B> {
    let validated = validate(sources, report);
    info!(
        accepted = validated.accepted.len(),
        rejected = sources.locations.len() - validated.accepted.len(),
        errors = report.error_count(),
        warnings = report.warning_count(),
        "validation finished"
    );

    let mut db = from_validated::<B>(sources, &validated);
    sort_dataset(&mut db);
    info!(
        countries = db.countries.len(),
        locations = db.locations.len(),
        capitals = db.capitals.len(),
        "dataset assembled"
    );
    db
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::raw::fixtures;
    use crate::traits::DefaultBackend;

    #[test]
    fn clean_run_keeps_every_row() {
        let sources = fixtures::sources();
        let mut report = Report::new();
        let db: GeoDb<DefaultBackend> = run(&sources, &mut report);

        assert!(report.is_empty());
        assert_eq!(db.locations.len(), sources.locations.len());
        assert_eq!(db.countries[0].name(), "France");
    }

    #[test]
    fn bad_rows_are_reported_and_left_out() {
        let mut sources = fixtures::sources();
        sources.locations[1].timezone = "Asia/Osaka".into();

        let mut report = Report::new();
        let db: GeoDb<DefaultBackend> = run(&sources, &mut report);

        assert_eq!(report.error_count(), 1);
        assert_eq!(db.locations.len(), sources.locations.len() - 1);
        assert!(db.locations.iter().all(|l| l.city() != "Ōsaka"));
    }
}
