// crates/geotz-core/src/common.rs
use serde::{Deserialize, Serialize};

/// Simple aggregate statistics for the database.
///
/// Returned by [`crate::GeoSearch::stats`], these counts reflect the tables
/// as loaded.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct DbStats {
    pub countries: usize,
    pub locations: usize,
    pub capitals: usize,
    pub states_ansi: usize,
    pub timezones: usize,
}

/// Inclusive latitude/longitude window for
/// [`crate::GeoSearch::find_locations_by_coordinates`].
///
/// A missing bound leaves that side open. An axis with no bound at all makes
/// the query match nothing, so an all-`None` window never returns the whole
/// table by accident.
#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize, Deserialize)]
pub struct CoordinateBounds {
    pub latitude_from: Option<f64>,
    pub latitude_to: Option<f64>,
    pub longitude_from: Option<f64>,
    pub longitude_to: Option<f64>,
}

impl CoordinateBounds {
    /// `None` when one of the axes has no usable bound. NaN counts as absent.
    pub(crate) fn ranges(&self) -> Option<((f64, f64), (f64, f64))> {
        fn axis(from: Option<f64>, to: Option<f64>) -> Option<(f64, f64)> {
            let from = from.filter(|v| !v.is_nan());
            let to = to.filter(|v| !v.is_nan());
            if from.is_none() && to.is_none() {
                return None;
            }
            Some((from.unwrap_or(f64::NEG_INFINITY), to.unwrap_or(f64::INFINITY)))
        }

        Some((
            axis(self.latitude_from, self.latitude_to)?,
            axis(self.longitude_from, self.longitude_to)?,
        ))
    }
}

/// What kind of ISO 3166-1 code a query argument is.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum IsoCodeKind {
    Alpha2,
    Alpha3,
    Invalid,
}
