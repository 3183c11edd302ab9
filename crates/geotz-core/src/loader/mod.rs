// crates/geotz-core/src/loader/mod.rs

//! # Data Loader
//!
//! Handles the physical layer: one bincode file per table, optionally
//! gzip-compressed, under a data directory. With the `builder` feature it
//! also reads the hand-maintained source files and writes the tables.

use crate::error::Result;
use crate::model::{DefaultBackend, GeoDb};
use crate::traits::GeoBackend;
use once_cell::sync::OnceCell;
use std::path::{Path, PathBuf};

pub mod common_io;

#[cfg(feature = "builder")]
pub mod builder;
#[cfg(feature = "builder")]
pub mod sources;

pub use common_io::CompressionMode;

/// File stems of the persisted tables.
pub mod tables {
    pub const COUNTRIES: &str = "countries";
    pub const LOCATIONS: &str = "locations";
    pub const CAPITALS: &str = "capitals";
    pub const ISO2_BY_ISO3: &str = "iso2-by-iso3";
    pub const ISO3_BY_ISO2: &str = "iso3-by-iso2";
    pub const ISO2_CODES: &str = "iso2-codes";
    pub const ISO3_CODES: &str = "iso3-codes";
    pub const STATES_ANSI: &str = "states-ansi";
    pub const TIMEZONES: &str = "timezones";

    pub const ALL: [&str; 9] = [
        COUNTRIES,
        LOCATIONS,
        CAPITALS,
        ISO2_BY_ISO3,
        ISO3_BY_ISO2,
        ISO2_CODES,
        ISO3_CODES,
        STATES_ANSI,
        TIMEZONES,
    ];
}

static GEO_DB_CACHE: OnceCell<GeoDb<DefaultBackend>> = OnceCell::new();

impl GeoDb<DefaultBackend> {
    /// Where the persisted tables live by default.
    pub fn default_data_dir() -> PathBuf {
        PathBuf::from(env!("CARGO_MANIFEST_DIR")).join("data").join("dist")
    }

    /// Where the hand-maintained source files live by default.
    pub fn default_source_dir() -> PathBuf {
        PathBuf::from(env!("CARGO_MANIFEST_DIR")).join("data").join("source")
    }

    /// Process-wide dataset, loaded on first use and shared afterwards.
    ///
    /// With the `builder` feature a missing or outdated table set is rebuilt
    /// from [`Self::default_source_dir`] first.
    pub fn load() -> Result<&'static Self> {
        GEO_DB_CACHE.get_or_try_init(|| {
            #[cfg(feature = "builder")]
            {
                Self::load_or_build(&Self::default_data_dir(), &Self::default_source_dir())
            }
            #[cfg(not(feature = "builder"))]
            {
                Self::load_from_dir(Self::default_data_dir())
            }
        })
    }
}

impl<B: GeoBackend> GeoDb<B> {
    /// Reads every table from `dir`.
    pub fn load_from_dir(dir: impl AsRef<Path>) -> Result<Self> {
        use common_io::read_table;
        let dir = dir.as_ref();

        let db = Self {
            countries: read_table(dir, tables::COUNTRIES)?,
            locations: read_table(dir, tables::LOCATIONS)?,
            capitals: read_table(dir, tables::CAPITALS)?,
            iso2_by_iso3: read_table(dir, tables::ISO2_BY_ISO3)?,
            iso3_by_iso2: read_table(dir, tables::ISO3_BY_ISO2)?,
            iso2_codes: read_table(dir, tables::ISO2_CODES)?,
            iso3_codes: read_table(dir, tables::ISO3_CODES)?,
            states_ansi: read_table(dir, tables::STATES_ANSI)?,
            timezones: read_table(dir, tables::TIMEZONES)?,
        };
        tracing::debug!(
            dir = %dir.display(),
            countries = db.countries.len(),
            locations = db.locations.len(),
            "dataset loaded"
        );
        Ok(db)
    }
}
