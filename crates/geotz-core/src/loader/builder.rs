// crates/geotz-core/src/loader/builder.rs
#![cfg(feature = "builder")]

use super::common_io::{self, CompressionMode};
use super::tables;
use crate::common::DbStats;
use crate::diagnostics::Report;
use crate::error::Result;
use crate::model::{DefaultBackend, GeoDb};
use crate::pipeline;
use crate::raw::Sources;
use crate::search::GeoSearch;
use crate::traits::GeoBackend;
use std::fs;
use std::path::{Path, PathBuf};
use std::time::SystemTime;
use tracing::{info, warn};

// -----------------------------------------------------------------------------
// CONFIGURATION
// -----------------------------------------------------------------------------

/// Where to read the sources from and how to write the tables.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct BuildConfig {
    pub source_dir: PathBuf,
    pub out_dir: PathBuf,
    pub compression: CompressionMode,
}

impl Default for BuildConfig {
    fn default() -> Self {
        Self {
            source_dir: GeoDb::default_source_dir(),
            out_dir: GeoDb::default_data_dir(),
            compression: CompressionMode::default(),
        }
    }
}

/// What a build produced.
#[derive(Debug)]
pub struct BuildOutcome {
    pub stats: DbStats,
    /// Every diagnostic of the run; the tables are written regardless.
    pub report: Report,
    pub files: Vec<PathBuf>,
}

// -----------------------------------------------------------------------------
// BUILDER
// -----------------------------------------------------------------------------

/// Runs the whole pipeline: read sources, validate, assemble, sort, write.
///
/// Only unreadable inputs or unwritable outputs fail the build. Data
/// problems are logged and returned in [`BuildOutcome::report`].
pub fn build_database(config: &BuildConfig) -> Result<BuildOutcome> {
    info!(
        source = %config.source_dir.display(),
        out = %config.out_dir.display(),
        compression = ?config.compression,
        "building dataset"
    );

    let mut report = Report::new();
    let sources = Sources::load_from_dir(&config.source_dir, &mut report)?;
    let db: GeoDb<DefaultBackend> = pipeline::run(&sources, &mut report);
    report.emit();

    let files = db.save_to_dir(&config.out_dir, config.compression)?;
    info!(
        files = files.len(),
        errors = report.error_count(),
        warnings = report.warning_count(),
        "dataset written"
    );

    Ok(BuildOutcome {
        stats: db.stats(),
        report,
        files,
    })
}

impl<B: GeoBackend> GeoDb<B> {
    /// Writes every table into `dir`, creating it if needed.
    pub fn save_to_dir(&self, dir: impl AsRef<Path>, compression: CompressionMode) -> Result<Vec<PathBuf>> {
        use common_io::write_table;
        let dir = dir.as_ref();
        fs::create_dir_all(dir)?;

        Ok(vec![
            write_table(dir, tables::COUNTRIES, &self.countries, compression)?,
            write_table(dir, tables::LOCATIONS, &self.locations, compression)?,
            write_table(dir, tables::CAPITALS, &self.capitals, compression)?,
            write_table(dir, tables::ISO2_BY_ISO3, &self.iso2_by_iso3, compression)?,
            write_table(dir, tables::ISO3_BY_ISO2, &self.iso3_by_iso2, compression)?,
            write_table(dir, tables::ISO2_CODES, &self.iso2_codes, compression)?,
            write_table(dir, tables::ISO3_CODES, &self.iso3_codes, compression)?,
            write_table(dir, tables::STATES_ANSI, &self.states_ansi, compression)?,
            write_table(dir, tables::TIMEZONES, &self.timezones, compression)?,
        ])
    }
}

// -----------------------------------------------------------------------------
// RUNTIME HELPER (cache in front of the sources)
// -----------------------------------------------------------------------------

impl GeoDb<DefaultBackend> {
    /// **Smart Load:** reads the tables in `data_dir`, rebuilding them from
    /// `source_dir` first when they are missing or older than the sources.
    pub fn load_or_build(data_dir: &Path, source_dir: &Path) -> Result<Self> {
        if Self::is_cache_fresh(data_dir, source_dir) {
            match Self::load_from_dir(data_dir) {
                Ok(db) => return Ok(db),
                Err(err) => warn!(error = %err, "cached tables unreadable, rebuilding"),
            }
        }

        let mut report = Report::new();
        let sources = Sources::load_from_dir(source_dir, &mut report)?;
        let db: GeoDb<DefaultBackend> = pipeline::run(&sources, &mut report);
        report.emit();

        // a read-only data dir only costs the cache
        if let Err(err) = db.save_to_dir(data_dir, CompressionMode::default()) {
            warn!(error = %err, dir = %data_dir.display(), "could not cache tables");
        }
        Ok(db)
    }

    /// Every table exists and none is older than any source file.
    fn is_cache_fresh(data_dir: &Path, source_dir: &Path) -> bool {
        let mut oldest_table: Option<SystemTime> = None;
        for table in tables::ALL {
            let modified = common_io::find_table(data_dir, table)
                .ok()
                .and_then(|path| fs::metadata(path).and_then(|m| m.modified()).ok());
            match modified {
                Some(t) => oldest_table = Some(oldest_table.map_or(t, |o| o.min(t))),
                None => return false,
            }
        }
        let Some(oldest_table) = oldest_table else {
            return false;
        };

        let Ok(entries) = fs::read_dir(source_dir) else {
            // nothing to rebuild from, so whatever is cached is current
            return true;
        };
        entries
            .filter_map(|entry| entry.ok())
            .filter_map(|entry| entry.metadata().and_then(|m| m.modified()).ok())
            .all(|source_time| source_time <= oldest_table)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn builds_and_reloads_the_bundled_sample() {
        let out = tempfile::tempdir().expect("tempdir");
        let config = BuildConfig {
            out_dir: out.path().to_path_buf(),
            ..BuildConfig::default()
        };

        let outcome = build_database(&config).expect("build");
        assert!(!outcome.report.has_errors(), "{:?}", outcome.report.diagnostics());
        assert_eq!(outcome.files.len(), tables::ALL.len());

        let db = GeoDb::<DefaultBackend>::load_from_dir(out.path()).expect("reload");
        assert_eq!(db.stats(), outcome.stats);
    }

    #[test]
    fn load_or_build_populates_an_empty_cache() {
        let cache = tempfile::tempdir().expect("tempdir");
        let built = GeoDb::load_or_build(cache.path(), &GeoDb::default_source_dir()).expect("build");
        assert!(GeoDb::is_cache_fresh(cache.path(), &GeoDb::default_source_dir()));

        let cached = GeoDb::load_or_build(cache.path(), &GeoDb::default_source_dir()).expect("load");
        assert_eq!(built, cached);
    }

    /// Names as boxed slices, coordinates as `f32`.
    #[derive(Clone, Debug, PartialEq)]
    struct CompactBackend;

    impl GeoBackend for CompactBackend {
        type Str = Box<str>;
        type Float = f32;

        fn str_from(s: &str) -> Self::Str {
            s.into()
        }

        fn float_from(f: f64) -> Self::Float {
            f as f32
        }

        fn float_to_f64(v: Self::Float) -> f64 {
            f64::from(v)
        }
    }

    #[test]
    fn tables_round_trip_with_a_non_default_backend() {
        let mut report = Report::new();
        let sources = Sources::load_from_dir(GeoDb::default_source_dir(), &mut report).expect("sources");
        let db: GeoDb<CompactBackend> = pipeline::run(&sources, &mut report);

        let out = tempfile::tempdir().expect("tempdir");
        db.save_to_dir(out.path(), CompressionMode::None).expect("save");
        let back = GeoDb::<CompactBackend>::load_from_dir(out.path()).expect("reload");

        assert_eq!(back, db);
        assert_eq!(back.find_timezone_by_city_name("Tokyo"), Some("Asia/Tokyo"));
    }
}
