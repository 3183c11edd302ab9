// crates/geotz-core/src/lib.rs

//! # geotz-core
//!
//! A static reference dataset of countries, capitals, city locations, US
//! states and IANA timezones.
//!
//! The crate has two halves:
//!
//! - an offline pipeline (`builder` feature) that reads hand-maintained
//!   source tables, cross-checks them, assembles the derived tables and
//!   writes them as one bincode file each;
//! - a read-only query layer over the loaded tables ([`GeoSearch`]).
//!
//! ```rust,no_run
//! use geotz_core::{GeoDb, GeoSearch};
//!
//! let db = GeoDb::load()?;
//! let tz = db.find_timezone_by_capital_of_country_iso("JP");
//! assert_eq!(tz, Some("Asia/Tokyo"));
//! # Ok::<(), geotz_core::GeoError>(())
//! ```

pub mod common;
pub mod diagnostics;
pub mod error;
pub mod iso;
pub mod loader;
pub mod model;
pub mod pipeline;
pub mod raw;
pub mod search;
pub mod text;
#[cfg(feature = "builder")]
pub mod timezones;
pub mod traits;
pub mod validate;

// Re-exports
pub use crate::common::{CoordinateBounds, DbStats, IsoCodeKind};
pub use crate::diagnostics::{Diagnostic, DiagnosticKind, Report, Severity};
pub use crate::error::{GeoError, Result};
pub use crate::loader::CompressionMode;
#[cfg(feature = "builder")]
pub use crate::loader::builder::{build_database, BuildConfig, BuildOutcome};
pub use crate::model::{
    Capital, CapitalInfo, Country, CountrySnapshot, DefaultBackend, DefaultGeoDb, GeoDb, Location,
};
pub use crate::raw::{RawCapital, RawLocation, Sources, StateAnsi};
pub use crate::search::GeoSearch;
pub use crate::text::MatchMode;
pub use crate::traits::{GeoBackend, NameMatch};
