//! geotz-cli
//! =========
//!
//! Command-line interface for the `geotz-core` reference dataset.
//!
//! This crate primarily provides a binary (`geotz`). The library target only
//! exists so that the documentation renders this overview.
//!
//! Quick start
//! -----------
//!
//! ```text
//! geotz --help
//! geotz build --strict
//! geotz stats
//! geotz country JP
//! geotz locations --country "united" --partial
//! geotz timezones --city "sao paulo"
//! ```
//!
//! For programmatic access to the tables and lookups, use the `geotz-core`
//! crate directly.
#![cfg_attr(docsrs, feature(doc_cfg))]
