// crates/geotz-core/src/loader/sources.rs

//! Reads the hand-maintained source files into typed rows.
//!
//! A file that cannot be opened, or is not a JSON array / CSV at all, is a
//! hard error. A single malformed element only costs that element: it is
//! reported as a structural diagnostic and skipped.

use crate::diagnostics::Report;
use crate::error::{GeoError, Result};
use crate::raw::{merge_formal_names, FormalNames, Sources};
use crate::timezones;
use serde::de::DeserializeOwned;
use serde_json::Value;
use std::fs::File;
use std::io::BufReader;
use std::path::Path;
use tracing::info;

pub const COUNTRIES_CSV: &str = "countries.csv";
pub const OVERRIDES_CSV: &str = "country-overrides.csv";
pub const ISO2_CODES_JSON: &str = "country-iso2-codes.json";
pub const ISO3_CODES_JSON: &str = "country-iso3-codes.json";
pub const STATES_ANSI_JSON: &str = "states-ansi.json";
pub const LOCATIONS_JSON: &str = "locations.json";
pub const CAPITALS_JSON: &str = "country-capitals.json";

impl Sources {
    /// Loads every source file from `dir`. The override table is optional.
    pub fn load_from_dir(dir: impl AsRef<Path>, report: &mut Report) -> Result<Self> {
        let dir = dir.as_ref();

        let official = read_formal_names(dir, COUNTRIES_CSV, report)?;
        let overrides = if dir.join(OVERRIDES_CSV).is_file() {
            read_formal_names(dir, OVERRIDES_CSV, report)?
        } else {
            info!(file = OVERRIDES_CSV, "no override table, using official names only");
            FormalNames::new()
        };

        Ok(Sources {
            formal_names: merge_formal_names(official, overrides),
            iso2_codes: read_rows(dir, ISO2_CODES_JSON, report)?,
            iso3_codes: read_rows(dir, ISO3_CODES_JSON, report)?,
            states_ansi: read_rows(dir, STATES_ANSI_JSON, report)?,
            locations: read_rows(dir, LOCATIONS_JSON, report)?,
            capitals: read_rows(dir, CAPITALS_JSON, report)?,
            timezones: timezones::supported(),
        })
    }
}

/// `short;formal` pairs, one header line. A short name listed twice keeps
/// its first formal name.
fn read_formal_names(dir: &Path, file: &str, report: &mut Report) -> Result<FormalNames> {
    let handle = open_source(dir, file)?;
    let mut reader = csv::ReaderBuilder::new()
        .delimiter(b';')
        .has_headers(true)
        .trim(csv::Trim::All)
        .from_reader(BufReader::new(handle));

    let mut names = FormalNames::new();
    for record in reader.records() {
        let parsed = record.and_then(|rec| {
            let line = rec.position().map_or(0, |p| p.line());
            rec.deserialize::<(String, String)>(None).map(|pair| (line, pair))
        });
        match parsed {
            Ok((line, (short, formal))) => {
                if names.contains_key(&short) {
                    report.structural(
                        format!("{file}:{line}"),
                        format!("country {short:?} is listed more than once, keeping the first entry"),
                    );
                } else {
                    names.insert(short, formal);
                }
            }
            Err(err) => {
                let line = err.position().map_or(0, |p| p.line());
                report.structural(format!("{file}:{line}"), err.to_string());
            }
        }
    }

    info!(file, rows = names.len(), "source table loaded");
    Ok(names)
}

fn open_source(dir: &Path, file: &str) -> Result<File> {
    let path = dir.join(file);
    File::open(&path)
        .map_err(|e| GeoError::NotFound(format!("source file {} not found: {e}", path.display())))
}

/// A JSON array whose elements are converted one by one.
fn read_rows<T: DeserializeOwned>(dir: &Path, file: &str, report: &mut Report) -> Result<Vec<T>> {
    let handle = open_source(dir, file)?;
    let elements: Vec<Value> = serde_json::from_reader(BufReader::new(handle))?;

    let mut rows = Vec::with_capacity(elements.len());
    for (index, element) in elements.into_iter().enumerate() {
        let context = element_context(file, index, &element);
        match serde_json::from_value::<T>(element) {
            Ok(row) => rows.push(row),
            Err(err) => report.structural(context, err.to_string()),
        }
    }

    info!(file, rows = rows.len(), "source table loaded");
    Ok(rows)
}

/// "Country / City" when the element carries them, else `file[index]`.
fn element_context(file: &str, index: usize, element: &Value) -> String {
    let field = |name: &str| element.get(name).and_then(Value::as_str);
    match (field("country"), field("city")) {
        (Some(country), Some(city)) => format!("{country} / {city}"),
        (Some(country), None) => country.to_owned(),
        _ => format!("{file}[{index}]"),
    }
}
