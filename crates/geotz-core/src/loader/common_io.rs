// crates/geotz-core/src/loader/common_io.rs
use crate::error::{GeoError, Result};
use bincode::Options;
use serde::de::DeserializeOwned;
use serde::Serialize;
use std::fs::{self, File};
use std::io::{BufReader, BufWriter, Read, Write};
use std::path::{Path, PathBuf};

#[cfg(feature = "compact")]
use flate2::{read::GzDecoder, write::GzEncoder, Compression};

/// Upper bound for a single decoded table.
const MAX_TABLE_BYTES: u64 = 256 * 1024 * 1024;

/// How table files are written. Reading detects the mode from the file name.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CompressionMode {
    /// `<table>.bin.gz`
    Gzip,
    /// `<table>.bin`
    None,
}

impl CompressionMode {
    pub fn suffix(self) -> &'static str {
        match self {
            CompressionMode::Gzip => "bin.gz",
            CompressionMode::None => "bin",
        }
    }
}

impl Default for CompressionMode {
    fn default() -> Self {
        #[cfg(feature = "compact")]
        {
            CompressionMode::Gzip
        }
        #[cfg(not(feature = "compact"))]
        {
            CompressionMode::None
        }
    }
}

/// The one bincode configuration used for writing and reading.
fn codec() -> impl Options {
    bincode::DefaultOptions::new().with_limit(MAX_TABLE_BYTES)
}

pub fn table_path(dir: &Path, table: &str, compression: CompressionMode) -> PathBuf {
    dir.join(format!("{table}.{}", compression.suffix()))
}

/// Locates a persisted table, preferring the compressed file.
pub fn find_table(dir: &Path, table: &str) -> Result<PathBuf> {
    [CompressionMode::Gzip, CompressionMode::None]
        .into_iter()
        .map(|mode| table_path(dir, table, mode))
        .find(|path| path.is_file())
        .ok_or_else(|| {
            GeoError::NotFound(format!("table '{table}' not found in {}", dir.display()))
        })
}

/// Opens a file, buffers it, and wraps it in a Gzip decoder when the name
/// ends in `.gz`.
pub fn open_stream(path: &Path) -> Result<Box<dyn Read>> {
    let file = File::open(path).map_err(|e| {
        GeoError::NotFound(format!("Dataset not found at {}: {}", path.display(), e))
    })?;

    let reader = BufReader::new(file);
    let gzipped = path.extension().is_some_and(|ext| ext == "gz");

    if !gzipped {
        return Ok(Box::new(reader));
    }

    #[cfg(feature = "compact")]
    {
        Ok(Box::new(GzDecoder::new(reader)))
    }

    #[cfg(not(feature = "compact"))]
    {
        Err(GeoError::InvalidData(format!(
            "{} is gzip-compressed but the 'compact' feature is disabled",
            path.display()
        )))
    }
}

pub fn read_table<T: DeserializeOwned>(dir: &Path, table: &str) -> Result<T> {
    let path = find_table(dir, table)?;
    let reader = open_stream(&path)?;
    codec().deserialize_from(reader).map_err(GeoError::Bincode)
}

/// Writes one table. The file of the other compression mode, if left over
/// from an earlier run, is removed so readers never pick up a stale copy.
pub fn write_table<T: Serialize + ?Sized>(
    dir: &Path,
    table: &str,
    value: &T,
    compression: CompressionMode,
) -> Result<PathBuf> {
    let path = table_path(dir, table, compression);
    let stale = table_path(
        dir,
        table,
        match compression {
            CompressionMode::Gzip => CompressionMode::None,
            CompressionMode::None => CompressionMode::Gzip,
        },
    );
    if stale.is_file() {
        fs::remove_file(&stale)?;
    }

    let writer = BufWriter::new(File::create(&path)?);
    match compression {
        CompressionMode::Gzip => {
            #[cfg(feature = "compact")]
            {
                // header mtime stays 0, so identical input gives identical bytes
                let mut encoder = GzEncoder::new(writer, Compression::default());
                codec().serialize_into(&mut encoder, value)?;
                encoder.finish()?.flush()?;
            }
            #[cfg(not(feature = "compact"))]
            {
                return Err(GeoError::InvalidData(
                    "Gzip requested but 'compact' disabled".into(),
                ));
            }
        }
        CompressionMode::None => {
            let mut writer = writer;
            codec().serialize_into(&mut writer, value)?;
            writer.flush()?;
        }
    }

    Ok(path)
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::BTreeMap;

    #[test]
    fn table_round_trips_in_both_modes() {
        let dir = tempfile::tempdir().expect("tempdir");
        let map: BTreeMap<String, String> =
            [("JPN".to_string(), "JP".to_string()), ("FRA".to_string(), "FR".to_string())].into();

        for mode in [CompressionMode::Gzip, CompressionMode::None] {
            #[cfg(not(feature = "compact"))]
            if mode == CompressionMode::Gzip {
                continue;
            }
            let path = write_table(dir.path(), "iso2-by-iso3", &map, mode).expect("write");
            assert!(path.to_string_lossy().ends_with(mode.suffix()));

            let back: BTreeMap<String, String> = read_table(dir.path(), "iso2-by-iso3").expect("read");
            assert_eq!(back, map);
        }
    }

    #[cfg(feature = "compact")]
    #[test]
    fn switching_mode_removes_the_stale_file() {
        let dir = tempfile::tempdir().expect("tempdir");
        let codes = vec!["JP".to_string()];

        write_table(dir.path(), "iso2-codes", &codes, CompressionMode::Gzip).expect("write");
        write_table(dir.path(), "iso2-codes", &codes, CompressionMode::None).expect("write");

        assert!(!table_path(dir.path(), "iso2-codes", CompressionMode::Gzip).exists());
        assert_eq!(
            find_table(dir.path(), "iso2-codes").expect("found"),
            table_path(dir.path(), "iso2-codes", CompressionMode::None)
        );
    }

    #[test]
    fn missing_table_is_not_found() {
        let dir = tempfile::tempdir().expect("tempdir");
        let err = read_table::<Vec<String>>(dir.path(), "timezones").unwrap_err();
        assert!(matches!(err, GeoError::NotFound(_)));
    }
}
