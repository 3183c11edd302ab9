// crates/geotz-core/src/error.rs
use thiserror::Error;

/// Hard failures: a file could not be read or decoded as a whole.
///
/// Problems with individual rows are never reported through this type; they
/// end up as [`crate::diagnostics::Diagnostic`]s in a
/// [`crate::diagnostics::Report`] and the pipeline keeps going.
#[derive(Debug, Error)]
pub enum GeoError {
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    #[cfg(feature = "builder")]
    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    #[cfg(feature = "builder")]
    #[error("CSV error: {0}")]
    Csv(#[from] csv::Error),

    #[error("Binary encoding error: {0}")]
    Bincode(#[from] bincode::Error),

    #[error("Not found: {0}")]
    NotFound(String),

    #[error("Invalid data: {0}")]
    InvalidData(String),
}

pub type Result<T> = std::result::Result<T, GeoError>;
