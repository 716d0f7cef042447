use std::io;
use std::path::PathBuf;

use thiserror::Error;

/// All errors produced by the data layer.
///
/// Every variant is unrecoverable at the point of detection: the caller
/// reports it and aborts the current render pass instead of publishing a
/// partial page.
#[derive(Error, Debug)]
pub enum DataError {
    /// A file could not be read from disk.
    #[error("failed to read '{}': {source}", .path.display())]
    Io {
        path: PathBuf,
        #[source]
        source: io::Error,
    },

    /// No encoding in the fallback chain produced a clean decode.
    ///
    /// The terminal latin1 strategy accepts any byte sequence, so this is
    /// only reachable if the chain is shortened.
    #[error("no candidate encoding could decode '{}'", .path.display())]
    Decode { path: PathBuf },

    /// The required identifier column is absent after header trimming.
    #[error("file '{}' is missing the '{column}' column", .path.display())]
    Schema {
        path: PathBuf,
        column: &'static str,
    },

    /// The file has no digit-named year columns to chart.
    #[error("file '{}' contains no year columns", .path.display())]
    EmptyYearRange { path: PathBuf },

    /// The user has deselected every entity.
    #[error("no regions selected; pick at least one")]
    EmptySelection,

    /// The decoded text could not be parsed as semicolon-delimited CSV.
    #[error("failed to parse '{}' as CSV: {source}", .path.display())]
    Csv {
        path: PathBuf,
        #[source]
        source: csv::Error,
    },
}

/// Convenience alias used throughout the data layer.
pub type Result<T> = std::result::Result<T, DataError>;
