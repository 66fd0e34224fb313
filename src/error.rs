use std::{io, path::PathBuf};

use thiserror::Error;

/// Failures while reading a bedMethyl table from disk.
#[derive(Debug, Error)]
pub enum TableError {
    #[error("Could not read bedMethyl file {path:?}: {source}")]
    Read {
        path: PathBuf,
        #[source]
        source: io::Error,
    },

    #[error("Could not parse bedMethyl line {line}: {message}")]
    Parse { line: u64, message: String },

    #[error("Malformed bedMethyl table: {0}")]
    Malformed(String),
}

impl TableError {
    /// Splits a csv error into an I/O failure or a parse failure.
    pub(crate) fn from_csv(path: &std::path::Path, err: csv::Error) -> Self {
        let line = err.position().map(|p| p.line()).unwrap_or(0);
        let message = err.to_string();

        match err.into_kind() {
            csv::ErrorKind::Io(source) => TableError::Read {
                path: path.to_path_buf(),
                source,
            },
            _ => TableError::Parse { line, message },
        }
    }
}

#[derive(Debug, Error, PartialEq, Eq)]
pub enum AggregationError {
    #[error("Read counts in region {region} exceed the 64-bit range")]
    CountOverflow { region: String },
}
