use thiserror::Error;

#[derive(Debug, Error, PartialEq, Eq)]
pub enum MethylomeError {
    #[error("Invalid region format: {0}. Use 'chr:start-end'")]
    InvalidRegionFormat(String),

    #[error("Unsupported mod type: {0}")]
    UnsupportedModType(String),
}
