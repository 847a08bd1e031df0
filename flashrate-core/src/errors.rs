use std::path::PathBuf;
use thiserror::Error;

/// Error type for failures while loading tables or running the pipeline.
///
/// Every variant is fatal: the pipeline either completes in full or stops at
/// the first failing load/parse step. Nothing is caught or retried.
#[derive(Error, Debug)]
pub enum FlashRateError {
    #[error("failed to read {}: {source}", path.display())]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
    #[error("failed to parse {} as CSV: {source}", path.display())]
    Csv {
        path: PathBuf,
        #[source]
        source: csv::Error,
    },
    #[error("required column {column:?} not found in {}", path.display())]
    MissingColumn { column: String, path: PathBuf },
    #[error("coefficient {name:?} not found in {}", path.display())]
    MissingCoefficient { name: String, path: PathBuf },
    #[error("invalid value {value:?} in column {column:?}, row {row} of {}", path.display())]
    InvalidValue {
        value: String,
        column: String,
        row: usize,
        path: PathBuf,
    },
    #[error("column length mismatch: expected {expected} rows, got {actual}")]
    ShapeMismatch { expected: usize, actual: usize },
    #[error("failed to parse config {}: {source}", path.display())]
    Config {
        path: PathBuf,
        #[source]
        source: toml::de::Error,
    },
}

/// Convenience type for `Result<T, FlashRateError>`.
pub type FlashRateResult<T> = Result<T, FlashRateError>;
