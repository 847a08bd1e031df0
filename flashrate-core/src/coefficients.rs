//! Fitted model coefficient tables.
//!
//! Each model variant ships its coefficients in a small CSV with an unnamed
//! label column and a single value column named `"0"`, one row per
//! coefficient. The tables are produced by the upstream fitting workflow;
//! the value column name is part of that on-disk contract.

use std::fs::File;
use std::io::Read;
use std::path::{Path, PathBuf};

use crate::errors::{FlashRateError, FlashRateResult};
use crate::FloatValue;

/// Name of the value column in the fitted coefficient CSVs.
pub const VALUE_COLUMN: &str = "0";

/// A small table of named scalar coefficients, loaded once per model variant
/// and used as constants for the whole run.
#[derive(Debug, Clone)]
pub struct CoefficientTable {
    path: PathBuf,
    entries: Vec<(String, FloatValue)>,
}

impl CoefficientTable {
    /// Load a coefficient table from a CSV file.
    ///
    /// Fails with [`FlashRateError::MissingColumn`] if the value column is
    /// absent.
    pub fn from_csv(path: &Path) -> FlashRateResult<Self> {
        let file = File::open(path).map_err(|source| FlashRateError::Io {
            path: path.to_path_buf(),
            source,
        })?;
        Self::from_reader(file, path)
    }

    pub(crate) fn from_reader<R: Read>(rdr: R, path: &Path) -> FlashRateResult<Self> {
        let mut reader = csv::ReaderBuilder::new().has_headers(true).from_reader(rdr);

        let headers = reader
            .headers()
            .map_err(|source| FlashRateError::Csv {
                path: path.to_path_buf(),
                source,
            })?
            .clone();

        let value_pos = headers
            .iter()
            .position(|h| h == VALUE_COLUMN)
            .ok_or_else(|| FlashRateError::MissingColumn {
                column: VALUE_COLUMN.to_string(),
                path: path.to_path_buf(),
            })?;

        let mut entries = Vec::new();
        for (row, record) in reader.records().enumerate() {
            let record = record.map_err(|source| FlashRateError::Csv {
                path: path.to_path_buf(),
                source,
            })?;
            let name = record.get(0).unwrap_or_default().to_string();
            let raw = record.get(value_pos).unwrap_or_default();
            let value =
                raw.trim()
                    .parse::<FloatValue>()
                    .map_err(|_| FlashRateError::InvalidValue {
                        value: raw.to_string(),
                        column: VALUE_COLUMN.to_string(),
                        row,
                        path: path.to_path_buf(),
                    })?;
            entries.push((name, value));
        }

        Ok(Self {
            path: path.to_path_buf(),
            entries,
        })
    }

    /// Look up a coefficient by name.
    ///
    /// Fails with [`FlashRateError::MissingCoefficient`] if no row carries
    /// that label.
    pub fn get(&self, name: &str) -> FlashRateResult<FloatValue> {
        self.entries
            .iter()
            .find(|(label, _)| label == name)
            .map(|(_, value)| *value)
            .ok_or_else(|| FlashRateError::MissingCoefficient {
                name: name.to_string(),
                path: self.path.clone(),
            })
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}
