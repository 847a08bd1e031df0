//! Monthly climate/lightning summary table.
//!
//! One row per observational unit (grid cell x month) carrying the
//! monthly-mean climate covariates and the observed flash rate. Row order is
//! preserved from the source file so that predictions can be joined back by
//! position.

use std::fs::File;
use std::io::Read;
use std::path::Path;

use ndarray::Array1;

use crate::errors::{FlashRateError, FlashRateResult};
use crate::FloatValue;

/// Column holding monthly-mean convective available potential energy.
pub const COL_CAPE: &str = "cape_monthly_mean";
/// Column holding monthly-mean total precipitation rate.
pub const COL_PRECIP: &str = "mtpr_monthly_mean";
/// Column holding the observed mean lightning strike rate.
pub const COL_STRIKE_RATE: &str = "mean_strike_rate";

/// Row index of a loaded table.
///
/// Mirrors whatever the source CSV carried: an unnamed leading column is
/// treated as explicit row labels, otherwise rows are labelled by position.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum RowIndex {
    /// Labels taken from an unnamed leading column.
    Labelled(Vec<String>),
    /// No index column in the source; rows are labelled 0..n by position.
    Positional(usize),
}

impl RowIndex {
    pub fn len(&self) -> usize {
        match self {
            RowIndex::Labelled(labels) => labels.len(),
            RowIndex::Positional(n) => *n,
        }
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// Label for a row, as it should appear in an output index column.
    pub fn label(&self, row: usize) -> String {
        match self {
            RowIndex::Labelled(labels) => labels[row].clone(),
            RowIndex::Positional(_) => row.to_string(),
        }
    }
}

/// Monthly climate/lightning summary statistics.
///
/// `mean_strike_rate` is part of the table contract and is validated on load,
/// but the prediction pipeline itself does not consume it; it remains
/// available to callers for comparison against predictions.
#[derive(Debug, Clone)]
pub struct ClimateSummary {
    index: RowIndex,
    cape_monthly_mean: Array1<FloatValue>,
    mtpr_monthly_mean: Array1<FloatValue>,
    mean_strike_rate: Array1<FloatValue>,
}

impl ClimateSummary {
    /// Load a summary table from a CSV file.
    ///
    /// Fails fast with [`FlashRateError::MissingColumn`] if any required
    /// column is absent, and with [`FlashRateError::InvalidValue`] on
    /// non-numeric cells.
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
            .map_err(|source| csv_error(path, source))?
            .clone();

        // A leading header cell with no name marks a row-label column.
        let has_index = headers.get(0).is_some_and(str::is_empty);

        let cape_pos = column_position(&headers, COL_CAPE, path)?;
        let precip_pos = column_position(&headers, COL_PRECIP, path)?;
        let strike_pos = column_position(&headers, COL_STRIKE_RATE, path)?;

        let mut labels = Vec::new();
        let mut cape = Vec::new();
        let mut precip = Vec::new();
        let mut strike = Vec::new();

        for (row, record) in reader.records().enumerate() {
            let record = record.map_err(|source| csv_error(path, source))?;
            if has_index {
                labels.push(record.get(0).unwrap_or_default().to_string());
            }
            cape.push(parse_cell(&record, cape_pos, COL_CAPE, row, path)?);
            precip.push(parse_cell(&record, precip_pos, COL_PRECIP, row, path)?);
            strike.push(parse_cell(&record, strike_pos, COL_STRIKE_RATE, row, path)?);
        }

        let index = if has_index {
            RowIndex::Labelled(labels)
        } else {
            RowIndex::Positional(cape.len())
        };

        Ok(Self {
            index,
            cape_monthly_mean: Array1::from_vec(cape),
            mtpr_monthly_mean: Array1::from_vec(precip),
            mean_strike_rate: Array1::from_vec(strike),
        })
    }

    /// Build a summary from in-memory columns.
    ///
    /// Columns must all have the same length as the index.
    pub fn from_columns(
        index: RowIndex,
        cape_monthly_mean: Array1<FloatValue>,
        mtpr_monthly_mean: Array1<FloatValue>,
        mean_strike_rate: Array1<FloatValue>,
    ) -> FlashRateResult<Self> {
        let expected = index.len();
        for column in [&cape_monthly_mean, &mtpr_monthly_mean, &mean_strike_rate] {
            if column.len() != expected {
                return Err(FlashRateError::ShapeMismatch {
                    expected,
                    actual: column.len(),
                });
            }
        }
        Ok(Self {
            index,
            cape_monthly_mean,
            mtpr_monthly_mean,
            mean_strike_rate,
        })
    }

    pub fn len(&self) -> usize {
        self.cape_monthly_mean.len()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    pub fn index(&self) -> &RowIndex {
        &self.index
    }

    pub fn cape_monthly_mean(&self) -> &Array1<FloatValue> {
        &self.cape_monthly_mean
    }

    pub fn mtpr_monthly_mean(&self) -> &Array1<FloatValue> {
        &self.mtpr_monthly_mean
    }

    pub fn mean_strike_rate(&self) -> &Array1<FloatValue> {
        &self.mean_strike_rate
    }

    /// The CxP covariate: elementwise product of the CAPE and precipitation
    /// means, in the same row order as the table.
    pub fn cape_x_precip(&self) -> Array1<FloatValue> {
        &self.cape_monthly_mean * &self.mtpr_monthly_mean
    }
}

fn csv_error(path: &Path, source: csv::Error) -> FlashRateError {
    FlashRateError::Csv {
        path: path.to_path_buf(),
        source,
    }
}

fn column_position(
    headers: &csv::StringRecord,
    column: &str,
    path: &Path,
) -> FlashRateResult<usize> {
    headers
        .iter()
        .position(|h| h == column)
        .ok_or_else(|| FlashRateError::MissingColumn {
            column: column.to_string(),
            path: path.to_path_buf(),
        })
}

fn parse_cell(
    record: &csv::StringRecord,
    position: usize,
    column: &str,
    row: usize,
    path: &Path,
) -> FlashRateResult<FloatValue> {
    let raw = record.get(position).unwrap_or_default();
    raw.trim()
        .parse::<FloatValue>()
        .map_err(|_| FlashRateError::InvalidValue {
            value: raw.to_string(),
            column: column.to_string(),
            row,
            path: path.to_path_buf(),
        })
}
