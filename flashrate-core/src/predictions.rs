//! Predicted flash-rate table assembly and persistence.

use std::fs::File;
use std::path::Path;

use ndarray::Array1;

use crate::errors::{FlashRateError, FlashRateResult};
use crate::summary::RowIndex;
use crate::FloatValue;

/// Output column names, one per model variant, in on-disk order.
pub const PREDICTION_COLUMNS: [&str; 5] = ["pl", "pl_op", "sc", "li", "li2"];

/// One prediction column per model variant, row-aligned with the summary
/// table the covariate came from.
#[derive(Debug, Clone)]
pub struct PredictionTable {
    index: RowIndex,
    pl: Array1<FloatValue>,
    pl_op: Array1<FloatValue>,
    sc: Array1<FloatValue>,
    li: Array1<FloatValue>,
    li2: Array1<FloatValue>,
}

impl PredictionTable {
    /// Assemble a prediction table from per-variant columns.
    ///
    /// Every column must match the index length; rows are never reordered,
    /// dropped, or added.
    pub fn new(
        index: RowIndex,
        pl: Array1<FloatValue>,
        pl_op: Array1<FloatValue>,
        sc: Array1<FloatValue>,
        li: Array1<FloatValue>,
        li2: Array1<FloatValue>,
    ) -> FlashRateResult<Self> {
        let expected = index.len();
        for column in [&pl, &pl_op, &sc, &li, &li2] {
            if column.len() != expected {
                return Err(FlashRateError::ShapeMismatch {
                    expected,
                    actual: column.len(),
                });
            }
        }
        Ok(Self {
            index,
            pl,
            pl_op,
            sc,
            li,
            li2,
        })
    }

    pub fn len(&self) -> usize {
        self.index.len()
    }

    pub fn is_empty(&self) -> bool {
        self.index.is_empty()
    }

    pub fn index(&self) -> &RowIndex {
        &self.index
    }

    pub fn pl(&self) -> &Array1<FloatValue> {
        &self.pl
    }

    pub fn pl_op(&self) -> &Array1<FloatValue> {
        &self.pl_op
    }

    pub fn sc(&self) -> &Array1<FloatValue> {
        &self.sc
    }

    pub fn li(&self) -> &Array1<FloatValue> {
        &self.li
    }

    pub fn li2(&self) -> &Array1<FloatValue> {
        &self.li2
    }

    /// Write the table as CSV: an unnamed index column followed by one column
    /// per variant. Overwrites any existing file at `path`.
    ///
    /// There is no atomic-replace or partial-write recovery; a crash mid-write
    /// leaves an incomplete file.
    pub fn write_csv(&self, path: &Path) -> FlashRateResult<()> {
        let file = File::create(path).map_err(|source| FlashRateError::Io {
            path: path.to_path_buf(),
            source,
        })?;
        let mut wtr = csv::Writer::from_writer(file);

        let mut header = vec![String::new()];
        header.extend(PREDICTION_COLUMNS.iter().map(|c| (*c).to_string()));
        wtr.write_record(&header).map_err(|source| FlashRateError::Csv {
            path: path.to_path_buf(),
            source,
        })?;

        for row in 0..self.len() {
            let record = [
                self.index.label(row),
                self.pl[row].to_string(),
                self.pl_op[row].to_string(),
                self.sc[row].to_string(),
                self.li[row].to_string(),
                self.li2[row].to_string(),
            ];
            wtr.write_record(&record).map_err(|source| FlashRateError::Csv {
                path: path.to_path_buf(),
                source,
            })?;
        }

        wtr.flush().map_err(|source| FlashRateError::Io {
            path: path.to_path_buf(),
            source,
        })
    }
}
