//! Run configuration.
//!
//! Every file location is supplied by the caller, either directly or through
//! a TOML file, so the pipeline itself stays path-agnostic.

use std::fs;
use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};

use crate::errors::{FlashRateError, FlashRateResult};

/// Fitted coefficient tables, one per model variant.
///
/// The field names double as the output column names.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CoefficientPaths {
    /// Power-law fit.
    pub pl: PathBuf,
    /// Power-law fit via linear optimisation.
    pub pl_op: PathBuf,
    /// Scale fit.
    pub sc: PathBuf,
    /// Linear fit.
    pub li: PathBuf,
    /// Second linear fit.
    pub li2: PathBuf,
}

/// Paths for one prediction run.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RunConfig {
    /// Monthly climate/lightning summary CSV.
    pub summary: PathBuf,
    /// Coefficient table per model variant.
    pub coefficients: CoefficientPaths,
    /// Destination for the prediction CSV. Overwritten if present.
    pub predictions: PathBuf,
}

impl RunConfig {
    /// Load a run configuration from a TOML file.
    pub fn from_toml_file(path: &Path) -> FlashRateResult<Self> {
        let raw = fs::read_to_string(path).map_err(|source| FlashRateError::Io {
            path: path.to_path_buf(),
            source,
        })?;
        toml::from_str(&raw).map_err(|source| FlashRateError::Config {
            path: path.to_path_buf(),
            source,
        })
    }
}
