//! Non-parametric binned flash-rate model.
//!
//! Looks up flash rate from an empirically binned CxP/flash-rate relation
//! instead of a closed-form fit. Inside the binned range the prediction is a
//! linear interpolation between (bin center, bin mean) pairs; at or beyond
//! the last usable bin center it extrapolates linearly with two out-of-bin
//! coefficients.
//!
//! This model was deliberately excluded from the fitted model set and its bin
//! tables are not part of the standard inputs, so it is gated behind the
//! `nonparametric` cargo feature and constructed from in-memory data only.

use ndarray::Array1;
use serde::{Deserialize, Serialize};

use crate::errors::{FlashRateError, FlashRateResult};
use crate::FloatValue;

/// Binned lookup model with linear out-of-bin extrapolation.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct BinnedModel {
    bin_centers: Vec<FloatValue>,
    bin_means: Vec<FloatValue>,
    /// Out-of-bin extrapolation as `oob[0] + oob[1] * x`.
    oob: [FloatValue; 2],
}

impl BinnedModel {
    /// Build a model from bin centers, per-bin mean flash rates, and the
    /// out-of-bin extrapolation pair.
    ///
    /// Centers must be in ascending order; at least two bins are required so
    /// that interpolation is defined.
    pub fn new(
        bin_centers: Vec<FloatValue>,
        bin_means: Vec<FloatValue>,
        oob: [FloatValue; 2],
    ) -> FlashRateResult<Self> {
        if bin_centers.len() != bin_means.len() {
            return Err(FlashRateError::ShapeMismatch {
                expected: bin_centers.len(),
                actual: bin_means.len(),
            });
        }
        if bin_centers.len() < 2 {
            return Err(FlashRateError::ShapeMismatch {
                expected: 2,
                actual: bin_centers.len(),
            });
        }
        Ok(Self {
            bin_centers,
            bin_means,
            oob,
        })
    }

    /// Predicted flash rate for a single covariate value.
    pub fn predict_scalar(&self, x: FloatValue) -> FloatValue {
        let last = self.bin_centers[self.bin_centers.len() - 1];
        if x < last {
            self.interpolate(x)
        } else {
            self.oob[0] + self.oob[1] * x
        }
    }

    /// Predicted flash rate for each covariate value, in input order.
    pub fn predict(&self, cxp: &Array1<FloatValue>) -> Array1<FloatValue> {
        cxp.mapv(|x| self.predict_scalar(x))
    }

    /// Piecewise-linear interpolation over (center, mean) pairs, clamped to
    /// the first bin mean below the covered range.
    fn interpolate(&self, x: FloatValue) -> FloatValue {
        if x <= self.bin_centers[0] {
            return self.bin_means[0];
        }
        for i in 0..self.bin_centers.len() - 1 {
            let (x0, x1) = (self.bin_centers[i], self.bin_centers[i + 1]);
            if x <= x1 {
                let t = (x - x0) / (x1 - x0);
                return self.bin_means[i] + t * (self.bin_means[i + 1] - self.bin_means[i]);
            }
        }
        self.bin_means[self.bin_means.len() - 1]
    }
}
