//! Flash-rate regression models.
//!
//! Three closed forms relate the CxP covariate to predicted flash rate, each
//! with independently fitted coefficients:
//!
//! - power law: $FR = a \cdot CxP^b$
//! - scale: $FR = a \cdot CxP$
//! - linear: $FR = \max(a \cdot CxP + b, 0)$
//!
//! Two of the five run variants reuse a form with an alternative fit (the
//! `pl_op` power law and the `li2` linear fit), so each form is a reusable
//! model type constructed from its own coefficient table.

use ndarray::Array1;
use serde::{Deserialize, Serialize};

use crate::coefficients::CoefficientTable;
use crate::errors::FlashRateResult;
use crate::FloatValue;

/// Parameters for the power-law model $FR = a \cdot CxP^b$.
#[derive(Debug, Clone, Copy, Serialize, Deserialize)]
pub struct PowerLawParameters {
    /// Multiplicative prefactor.
    pub a: FloatValue,
    /// Exponent applied to the covariate.
    pub b: FloatValue,
}

impl PowerLawParameters {
    /// Read `a` and `b` from a fitted coefficient table.
    pub fn from_coefficients(table: &CoefficientTable) -> FlashRateResult<Self> {
        Ok(Self {
            a: table.get("a")?,
            b: table.get("b")?,
        })
    }
}

/// Power-law flash-rate model.
///
/// # Domain
///
/// A negative covariate raised to a fractional exponent has no real result
/// and evaluates to NaN. CAPE and precipitation are physically non-negative,
/// so `CxP >= 0` is assumed rather than enforced; NaN predictions on negative
/// inputs are a known limitation, not an error.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PowerLawModel {
    parameters: PowerLawParameters,
}

impl PowerLawModel {
    pub fn from_parameters(parameters: PowerLawParameters) -> Self {
        Self { parameters }
    }

    pub fn from_coefficients(table: &CoefficientTable) -> FlashRateResult<Self> {
        Ok(Self::from_parameters(PowerLawParameters::from_coefficients(
            table,
        )?))
    }

    pub fn parameters(&self) -> &PowerLawParameters {
        &self.parameters
    }

    /// Predicted flash rate for each covariate value, in input order.
    pub fn predict(&self, cxp: &Array1<FloatValue>) -> Array1<FloatValue> {
        let p = self.parameters;
        cxp.mapv(|x| p.a * x.powf(p.b))
    }
}

/// Parameters for the scale model $FR = a \cdot CxP$.
#[derive(Debug, Clone, Copy, Serialize, Deserialize)]
pub struct ScaleParameters {
    /// Proportionality constant.
    pub a: FloatValue,
}

impl ScaleParameters {
    /// Read `a` from a fitted coefficient table.
    pub fn from_coefficients(table: &CoefficientTable) -> FlashRateResult<Self> {
        Ok(Self { a: table.get("a")? })
    }
}

/// Scale flash-rate model: flash rate directly proportional to CxP.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ScaleModel {
    parameters: ScaleParameters,
}

impl ScaleModel {
    pub fn from_parameters(parameters: ScaleParameters) -> Self {
        Self { parameters }
    }

    pub fn from_coefficients(table: &CoefficientTable) -> FlashRateResult<Self> {
        Ok(Self::from_parameters(ScaleParameters::from_coefficients(
            table,
        )?))
    }

    pub fn parameters(&self) -> &ScaleParameters {
        &self.parameters
    }

    /// Predicted flash rate for each covariate value, in input order.
    pub fn predict(&self, cxp: &Array1<FloatValue>) -> Array1<FloatValue> {
        let p = self.parameters;
        cxp.mapv(|x| p.a * x)
    }
}

/// Parameters for the linear model $FR = \max(a \cdot CxP + b, 0)$.
#[derive(Debug, Clone, Copy, Serialize, Deserialize)]
pub struct LinearParameters {
    /// Slope with respect to the covariate.
    pub a: FloatValue,
    /// Intercept; typically negative in the fitted tables, which is why the
    /// prediction is clipped at zero.
    pub b: FloatValue,
}

impl LinearParameters {
    /// Read `a` and `b` from a fitted coefficient table.
    pub fn from_coefficients(table: &CoefficientTable) -> FlashRateResult<Self> {
        Ok(Self {
            a: table.get("a")?,
            b: table.get("b")?,
        })
    }
}

/// Linear flash-rate model, clipped to a minimum of zero with no upper bound.
///
/// A flash rate is a non-negative quantity; the raw fit can dip below zero at
/// low CxP, so predictions are truncated at zero.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct LinearModel {
    parameters: LinearParameters,
}

impl LinearModel {
    pub fn from_parameters(parameters: LinearParameters) -> Self {
        Self { parameters }
    }

    pub fn from_coefficients(table: &CoefficientTable) -> FlashRateResult<Self> {
        Ok(Self::from_parameters(LinearParameters::from_coefficients(
            table,
        )?))
    }

    pub fn parameters(&self) -> &LinearParameters {
        &self.parameters
    }

    /// Predicted flash rate for each covariate value, in input order.
    pub fn predict(&self, cxp: &Array1<FloatValue>) -> Array1<FloatValue> {
        let p = self.parameters;
        cxp.mapv(|x| (p.a * x + p.b).max(0.0))
    }
}
