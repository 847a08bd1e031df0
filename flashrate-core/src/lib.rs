//! Empirical lightning flash-rate prediction from monthly climate covariates.
//!
//! Implements the Chen et al. (2021) family of fitted regression models
//! relating the product of monthly-mean convective available potential energy
//! (CAPE) and mean total precipitation rate to the observed lightning flash
//! rate. The covariate, written CxP throughout, drives five model variants:
//! two power-law fits, a pure scale fit, and two linear fits clipped at zero.
//!
//! The typical entry point is [`pipeline::run`], which loads a climate summary
//! table and the fitted coefficient tables, evaluates every variant, and
//! persists one prediction column per variant aligned with the input rows.

pub mod coefficients;
pub mod config;
pub mod errors;
pub mod models;
pub mod pipeline;
pub mod predictions;
pub mod summary;

#[cfg(feature = "nonparametric")]
pub mod binned;

/// Float type used for covariates, coefficients, and predictions.
pub type FloatValue = f64;
