//! End-to-end prediction pipeline.
//!
//! Load the climate summary, derive the CxP covariate, evaluate every fitted
//! model variant, and persist one prediction column per variant. The run is
//! fully synchronous and single pass; any load or parse failure terminates it
//! before the output file is created.

use log::{debug, info};
use ndarray::Array1;

use crate::coefficients::CoefficientTable;
use crate::config::{CoefficientPaths, RunConfig};
use crate::errors::FlashRateResult;
use crate::models::{LinearModel, PowerLawModel, ScaleModel};
use crate::predictions::PredictionTable;
use crate::summary::{ClimateSummary, RowIndex};
use crate::FloatValue;

/// The five fitted model variants evaluated by a run.
#[derive(Debug, Clone)]
pub struct ModelSet {
    pub pl: PowerLawModel,
    pub pl_op: PowerLawModel,
    pub sc: ScaleModel,
    pub li: LinearModel,
    pub li2: LinearModel,
}

impl ModelSet {
    /// Load every variant's coefficient table and build the models.
    pub fn from_paths(paths: &CoefficientPaths) -> FlashRateResult<Self> {
        let pl = PowerLawModel::from_coefficients(&CoefficientTable::from_csv(&paths.pl)?)?;
        let pl_op = PowerLawModel::from_coefficients(&CoefficientTable::from_csv(&paths.pl_op)?)?;
        let sc = ScaleModel::from_coefficients(&CoefficientTable::from_csv(&paths.sc)?)?;
        let li = LinearModel::from_coefficients(&CoefficientTable::from_csv(&paths.li)?)?;
        let li2 = LinearModel::from_coefficients(&CoefficientTable::from_csv(&paths.li2)?)?;

        Ok(Self {
            pl,
            pl_op,
            sc,
            li,
            li2,
        })
    }
}

/// Evaluate every model variant over an in-memory covariate.
///
/// Pure computation; performs no I/O.
pub fn predict_all(
    index: RowIndex,
    cxp: &Array1<FloatValue>,
    models: &ModelSet,
) -> FlashRateResult<PredictionTable> {
    PredictionTable::new(
        index,
        models.pl.predict(cxp),
        models.pl_op.predict(cxp),
        models.sc.predict(cxp),
        models.li.predict(cxp),
        models.li2.predict(cxp),
    )
}

/// Run the full pipeline: load, predict, persist.
///
/// The output file is only written once every input has loaded and every
/// variant has been evaluated, so a failed load leaves no output behind.
pub fn run(config: &RunConfig) -> FlashRateResult<PredictionTable> {
    info!("loading climate summary from {}", config.summary.display());
    let summary = ClimateSummary::from_csv(&config.summary)?;
    info!("loaded {} summary rows", summary.len());

    let cxp = summary.cape_x_precip();

    let models = ModelSet::from_paths(&config.coefficients)?;
    debug!("power law: {:?}", models.pl.parameters());
    debug!("power law (op): {:?}", models.pl_op.parameters());
    debug!("scale: {:?}", models.sc.parameters());
    debug!("linear: {:?}", models.li.parameters());
    debug!("linear 2: {:?}", models.li2.parameters());

    let predictions = predict_all(summary.index().clone(), &cxp, &models)?;

    predictions.write_csv(&config.predictions)?;
    info!(
        "wrote {} prediction rows to {}",
        predictions.len(),
        config.predictions.display()
    );

    Ok(predictions)
}
