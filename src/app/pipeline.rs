//! Shared load -> evaluate pipeline used by every renderer.
//!
//! Each stage's output is returned by value and handed to the next; nothing
//! is kept between runs.

use crate::domain::{FittedSeries, LoadedData, PlotConfig};
use crate::error::AppError;
use crate::io::ingest::load_dataset;
use crate::models::evaluate;
use crate::report::{Residual, compute_residuals};

/// All computed outputs of a single run.
#[derive(Debug, Clone)]
pub struct RunOutput {
    pub data: LoadedData,
    pub fitted: FittedSeries,
    pub residuals: Vec<Residual>,
}

/// Load the input named by `config` and evaluate the fit at every observation.
pub fn run_pipeline(config: &PlotConfig) -> Result<RunOutput, AppError> {
    // 1) Load observations + parameters (file handle is closed on return).
    let data = load_dataset(&config.input, config.line_mode)?;

    // 2) Evaluate the line at each x.
    let fitted = evaluate(&data.observations, &data.params);

    // 3) Residuals for summaries and exports.
    let residuals = compute_residuals(&data.observations, &fitted)?;

    tracing::info!(
        observations = data.observations.len(),
        fitted = fitted.len(),
        "pipeline complete"
    );

    Ok(RunOutput {
        data,
        fitted,
        residuals,
    })
}
