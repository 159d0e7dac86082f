//! Reporting utilities: residuals and formatted run summaries.

use crate::domain::{FittedSeries, Observation};
use crate::error::AppError;

pub mod format;

pub use format::*;

/// One observation paired with its fitted value.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Residual {
    pub point: Observation,
    pub y_fit: f64,
    pub residual: f64,
}

/// Pair each observation with its fitted value and compute `y - y_fit`.
///
/// Non-finite inputs are carried through; they only poison the RMSE.
pub fn compute_residuals(observations: &[Observation], fitted: &FittedSeries) -> Result<Vec<Residual>, AppError> {
    crate::plot::ensure_aligned(observations, fitted)?;

    Ok(observations
        .iter()
        .zip(fitted.iter())
        .map(|(p, &y_fit)| Residual {
            point: *p,
            y_fit,
            residual: p.y - y_fit,
        })
        .collect())
}

/// Root-mean-square of the residuals, `None` when there are none.
pub fn rmse(residuals: &[Residual]) -> Option<f64> {
    if residuals.is_empty() {
        return None;
    }
    let sse: f64 = residuals.iter().map(|r| r.residual * r.residual).sum();
    Some((sse / residuals.len() as f64).sqrt())
}
