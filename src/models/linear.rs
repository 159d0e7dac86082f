//! Linear model evaluation.

use crate::domain::{FitParameters, FittedSeries, Observation};

/// Evaluate `slope * x + intercept` at each observation, preserving order.
pub fn evaluate(observations: &[Observation], params: &FitParameters) -> FittedSeries {
    FittedSeries::new(observations.iter().map(|o| params.predict(o.x)).collect())
}
