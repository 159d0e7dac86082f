//! Plot rendering shared by every output target.
//!
//! - `ascii`: fixed-size character grid for terminals and golden tests
//! - `chart`: Plotters figure, written to SVG or drawn in the viewer
//!
//! The interactive viewer lives in `crate::tui` but uses the labels and bounds
//! defined here so all targets draw the same figure.

use crate::domain::{FittedSeries, Observation};
use crate::error::AppError;

pub mod ascii;
pub mod chart;

pub use ascii::render_ascii_plot;
pub use chart::render_chart_file;

pub const TITLE: &str = "Plot of Data with Linear Equation";
pub const X_LABEL: &str = "X Values";
pub const Y_LABEL: &str = "Y Values";
pub const DATA_LABEL: &str = "Data";

/// Reject observation/fitted pairs that are not index-aligned.
pub fn ensure_aligned(observations: &[Observation], fitted: &FittedSeries) -> Result<(), AppError> {
    if observations.len() != fitted.len() {
        return Err(AppError::render(format!(
            "Fitted series has {} values for {} observations.",
            fitted.len(),
            observations.len()
        )));
    }
    Ok(())
}

/// The fitted series as `(x, y_fit)` vertices ordered by x, ready to be joined.
pub fn fitted_line(observations: &[Observation], fitted: &FittedSeries) -> Vec<(f64, f64)> {
    let mut line: Vec<(f64, f64)> = observations
        .iter()
        .zip(fitted.iter())
        .map(|(o, &y)| (o.x, y))
        .collect();
    line.sort_by(|a, b| a.0.total_cmp(&b.0));
    line
}

/// Axis bounds covering the observations and their fitted values, padded by 5%.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Bounds {
    pub x: [f64; 2],
    pub y: [f64; 2],
}

impl Bounds {
    pub fn from_series(observations: &[Observation], fitted: &FittedSeries) -> Self {
        let x = value_range(observations.iter().map(|o| o.x));
        let y = value_range(observations.iter().map(|o| o.y).chain(fitted.iter().copied()));
        Self {
            x: pad_range(x, 0.05),
            y: pad_range(y, 0.05),
        }
    }

    /// Plotters needs finite, non-empty axes whose spans are themselves finite.
    pub fn is_drawable(&self) -> bool {
        let [x0, x1] = self.x;
        let [y0, y1] = self.y;
        x1 > x0 && y1 > y0 && (x1 - x0).is_finite() && (y1 - y0).is_finite()
    }
}

/// `(min, max)` over the finite values, or `None` if there are none.
pub fn value_range(values: impl Iterator<Item = f64>) -> Option<(f64, f64)> {
    let mut min = f64::INFINITY;
    let mut max = f64::NEG_INFINITY;
    for v in values.filter(|v| v.is_finite()) {
        min = min.min(v);
        max = max.max(v);
    }
    if min.is_finite() && max.is_finite() { Some((min, max)) } else { None }
}

/// Pad a range by `frac` of its span; degenerate ranges widen to at least a unit span.
///
/// The result is always finite. When the span or the padded ends overflow,
/// the unpadded `[min, max]` is returned.
fn pad_range(range: Option<(f64, f64)>, frac: f64) -> [f64; 2] {
    let Some((min, max)) = range else {
        return [0.0, 1.0];
    };
    let span = max - min;
    if !span.is_finite() {
        return [min, max];
    }
    let padded = if span < 1e-12 {
        // A unit span vanishes into rounding for large magnitudes.
        let half = 0.5_f64.max(max.abs() * 1e-9);
        [min - half, max + half]
    } else {
        let pad = span * frac;
        [min - pad, max + pad]
    };
    if padded.iter().all(|v| v.is_finite()) { padded } else { [min, max] }
}
