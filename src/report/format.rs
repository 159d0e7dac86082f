//! Formatted terminal output.
//!
//! Kept apart from the renderers so summary wording changes stay local.

use crate::domain::LoadedData;
use crate::plot::value_range;
use crate::report::{Residual, rmse};

/// Format the run summary: input stats, the line being drawn, and residual fit.
pub fn format_run_summary(data: &LoadedData, residuals: &[Residual]) -> String {
    let mut out = String::new();

    out.push_str("=== fitplot ===\n");
    out.push_str(&format!("Input: {}\n", data.source.display()));
    out.push_str(&format!(
        "Lines: {} read, {} observations, {} skipped\n",
        data.lines_read,
        data.observations.len(),
        data.skipped.len()
    ));
    out.push_str(&format!("Line: {}\n", data.params.equation_label()));

    match (
        value_range(data.observations.iter().map(|o| o.x)),
        value_range(data.observations.iter().map(|o| o.y)),
    ) {
        (Some((x0, x1)), Some((y0, y1))) => {
            out.push_str(&format!("x: [{x0:.4}, {x1:.4}]  y: [{y0:.4}, {y1:.4}]\n"));
        }
        _ => out.push_str("x: -  y: -\n"),
    }

    match rmse(residuals) {
        Some(v) => out.push_str(&format!("RMSE: {v:.6}\n")),
        None => out.push_str("RMSE: -\n"),
    }

    out
}
