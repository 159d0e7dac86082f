//! Export observations with fitted values to CSV.
//!
//! The export is meant to be easy to consume in spreadsheets or downstream scripts.

use std::path::Path;

use serde::Serialize;

use crate::error::AppError;
use crate::report::Residual;

#[derive(Debug, Serialize)]
struct FittedRow {
    x: f64,
    y: f64,
    y_fit: f64,
    residual: f64,
}

/// Write `x,y,y_fit,residual` rows to a CSV file.
pub fn write_fitted_csv(path: &Path, residuals: &[Residual]) -> Result<(), AppError> {
    let mut writer = csv::Writer::from_path(path)
        .map_err(|e| AppError::render(format!("Failed to create export CSV '{}': {e}", path.display())))?;

    // `serialize` only emits the header alongside the first row.
    if residuals.is_empty() {
        writer
            .write_record(["x", "y", "y_fit", "residual"])
            .map_err(|e| AppError::render(format!("Failed to write export CSV header: {e}")))?;
    }

    for r in residuals {
        writer
            .serialize(FittedRow {
                x: r.point.x,
                y: r.point.y,
                y_fit: r.y_fit,
                residual: r.residual,
            })
            .map_err(|e| AppError::render(format!("Failed to write export CSV row: {e}")))?;
    }

    writer
        .flush()
        .map_err(|e| AppError::render(format!("Failed to flush export CSV: {e}")))?;

    tracing::info!(output = %path.display(), rows = residuals.len(), "wrote export csv");
    Ok(())
}
