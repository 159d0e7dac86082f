//! Shared domain types.
//!
//! These types are intentionally small and `Copy` where possible so each
//! pipeline stage can hand its output to the next by value.

use std::path::PathBuf;

/// One `(x, y)` data row from the input file.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Observation {
    pub x: f64,
    pub y: f64,
}

impl Observation {
    pub fn new(x: f64, y: f64) -> Self {
        Self { x, y }
    }
}

/// Precomputed line `y = slope * x + intercept`, read from the file's final line.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct FitParameters {
    pub slope: f64,
    pub intercept: f64,
}

impl FitParameters {
    pub fn new(slope: f64, intercept: f64) -> Self {
        Self { slope, intercept }
    }

    pub fn predict(&self, x: f64) -> f64 {
        self.slope * x + self.intercept
    }

    /// Legend text for the fitted line, e.g. `y = 2x + 0.5`.
    ///
    /// Uses the literal parameter values (shortest round-trip formatting).
    pub fn equation_label(&self) -> String {
        format!("y = {}x + {}", self.slope, self.intercept)
    }
}

/// Fitted y-values, index-aligned with the observations they were evaluated at.
#[derive(Debug, Clone, PartialEq, Default)]
pub struct FittedSeries(Vec<f64>);

impl FittedSeries {
    pub fn new(values: Vec<f64>) -> Self {
        Self(values)
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    pub fn iter(&self) -> std::slice::Iter<'_, f64> {
        self.0.iter()
    }
}

/// A data line that did not split into exactly two comma-separated tokens.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SkippedLine {
    /// 1-based line number in the input file.
    pub line: usize,
    pub content: String,
}

/// Loader output: observations in file order, the fit parameters, and what was skipped.
#[derive(Debug, Clone)]
pub struct LoadedData {
    pub source: PathBuf,
    pub observations: Vec<Observation>,
    pub params: FitParameters,
    pub skipped: Vec<SkippedLine>,
    /// Total number of lines in the input, including the parameter line.
    pub lines_read: usize,
}

/// What to do with a data line that is not exactly `x,y`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum LineMode {
    /// Skip it silently (the line is recorded in `LoadedData::skipped`).
    #[default]
    Skip,
    /// Fail the load.
    Strict,
}

/// Which renderer a run ends in.
#[derive(Debug, Clone, PartialEq)]
pub enum RenderTarget {
    /// Interactive terminal viewer; blocks until dismissed.
    Viewer,
    /// SVG file written with Plotters.
    Image { path: PathBuf, width: u32, height: u32 },
    /// Fixed-size character plot printed to stdout.
    Ascii { width: usize, height: usize },
    /// CSV of observations with fitted values and residuals.
    Export { path: PathBuf },
}

/// Fully resolved configuration for one run.
#[derive(Debug, Clone)]
pub struct PlotConfig {
    pub input: PathBuf,
    pub line_mode: LineMode,
    pub summary: bool,
    pub target: RenderTarget,
}
