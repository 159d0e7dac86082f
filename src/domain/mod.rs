//! Domain types used throughout the pipeline.
//!
//! This module defines:
//!
//! - loaded input (`Observation`, `FitParameters`, `LoadedData`)
//! - derived output (`FittedSeries`)
//! - run configuration (`PlotConfig`, `RenderTarget`, `LineMode`)

pub mod types;

pub use types::*;
