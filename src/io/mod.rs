//! Input/output helpers.
//!
//! - input file ingest (`ingest`)
//! - fitted-values CSV export (`export`)

pub mod export;
pub mod ingest;

pub use export::*;
pub use ingest::*;
