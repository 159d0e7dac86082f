//! `fitplot` library crate.
//!
//! The binary (`fitplot`) is a thin wrapper around this library so that:
//!
//! - the load -> evaluate -> render pipeline is testable without spawning processes
//! - renderers (terminal, image file, ASCII) share one set of domain types

pub mod app;
pub mod cli;
pub mod domain;
pub mod error;
pub mod io;
pub mod models;
pub mod plot;
pub mod report;
pub mod tui;
