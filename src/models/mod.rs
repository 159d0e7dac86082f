//! Model evaluation.

pub mod linear;

pub use linear::*;
