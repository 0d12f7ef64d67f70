//! Report output.
//!
//! Text and JSON renderers for dispatch results, plus the histogram
//! plotter used after `show growth data`.

pub mod generator;
pub mod histogram;

pub use generator::*;
pub use histogram::{GrowthPlotter, TextHistogram};
