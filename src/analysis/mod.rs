//! Analysis modules.
//!
//! Statewide aggregation and the growth-rate deviation report, both
//! computed over the real city records of a [`Registry`](crate::registry::Registry).

pub mod aggregator;
pub mod deviation;

pub use aggregator::*;
pub use deviation::*;
