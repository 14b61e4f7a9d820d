//! Numeric utilities: group aggregates, correlation, and box-plot statistics.

pub mod aggregate;
pub mod correlation;
pub mod quartiles;

pub use aggregate::*;
pub use correlation::*;
pub use quartiles::*;
