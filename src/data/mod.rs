//! Data sources. Currently only the synthetic generator.

pub mod sample;

pub use sample::{epoch, generate_sales};
