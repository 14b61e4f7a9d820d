//! Domain types used throughout the pipeline.
//!
//! This module defines:
//!
//! - the categorical sets (`Category`, `City`)
//! - the sales record and the dataset that holds them
//! - the resolved run configuration (`RunConfig`)

pub mod types;

pub use types::*;
