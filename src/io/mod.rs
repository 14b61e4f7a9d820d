//! Input/output helpers.
//!
//! - CSV persistence of the generated dataset (`export`)
//! - CSV read-back and validation (`ingest`)

pub mod export;
pub mod ingest;

pub use export::*;
pub use ingest::*;
