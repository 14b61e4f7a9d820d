//! `sales-report` library crate.
//!
//! The binary (`salesrep`) is a thin wrapper around this library so that:
//!
//! - generation, aggregation and rendering are testable without spawning processes
//! - the pipeline stages stay usable on their own (generate only, summarise a CSV)

pub mod app;
pub mod cli;
pub mod data;
pub mod domain;
pub mod error;
pub mod io;
pub mod math;
pub mod plot;
pub mod report;
