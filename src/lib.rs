//! `vh-fakes` library crate.
//!
//! The binary (`fakes`) is a thin wrapper around this library so that:
//!
//! - the estimator is testable without spawning processes
//! - it can be called directly from other analysis tooling, one bin at a time

pub mod app;
pub mod cli;
pub mod domain;
pub mod error;
pub mod estimate;
pub mod io;
pub mod math;
pub mod plot;
pub mod report;
