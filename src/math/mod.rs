//! Numerical utilities: values with propagated uncertainties.

pub mod measurement;

pub use measurement::*;
