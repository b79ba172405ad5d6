//! Terminal plots of the fake background histogram.

pub mod ascii;

pub use ascii::*;
