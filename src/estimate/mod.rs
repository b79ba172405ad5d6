//! Fake background estimation.
//!
//! - single-bin estimator (`fake_yield`)
//! - per-histogram driver over all bins (`histogram`)

pub mod fake_yield;
pub mod histogram;

pub use fake_yield::*;
pub use histogram::*;
