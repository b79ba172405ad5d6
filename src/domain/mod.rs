//! Domain types used throughout the pipeline.
//!
//! This module defines:
//!
//! - per-bin estimator inputs (`RegionYield`, `BinInputs`)
//! - estimator outputs (`CombinedEstimate`, `FakeBin`, `FakeHistogram`)
//! - the saved shape file and run configuration

pub mod types;

pub use types::*;
