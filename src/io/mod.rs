//! Input/output helpers.
//!
//! - bin table ingest + validation (`ingest`)
//! - per-bin CSV exports (`export`)
//! - shape JSON read/write (`shape`)

pub mod export;
pub mod ingest;
pub mod shape;

pub use export::*;
pub use ingest::*;
pub use shape::*;
