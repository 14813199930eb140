//! Conversion engine - per-kind SAFE conversion formulas.

mod conversion_engine;
mod conversion_model;
mod mfn;

pub use conversion_engine::*;
pub use conversion_model::*;
pub use mfn::*;

#[cfg(test)]
mod conversion_engine_tests;
