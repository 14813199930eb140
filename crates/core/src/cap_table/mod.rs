//! Capitalization table module - aggregation of every holder onto one denominator.

mod cap_table_builder;
mod cap_table_model;

pub use cap_table_builder::{build_cap_table, build_cap_table_with};
pub use cap_table_model::*;

#[cfg(test)]
mod cap_table_builder_tests;
