//! SAFE Conversion Calculator core - instruments, conversion math and
//! capitalization tables.
//!
//! The crate does no I/O. A surrounding layer supplies validated numbers
//! (see [`utils`] for the text boundary) and renders the results.

pub mod calculator;
pub mod cap_table;
pub mod constants;
pub mod conversion;
pub mod errors;
pub mod instruments;
pub mod utils;

pub use calculator::{ConversionCalculator, ConversionCalculatorTrait};
pub use cap_table::{build_cap_table, build_cap_table_with, CapTable, CapTableOptions, CapTableRow};
pub use conversion::{compute_ownership, MfnTreatment, OwnershipOutcome, RoundContext};
pub use instruments::{Instrument, InstrumentKind, InstrumentTerms, InstrumentUpdate, NewInstrument};

// Re-export error types
pub use errors::Error;
pub use errors::Result;
