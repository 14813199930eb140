//! Instruments module - SAFE records, creation defaults and partial updates.

mod instruments_model;

pub use instruments_model::{
    Instrument, InstrumentKind, InstrumentTerms, InstrumentUpdate, NewInstrument,
};
