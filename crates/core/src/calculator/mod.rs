//! Calculator module - the instrument collection and its operations.

mod calculator_service;
mod calculator_traits;

pub use calculator_service::ConversionCalculator;
pub use calculator_traits::ConversionCalculatorTrait;
