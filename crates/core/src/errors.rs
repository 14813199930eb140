//! Core error types for the SAFE conversion calculator.
//!
//! Nothing in this crate fails fatally. A conversion whose terms cannot be
//! evaluated returns [`ConversionError`], which callers render as a blank or
//! `0.00%` cell. Unknown identifiers on edits are silent no-ops and never
//! reach this type.

use thiserror::Error;

/// Type alias for Result using our Error type.
pub type Result<T> = std::result::Result<T, Error>;

/// Root error type for the calculator.
#[derive(Error, Debug, Clone, PartialEq)]
pub enum Error {
    #[error("Conversion failed: {0}")]
    Conversion(#[from] ConversionError),

    #[error("Input validation failed: {0}")]
    Validation(#[from] ValidationError),
}

impl Error {
    /// True when the error means "these terms have no defined result".
    pub fn is_invalid_terms(&self) -> bool {
        matches!(
            self,
            Error::Conversion(ConversionError::InvalidTerms { .. })
                | Error::Conversion(ConversionError::InvalidRound(_))
        )
    }
}

/// Errors raised by the conversion formulas.
#[derive(Error, Debug, Clone, PartialEq)]
pub enum ConversionError {
    /// An instrument's own terms put a formula outside its domain.
    #[error("Invalid terms for instrument {instrument}: {reason}")]
    InvalidTerms { instrument: String, reason: String },

    /// The priced round or share ledger cannot be used as a conversion basis.
    /// Same "no defined result" category as `InvalidTerms`, raised for
    /// round-level inputs such as a non-positive post-money valuation.
    #[error("Invalid round context: {0}")]
    InvalidRound(String),
}

impl ConversionError {
    pub(crate) fn terms(instrument: &str, reason: impl Into<String>) -> Self {
        ConversionError::InvalidTerms {
            instrument: instrument.to_string(),
            reason: reason.into(),
        }
    }
}

/// Validation errors for raw user input.
#[derive(Error, Debug, Clone, PartialEq)]
pub enum ValidationError {
    #[error("Invalid input: {0}")]
    InvalidInput(String),

    #[error("Failed to parse decimal number: {0}")]
    DecimalParse(#[from] rust_decimal::Error),
}

impl From<rust_decimal::Error> for Error {
    fn from(err: rust_decimal::Error) -> Self {
        Error::Validation(ValidationError::DecimalParse(err))
    }
}

impl From<Error> for String {
    fn from(err: Error) -> Self {
        err.to_string()
    }
}
