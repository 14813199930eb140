//! Round context and ownership outcome models.

use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

use crate::constants::{DEFAULT_NEW_MONEY_INVESTED, DEFAULT_POST_MONEY_VALUATION};
use crate::errors::{Error, ValidationError};

/// The priced financing event every instrument converts against.
///
/// Passed explicitly into each calculation. Callers may share one context
/// across a whole table or build one per instrument.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RoundContext {
    /// Post-money valuation of the priced round
    pub post_money_valuation: Decimal,
    /// New money raised in the priced round
    pub new_money_invested: Decimal,
    /// Pre-financing share count (founders + pool + prior holders).
    /// Only needed when results are expressed in shares.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub total_shares_outstanding: Option<Decimal>,
}

impl RoundContext {
    pub fn new(post_money_valuation: Decimal, new_money_invested: Decimal) -> Self {
        Self {
            post_money_valuation,
            new_money_invested,
            total_shares_outstanding: None,
        }
    }

    pub fn with_total_shares(mut self, total_shares_outstanding: Decimal) -> Self {
        self.total_shares_outstanding = Some(total_shares_outstanding);
        self
    }
}

impl Default for RoundContext {
    fn default() -> Self {
        Self::new(DEFAULT_POST_MONEY_VALUATION, DEFAULT_NEW_MONEY_INVESTED)
    }
}

/// Result of converting one instrument.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct OwnershipOutcome {
    /// Post-money ownership as a fraction (0.10 == 10%)
    pub fraction: Decimal,
    /// Share count, present when the context carries a share ledger
    pub shares: Option<Decimal>,
    /// Ownership in percent at full precision
    pub percentage: Decimal,
    /// `percentage` rounded for display
    pub display_percentage: Decimal,
}

/// How an MFN instrument is converted.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum MfnTreatment {
    /// Convert at the round's own post-money valuation.
    #[default]
    FaceValue,
    /// Convert at the most favorable conversion valuation held by any other
    /// valid instrument in the same table, or at face value if none is better.
    BestTerms,
}

impl FromStr for MfnTreatment {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().replace('_', "-").as_str() {
            "face-value" | "face" => Ok(MfnTreatment::FaceValue),
            "best-terms" | "best" => Ok(MfnTreatment::BestTerms),
            _ => Err(Error::Validation(ValidationError::InvalidInput(format!(
                "unknown MFN treatment '{}'",
                s
            )))),
        }
    }
}

impl fmt::Display for MfnTreatment {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            MfnTreatment::FaceValue => f.write_str("face-value"),
            MfnTreatment::BestTerms => f.write_str("best-terms"),
        }
    }
}
