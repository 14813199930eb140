//! Convertible instrument domain models.

use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;
use uuid::Uuid;

use crate::constants::{
    DEFAULT_DISCOUNT_RATE, DEFAULT_INVESTMENT_AMOUNT, DEFAULT_INVESTOR_PREFIX,
    DEFAULT_VALUATION_CAP,
};
use crate::errors::{Error, ValidationError};

/// The conversion model of a SAFE. Fixed when the instrument is created.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum InstrumentKind {
    ValuationCap,
    Discount,
    Mfn,
}

impl InstrumentKind {
    pub const ALL: [InstrumentKind; 3] = [
        InstrumentKind::ValuationCap,
        InstrumentKind::Discount,
        InstrumentKind::Mfn,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            InstrumentKind::ValuationCap => "VALUATION_CAP",
            InstrumentKind::Discount => "DISCOUNT",
            InstrumentKind::Mfn => "MFN",
        }
    }

    /// Human readable label used in the capitalization table.
    pub fn label(&self) -> &'static str {
        match self {
            InstrumentKind::ValuationCap => "Valuation Cap SAFE",
            InstrumentKind::Discount => "Discount SAFE",
            InstrumentKind::Mfn => "MFN SAFE",
        }
    }
}

impl fmt::Display for InstrumentKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

impl FromStr for InstrumentKind {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let normalized = s.trim().to_ascii_lowercase().replace(['-', ' '], "_");
        match normalized.as_str() {
            "valuation_cap" | "cap" | "valuation_cap_safe" => Ok(InstrumentKind::ValuationCap),
            "discount" | "discount_safe" => Ok(InstrumentKind::Discount),
            "mfn" | "mfn_safe" | "most_favored_nation" => Ok(InstrumentKind::Mfn),
            _ => Err(Error::Validation(ValidationError::InvalidInput(format!(
                "unknown instrument kind '{}'",
                s
            )))),
        }
    }
}

/// Kind-specific conversion terms. Only the fields meaningful for a kind exist.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "SCREAMING_SNAKE_CASE")]
pub enum InstrumentTerms {
    #[serde(rename_all = "camelCase")]
    ValuationCap { valuation_cap: Decimal },
    /// `discount_rate` is a fraction in [0, 1).
    #[serde(rename_all = "camelCase")]
    Discount { discount_rate: Decimal },
    Mfn,
}

impl InstrumentTerms {
    /// Terms populated with the defaults for `kind`.
    pub fn default_for(kind: InstrumentKind) -> Self {
        match kind {
            InstrumentKind::ValuationCap => InstrumentTerms::ValuationCap {
                valuation_cap: DEFAULT_VALUATION_CAP,
            },
            InstrumentKind::Discount => InstrumentTerms::Discount {
                discount_rate: DEFAULT_DISCOUNT_RATE,
            },
            InstrumentKind::Mfn => InstrumentTerms::Mfn,
        }
    }

    pub fn kind(&self) -> InstrumentKind {
        match self {
            InstrumentTerms::ValuationCap { .. } => InstrumentKind::ValuationCap,
            InstrumentTerms::Discount { .. } => InstrumentKind::Discount,
            InstrumentTerms::Mfn => InstrumentKind::Mfn,
        }
    }
}

/// Domain model representing one convertible investment
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Instrument {
    pub id: String,
    pub investor_name: String,
    pub investment_amount: Decimal,
    #[serde(flatten)]
    pub terms: InstrumentTerms,
}

impl Instrument {
    pub fn kind(&self) -> InstrumentKind {
        self.terms.kind()
    }

    pub fn valuation_cap(&self) -> Option<Decimal> {
        match self.terms {
            InstrumentTerms::ValuationCap { valuation_cap } => Some(valuation_cap),
            _ => None,
        }
    }

    pub fn discount_rate(&self) -> Option<Decimal> {
        match self.terms {
            InstrumentTerms::Discount { discount_rate } => Some(discount_rate),
            _ => None,
        }
    }
}

/// Builder for a new instrument; starts from the kind's defaults.
#[derive(Debug, Clone, PartialEq)]
pub struct NewInstrument {
    id: Option<String>,
    investor_name: Option<String>,
    investment_amount: Decimal,
    terms: InstrumentTerms,
}

impl NewInstrument {
    pub fn new(kind: InstrumentKind) -> Self {
        Self {
            id: None,
            investor_name: None,
            investment_amount: DEFAULT_INVESTMENT_AMOUNT,
            terms: InstrumentTerms::default_for(kind),
        }
    }

    pub fn kind(&self) -> InstrumentKind {
        self.terms.kind()
    }

    pub fn id(mut self, id: impl Into<String>) -> Self {
        self.id = Some(id.into());
        self
    }

    pub fn investor_name(mut self, name: impl Into<String>) -> Self {
        self.investor_name = Some(name.into());
        self
    }

    pub fn investment_amount(mut self, amount: Decimal) -> Self {
        self.investment_amount = amount;
        self
    }

    /// Ignored unless the instrument is a Valuation Cap SAFE.
    pub fn valuation_cap(mut self, cap: Decimal) -> Self {
        if let InstrumentTerms::ValuationCap { valuation_cap } = &mut self.terms {
            *valuation_cap = cap;
        }
        self
    }

    /// Ignored unless the instrument is a Discount SAFE. Expects a fraction.
    pub fn discount_rate(mut self, rate: Decimal) -> Self {
        if let InstrumentTerms::Discount { discount_rate } = &mut self.terms {
            *discount_rate = rate;
        }
        self
    }

    /// Finalizes the record. `position` is the 1-based slot the instrument
    /// will occupy and only feeds the generated investor label.
    pub fn build(self, position: usize) -> Instrument {
        Instrument {
            id: self.id.unwrap_or_else(|| Uuid::new_v4().to_string()),
            investor_name: self
                .investor_name
                .unwrap_or_else(|| format!("{} {}", DEFAULT_INVESTOR_PREFIX, position)),
            investment_amount: self.investment_amount,
            terms: self.terms,
        }
    }
}

/// Partial update of an instrument. `None` leaves a field untouched.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct InstrumentUpdate {
    pub investor_name: Option<String>,
    pub investment_amount: Option<Decimal>,
    pub valuation_cap: Option<Decimal>,
    pub discount_rate: Option<Decimal>,
}

impl InstrumentUpdate {
    pub fn investor_name(name: impl Into<String>) -> Self {
        Self {
            investor_name: Some(name.into()),
            ..Self::default()
        }
    }

    pub fn investment_amount(amount: Decimal) -> Self {
        Self {
            investment_amount: Some(amount),
            ..Self::default()
        }
    }

    pub fn valuation_cap(cap: Decimal) -> Self {
        Self {
            valuation_cap: Some(cap),
            ..Self::default()
        }
    }

    pub fn discount_rate(rate: Decimal) -> Self {
        Self {
            discount_rate: Some(rate),
            ..Self::default()
        }
    }

    /// Returns the updated record. The id and kind never change; fields that
    /// do not belong to the instrument's kind are ignored.
    pub fn apply(&self, instrument: &Instrument) -> Instrument {
        let mut updated = instrument.clone();
        if let Some(name) = &self.investor_name {
            updated.investor_name = name.clone();
        }
        if let Some(amount) = self.investment_amount {
            updated.investment_amount = amount;
        }
        match &mut updated.terms {
            InstrumentTerms::ValuationCap { valuation_cap } => {
                if let Some(cap) = self.valuation_cap {
                    *valuation_cap = cap;
                }
            }
            InstrumentTerms::Discount { discount_rate } => {
                if let Some(rate) = self.discount_rate {
                    *discount_rate = rate;
                }
            }
            InstrumentTerms::Mfn => {}
        }
        updated
    }
}
