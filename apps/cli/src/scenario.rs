//! Scenario files: the company structure, the priced round and the SAFEs to
//! convert, as typed by a user.
//!
//! Every numeric field accepts either a JSON number or raw text such as
//! `"$1,000,000"`. Text that does not parse is read as zero.

use rust_decimal::Decimal;
use safecap_core::constants::{
    DEFAULT_EMPLOYEE_POOL_SHARES, DEFAULT_FOUNDERS_SHARES, DEFAULT_NEW_MONEY_INVESTED,
    DEFAULT_POST_MONEY_VALUATION, DEFAULT_TOTAL_SHARES,
};
use safecap_core::utils::{normalize_discount_rate, parse_number, RateUnit};
use safecap_core::{
    ConversionCalculator, ConversionCalculatorTrait, InstrumentKind, NewInstrument, RoundContext,
};
use serde::Deserialize;
use std::path::Path;
use std::str::FromStr;

/// A number as it appears in a scenario file.
#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(untagged)]
pub enum NumberInput {
    Number(Decimal),
    Text(String),
}

impl NumberInput {
    pub fn value(&self) -> Decimal {
        match self {
            NumberInput::Number(value) => *value,
            NumberInput::Text(text) => parse_number(text).unwrap_or_else(|| {
                tracing::warn!(input = %text, "Unparseable number, using 0");
                Decimal::ZERO
            }),
        }
    }
}

fn value_or(input: &Option<NumberInput>, default: Decimal) -> Decimal {
    input.as_ref().map_or(default, NumberInput::value)
}

#[derive(Debug, Clone, Default, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct RoundInput {
    pub post_money_valuation: Option<NumberInput>,
    pub new_money_invested: Option<NumberInput>,
}

#[derive(Debug, Clone, Default, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct SharesInput {
    pub total_shares: Option<NumberInput>,
    pub founders_shares: Option<NumberInput>,
    pub employee_shares: Option<NumberInput>,
}

#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct InstrumentInput {
    #[serde(default)]
    pub id: Option<String>,
    #[serde(default)]
    pub investor_name: Option<String>,
    pub kind: String,
    #[serde(default)]
    pub investment_amount: Option<NumberInput>,
    #[serde(default)]
    pub valuation_cap: Option<NumberInput>,
    #[serde(default)]
    pub discount_rate: Option<NumberInput>,
}

impl InstrumentInput {
    fn to_new_instrument(&self, rate_unit: RateUnit) -> safecap_core::Result<NewInstrument> {
        let kind = InstrumentKind::from_str(&self.kind)?;
        let mut new_instrument = NewInstrument::new(kind);
        if let Some(id) = &self.id {
            new_instrument = new_instrument.id(id.clone());
        }
        if let Some(name) = &self.investor_name {
            new_instrument = new_instrument.investor_name(name.clone());
        }
        if let Some(amount) = &self.investment_amount {
            new_instrument = new_instrument.investment_amount(amount.value());
        }
        if let Some(cap) = &self.valuation_cap {
            new_instrument = new_instrument.valuation_cap(cap.value());
        }
        if let Some(rate) = &self.discount_rate {
            new_instrument =
                new_instrument.discount_rate(normalize_discount_rate(rate.value(), rate_unit));
        }
        Ok(new_instrument)
    }
}

/// Scenario file contents
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct Scenario {
    pub round: RoundInput,
    pub shares: SharesInput,
    pub instruments: Vec<InstrumentInput>,
}

/// Validated numbers handed to the core.
#[derive(Debug, Clone)]
pub struct ScenarioInputs {
    pub round: RoundContext,
    pub founders_shares: Decimal,
    pub employee_shares: Decimal,
    pub calculator: ConversionCalculator,
}

impl Scenario {
    pub fn from_file(path: &Path) -> anyhow::Result<Self> {
        use anyhow::Context;

        let content = std::fs::read_to_string(path)
            .with_context(|| format!("Failed to read scenario {}", path.display()))?;
        serde_json::from_str(&content)
            .with_context(|| format!("Failed to parse scenario {}", path.display()))
    }

    pub fn into_inputs(self, rate_unit: RateUnit) -> safecap_core::Result<ScenarioInputs> {
        let round = RoundContext::new(
            value_or(&self.round.post_money_valuation, DEFAULT_POST_MONEY_VALUATION),
            value_or(&self.round.new_money_invested, DEFAULT_NEW_MONEY_INVESTED),
        )
        .with_total_shares(value_or(&self.shares.total_shares, DEFAULT_TOTAL_SHARES));

        let mut calculator = ConversionCalculator::new();
        for input in &self.instruments {
            calculator.insert_instrument(input.to_new_instrument(rate_unit)?);
        }

        Ok(ScenarioInputs {
            round,
            founders_shares: value_or(&self.shares.founders_shares, DEFAULT_FOUNDERS_SHARES),
            employee_shares: value_or(&self.shares.employee_shares, DEFAULT_EMPLOYEE_POOL_SHARES),
            calculator,
        })
    }
}
