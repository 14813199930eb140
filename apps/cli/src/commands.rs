//! Command handlers. Each returns the text to print on stdout.

use anyhow::Context;
use safecap_core::utils::{normalize_discount_rate, parse_number_or_zero};
use safecap_core::{
    CapTableOptions, ConversionCalculatorTrait, Instrument, InstrumentKind, NewInstrument,
    OwnershipOutcome, RoundContext,
};
use serde::Serialize;
use std::path::Path;
use std::str::FromStr;

use crate::config::{AppConfig, OutputFormat};
use crate::render::{render_cap_table, render_outcome};
use crate::scenario::Scenario;

/// Builds the capitalization table for a scenario file, or for the default
/// company structure when no file is given.
pub fn run_table(config: &AppConfig, scenario_path: Option<&Path>) -> anyhow::Result<String> {
    let scenario = match scenario_path {
        Some(path) => Scenario::from_file(path)?,
        None => Scenario::default(),
    };
    let inputs = scenario
        .into_inputs(config.discount_rate_unit)
        .context("Invalid scenario")?;

    tracing::info!(
        instruments = inputs.calculator.len(),
        post_money = %inputs.round.post_money_valuation,
        new_money = %inputs.round.new_money_invested,
        mfn_treatment = %config.mfn_treatment,
        "Building capitalization table"
    );

    let table = inputs.calculator.build_cap_table(
        inputs.founders_shares,
        inputs.employee_shares,
        &inputs.round,
        CapTableOptions {
            mfn_treatment: config.mfn_treatment,
        },
    );

    match config.output {
        OutputFormat::Text => Ok(render_cap_table(&table)),
        OutputFormat::Json => {
            serde_json::to_string_pretty(&table).context("Failed to serialize table")
        }
    }
}

/// Raw flag values of a single-instrument projection.
#[derive(Debug, Clone, Default)]
pub struct ConvertRequest {
    pub kind: String,
    pub investor_name: Option<String>,
    pub investment: String,
    pub valuation_cap: Option<String>,
    pub discount_rate: Option<String>,
    pub post_money: String,
    pub new_money: Option<String>,
    pub total_shares: Option<String>,
}

#[derive(Serialize)]
#[serde(rename_all = "camelCase")]
struct ConvertReport<'a> {
    instrument: &'a Instrument,
    outcome: Option<OwnershipOutcome>,
    error: Option<String>,
}

/// Projects the ownership of one instrument against a round.
pub fn run_convert(config: &AppConfig, request: &ConvertRequest) -> anyhow::Result<String> {
    let kind = InstrumentKind::from_str(&request.kind)?;

    let mut new_instrument =
        NewInstrument::new(kind).investment_amount(parse_number_or_zero(&request.investment));
    if let Some(name) = &request.investor_name {
        new_instrument = new_instrument.investor_name(name.clone());
    }
    if let Some(cap) = &request.valuation_cap {
        new_instrument = new_instrument.valuation_cap(parse_number_or_zero(cap));
    }
    if let Some(rate) = &request.discount_rate {
        new_instrument = new_instrument.discount_rate(normalize_discount_rate(
            parse_number_or_zero(rate),
            config.discount_rate_unit,
        ));
    }
    let instrument = new_instrument.build(1);

    let mut round = RoundContext::new(
        parse_number_or_zero(&request.post_money),
        request
            .new_money
            .as_deref()
            .map(parse_number_or_zero)
            .unwrap_or_default(),
    );
    if let Some(total) = &request.total_shares {
        round = round.with_total_shares(parse_number_or_zero(total));
    }

    let outcome = safecap_core::compute_ownership(&instrument, &round);
    if let Err(err) = &outcome {
        tracing::warn!(
            instrument = %instrument.id,
            error = %err,
            "Conversion has no defined result"
        );
    }

    match config.output {
        OutputFormat::Text => Ok(render_outcome(&instrument, &outcome)),
        OutputFormat::Json => {
            let report = ConvertReport {
                instrument: &instrument,
                outcome: outcome.as_ref().ok().copied(),
                error: outcome.as_ref().err().map(|e| e.to_string()),
            };
            serde_json::to_string_pretty(&report).context("Failed to serialize projection")
        }
    }
}
