//! Conversion formulas: instrument terms + round context -> ownership.
//!
//! Every function here is pure. Shares are the "convert against the
//! pre-financing share count, proportionally" estimate, not an iterative
//! circular cap-table solve.

use log::debug;
use rust_decimal::Decimal;
use rust_decimal_macros::dec;

use crate::constants::DISPLAY_DECIMAL_PRECISION;
use crate::conversion::{OwnershipOutcome, RoundContext};
use crate::errors::{ConversionError, Result};
use crate::instruments::{Instrument, InstrumentTerms};

/// Fails unless the round can serve as a conversion basis.
pub fn validate_round(ctx: &RoundContext) -> Result<()> {
    if ctx.post_money_valuation <= Decimal::ZERO {
        return Err(ConversionError::InvalidRound(format!(
            "post-money valuation must be positive, got {}",
            ctx.post_money_valuation
        ))
        .into());
    }
    if ctx.new_money_invested < Decimal::ZERO {
        return Err(ConversionError::InvalidRound(format!(
            "new money invested cannot be negative, got {}",
            ctx.new_money_invested
        ))
        .into());
    }
    Ok(())
}

/// Valuation at which `instrument` converts in this round.
///
/// * Valuation Cap: `min(valuation_cap, post_money)`
/// * Discount: `post_money * (1 - discount_rate)`
/// * MFN: `post_money`
pub fn conversion_valuation(instrument: &Instrument, ctx: &RoundContext) -> Result<Decimal> {
    validate_round(ctx)?;
    let post_money = ctx.post_money_valuation;

    match instrument.terms {
        InstrumentTerms::ValuationCap { valuation_cap } => {
            if valuation_cap <= Decimal::ZERO {
                return Err(ConversionError::terms(
                    &instrument.id,
                    format!("valuation cap must be positive, got {}", valuation_cap),
                )
                .into());
            }
            Ok(valuation_cap.min(post_money))
        }
        InstrumentTerms::Discount { discount_rate } => {
            if discount_rate < Decimal::ZERO || discount_rate >= Decimal::ONE {
                return Err(ConversionError::terms(
                    &instrument.id,
                    format!("discount rate must be in [0, 1), got {}", discount_rate),
                )
                .into());
            }
            let discounted = post_money
                .checked_mul(Decimal::ONE - discount_rate)
                .ok_or_else(|| {
                    ConversionError::terms(&instrument.id, "discounted valuation out of range")
                })?;
            if discounted <= Decimal::ZERO {
                return Err(ConversionError::terms(
                    &instrument.id,
                    format!("discounted valuation must be positive, got {}", discounted),
                )
                .into());
            }
            Ok(discounted)
        }
        InstrumentTerms::Mfn => Ok(post_money),
    }
}

/// Post-money ownership fraction of `instrument`.
pub fn ownership_fraction(instrument: &Instrument, ctx: &RoundContext) -> Result<Decimal> {
    let valuation = conversion_valuation(instrument, ctx)?;
    fraction_at_valuation(instrument, valuation)
}

/// Ownership fraction of `instrument` converting at an explicit valuation.
pub fn fraction_at_valuation(instrument: &Instrument, valuation: Decimal) -> Result<Decimal> {
    if instrument.investment_amount < Decimal::ZERO {
        return Err(ConversionError::terms(
            &instrument.id,
            format!(
                "investment amount cannot be negative, got {}",
                instrument.investment_amount
            ),
        )
        .into());
    }
    if valuation <= Decimal::ZERO {
        return Err(ConversionError::terms(
            &instrument.id,
            format!("conversion valuation must be positive, got {}", valuation),
        )
        .into());
    }
    instrument
        .investment_amount
        .checked_div(valuation)
        .ok_or_else(|| ConversionError::terms(&instrument.id, "ownership out of range").into())
}

/// Full ownership outcome of `instrument`; `shares` is filled in when the
/// context carries a pre-financing share count.
pub fn compute_ownership(instrument: &Instrument, ctx: &RoundContext) -> Result<OwnershipOutcome> {
    let valuation = conversion_valuation(instrument, ctx)?;
    outcome_at_valuation(instrument, ctx, valuation)
}

/// Same as [`compute_ownership`] with the conversion valuation already resolved.
pub fn outcome_at_valuation(
    instrument: &Instrument,
    ctx: &RoundContext,
    valuation: Decimal,
) -> Result<OwnershipOutcome> {
    let fraction = fraction_at_valuation(instrument, valuation)?;
    let shares = match ctx.total_shares_outstanding {
        Some(total) => Some(scale_to_shares(fraction, total, &instrument.id)?),
        None => None,
    };
    debug!(
        "Converted instrument {} ({}) at valuation {}: fraction {}",
        instrument.id,
        instrument.kind().as_str(),
        valuation,
        fraction
    );
    Ok(outcome(fraction, shares))
}

/// Fraction of the company bought by the priced round's new money.
pub fn new_money_fraction(ctx: &RoundContext) -> Result<Decimal> {
    validate_round(ctx)?;
    ctx.new_money_invested
        .checked_div(ctx.post_money_valuation)
        .ok_or_else(|| {
            ConversionError::InvalidRound("new money fraction out of range".into()).into()
        })
}

/// Shares issued to the priced round against `total_shares` pre-financing shares.
pub fn new_money_shares(ctx: &RoundContext, total_shares: Decimal) -> Result<Decimal> {
    if total_shares < Decimal::ZERO {
        return Err(ConversionError::InvalidRound(format!(
            "share count cannot be negative, got {}",
            total_shares
        ))
        .into());
    }
    let fraction = new_money_fraction(ctx)?;
    fraction
        .checked_mul(total_shares)
        .ok_or_else(|| {
            ConversionError::InvalidRound("new money shares out of range".into()).into()
        })
}

/// Fails unless founders and pool are non-negative and fit inside the
/// pre-financing share count.
pub fn validate_share_ledger(
    founders_shares: Decimal,
    employee_shares: Decimal,
    pre_financing_shares: Decimal,
) -> Result<()> {
    for (holder, shares) in [
        ("founders", founders_shares),
        ("employee pool", employee_shares),
        ("total outstanding", pre_financing_shares),
    ] {
        if shares < Decimal::ZERO {
            return Err(ConversionError::InvalidRound(format!(
                "{} share count cannot be negative, got {}",
                holder, shares
            ))
            .into());
        }
    }
    let itemised = founders_shares.saturating_add(employee_shares);
    if itemised > pre_financing_shares {
        return Err(ConversionError::InvalidRound(format!(
            "founders and employee pool hold {} shares, more than the {} outstanding",
            itemised, pre_financing_shares
        ))
        .into());
    }
    Ok(())
}

/// Fraction expressed in percent. Saturates instead of overflowing.
pub fn to_percentage(fraction: Decimal) -> Decimal {
    fraction.saturating_mul(dec!(100))
}

/// Percentage rounded for display.
pub fn display_percentage(percentage: Decimal) -> Decimal {
    percentage.round_dp(DISPLAY_DECIMAL_PRECISION)
}

fn scale_to_shares(fraction: Decimal, total_shares: Decimal, instrument_id: &str) -> Result<Decimal> {
    if total_shares < Decimal::ZERO {
        return Err(ConversionError::terms(
            instrument_id,
            format!("share count cannot be negative, got {}", total_shares),
        )
        .into());
    }
    fraction
        .checked_mul(total_shares)
        .ok_or_else(|| ConversionError::terms(instrument_id, "share count out of range").into())
}

fn outcome(fraction: Decimal, shares: Option<Decimal>) -> OwnershipOutcome {
    let percentage = to_percentage(fraction);
    OwnershipOutcome {
        fraction,
        shares,
        percentage,
        display_percentage: display_percentage(percentage),
    }
}
