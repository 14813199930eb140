use log::warn;
use rust_decimal::Decimal;
use rust_decimal_macros::dec;

use crate::cap_table::{CapTable, CapTableOptions, CapTableRow, RowCategory};
use crate::constants::{EMPLOYEE_POOL_LABEL, EQUITY_FINANCING_LABEL, FOUNDERS_LABEL};
use crate::conversion::{
    display_percentage, mfn_conversion_valuation, new_money_shares, outcome_at_valuation,
    validate_share_ledger, RoundContext,
};
use crate::errors::{Error, Result};
use crate::instruments::Instrument;

/// Builds the post-conversion table with face-value MFN conversion.
///
/// See [`build_cap_table_with`].
pub fn build_cap_table(
    instruments: &[Instrument],
    founders_shares: Decimal,
    employee_shares: Decimal,
    ctx: &RoundContext,
) -> CapTable {
    build_cap_table_with(
        instruments,
        founders_shares,
        employee_shares,
        ctx,
        CapTableOptions::default(),
    )
}

/// Builds the post-conversion table.
///
/// Every row percentage shares one denominator:
/// `pre_financing_shares + round_shares + sum(instrument_shares)`.
/// The pre-financing count is `ctx.total_shares_outstanding`, or founders plus
/// pool when the context carries none. Rows whose terms are invalid keep their
/// place, report no shares and 0%, and add nothing to the denominator. A zero
/// denominator yields 0% everywhere.
///
/// A share ledger that cannot hold founders and pool (a negative count, or
/// founders plus pool above the pre-financing count) degrades every row and
/// is reported in [`CapTable::error`].
pub fn build_cap_table_with(
    instruments: &[Instrument],
    founders_shares: Decimal,
    employee_shares: Decimal,
    ctx: &RoundContext,
    options: CapTableOptions,
) -> CapTable {
    let pre_financing_shares = ctx
        .total_shares_outstanding
        .unwrap_or_else(|| founders_shares.saturating_add(employee_shares));
    let share_ctx = ctx.with_total_shares(pre_financing_shares);

    let ledger = validate_share_ledger(founders_shares, employee_shares, pre_financing_shares);
    if let Err(err) = &ledger {
        warn!("Share ledger cannot be converted against: {}", err);
    }
    let holding = |shares: Decimal| ledger.clone().map(|_| shares);

    let round_shares = ledger
        .clone()
        .and_then(|_| new_money_shares(&share_ctx, pre_financing_shares));
    let instrument_shares: Vec<Result<Decimal>> = instruments
        .iter()
        .map(|instrument| {
            ledger
                .clone()
                .and_then(|_| convert_instrument(instrument, instruments, &share_ctx, options))
        })
        .collect();

    let total_shares = instrument_shares
        .iter()
        .chain(std::iter::once(&round_shares))
        .filter_map(|shares| shares.as_ref().ok())
        .fold(pre_financing_shares, |acc, shares| acc.saturating_add(*shares));

    let mut rows = Vec::with_capacity(instruments.len() + 3);
    rows.push(row(
        None,
        FOUNDERS_LABEL,
        RowCategory::CommonStock,
        holding(founders_shares),
        None,
        total_shares,
    ));
    rows.push(row(
        None,
        EMPLOYEE_POOL_LABEL,
        RowCategory::EmployeePool,
        holding(employee_shares),
        None,
        total_shares,
    ));
    rows.push(row(
        None,
        EQUITY_FINANCING_LABEL,
        RowCategory::EquityFinancing,
        round_shares,
        Some(ctx.new_money_invested),
        total_shares,
    ));
    for (instrument, shares) in instruments.iter().zip(instrument_shares) {
        rows.push(row(
            Some(instrument.id.clone()),
            &instrument.investor_name,
            RowCategory::Safe(instrument.kind()),
            shares,
            Some(instrument.investment_amount),
            total_shares,
        ));
    }

    let unallocated_shares = match ledger {
        Ok(()) => pre_financing_shares
            .saturating_sub(founders_shares)
            .saturating_sub(employee_shares),
        Err(_) => Decimal::ZERO,
    };

    CapTable {
        rows,
        total_shares,
        pre_financing_shares,
        unallocated_shares,
        error: ledger.err().map(|err| error_message(&err)),
    }
}

fn convert_instrument(
    instrument: &Instrument,
    peers: &[Instrument],
    ctx: &RoundContext,
    options: CapTableOptions,
) -> Result<Decimal> {
    let valuation = mfn_conversion_valuation(instrument, peers, ctx, options.mfn_treatment)?;
    let outcome = outcome_at_valuation(instrument, ctx, valuation)?;
    Ok(outcome.shares.unwrap_or(Decimal::ZERO))
}

fn row(
    id: Option<String>,
    label: &str,
    category: RowCategory,
    shares: Result<Decimal>,
    investment_amount: Option<Decimal>,
    total_shares: Decimal,
) -> CapTableRow {
    let (shares, error) = match shares {
        Ok(shares) => (Some(shares), None),
        Err(err) => {
            warn!("Cap table row '{}' has no defined shares: {}", label, err);
            (None, Some(error_message(&err)))
        }
    };
    let percentage = shares
        .map(|shares| percentage_of(shares, total_shares))
        .unwrap_or(Decimal::ZERO);

    CapTableRow {
        id,
        label: label.to_string(),
        category,
        shares,
        percentage,
        display_percentage: display_percentage(percentage),
        investment_amount,
        error,
    }
}

fn percentage_of(shares: Decimal, total_shares: Decimal) -> Decimal {
    if total_shares <= Decimal::ZERO {
        return Decimal::ZERO;
    }
    shares
        .checked_div(total_shares)
        .and_then(|fraction| fraction.checked_mul(dec!(100)))
        .unwrap_or(Decimal::ZERO)
}

fn error_message(err: &Error) -> String {
    match err {
        Error::Conversion(inner) => inner.to_string(),
        other => other.to_string(),
    }
}
