//! Text rendering of tables and single-instrument projections.

use safecap_core::utils::{format_currency, format_percentage, format_with_commas};
use safecap_core::{CapTable, Instrument, OwnershipOutcome};

const TABLE_HEADERS: [&str; 5] = [
    "Investor Name",
    "SAFE Type",
    "Shares",
    "Equity %",
    "Investment Amount",
];

/// Renders the post-conversion capitalization table.
///
/// Invalid shares are left blank, and rows without an investment
/// (founders, pool) show `-`.
pub fn render_cap_table(table: &CapTable) -> String {
    let body: Vec<[String; 5]> = table
        .rows
        .iter()
        .map(|row| {
            [
                row.label.clone(),
                row.category.label().to_string(),
                row.shares.map(format_with_commas).unwrap_or_default(),
                format_percentage(row.percentage),
                row.investment_amount
                    .map(format_currency)
                    .unwrap_or_else(|| "-".to_string()),
            ]
        })
        .collect();

    let mut widths = TABLE_HEADERS.map(str::len);
    for cells in &body {
        for (width, cell) in widths.iter_mut().zip(cells) {
            *width = (*width).max(cell.chars().count());
        }
    }

    let mut out = String::new();
    out.push_str("Capitalization Table (Post Conversion)\n");
    push_line(&mut out, &TABLE_HEADERS.map(str::to_string), &widths);
    let rule: Vec<String> = widths.iter().map(|w| "-".repeat(*w)).collect();
    out.push_str(&rule.join("-+-"));
    out.push('\n');
    for cells in &body {
        push_line(&mut out, cells, &widths);
    }
    out.push_str(&format!(
        "\nTotal shares (post conversion): {}\n",
        format_with_commas(table.total_shares)
    ));
    if !table.unallocated_shares.is_zero() {
        out.push_str(&format!(
            "Pre-financing shares not itemised: {}\n",
            format_with_commas(table.unallocated_shares)
        ));
    }
    if let Some(error) = &table.error {
        out.push_str(&format!("Note: share ledger: {}\n", error));
        return out;
    }
    for row in table.rows.iter().filter(|row| row.error.is_some()) {
        out.push_str(&format!(
            "Note: {}: {}\n",
            row.label,
            row.error.as_deref().unwrap_or_default()
        ));
    }
    out
}

/// Renders the ownership projection of a single instrument.
pub fn render_outcome(
    instrument: &Instrument,
    outcome: &safecap_core::Result<OwnershipOutcome>,
) -> String {
    let mut out = format!(
        "{} ({}), investing {}\n",
        instrument.investor_name,
        instrument.kind(),
        format_currency(instrument.investment_amount)
    );
    match outcome {
        Ok(outcome) => {
            out.push_str(&format!(
                "Projected ownership: {}\n",
                format_percentage(outcome.percentage)
            ));
            if let Some(shares) = outcome.shares {
                out.push_str(&format!("Shares: {}\n", format_with_commas(shares)));
            }
        }
        Err(err) => {
            out.push_str("Projected ownership: \n");
            out.push_str(&format!("Note: {}\n", err));
        }
    }
    out
}

fn push_line(out: &mut String, cells: &[String; 5], widths: &[usize; 5]) {
    let padded: Vec<String> = cells
        .iter()
        .zip(widths)
        .map(|(cell, width)| format!("{:<width$}", cell, width = *width))
        .collect();
    out.push_str(padded.join(" | ").trim_end());
    out.push('\n');
}
