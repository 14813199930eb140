//! Capitalization table models. Always derived, never stored.

use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use std::fmt;

use crate::conversion::MfnTreatment;
use crate::instruments::InstrumentKind;

/// Holder category of a capitalization table row.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "type", content = "kind", rename_all = "SCREAMING_SNAKE_CASE")]
pub enum RowCategory {
    CommonStock,
    EmployeePool,
    EquityFinancing,
    Safe(InstrumentKind),
}

impl RowCategory {
    pub fn label(&self) -> &'static str {
        match self {
            RowCategory::CommonStock => "Common Stock",
            RowCategory::EmployeePool => "Equity",
            RowCategory::EquityFinancing => "Equity Financing",
            RowCategory::Safe(kind) => kind.label(),
        }
    }
}

impl fmt::Display for RowCategory {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

/// One holder line of the table.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CapTableRow {
    /// Instrument id for SAFE rows
    #[serde(skip_serializing_if = "Option::is_none")]
    pub id: Option<String>,
    pub label: String,
    pub category: RowCategory,
    /// `None` when the row's terms have no defined result
    pub shares: Option<Decimal>,
    /// Share of the post-financing total at full precision (0-100)
    pub percentage: Decimal,
    pub display_percentage: Decimal,
    /// Money put in; `None` for founders and the employee pool
    pub investment_amount: Option<Decimal>,
    /// Why `shares` is missing
    #[serde(skip_serializing_if = "Option::is_none")]
    pub error: Option<String>,
}

impl CapTableRow {
    pub fn is_valid(&self) -> bool {
        self.shares.is_some()
    }
}

/// Post-conversion capitalization table.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CapTable {
    /// Founders, employee pool, priced round, then instruments in insertion order
    pub rows: Vec<CapTableRow>,
    /// Shared denominator of every row percentage
    pub total_shares: Decimal,
    /// Share count the instruments and the round convert against
    pub pre_financing_shares: Decimal,
    /// Pre-financing shares not itemised as founders or pool
    pub unallocated_shares: Decimal,
    /// Why the share ledger left every row without shares
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub error: Option<String>,
}

impl CapTable {
    pub fn is_valid(&self) -> bool {
        self.error.is_none()
    }

    /// Sum of full-precision row percentages. Equals 100, up to the last
    /// decimal digit, when every pre-financing share is attributed to
    /// founders or the pool. Zero when [`CapTable::error`] is set.
    pub fn total_percentage(&self) -> Decimal {
        self.rows.iter().map(|row| row.percentage).sum()
    }

    pub fn row(&self, id: &str) -> Option<&CapTableRow> {
        self.rows.iter().find(|row| row.id.as_deref() == Some(id))
    }

    pub fn instrument_rows(&self) -> impl Iterator<Item = &CapTableRow> {
        self.rows
            .iter()
            .filter(|row| matches!(row.category, RowCategory::Safe(_)))
    }
}

/// Knobs of the table builder. Passed explicitly on every build.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct CapTableOptions {
    pub mfn_treatment: MfnTreatment,
}
