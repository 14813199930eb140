use rust_decimal::Decimal;
use rust_decimal_macros::dec;

/// Investment amount given to a newly created instrument
pub const DEFAULT_INVESTMENT_AMOUNT: Decimal = dec!(100000);

/// Valuation cap given to a newly created Valuation Cap SAFE
pub const DEFAULT_VALUATION_CAP: Decimal = dec!(1000000);

/// Discount rate (fraction) given to a newly created Discount SAFE
pub const DEFAULT_DISCOUNT_RATE: Decimal = dec!(0.20);

/// Post-money valuation of the default priced round
pub const DEFAULT_POST_MONEY_VALUATION: Decimal = dec!(10000000);

/// New money raised in the default priced round
pub const DEFAULT_NEW_MONEY_INVESTED: Decimal = dec!(3000000);

/// Pre-financing share count of the default company structure
pub const DEFAULT_TOTAL_SHARES: Decimal = dec!(10000000);

pub const DEFAULT_FOUNDERS_SHARES: Decimal = dec!(2000000);

pub const DEFAULT_EMPLOYEE_POOL_SHARES: Decimal = dec!(1000000);

/// Decimal precision for display
pub const DISPLAY_DECIMAL_PRECISION: u32 = 2;

pub const FOUNDERS_LABEL: &str = "Founders";
pub const EMPLOYEE_POOL_LABEL: &str = "Employee Pool";
pub const EQUITY_FINANCING_LABEL: &str = "Equity Financing";

/// Prefix of the generated investor label ("Investor 1", "Investor 2", ...)
pub const DEFAULT_INVESTOR_PREFIX: &str = "Investor";
