//! Monetary rounding and formatting.
//!
//! Intermediate figures are always kept unrounded; these helpers are only
//! applied to final amounts (issued payslips and values written to disk).

use rust_decimal::{Decimal, RoundingStrategy};

/// Number of decimal places used for issued and stored monetary amounts.
pub const MONEY_SCALE: u32 = 2;

/// Rounds an amount to cents, half away from zero.
///
/// # Examples
///
/// ```
/// use payroll_engine::money::round_money;
/// use rust_decimal::Decimal;
/// use std::str::FromStr;
///
/// assert_eq!(round_money(Decimal::from_str("62.0516").unwrap()), Decimal::from_str("62.05").unwrap());
/// assert_eq!(round_money(Decimal::from_str("0.125").unwrap()), Decimal::from_str("0.13").unwrap());
/// ```
pub fn round_money(amount: Decimal) -> Decimal {
    let mut rounded =
        amount.round_dp_with_strategy(MONEY_SCALE, RoundingStrategy::MidpointAwayFromZero);
    if rounded.is_zero() {
        rounded.set_sign_positive(true);
    }
    rounded
}

/// Formats an amount with exactly two decimal places.
///
/// # Examples
///
/// ```
/// use payroll_engine::money::format_money;
/// use rust_decimal::Decimal;
///
/// assert_eq!(format_money(Decimal::from(3000)), "3000.00");
/// ```
pub fn format_money(amount: Decimal) -> String {
    let mut rounded = round_money(amount);
    rounded.rescale(MONEY_SCALE);
    rounded.to_string()
}
