//! The deduction engine.
//!
//! Combines the five deduction rules into a single [`Deductions`]
//! breakdown. This is the only place inputs are checked; the individual
//! rule functions assume validated values.

use rust_decimal::Decimal;
use tracing::debug;

use crate::config::DeductionSchedule;
use crate::error::PayrollResult;
use crate::models::Deductions;
use crate::validation::{require_money, require_percentage};

use super::flat_rate::{calculate_health_insurance, calculate_income_tax, calculate_union_fees};
use super::prsi::calculate_prsi;
use super::usc::calculate_usc;

/// Computes deductions on monthly earnings with the statutory schedule.
///
/// # Arguments
///
/// * `monthly_earnings` - Gross earnings for the month, zero or greater
/// * `health_insurance_rate` - Health insurance percentage, 0 to 100
///
/// # Returns
///
/// The full breakdown, or a `Validation` error for negative earnings,
/// earnings above [`crate::validation::MAX_MONEY`] or an out-of-range rate.
///
/// # Examples
///
/// ```
/// use payroll_engine::calculation::compute_deductions;
/// use rust_decimal::Decimal;
/// use std::str::FromStr;
///
/// let deductions = compute_deductions(Decimal::from(3000), Decimal::from(5)).unwrap();
/// assert_eq!(deductions.health_insurance, Decimal::from(150));
/// assert_eq!(deductions.union_fees, Decimal::from(24));
/// assert_eq!(deductions.prsi, Decimal::from(123));
/// assert_eq!(deductions.usc.round_dp(2), Decimal::from_str("62.05").unwrap());
/// assert_eq!(deductions.income_tax, Decimal::from(600));
/// ```
pub fn compute_deductions(
    monthly_earnings: Decimal,
    health_insurance_rate: Decimal,
) -> PayrollResult<Deductions> {
    compute_deductions_with(
        monthly_earnings,
        health_insurance_rate,
        &DeductionSchedule::default(),
    )
}

/// Computes deductions on monthly earnings with an explicit schedule.
pub fn compute_deductions_with(
    monthly_earnings: Decimal,
    health_insurance_rate: Decimal,
    schedule: &DeductionSchedule,
) -> PayrollResult<Deductions> {
    require_money("monthly_earnings", monthly_earnings)?;
    require_percentage("health_insurance_rate", health_insurance_rate)?;

    let health_insurance = calculate_health_insurance(monthly_earnings, health_insurance_rate, 1);
    let union_fees = calculate_union_fees(monthly_earnings, schedule.union_fee_rate, 2);
    let prsi = calculate_prsi(monthly_earnings, &schedule.prsi, 3);
    let usc = calculate_usc(monthly_earnings, &schedule.usc_bands, 4)?;
    let income_tax = calculate_income_tax(monthly_earnings, schedule.income_tax_rate, 5);

    let total =
        health_insurance.amount + union_fees.amount + prsi.amount + usc.amount + income_tax.amount;

    debug!(
        monthly_earnings = %monthly_earnings,
        total = %total,
        prsi_due = prsi.threshold_exceeded,
        "Computed deductions"
    );

    Ok(Deductions {
        health_insurance: health_insurance.amount,
        union_fees: union_fees.amount,
        prsi: prsi.amount,
        usc: usc.amount,
        income_tax: income_tax.amount,
        total,
        audit_steps: vec![
            health_insurance.audit_step,
            union_fees.audit_step,
            prsi.audit_step,
            usc.audit_step,
            income_tax.audit_step,
        ],
    })
}
