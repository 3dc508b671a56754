//! Flat-rate deductions: health insurance, union fees and income tax.
//!
//! Each of these is a single rate applied to the full monthly earnings.

use rust_decimal::Decimal;

use crate::models::AuditStep;

/// Union fee rate on monthly earnings (0.8%).
pub const UNION_FEE_RATE: Decimal = Decimal::from_parts(8, 0, 0, false, 3);

/// Flat income tax rate on monthly earnings (20%).
pub const INCOME_TAX_RATE: Decimal = Decimal::from_parts(20, 0, 0, false, 2);

/// The result of a flat-rate deduction, including the amount and audit step.
#[derive(Debug, Clone)]
pub struct FlatRateResult {
    /// The deduction amount (unrounded).
    pub amount: Decimal,
    /// The audit step recording this calculation.
    pub audit_step: AuditStep,
}

fn apply_flat_rate(
    rule_id: &str,
    rule_name: &str,
    monthly_earnings: Decimal,
    rate: Decimal,
    step_number: u32,
) -> FlatRateResult {
    let amount = monthly_earnings * rate;

    let audit_step = AuditStep {
        step_number,
        rule_id: rule_id.to_string(),
        rule_name: rule_name.to_string(),
        input: serde_json::json!({
            "monthly_earnings": monthly_earnings.normalize().to_string(),
            "rate": rate.normalize().to_string()
        }),
        output: serde_json::json!({
            "amount": amount.normalize().to_string()
        }),
        reasoning: format!(
            "€{} x {} = €{}",
            monthly_earnings.normalize(),
            rate.normalize(),
            amount.normalize()
        ),
    };

    FlatRateResult { amount, audit_step }
}

/// Calculates the health insurance deduction.
///
/// `health_insurance_rate` is a percentage (0 to 100) of monthly earnings.
///
/// # Examples
///
/// ```
/// use payroll_engine::calculation::calculate_health_insurance;
/// use rust_decimal::Decimal;
///
/// let result = calculate_health_insurance(Decimal::from(3000), Decimal::from(5), 1);
/// assert_eq!(result.amount, Decimal::from(150));
/// ```
pub fn calculate_health_insurance(
    monthly_earnings: Decimal,
    health_insurance_rate: Decimal,
    step_number: u32,
) -> FlatRateResult {
    apply_flat_rate(
        "health_insurance",
        "Health Insurance",
        monthly_earnings,
        health_insurance_rate / Decimal::ONE_HUNDRED,
        step_number,
    )
}

/// Calculates union fees at `rate` of monthly earnings.
pub fn calculate_union_fees(
    monthly_earnings: Decimal,
    rate: Decimal,
    step_number: u32,
) -> FlatRateResult {
    apply_flat_rate("union_fees", "Union Fees", monthly_earnings, rate, step_number)
}

/// Calculates flat income tax at `rate` of monthly earnings.
pub fn calculate_income_tax(
    monthly_earnings: Decimal,
    rate: Decimal,
    step_number: u32,
) -> FlatRateResult {
    apply_flat_rate("income_tax", "Income Tax", monthly_earnings, rate, step_number)
}
