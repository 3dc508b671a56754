//! Pay Related Social Insurance (PRSI).
//!
//! PRSI is an all-or-nothing threshold: once weekly earnings exceed the
//! threshold, the rate applies to the full monthly earnings, not just the
//! excess.

use rust_decimal::Decimal;

use crate::config::PrsiSchedule;
use crate::models::AuditStep;

/// Average number of weeks in a month used to derive weekly earnings.
pub const WEEKS_PER_MONTH: Decimal = Decimal::from_parts(433, 0, 0, false, 2);

/// Weekly earnings at or below which no PRSI is due.
pub const PRSI_WEEKLY_THRESHOLD: Decimal = Decimal::from_parts(352, 0, 0, false, 0);

/// PRSI rate on monthly earnings once the threshold is exceeded (4.1%).
pub const PRSI_RATE: Decimal = Decimal::from_parts(41, 0, 0, false, 3);

/// The result of a PRSI calculation.
#[derive(Debug, Clone)]
pub struct PrsiResult {
    /// The monthly PRSI amount (unrounded).
    pub amount: Decimal,
    /// Monthly earnings divided by the weeks per month.
    pub weekly_earnings: Decimal,
    /// Whether weekly earnings exceeded the threshold.
    pub threshold_exceeded: bool,
    /// The audit step recording this calculation.
    pub audit_step: AuditStep,
}

/// Calculates PRSI on monthly earnings.
///
/// # Examples
///
/// ```
/// use payroll_engine::calculation::calculate_prsi;
/// use payroll_engine::config::PrsiSchedule;
/// use rust_decimal::Decimal;
/// use std::str::FromStr;
///
/// let schedule = PrsiSchedule::default();
///
/// // Exactly 352 per week: nothing due.
/// let at_threshold = calculate_prsi(Decimal::from_str("1524.16").unwrap(), &schedule, 1);
/// assert_eq!(at_threshold.amount, Decimal::ZERO);
///
/// // Above the threshold: 4.1% of the whole month.
/// let above = calculate_prsi(Decimal::from(3000), &schedule, 1);
/// assert_eq!(above.amount, Decimal::from(123));
/// ```
pub fn calculate_prsi(
    monthly_earnings: Decimal,
    schedule: &PrsiSchedule,
    step_number: u32,
) -> PrsiResult {
    let weekly_earnings = monthly_earnings / schedule.weeks_per_month;
    let threshold_exceeded = weekly_earnings > schedule.weekly_threshold;

    let amount = if threshold_exceeded {
        monthly_earnings * schedule.rate
    } else {
        Decimal::ZERO
    };

    let reasoning = if threshold_exceeded {
        format!(
            "Weekly earnings €{} exceed €{} threshold: €{} x {} = €{}",
            weekly_earnings.round_dp(2),
            schedule.weekly_threshold.normalize(),
            monthly_earnings.normalize(),
            schedule.rate.normalize(),
            amount.normalize()
        )
    } else {
        format!(
            "Weekly earnings €{} do not exceed €{} threshold - no PRSI due",
            weekly_earnings.round_dp(2),
            schedule.weekly_threshold.normalize()
        )
    };

    let audit_step = AuditStep {
        step_number,
        rule_id: "prsi".to_string(),
        rule_name: "PRSI".to_string(),
        input: serde_json::json!({
            "monthly_earnings": monthly_earnings.normalize().to_string(),
            "weeks_per_month": schedule.weeks_per_month.normalize().to_string(),
            "weekly_threshold": schedule.weekly_threshold.normalize().to_string()
        }),
        output: serde_json::json!({
            "weekly_earnings": weekly_earnings.normalize().to_string(),
            "threshold_exceeded": threshold_exceeded,
            "amount": amount.normalize().to_string()
        }),
        reasoning,
    };

    PrsiResult {
        amount,
        weekly_earnings,
        threshold_exceeded,
        audit_step,
    }
}
