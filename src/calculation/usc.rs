//! Universal Social Charge (USC).
//!
//! USC is assessed on annualised earnings through marginal bands: each
//! rate applies only to the part of the annual figure inside its band. The
//! monthly charge is one twelfth of the annual charge.

use rust_decimal::Decimal;

use crate::config::UscBand;
use crate::error::{PayrollError, PayrollResult};
use crate::models::AuditStep;

/// Months in a year, used to annualise monthly earnings.
pub const MONTHS_PER_YEAR: Decimal = Decimal::from_parts(12, 0, 0, false, 0);

/// The statutory USC bands.
///
/// | Annual earnings     | Rate |
/// |---------------------|------|
/// | up to 12,012        | 0.5% |
/// | 12,012 – 25,760     | 2%   |
/// | 25,760 – 70,044     | 4%   |
/// | above 70,044        | 8%   |
pub fn statutory_usc_bands() -> Vec<UscBand> {
    vec![
        UscBand {
            ceiling: Some(Decimal::from(12_012)),
            rate: Decimal::new(5, 3),
        },
        UscBand {
            ceiling: Some(Decimal::from(25_760)),
            rate: Decimal::new(2, 2),
        },
        UscBand {
            ceiling: Some(Decimal::from(70_044)),
            rate: Decimal::new(4, 2),
        },
        UscBand {
            ceiling: None,
            rate: Decimal::new(8, 2),
        },
    ]
}

/// The result of a USC calculation.
#[derive(Debug, Clone)]
pub struct UscResult {
    /// The monthly USC amount (unrounded).
    pub amount: Decimal,
    /// Monthly earnings times twelve.
    pub annual_earnings: Decimal,
    /// USC on the annual earnings.
    pub annual_usc: Decimal,
    /// The audit step recording this calculation.
    pub audit_step: AuditStep,
}

/// Computes USC on an annual figure through marginal `bands`.
///
/// Bands must be ordered lowest first with the open-ended band last, as
/// enforced by [`crate::config::DeductionSchedule::validate`].
///
/// # Examples
///
/// ```
/// use payroll_engine::calculation::{annual_usc, statutory_usc_bands};
/// use rust_decimal::Decimal;
/// use std::str::FromStr;
///
/// let bands = statutory_usc_bands();
/// assert_eq!(annual_usc(Decimal::from(12_012), &bands), Decimal::from_str("60.06").unwrap());
/// assert_eq!(annual_usc(Decimal::from(36_000), &bands), Decimal::from_str("744.62").unwrap());
/// ```
pub fn annual_usc(annual_earnings: Decimal, bands: &[UscBand]) -> Decimal {
    let mut floor = Decimal::ZERO;
    let mut total = Decimal::ZERO;

    for band in bands {
        if annual_earnings <= floor {
            break;
        }
        let top = match band.ceiling {
            Some(ceiling) => ceiling.min(annual_earnings),
            None => annual_earnings,
        };
        total += (top - floor) * band.rate;

        match band.ceiling {
            Some(ceiling) => floor = ceiling,
            None => break,
        }
    }

    total
}

/// Calculates the monthly USC on monthly earnings.
///
/// Fails with a `Validation` error if the annualised earnings do not fit in
/// a `Decimal`.
pub fn calculate_usc(
    monthly_earnings: Decimal,
    bands: &[UscBand],
    step_number: u32,
) -> PayrollResult<UscResult> {
    let annual_earnings = monthly_earnings
        .checked_mul(MONTHS_PER_YEAR)
        .ok_or_else(|| {
            PayrollError::validation(
                "monthly_earnings",
                format!("{} cannot be annualised", monthly_earnings),
            )
        })?;
    let annual = annual_usc(annual_earnings, bands);
    let amount = annual / MONTHS_PER_YEAR;

    let band_number = bands
        .iter()
        .position(|band| band.ceiling.is_none_or(|ceiling| annual_earnings <= ceiling))
        .map_or(bands.len(), |index| index + 1);

    let audit_step = AuditStep {
        step_number,
        rule_id: "usc".to_string(),
        rule_name: "Universal Social Charge".to_string(),
        input: serde_json::json!({
            "monthly_earnings": monthly_earnings.normalize().to_string(),
            "annual_earnings": annual_earnings.normalize().to_string()
        }),
        output: serde_json::json!({
            "band": band_number,
            "annual_usc": annual.normalize().to_string(),
            "amount": amount.normalize().to_string()
        }),
        reasoning: format!(
            "Annual earnings €{} reach band {}: annual USC €{} / 12 = €{}",
            annual_earnings.normalize(),
            band_number,
            annual.normalize(),
            amount.round_dp(2)
        ),
    };

    Ok(UscResult {
        amount,
        annual_earnings,
        annual_usc: annual,
        audit_step,
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::str::FromStr;

    fn dec(s: &str) -> Decimal {
        Decimal::from_str(s).unwrap()
    }

    #[test]
    fn test_first_band_only() {
        let bands = statutory_usc_bands();
        assert_eq!(annual_usc(dec("10000"), &bands), dec("50"));
    }

    #[test]
    fn test_second_band() {
        let bands = statutory_usc_bands();
        // 60.06 + 2% of 7988
        assert_eq!(annual_usc(dec("20000"), &bands), dec("219.82"));
    }

    #[test]
    fn test_third_band() {
        let bands = statutory_usc_bands();
        // 60.06 + 274.96 + 4% of 10240
        assert_eq!(annual_usc(dec("36000"), &bands), dec("744.62"));
    }

    #[test]
    fn test_top_band() {
        let bands = statutory_usc_bands();
        // 60.06 + 274.96 + 1771.36 + 8% of 29956
        assert_eq!(annual_usc(dec("100000"), &bands), dec("4502.86"));
    }

    #[test]
    fn test_bands_are_continuous_at_each_ceiling() {
        let bands = statutory_usc_bands();
        let cent = dec("0.01");

        for (ceiling, base) in [
            (dec("12012"), dec("60.06")),
            (dec("25760"), dec("335.02")),
            (dec("70044"), dec("2106.38")),
        ] {
            assert_eq!(annual_usc(ceiling, &bands), base);

            let just_below = annual_usc(ceiling - cent, &bands);
            let just_above = annual_usc(ceiling + cent, &bands);
            assert!(base - just_below <= dec("0.0008"));
            assert!(just_above - base <= dec("0.0008"));
        }
    }

    #[test]
    fn test_zero_earnings_no_usc() {
        let result = calculate_usc(Decimal::ZERO, &statutory_usc_bands(), 1).unwrap();
        assert_eq!(result.amount, Decimal::ZERO);
        assert_eq!(result.audit_step.output["band"], 1);
    }

    #[test]
    fn test_monthly_usc_on_3000() {
        let result = calculate_usc(dec("3000"), &statutory_usc_bands(), 4).unwrap();

        assert_eq!(result.annual_earnings, dec("36000"));
        assert_eq!(result.annual_usc, dec("744.62"));
        assert_eq!(result.amount.round_dp(2), dec("62.05"));
        assert_eq!(result.audit_step.rule_id, "usc");
        assert_eq!(result.audit_step.output["band"], 3);
        assert!(result.audit_step.reasoning.contains("62.05"));
    }

    #[test]
    fn test_monthly_usc_top_band_reported() {
        let result = calculate_usc(dec("10000"), &statutory_usc_bands(), 1).unwrap();
        assert_eq!(result.audit_step.output["band"], 4);
    }

    #[test]
    fn test_annualising_overflow_is_validation_error() {
        let result = calculate_usc(Decimal::MAX, &statutory_usc_bands(), 4);
        assert!(matches!(result, Err(PayrollError::Validation { .. })));
    }
}
