//! Property tests for the deduction engine.

use chrono::NaiveDate;
use proptest::prelude::*;
use rust_decimal::Decimal;

use payroll_engine::calculation::{
    PRSI_WEEKLY_THRESHOLD, WEEKS_PER_MONTH, annual_usc, calculate_pay, compute_deductions,
    statutory_usc_bands,
};
use payroll_engine::config::DeductionSchedule;
use payroll_engine::models::Employee;
use payroll_engine::money::round_money;

/// Monthly earnings from zero to one million, in cents.
fn monthly_earnings() -> impl Strategy<Value = Decimal> {
    (0i64..=100_000_000).prop_map(|cents| Decimal::new(cents, 2))
}

/// Health insurance percentage from 0.00 to 100.00.
fn health_rate() -> impl Strategy<Value = Decimal> {
    (0i64..=10_000).prop_map(|hundredths| Decimal::new(hundredths, 2))
}

proptest! {
    #[test]
    fn test_total_is_sum_of_parts(earnings in monthly_earnings(), rate in health_rate()) {
        let d = compute_deductions(earnings, rate).unwrap();

        prop_assert_eq!(d.total, d.health_insurance + d.union_fees + d.prsi + d.usc + d.income_tax);
        for part in [d.health_insurance, d.union_fees, d.prsi, d.usc, d.income_tax] {
            prop_assert!(part >= Decimal::ZERO);
        }
    }

    #[test]
    fn test_prsi_due_only_above_weekly_threshold(earnings in monthly_earnings()) {
        let d = compute_deductions(earnings, Decimal::ZERO).unwrap();
        let weekly = earnings / WEEKS_PER_MONTH;

        if weekly > PRSI_WEEKLY_THRESHOLD {
            prop_assert_eq!(d.prsi, earnings * Decimal::new(41, 3));
        } else {
            prop_assert_eq!(d.prsi, Decimal::ZERO);
        }
    }

    #[test]
    fn test_usc_never_decreases(a in monthly_earnings(), b in monthly_earnings()) {
        let bands = statutory_usc_bands();
        let (low, high) = if a <= b { (a, b) } else { (b, a) };
        prop_assert!(annual_usc(low * Decimal::from(12), &bands) <= annual_usc(high * Decimal::from(12), &bands));
    }

    #[test]
    fn test_usc_continuous_across_band_edges(offset_cents in 1i64..=100) {
        let bands = statutory_usc_bands();
        let offset = Decimal::new(offset_cents, 2);
        let top_rate = Decimal::new(8, 2);

        for ceiling in [12_012, 25_760, 70_044].map(Decimal::from) {
            let at = annual_usc(ceiling, &bands);
            prop_assert!(at - annual_usc(ceiling - offset, &bands) <= offset * top_rate);
            prop_assert!(annual_usc(ceiling + offset, &bands) - at <= offset * top_rate);
        }
    }

    #[test]
    fn test_net_pay_is_rounded_gross_minus_total(
        salary_cents in 0i64..=50_000_000,
        rate in health_rate(),
    ) {
        let employee = Employee::salaried(
            1,
            "Ada Lovelace",
            "Lecturer",
            Decimal::new(salary_cents, 2),
            1,
            NaiveDate::from_ymd_opt(2024, 9, 1).unwrap(),
            rate,
        );
        let pay_date = NaiveDate::from_ymd_opt(2025, 1, 25).unwrap();

        let calculation = calculate_pay(&employee, pay_date, &DeductionSchedule::default()).unwrap();
        prop_assert_eq!(
            calculation.payslip.net_pay,
            round_money(calculation.monthly_earnings - calculation.deductions.total)
        );
        prop_assert_eq!(calculation.payslip.gross_pay, round_money(calculation.monthly_earnings));
    }
}
