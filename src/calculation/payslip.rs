//! The payroll calculator.
//!
//! Turns an employee snapshot into an issued [`Payslip`]. The calculator is
//! a pure transform: it never touches the employee record, so clearing an
//! hourly employee's pay-cycle state is left to the caller once the payslip
//! has been recorded.

use chrono::NaiveDate;

use crate::config::DeductionSchedule;
use crate::error::PayrollResult;
use crate::models::{Employee, PayCalculation, Payslip};
use crate::money::round_money;

use super::deductions::compute_deductions_with;
use super::earnings::monthly_earnings;

/// Calculates pay for one employee, keeping the full deduction breakdown.
///
/// Gross and net pay on the payslip are rounded to cents; the breakdown
/// stays unrounded. Net pay is not clamped and can be negative when the
/// deductions exceed the earnings.
///
/// # Examples
///
/// ```
/// use payroll_engine::calculation::calculate_pay;
/// use payroll_engine::config::DeductionSchedule;
/// use payroll_engine::models::Employee;
/// use chrono::NaiveDate;
/// use rust_decimal::Decimal;
/// use std::str::FromStr;
///
/// let employee = Employee::salaried(
///     1,
///     "Ada Lovelace",
///     "Lecturer",
///     Decimal::from(36_000),
///     3,
///     NaiveDate::from_ymd_opt(2024, 9, 1).unwrap(),
///     Decimal::from(5),
/// );
/// let pay_date = NaiveDate::from_ymd_opt(2025, 1, 25).unwrap();
///
/// let calculation = calculate_pay(&employee, pay_date, &DeductionSchedule::default()).unwrap();
/// assert_eq!(calculation.payslip.gross_pay, Decimal::from(3000));
/// assert_eq!(calculation.payslip.net_pay, Decimal::from_str("2040.95").unwrap());
/// ```
pub fn calculate_pay(
    employee: &Employee,
    pay_date: NaiveDate,
    schedule: &DeductionSchedule,
) -> PayrollResult<PayCalculation> {
    let earnings = monthly_earnings(employee)?;
    let deductions =
        compute_deductions_with(earnings, employee.health_insurance_rate, schedule)?;
    let net_pay = earnings - deductions.total;

    let payslip = Payslip {
        employee_id: employee.employee_id,
        employee_name: employee.name.clone(),
        pay_date,
        gross_pay: round_money(earnings),
        net_pay: round_money(net_pay),
    };

    Ok(PayCalculation {
        monthly_earnings: earnings,
        deductions,
        payslip,
    })
}

/// Generates a payslip with the statutory deduction schedule.
pub fn generate_payslip(employee: &Employee, pay_date: NaiveDate) -> PayrollResult<Payslip> {
    calculate_pay(employee, pay_date, &DeductionSchedule::default())
        .map(|calculation| calculation.payslip)
}
