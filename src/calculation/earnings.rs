//! Monthly earnings resolution.
//!
//! The single point where employee-kind-specific behaviour enters the
//! otherwise uniform deduction pipeline.

use rust_decimal::Decimal;

use crate::error::PayrollResult;
use crate::models::{Employee, PayBasis};

use super::usc::MONTHS_PER_YEAR;

/// Resolves an employee's monthly earnings from their pay basis.
///
/// Salaried employees earn one twelfth of their annual salary. Hourly
/// employees earn their hourly rate times the hours reported for the cycle;
/// a product too large for a `Decimal` is a `Validation` error.
///
/// # Examples
///
/// ```
/// use payroll_engine::calculation::monthly_earnings;
/// use payroll_engine::models::Employee;
/// use chrono::NaiveDate;
/// use rust_decimal::Decimal;
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
/// assert_eq!(monthly_earnings(&employee).unwrap(), Decimal::from(3000));
/// ```
pub fn monthly_earnings(employee: &Employee) -> PayrollResult<Decimal> {
    match &employee.pay_basis {
        PayBasis::Salaried => Ok(employee.salary / MONTHS_PER_YEAR),
        PayBasis::Hourly(supplement) => supplement.requested_amount(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::PayrollError;
    use chrono::NaiveDate;
    use std::str::FromStr;

    fn dec(s: &str) -> Decimal {
        Decimal::from_str(s).unwrap()
    }

    fn date() -> NaiveDate {
        NaiveDate::from_ymd_opt(2024, 9, 1).unwrap()
    }

    #[test]
    fn test_salaried_earnings_are_twelfth_of_salary() {
        let employee = Employee::salaried(1, "A", "Lecturer", dec("50000"), 1, date(), dec("0"));
        assert_eq!(monthly_earnings(&employee).unwrap().round_dp(2), dec("4166.67"));
    }

    #[test]
    fn test_hourly_earnings_are_rate_times_hours() {
        let mut employee = Employee::hourly(2, "B", "Tutor", dec("20"), date());
        employee.hourly_supplement_mut().unwrap().hours_worked = 100;
        assert_eq!(monthly_earnings(&employee).unwrap(), dec("2000"));
    }

    #[test]
    fn test_hourly_earnings_ignore_salary_field() {
        let mut employee = Employee::hourly(2, "B", "Tutor", dec("12.50"), date());
        employee.salary = dec("99999");
        employee.hourly_supplement_mut().unwrap().hours_worked = 8;
        assert_eq!(monthly_earnings(&employee).unwrap(), dec("100"));
    }

    #[test]
    fn test_hourly_without_hours_earns_nothing() {
        let employee = Employee::hourly(2, "B", "Tutor", dec("20"), date());
        assert_eq!(monthly_earnings(&employee).unwrap(), Decimal::ZERO);
    }

    #[test]
    fn test_hourly_overflow_is_validation_error() {
        let mut employee = Employee::hourly(2, "B", "Tutor", dec("10000000000000000000000000"), date());
        employee.hourly_supplement_mut().unwrap().hours_worked = 100_000;
        assert!(matches!(
            monthly_earnings(&employee),
            Err(PayrollError::Validation { .. })
        ));
    }
}
