//! Payslip model.
//!
//! A [`Payslip`] is the immutable record of one pay event. It snapshots the
//! employee's name at issue time and is never edited once appended to the
//! payslip history.

use std::fmt;

use chrono::NaiveDate;
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use crate::money::format_money;

/// An issued payslip.
///
/// # Example
///
/// ```
/// use payroll_engine::models::Payslip;
/// use chrono::NaiveDate;
/// use rust_decimal::Decimal;
/// use std::str::FromStr;
///
/// let payslip = Payslip {
///     employee_id: 1,
///     employee_name: "Ada Lovelace".to_string(),
///     pay_date: NaiveDate::from_ymd_opt(2025, 1, 25).unwrap(),
///     gross_pay: Decimal::from(3000),
///     net_pay: Decimal::from_str("2040.95").unwrap(),
/// };
/// assert_eq!(payslip.total_deductions(), Decimal::from_str("959.05").unwrap());
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Payslip {
    /// The employee the payslip was issued to.
    pub employee_id: u32,
    /// The employee's name at the time of issue.
    pub employee_name: String,
    /// The date the payslip was issued.
    pub pay_date: NaiveDate,
    /// Monthly earnings before deductions.
    pub gross_pay: Decimal,
    /// Monthly earnings after deductions. May be negative; never clamped.
    pub net_pay: Decimal,
}

impl Payslip {
    /// Gross pay minus net pay.
    pub fn total_deductions(&self) -> Decimal {
        self.gross_pay - self.net_pay
    }

    /// Picks the payslip with the latest pay date.
    ///
    /// History is kept in file order, which is not guaranteed to be date
    /// order, so dates are compared explicitly. On equal dates the entry
    /// appearing later in the history wins.
    ///
    /// # Examples
    ///
    /// ```
    /// use payroll_engine::models::Payslip;
    /// use chrono::NaiveDate;
    /// use rust_decimal::Decimal;
    ///
    /// let slip = |day| Payslip {
    ///     employee_id: 1,
    ///     employee_name: "Ada".to_string(),
    ///     pay_date: NaiveDate::from_ymd_opt(2025, day, 25).unwrap(),
    ///     gross_pay: Decimal::ZERO,
    ///     net_pay: Decimal::ZERO,
    /// };
    /// let history = vec![slip(3), slip(5), slip(4)];
    /// assert_eq!(Payslip::most_recent(&history).unwrap().pay_date.to_string(), "2025-05-25");
    /// ```
    pub fn most_recent(history: &[Payslip]) -> Option<&Payslip> {
        history.iter().max_by_key(|payslip| payslip.pay_date)
    }
}

impl fmt::Display for Payslip {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "Payslip [Employee ID: {}, Name: {}, Date: {}, Gross Pay: €{}, Net Pay: €{}]",
            self.employee_id,
            self.employee_name,
            self.pay_date,
            format_money(self.gross_pay),
            format_money(self.net_pay)
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::str::FromStr;

    fn dec(s: &str) -> Decimal {
        Decimal::from_str(s).unwrap()
    }

    fn create_payslip(month: u32, day: u32, net: &str) -> Payslip {
        Payslip {
            employee_id: 7,
            employee_name: "Ada Lovelace".to_string(),
            pay_date: NaiveDate::from_ymd_opt(2025, month, day).unwrap(),
            gross_pay: dec("3000"),
            net_pay: dec(net),
        }
    }

    #[test]
    fn test_most_recent_of_empty_history_is_none() {
        assert!(Payslip::most_recent(&[]).is_none());
    }

    #[test]
    fn test_most_recent_compares_dates_not_position() {
        let history = vec![
            create_payslip(6, 25, "1.00"),
            create_payslip(2, 25, "2.00"),
            create_payslip(4, 25, "3.00"),
        ];
        assert_eq!(Payslip::most_recent(&history).unwrap().net_pay, dec("1.00"));
    }

    #[test]
    fn test_most_recent_tie_prefers_later_entry() {
        let history = vec![create_payslip(6, 25, "1.00"), create_payslip(6, 25, "2.00")];
        assert_eq!(Payslip::most_recent(&history).unwrap().net_pay, dec("2.00"));
    }

    #[test]
    fn test_total_deductions_can_exceed_gross() {
        let payslip = create_payslip(1, 25, "-150.00");
        assert_eq!(payslip.total_deductions(), dec("3150.00"));
    }

    #[test]
    fn test_display_formats_money_to_cents() {
        let payslip = create_payslip(1, 25, "2040.95");
        assert_eq!(
            payslip.to_string(),
            "Payslip [Employee ID: 7, Name: Ada Lovelace, Date: 2025-01-25, Gross Pay: €3000.00, Net Pay: €2040.95]"
        );
    }
}
