//! Employee model and related types.
//!
//! An [`Employee`] is a single entity whose [`PayBasis`] carries the
//! hourly-only facet, so an hourly supplement exists exactly when the
//! employee is paid by the hour.

use std::fmt;
use std::str::FromStr;

use chrono::NaiveDate;
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use crate::error::{PayrollError, PayrollResult};
use crate::validation::{require_money, require_percentage, require_text};

/// The kind tag of an employee, as written to the employee file.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum EmploymentType {
    /// Salaried employment, paid a fixed annual salary.
    FullTime,
    /// Hourly employment, paid for hours reported in a payment request.
    PartTime,
}

impl EmploymentType {
    /// Returns the canonical file representation (`FULL_TIME` / `PART_TIME`).
    pub fn as_str(&self) -> &'static str {
        match self {
            EmploymentType::FullTime => "FULL_TIME",
            EmploymentType::PartTime => "PART_TIME",
        }
    }
}

impl fmt::Display for EmploymentType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for EmploymentType {
    type Err = PayrollError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim() {
            "FULL_TIME" => Ok(EmploymentType::FullTime),
            "PART_TIME" => Ok(EmploymentType::PartTime),
            other => Err(PayrollError::validation(
                "employee_type",
                format!("expected FULL_TIME or PART_TIME, got '{}'", other),
            )),
        }
    }
}

/// Hourly-only payroll state.
///
/// `hours_worked` and `payment_request_submitted` are transient: they hold
/// the current pay cycle's request and are cleared once a payslip for that
/// cycle has been recorded.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct HourlySupplement {
    /// Pay per hour worked.
    pub hourly_rate: Decimal,
    /// Hours reported for the current pay cycle.
    pub hours_worked: u32,
    /// Whether a payment request is pending for the current pay cycle.
    pub payment_request_submitted: bool,
}

impl HourlySupplement {
    /// Creates a supplement with no hours and no pending request.
    pub fn new(hourly_rate: Decimal) -> Self {
        Self {
            hourly_rate,
            hours_worked: 0,
            payment_request_submitted: false,
        }
    }

    /// The amount the pending hours are worth at the current rate.
    ///
    /// # Examples
    ///
    /// ```
    /// use payroll_engine::models::HourlySupplement;
    /// use rust_decimal::Decimal;
    ///
    /// let mut supplement = HourlySupplement::new(Decimal::from(20));
    /// supplement.hours_worked = 100;
    /// assert_eq!(supplement.requested_amount().unwrap(), Decimal::from(2000));
    /// ```
    ///
    /// Fails with a `Validation` error if the product does not fit in a
    /// `Decimal`.
    pub fn requested_amount(&self) -> PayrollResult<Decimal> {
        self.hourly_rate
            .checked_mul(Decimal::from(self.hours_worked))
            .ok_or_else(|| {
                PayrollError::validation(
                    "hourly_rate",
                    format!(
                        "{} x {} hours is out of range",
                        self.hourly_rate, self.hours_worked
                    ),
                )
            })
    }

    /// Clears the transient pay-cycle fields.
    pub fn reset_pay_cycle(&mut self) {
        self.hours_worked = 0;
        self.payment_request_submitted = false;
    }
}

/// How an employee's monthly earnings are derived.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "basis", rename_all = "snake_case")]
pub enum PayBasis {
    /// Monthly earnings are one twelfth of the annual salary.
    Salaried,
    /// Monthly earnings are the hourly rate times the hours worked.
    Hourly(HourlySupplement),
}

/// Represents an employee record.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Employee {
    /// Unique positive identifier, never reused while the record exists.
    pub employee_id: u32,
    /// Full name.
    pub name: String,
    /// Job title, used as the salary scale lookup key.
    pub position: String,
    /// Gross annual salary (zero for hourly employees).
    pub salary: Decimal,
    /// Salary scale point (zero for hourly employees).
    pub salary_point: u32,
    /// Date of the last promotion, or of creation if never promoted.
    pub last_promotion_date: NaiveDate,
    /// Health insurance deduction as a percentage of monthly earnings.
    pub health_insurance_rate: Decimal,
    /// Salaried or hourly, with the hourly facet attached.
    pub pay_basis: PayBasis,
}

impl Employee {
    /// Creates a salaried employee record.
    pub fn salaried(
        employee_id: u32,
        name: impl Into<String>,
        position: impl Into<String>,
        salary: Decimal,
        salary_point: u32,
        last_promotion_date: NaiveDate,
        health_insurance_rate: Decimal,
    ) -> Self {
        Self {
            employee_id,
            name: name.into(),
            position: position.into(),
            salary,
            salary_point,
            last_promotion_date,
            health_insurance_rate,
            pay_basis: PayBasis::Salaried,
        }
    }

    /// Creates an hourly employee record with a fresh supplement.
    ///
    /// Hourly employees carry no salary, scale point or health insurance.
    pub fn hourly(
        employee_id: u32,
        name: impl Into<String>,
        position: impl Into<String>,
        hourly_rate: Decimal,
        last_promotion_date: NaiveDate,
    ) -> Self {
        Self {
            employee_id,
            name: name.into(),
            position: position.into(),
            salary: Decimal::ZERO,
            salary_point: 0,
            last_promotion_date,
            health_insurance_rate: Decimal::ZERO,
            pay_basis: PayBasis::Hourly(HourlySupplement::new(hourly_rate)),
        }
    }

    /// Returns the kind tag derived from the pay basis.
    ///
    /// # Examples
    ///
    /// ```
    /// use payroll_engine::models::{Employee, EmploymentType};
    /// use chrono::NaiveDate;
    /// use rust_decimal::Decimal;
    ///
    /// let employee = Employee::hourly(
    ///     1,
    ///     "Grace Hopper",
    ///     "Tutor",
    ///     Decimal::from(20),
    ///     NaiveDate::from_ymd_opt(2025, 1, 6).unwrap(),
    /// );
    /// assert_eq!(employee.employment_type(), EmploymentType::PartTime);
    /// ```
    pub fn employment_type(&self) -> EmploymentType {
        match self.pay_basis {
            PayBasis::Salaried => EmploymentType::FullTime,
            PayBasis::Hourly(_) => EmploymentType::PartTime,
        }
    }

    /// Returns true if the employee is paid by the hour.
    pub fn is_hourly(&self) -> bool {
        matches!(self.pay_basis, PayBasis::Hourly(_))
    }

    /// Returns the hourly facet, if any.
    pub fn hourly_supplement(&self) -> Option<&HourlySupplement> {
        match &self.pay_basis {
            PayBasis::Hourly(supplement) => Some(supplement),
            PayBasis::Salaried => None,
        }
    }

    /// Returns the hourly facet mutably, if any.
    pub fn hourly_supplement_mut(&mut self) -> Option<&mut HourlySupplement> {
        match &mut self.pay_basis {
            PayBasis::Hourly(supplement) => Some(supplement),
            PayBasis::Salaried => None,
        }
    }

    /// Returns true if the employee may be promoted along the salary scale.
    pub fn can_be_promoted(&self) -> bool {
        !self.is_hourly()
    }

    /// Returns true if a payment request can be submitted right now.
    pub fn can_submit_payment_request(&self) -> bool {
        self.hourly_supplement()
            .is_some_and(|supplement| !supplement.payment_request_submitted)
    }

    /// Clears hourly pay-cycle state after a payslip has been recorded.
    ///
    /// Returns true if the record changed and needs to be written back.
    pub fn reset_pay_cycle(&mut self) -> bool {
        match self.hourly_supplement_mut() {
            Some(supplement)
                if supplement.hours_worked != 0 || supplement.payment_request_submitted =>
            {
                supplement.reset_pay_cycle();
                true
            }
            _ => false,
        }
    }

    /// Checks every field against the record constraints.
    pub fn validate(&self) -> PayrollResult<()> {
        if self.employee_id == 0 {
            return Err(PayrollError::validation(
                "employee_id",
                "must be a positive integer",
            ));
        }
        require_text("name", &self.name)?;
        require_text("position", &self.position)?;
        require_money("salary", self.salary)?;
        require_percentage("health_insurance_rate", self.health_insurance_rate)?;

        if let Some(supplement) = self.hourly_supplement() {
            require_money("hourly_rate", supplement.hourly_rate)?;
        }
        Ok(())
    }
}

impl fmt::Display for Employee {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(f, "Employee Info:")?;
        writeln!(f, " ID = {}", self.employee_id)?;
        writeln!(f, " Name = {}", self.name)?;
        writeln!(f, " Type = {}", self.employment_type())?;
        writeln!(f, " Position = {}", self.position)?;
        writeln!(f, " Salary = {}", self.salary)?;
        writeln!(f, " SalaryPoint = {}", self.salary_point)?;
        writeln!(f, " HealthInsuranceRate = {}", self.health_insurance_rate)?;
        write!(f, " LastPromotionDate = {}", self.last_promotion_date)?;

        if let Some(supplement) = self.hourly_supplement() {
            writeln!(f)?;
            writeln!(f, " Hours Worked = {}", supplement.hours_worked)?;
            writeln!(f, " Hourly Rate = {}", supplement.hourly_rate)?;
            write!(
                f,
                " Payment Request Submitted = {}",
                supplement.payment_request_submitted
            )?;
        }
        Ok(())
    }
}
