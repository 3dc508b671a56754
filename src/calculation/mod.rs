//! Calculation logic for the payroll engine.
//!
//! This module contains the deduction rules (health insurance, union fees,
//! PRSI, USC and income tax), the deduction engine that combines them,
//! monthly earnings resolution for salaried and hourly employees, and the
//! payroll calculator that issues payslips.

mod deductions;
mod earnings;
mod flat_rate;
mod payslip;
mod prsi;
mod usc;

pub use deductions::{compute_deductions, compute_deductions_with};
pub use earnings::monthly_earnings;
pub use flat_rate::{
    FlatRateResult, INCOME_TAX_RATE, UNION_FEE_RATE, calculate_health_insurance,
    calculate_income_tax, calculate_union_fees,
};
pub use payslip::{calculate_pay, generate_payslip};
pub use prsi::{PRSI_RATE, PRSI_WEEKLY_THRESHOLD, PrsiResult, WEEKS_PER_MONTH, calculate_prsi};
pub use usc::{MONTHS_PER_YEAR, UscResult, annual_usc, calculate_usc, statutory_usc_bands};
