//! Calculation result models for the payroll engine.
//!
//! This module contains the [`Deductions`] breakdown produced by the
//! deduction engine, the [`PayCalculation`] produced by the payroll
//! calculator, and the [`AuditStep`] records both carry.

use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use super::Payslip;

/// A single step in the audit trace recording a calculation decision.
///
/// Each step captures the input, output, and reasoning for a rule application.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct AuditStep {
    /// The sequential step number.
    pub step_number: u32,
    /// The unique identifier of the rule that was applied.
    pub rule_id: String,
    /// The human-readable name of the rule.
    pub rule_name: String,
    /// The input data for this step.
    pub input: serde_json::Value,
    /// The output data from this step.
    pub output: serde_json::Value,
    /// Human-readable explanation of the decision.
    pub reasoning: String,
}

/// The statutory and voluntary deductions for one month of earnings.
///
/// All amounts are unrounded. `total` is the exact sum of the five
/// components.
///
/// # Example
///
/// ```
/// use payroll_engine::calculation::compute_deductions;
/// use rust_decimal::Decimal;
///
/// let deductions = compute_deductions(Decimal::from(3000), Decimal::from(5)).unwrap();
/// assert_eq!(deductions.total, deductions.sum_of_parts());
/// assert_eq!(deductions.income_tax, Decimal::from(600));
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Deductions {
    /// Health insurance at the employee's rate.
    pub health_insurance: Decimal,
    /// Union membership fees.
    pub union_fees: Decimal,
    /// Pay Related Social Insurance.
    pub prsi: Decimal,
    /// Universal Social Charge, monthly share of the annual figure.
    pub usc: Decimal,
    /// Flat-rate income tax.
    pub income_tax: Decimal,
    /// Sum of all components.
    pub total: Decimal,
    /// One audit step per component, in computation order.
    pub audit_steps: Vec<AuditStep>,
}

impl Deductions {
    /// Recomputes the sum of the five components.
    pub fn sum_of_parts(&self) -> Decimal {
        self.health_insurance + self.union_fees + self.prsi + self.usc + self.income_tax
    }
}

/// The full result of paying one employee for one cycle.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PayCalculation {
    /// Monthly earnings resolved from the employee's pay basis (unrounded).
    pub monthly_earnings: Decimal,
    /// The deduction breakdown on those earnings.
    pub deductions: Deductions,
    /// The payslip issued from this calculation.
    pub payslip: Payslip,
}
