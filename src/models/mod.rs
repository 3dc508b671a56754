//! Core data models for the payroll engine.
//!
//! This module contains all the domain models used throughout the engine.

mod calculation_result;
mod employee;
mod payslip;

pub use calculation_result::{AuditStep, Deductions, PayCalculation};
pub use employee::{Employee, EmploymentType, HourlySupplement, PayBasis};
pub use payslip::Payslip;
