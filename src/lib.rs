//! Payroll record store and deduction engine.
//!
//! This crate keeps employee, hourly supplement and payslip records in flat
//! comma-separated files and calculates monthly pay with Irish statutory
//! deductions: health insurance, union fees, PRSI, USC and income tax.
//!
//! # Example
//!
//! ```no_run
//! use payroll_engine::config::ConfigLoader;
//! use payroll_engine::service::PayrollService;
//! use chrono::NaiveDate;
//!
//! let loader = ConfigLoader::load("./config/payroll.yaml").unwrap();
//! let service = PayrollService::from_loader(&loader);
//!
//! let report = service
//!     .run_pay_cycle(NaiveDate::from_ymd_opt(2025, 1, 25).unwrap())
//!     .unwrap();
//! for payslip in &report.payslips {
//!     println!("{}", payslip);
//! }
//! ```

#![warn(missing_docs)]

pub mod calculation;
pub mod config;
pub mod error;
pub mod models;
pub mod money;
pub mod service;
pub mod store;
pub mod validation;
