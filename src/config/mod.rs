//! Configuration loading and management for the payroll engine.
//!
//! This module loads the payroll configuration from a YAML file: where the
//! datasets live, which day of the month the pay cycle may run, and the
//! deduction schedule.
//!
//! # Example
//!
//! ```no_run
//! use payroll_engine::config::ConfigLoader;
//!
//! let config = ConfigLoader::load("./config/payroll.yaml").unwrap();
//! println!("Pay day: {:?}", config.pay_day_of_month());
//! ```

mod loader;
mod types;

pub use loader::ConfigLoader;
pub use types::{
    DEFAULT_PAY_DAY_OF_MONTH, DataFiles, DataPaths, DeductionSchedule, PayrollConfig,
    PrsiSchedule, UscBand,
};
