//! Configuration loading functionality.
//!
//! This module provides the [`ConfigLoader`] type for loading the payroll
//! configuration from a YAML file.

use std::fs;
use std::path::Path;

use tracing::debug;

use crate::error::{PayrollError, PayrollResult};

use super::types::{DataPaths, DeductionSchedule, PayrollConfig};

/// Loads and provides access to the payroll configuration.
///
/// # File Format
///
/// ```text
/// data_dir: ./data
/// files:
///   employees: Employees.csv
///   hourly_supplements: PartTimeEmployees.csv
///   payslips: Payslips.csv
///   salary_scale: ULSalaryInformation.csv
/// pay_day_of_month: 25
/// ```
///
/// Every key is optional. A relative `data_dir` is resolved against the
/// directory containing the configuration file.
///
/// # Example
///
/// ```no_run
/// use payroll_engine::config::ConfigLoader;
///
/// let loader = ConfigLoader::load("./config/payroll.yaml").unwrap();
/// println!("Employees file: {}", loader.data_paths().employees.display());
/// ```
#[derive(Debug, Clone)]
pub struct ConfigLoader {
    config: PayrollConfig,
}

impl ConfigLoader {
    /// Loads configuration from the specified YAML file.
    ///
    /// # Returns
    ///
    /// Returns a `ConfigLoader` instance on success, or an error if:
    /// - The file is missing (`ConfigNotFound`)
    /// - The file contains invalid YAML or an inconsistent deduction
    ///   schedule (`ConfigParseError`)
    pub fn load<P: AsRef<Path>>(path: P) -> PayrollResult<Self> {
        let path = path.as_ref();
        let mut config = Self::load_yaml::<PayrollConfig>(path)?;

        config
            .validate()
            .map_err(|message| PayrollError::ConfigParseError {
                path: path.display().to_string(),
                message,
            })?;

        if config.data_dir.is_relative() {
            if let Some(parent) = path.parent() {
                config.data_dir = parent.join(&config.data_dir);
            }
        }

        debug!(
            path = %path.display(),
            data_dir = %config.data_dir.display(),
            pay_day_of_month = ?config.pay_day_of_month,
            "Loaded payroll configuration"
        );

        Ok(Self { config })
    }

    /// Wraps an already-built configuration.
    pub fn from_config(config: PayrollConfig) -> Self {
        Self { config }
    }

    /// Loads and parses a YAML file.
    fn load_yaml<T: serde::de::DeserializeOwned>(path: &Path) -> PayrollResult<T> {
        let path_str = path.display().to_string();

        let content = fs::read_to_string(path).map_err(|_| PayrollError::ConfigNotFound {
            path: path_str.clone(),
        })?;

        // An empty document means "all defaults".
        if content.trim().is_empty() {
            return serde_yaml::from_str("{}").map_err(|e| PayrollError::ConfigParseError {
                path: path_str,
                message: e.to_string(),
            });
        }

        serde_yaml::from_str(&content).map_err(|e| PayrollError::ConfigParseError {
            path: path_str,
            message: e.to_string(),
        })
    }

    /// Returns the underlying configuration.
    pub fn config(&self) -> &PayrollConfig {
        &self.config
    }

    /// Consumes the loader, returning the configuration.
    pub fn into_config(self) -> PayrollConfig {
        self.config
    }

    /// Returns the resolved dataset locations.
    pub fn data_paths(&self) -> DataPaths {
        self.config.data_paths()
    }

    /// Returns the deduction schedule.
    pub fn deduction_schedule(&self) -> &DeductionSchedule {
        &self.config.deductions
    }

    /// Returns the pay day gate, if enabled.
    pub fn pay_day_of_month(&self) -> Option<u32> {
        self.config.pay_day_of_month
    }
}
