//! Configuration types for the payroll engine.
//!
//! This module contains the strongly-typed configuration structures that
//! are deserialized from the YAML configuration file. Every field has a
//! default, so an empty file yields the statutory schedule and the
//! conventional file names.

use std::path::{Path, PathBuf};

use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use crate::calculation::{
    INCOME_TAX_RATE, PRSI_RATE, PRSI_WEEKLY_THRESHOLD, UNION_FEE_RATE, WEEKS_PER_MONTH,
    statutory_usc_bands,
};

/// Default pay day of the month for the pay cycle gate.
pub const DEFAULT_PAY_DAY_OF_MONTH: u32 = 25;

/// File names of the four datasets, relative to the data directory.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct DataFiles {
    /// Employee records.
    pub employees: PathBuf,
    /// Hourly supplement records.
    pub hourly_supplements: PathBuf,
    /// Append-only payslip history.
    pub payslips: PathBuf,
    /// Externally maintained salary scale.
    pub salary_scale: PathBuf,
}

impl Default for DataFiles {
    fn default() -> Self {
        Self {
            employees: PathBuf::from("Employees.csv"),
            hourly_supplements: PathBuf::from("PartTimeEmployees.csv"),
            payslips: PathBuf::from("Payslips.csv"),
            salary_scale: PathBuf::from("ULSalaryInformation.csv"),
        }
    }
}

/// Fully resolved dataset locations.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DataPaths {
    /// Employee records.
    pub employees: PathBuf,
    /// Hourly supplement records.
    pub hourly_supplements: PathBuf,
    /// Append-only payslip history.
    pub payslips: PathBuf,
    /// Externally maintained salary scale.
    pub salary_scale: PathBuf,
}

impl DataPaths {
    /// Resolves the conventional file names inside `dir`.
    pub fn in_dir(dir: impl AsRef<Path>) -> Self {
        DataFiles::default().resolve(dir.as_ref())
    }
}

impl DataFiles {
    /// Joins each file name onto `dir`. Absolute names are kept as-is.
    pub fn resolve(&self, dir: &Path) -> DataPaths {
        DataPaths {
            employees: dir.join(&self.employees),
            hourly_supplements: dir.join(&self.hourly_supplements),
            payslips: dir.join(&self.payslips),
            salary_scale: dir.join(&self.salary_scale),
        }
    }
}

/// PRSI threshold parameters.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct PrsiSchedule {
    /// Divisor converting monthly earnings to weekly earnings.
    pub weeks_per_month: Decimal,
    /// Weekly earnings at or below which no PRSI is due.
    pub weekly_threshold: Decimal,
    /// Rate applied to the full monthly earnings above the threshold.
    pub rate: Decimal,
}

impl Default for PrsiSchedule {
    fn default() -> Self {
        Self {
            weeks_per_month: WEEKS_PER_MONTH,
            weekly_threshold: PRSI_WEEKLY_THRESHOLD,
            rate: PRSI_RATE,
        }
    }
}

/// One marginal band of the Universal Social Charge.
///
/// The band runs from the previous band's ceiling (or zero) up to
/// `ceiling`. The top band has no ceiling.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct UscBand {
    /// Upper bound of annual earnings in this band, inclusive.
    pub ceiling: Option<Decimal>,
    /// Rate applied to the earnings falling inside the band.
    pub rate: Decimal,
}

/// The rates and thresholds used by the deduction engine.
///
/// `Default` is the statutory schedule.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct DeductionSchedule {
    /// Union fee rate on monthly earnings.
    pub union_fee_rate: Decimal,
    /// Flat income tax rate on monthly earnings.
    pub income_tax_rate: Decimal,
    /// PRSI threshold parameters.
    pub prsi: PrsiSchedule,
    /// USC bands on annual earnings, lowest first.
    pub usc_bands: Vec<UscBand>,
}

impl Default for DeductionSchedule {
    fn default() -> Self {
        Self {
            union_fee_rate: UNION_FEE_RATE,
            income_tax_rate: INCOME_TAX_RATE,
            prsi: PrsiSchedule::default(),
            usc_bands: statutory_usc_bands(),
        }
    }
}

impl DeductionSchedule {
    /// Checks the schedule is internally consistent.
    ///
    /// Returns a description of the first problem found.
    pub fn validate(&self) -> Result<(), String> {
        let rate_in_range = |rate: Decimal| rate >= Decimal::ZERO && rate <= Decimal::ONE;

        for (name, rate) in [
            ("union_fee_rate", self.union_fee_rate),
            ("income_tax_rate", self.income_tax_rate),
            ("prsi.rate", self.prsi.rate),
        ] {
            if !rate_in_range(rate) {
                return Err(format!("{} must be between 0 and 1 (got {})", name, rate));
            }
        }

        if self.prsi.weeks_per_month <= Decimal::ZERO {
            return Err("prsi.weeks_per_month must be positive".to_string());
        }
        if self.prsi.weekly_threshold < Decimal::ZERO {
            return Err("prsi.weekly_threshold must not be negative".to_string());
        }

        let Some((top, lower)) = self.usc_bands.split_last() else {
            return Err("usc_bands must not be empty".to_string());
        };
        if top.ceiling.is_some() {
            return Err("the last USC band must have no ceiling".to_string());
        }

        let mut floor = Decimal::ZERO;
        for (index, band) in lower.iter().enumerate() {
            let Some(ceiling) = band.ceiling else {
                return Err(format!("USC band {} is open-ended but not last", index + 1));
            };
            if ceiling <= floor {
                return Err(format!(
                    "USC band ceilings must be strictly increasing (band {} ceiling {})",
                    index + 1,
                    ceiling
                ));
            }
            floor = ceiling;
        }

        match self.usc_bands.iter().find(|band| !rate_in_range(band.rate)) {
            Some(band) => Err(format!(
                "USC band rates must be between 0 and 1 (got {})",
                band.rate
            )),
            None => Ok(()),
        }
    }
}

/// The complete payroll configuration.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct PayrollConfig {
    /// Directory holding the datasets.
    pub data_dir: PathBuf,
    /// Dataset file names.
    pub files: DataFiles,
    /// Day of the month on which pay cycles may run. `None` disables the gate.
    pub pay_day_of_month: Option<u32>,
    /// Deduction rates and thresholds.
    pub deductions: DeductionSchedule,
}

impl Default for PayrollConfig {
    fn default() -> Self {
        Self {
            data_dir: PathBuf::from("."),
            files: DataFiles::default(),
            pay_day_of_month: Some(DEFAULT_PAY_DAY_OF_MONTH),
            deductions: DeductionSchedule::default(),
        }
    }
}

impl PayrollConfig {
    /// Returns the dataset locations under `data_dir`.
    pub fn data_paths(&self) -> DataPaths {
        self.files.resolve(&self.data_dir)
    }

    /// Checks the pay day and the deduction schedule.
    pub fn validate(&self) -> Result<(), String> {
        if let Some(day) = self.pay_day_of_month {
            if !(1..=31).contains(&day) {
                return Err(format!("pay_day_of_month must be 1-31 (got {})", day));
            }
        }
        self.deductions.validate()
    }
}
