//! Error types for the payroll engine.
//!
//! This module provides strongly-typed errors using the `thiserror` crate
//! for every failure the record store, deduction engine and payroll service
//! can report.

use std::io;

use chrono::NaiveDate;
use thiserror::Error;

/// The main error type for the payroll engine.
///
/// All fallible operations return this error type. Errors are never retried
/// inside the crate; they propagate to the immediate caller.
///
/// # Example
///
/// ```
/// use payroll_engine::error::PayrollError;
///
/// let error = PayrollError::EmployeeNotFound { employee_id: 42 };
/// assert_eq!(error.to_string(), "No employee found with ID 42");
/// ```
#[derive(Debug, Error)]
pub enum PayrollError {
    /// An input value was malformed or out of range.
    #[error("Invalid value for '{field}': {message}")]
    Validation {
        /// The field that was invalid.
        field: String,
        /// A description of what made the value invalid.
        message: String,
    },

    /// No live employee record carries the requested ID.
    #[error("No employee found with ID {employee_id}")]
    EmployeeNotFound {
        /// The ID that was looked up.
        employee_id: u32,
    },

    /// The salary scale has no entry for the position and point.
    #[error("No salary scale entry for position '{position}' at point {salary_point}")]
    SalaryScaleNotFound {
        /// The position that was looked up.
        position: String,
        /// The scale point that was looked up.
        salary_point: u32,
    },

    /// An employee with the same ID already exists.
    #[error("Employee ID {employee_id} is already in use")]
    DuplicateEmployeeId {
        /// The conflicting ID.
        employee_id: u32,
    },

    /// Reading or writing a data file failed.
    #[error("Storage error on '{path}': {source}")]
    Storage {
        /// The file being accessed.
        path: String,
        /// The underlying I/O error.
        #[source]
        source: io::Error,
    },

    /// A data file contained a row that could not be decoded.
    #[error("Corrupt record in '{path}' at line {line}: {message}")]
    CorruptRecord {
        /// The file containing the row.
        path: String,
        /// The 1-based line number of the row.
        line: usize,
        /// A description of the decoding failure.
        message: String,
    },

    /// The employee's kind or state does not allow the requested action.
    #[error("Employee {employee_id} is not eligible: {message}")]
    Ineligible {
        /// The employee the action was attempted on.
        employee_id: u32,
        /// Why the action was refused.
        message: String,
    },

    /// A pay cycle was requested outside the configured pay day.
    #[error("Payslips can only be generated on day {pay_day} of the month (requested {date})")]
    PayCycleClosed {
        /// The date the run was requested for.
        date: NaiveDate,
        /// The configured pay day of the month.
        pay_day: u32,
    },

    /// Configuration file was not found at the specified path.
    #[error("Configuration file not found: {path}")]
    ConfigNotFound {
        /// The path that was not found.
        path: String,
    },

    /// Configuration file could not be parsed or failed validation.
    #[error("Failed to parse configuration file '{path}': {message}")]
    ConfigParseError {
        /// The path to the file that failed to parse.
        path: String,
        /// A description of the parse error.
        message: String,
    },
}

impl PayrollError {
    /// Builds a [`PayrollError::Validation`] for `field`.
    pub fn validation(field: impl Into<String>, message: impl Into<String>) -> Self {
        Self::Validation {
            field: field.into(),
            message: message.into(),
        }
    }

    /// Returns true for the recoverable "nothing there" conditions.
    ///
    /// Callers are expected to re-prompt or branch on these rather than abort.
    pub fn is_not_found(&self) -> bool {
        matches!(
            self,
            Self::EmployeeNotFound { .. } | Self::SalaryScaleNotFound { .. }
        )
    }
}

/// A type alias for Results that return PayrollError.
pub type PayrollResult<T> = Result<T, PayrollError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_validation_displays_field_and_message() {
        let error = PayrollError::validation("health_insurance_rate", "must be between 0 and 100");
        assert_eq!(
            error.to_string(),
            "Invalid value for 'health_insurance_rate': must be between 0 and 100"
        );
    }

    #[test]
    fn test_salary_scale_not_found_displays_position_and_point() {
        let error = PayrollError::SalaryScaleNotFound {
            position: "Lecturer".to_string(),
            salary_point: 7,
        };
        assert_eq!(
            error.to_string(),
            "No salary scale entry for position 'Lecturer' at point 7"
        );
    }

    #[test]
    fn test_duplicate_id_displays_id() {
        let error = PayrollError::DuplicateEmployeeId { employee_id: 3 };
        assert_eq!(error.to_string(), "Employee ID 3 is already in use");
    }

    #[test]
    fn test_corrupt_record_displays_location() {
        let error = PayrollError::CorruptRecord {
            path: "Employees.csv".to_string(),
            line: 4,
            message: "expected 8 fields, found 7".to_string(),
        };
        assert_eq!(
            error.to_string(),
            "Corrupt record in 'Employees.csv' at line 4: expected 8 fields, found 7"
        );
    }

    #[test]
    fn test_pay_cycle_closed_displays_date() {
        let error = PayrollError::PayCycleClosed {
            date: NaiveDate::from_ymd_opt(2025, 3, 14).unwrap(),
            pay_day: 25,
        };
        assert_eq!(
            error.to_string(),
            "Payslips can only be generated on day 25 of the month (requested 2025-03-14)"
        );
    }

    #[test]
    fn test_storage_error_exposes_source() {
        let error = PayrollError::Storage {
            path: "Payslips.csv".to_string(),
            source: io::Error::new(io::ErrorKind::PermissionDenied, "denied"),
        };
        assert!(std::error::Error::source(&error).is_some());
        assert!(error.to_string().contains("Payslips.csv"));
    }

    #[test]
    fn test_is_not_found_covers_lookup_failures() {
        assert!(PayrollError::EmployeeNotFound { employee_id: 1 }.is_not_found());
        assert!(
            PayrollError::SalaryScaleNotFound {
                position: "Clerk".to_string(),
                salary_point: 1,
            }
            .is_not_found()
        );
        assert!(!PayrollError::DuplicateEmployeeId { employee_id: 1 }.is_not_found());
    }

    #[test]
    fn test_errors_implement_std_error() {
        fn assert_error<T: std::error::Error>() {}
        assert_error::<PayrollError>();
    }

    #[test]
    fn test_error_propagation_with_question_mark() {
        fn returns_not_found() -> PayrollResult<()> {
            Err(PayrollError::EmployeeNotFound { employee_id: 9 })
        }

        fn propagates_error() -> PayrollResult<()> {
            returns_not_found()?;
            Ok(())
        }

        assert!(propagates_error().is_err());
    }
}
