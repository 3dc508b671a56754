//! The read-only salary scale table.

use std::path::Path;

use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use tracing::debug;

use super::codec::{CsvRecord, MissingFile, read_records};
use crate::error::PayrollResult;
use crate::money::format_money;

/// One row of the salary scale: the annual salary for a position at a point.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SalaryScaleEntry {
    /// Position title.
    pub position: String,
    /// Point on the scale for that position.
    pub salary_point: u32,
    /// Annual salary at that point.
    pub salary: Decimal,
}

impl CsvRecord for SalaryScaleEntry {
    const HEADER: &'static str = "position,salaryPoint,salary";

    fn to_row(&self) -> String {
        format!(
            "{},{},{}",
            self.position,
            self.salary_point,
            format_money(self.salary)
        )
    }

    fn from_fields(fields: &[&str]) -> Result<Self, String> {
        if fields.len() != 3 {
            return Err(format!("expected 3 fields, found {}", fields.len()));
        }
        Ok(SalaryScaleEntry {
            position: fields[0].to_string(),
            salary_point: fields[1]
                .parse()
                .map_err(|_| format!("invalid salaryPoint '{}'", fields[1]))?,
            salary: fields[2]
                .parse()
                .map_err(|_| format!("invalid salary '{}'", fields[2]))?,
        })
    }
}

fn same_position(a: &str, b: &str) -> bool {
    a.trim().to_lowercase() == b.trim().to_lowercase()
}

/// Looks up the salary for `position` at `salary_point`.
///
/// Positions match case-insensitively. The table must exist; a missing file
/// is a storage error rather than an empty scale.
pub(crate) fn lookup_salary(
    path: &Path,
    position: &str,
    salary_point: u32,
) -> PayrollResult<Option<Decimal>> {
    let entries: Vec<SalaryScaleEntry> = read_records(path, MissingFile::Error)?;
    let salary = entries
        .into_iter()
        .find(|entry| entry.salary_point == salary_point && same_position(&entry.position, position))
        .map(|entry| entry.salary);

    debug!(
        position,
        salary_point,
        found = salary.is_some(),
        "Salary scale lookup"
    );
    Ok(salary)
}
