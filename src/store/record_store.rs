//! Persistent employee, supplement and payslip records.

use std::collections::{HashMap, HashSet};
use std::path::Path;

use rust_decimal::Decimal;
use tracing::{debug, info, warn};

use super::codec::{MissingFile, SupplementRow, append_records, read_records, rewrite_records};
use super::salary_scale::lookup_salary;
use crate::config::{DataPaths, PayrollConfig};
use crate::error::{PayrollError, PayrollResult};
use crate::models::{Employee, PayBasis, Payslip};

/// Flat-file store for the payroll datasets.
///
/// Every operation reads the files afresh, so edits made between calls are
/// always observed. The store assumes a single writer.
#[derive(Debug, Clone)]
pub struct RecordStore {
    paths: DataPaths,
}

impl RecordStore {
    /// Creates a store over the given dataset paths.
    pub fn new(paths: DataPaths) -> Self {
        Self { paths }
    }

    /// Creates a store over the default file names inside `dir`.
    pub fn in_dir(dir: impl AsRef<Path>) -> Self {
        Self::new(DataPaths::in_dir(dir))
    }

    /// Creates a store over the paths named by a configuration.
    pub fn from_config(config: &PayrollConfig) -> Self {
        Self::new(config.data_paths())
    }

    /// The dataset paths this store reads and writes.
    pub fn paths(&self) -> &DataPaths {
        &self.paths
    }

    fn read_employee_rows(&self) -> PayrollResult<Vec<Employee>> {
        read_records(&self.paths.employees, MissingFile::Empty)
    }

    fn read_supplement_rows(&self) -> PayrollResult<Vec<SupplementRow>> {
        read_records(&self.paths.hourly_supplements, MissingFile::Empty)
    }

    /// Returns every employee, with hourly supplements attached.
    ///
    /// An hourly employee without a supplement row keeps a zeroed supplement.
    /// Supplement rows with no matching hourly employee are ignored.
    pub fn list_employees(&self) -> PayrollResult<Vec<Employee>> {
        let mut employees = self.read_employee_rows()?;

        // Later rows win if an ID appears more than once.
        let mut supplements: HashMap<u32, _> = self
            .read_supplement_rows()?
            .into_iter()
            .map(|row| (row.employee_id, row.supplement))
            .collect();

        for employee in &mut employees {
            let employee_id = employee.employee_id;
            if let PayBasis::Hourly(supplement) = &mut employee.pay_basis {
                match supplements.remove(&employee_id) {
                    Some(row) => *supplement = row,
                    None => warn!(
                        employee_id,
                        "Hourly employee has no supplement row; using zeroed supplement"
                    ),
                }
            }
        }

        for orphan in supplements.keys() {
            warn!(employee_id = *orphan, "Ignoring supplement row with no hourly employee");
        }

        Ok(employees)
    }

    /// Returns the smallest positive integer not used by any employee.
    ///
    /// The ID is not reserved; a concurrent create could claim it first.
    pub fn allocate_id(&self) -> PayrollResult<u32> {
        let used: HashSet<u32> = self
            .read_employee_rows()?
            .iter()
            .map(|employee| employee.employee_id)
            .collect();

        (1..=u32::MAX)
            .find(|id| !used.contains(id))
            .ok_or_else(|| PayrollError::validation("employee_id", "no identifiers left"))
    }

    /// Appends a new employee, and its supplement row if hourly.
    ///
    /// The employee row is written first. If the supplement append then
    /// fails, the employee reads back with a zeroed supplement.
    pub fn create_employee(&self, employee: &Employee) -> PayrollResult<()> {
        employee.validate()?;

        let exists = self
            .read_employee_rows()?
            .iter()
            .any(|existing| existing.employee_id == employee.employee_id);
        if exists {
            return Err(PayrollError::DuplicateEmployeeId {
                employee_id: employee.employee_id,
            });
        }

        append_records(&self.paths.employees, std::slice::from_ref(employee))?;

        if let Some(supplement) = employee.hourly_supplement() {
            append_records(
                &self.paths.hourly_supplements,
                &[SupplementRow {
                    employee_id: employee.employee_id,
                    supplement: supplement.clone(),
                }],
            )?;
        }

        info!(
            employee_id = employee.employee_id,
            employee_type = %employee.employment_type(),
            "Created employee record"
        );
        Ok(())
    }

    /// Returns the employee with `employee_id`.
    pub fn find_by_id(&self, employee_id: u32) -> PayrollResult<Employee> {
        self.list_employees()?
            .into_iter()
            .find(|employee| employee.employee_id == employee_id)
            .ok_or(PayrollError::EmployeeNotFound { employee_id })
    }

    /// Replaces the stored record that shares `employee`'s ID.
    ///
    /// Nothing is written if the ID is unknown.
    pub fn update_employee(&self, employee: &Employee) -> PayrollResult<()> {
        self.update_employees(std::slice::from_ref(employee))
    }

    /// Replaces several stored records with a single rewrite of each file.
    ///
    /// Every ID must already exist; nothing is written otherwise. Supplement
    /// rows for employees that are no longer hourly are dropped.
    pub fn update_employees(&self, updated: &[Employee]) -> PayrollResult<()> {
        if updated.is_empty() {
            return Ok(());
        }
        for employee in updated {
            employee.validate()?;
        }

        let mut employees = self.read_employee_rows()?;
        let mut replacements: HashMap<u32, &Employee> = updated
            .iter()
            .map(|employee| (employee.employee_id, employee))
            .collect();

        for employee in updated {
            if !employees
                .iter()
                .any(|existing| existing.employee_id == employee.employee_id)
            {
                return Err(PayrollError::EmployeeNotFound {
                    employee_id: employee.employee_id,
                });
            }
        }

        for existing in &mut employees {
            if let Some(replacement) = replacements.get(&existing.employee_id) {
                *existing = (*replacement).clone();
            }
        }

        let hourly_ids: HashSet<u32> = employees
            .iter()
            .filter(|employee| employee.is_hourly())
            .map(|employee| employee.employee_id)
            .collect();

        let mut supplements = Vec::new();
        for row in self.read_supplement_rows()? {
            if !hourly_ids.contains(&row.employee_id) {
                continue;
            }
            match replacements.remove(&row.employee_id) {
                Some(employee) => {
                    if let Some(supplement) = employee.hourly_supplement() {
                        supplements.push(SupplementRow {
                            employee_id: row.employee_id,
                            supplement: supplement.clone(),
                        });
                    }
                }
                // Duplicate of a row already replaced above.
                None if updated.iter().any(|e| e.employee_id == row.employee_id) => {}
                None => supplements.push(row),
            }
        }
        // Hourly employees that had no supplement row yet.
        for employee in updated {
            if !replacements.contains_key(&employee.employee_id) {
                continue;
            }
            if let Some(supplement) = employee.hourly_supplement() {
                supplements.push(SupplementRow {
                    employee_id: employee.employee_id,
                    supplement: supplement.clone(),
                });
            }
        }

        rewrite_records(&self.paths.employees, &employees)?;
        rewrite_records(&self.paths.hourly_supplements, &supplements)?;

        info!(count = updated.len(), "Updated employee records");
        Ok(())
    }

    /// Looks up the annual salary for a position at a scale point.
    ///
    /// Returns `None` when the table has no such pair.
    pub fn read_salary_scale(
        &self,
        position: &str,
        salary_point: u32,
    ) -> PayrollResult<Option<Decimal>> {
        lookup_salary(&self.paths.salary_scale, position, salary_point)
    }

    /// Appends a payslip to the history.
    pub fn append_payslip(&self, payslip: &Payslip) -> PayrollResult<()> {
        append_records(&self.paths.payslips, std::slice::from_ref(payslip))?;
        debug!(
            employee_id = payslip.employee_id,
            pay_date = %payslip.pay_date,
            "Recorded payslip"
        );
        Ok(())
    }

    /// Returns every payslip for `employee_id` in file order.
    pub fn read_payslip_history(&self, employee_id: u32) -> PayrollResult<Vec<Payslip>> {
        let payslips: Vec<Payslip> = read_records(&self.paths.payslips, MissingFile::Empty)?;
        Ok(payslips
            .into_iter()
            .filter(|payslip| payslip.employee_id == employee_id)
            .collect())
    }
}
