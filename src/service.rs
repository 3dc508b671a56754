//! The payroll service.
//!
//! [`PayrollService`] is the library entry point for every front-end
//! action: hiring, promotion, hourly payment requests, the monthly pay
//! cycle and payslip history. It validates input before any write and
//! orders writes so a payslip is recorded before the hourly state that
//! produced it is cleared.

use chrono::{DateTime, Datelike, NaiveDate, Utc};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use tracing::{info, warn};
use uuid::Uuid;

use crate::calculation::calculate_pay;
use crate::config::{ConfigLoader, DeductionSchedule, PayrollConfig};
use crate::error::{PayrollError, PayrollResult};
use crate::models::{Employee, Payslip};
use crate::store::RecordStore;
use crate::validation::{require_money, require_percentage, require_text};

/// Pay terms for a new hire.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "basis", rename_all = "snake_case")]
pub enum EmploymentTerms {
    /// Paid an annual salary taken from the salary scale.
    Salaried {
        /// Point on the salary scale for the position.
        salary_point: u32,
        /// Health insurance deduction percentage, 0 to 100.
        health_insurance_rate: Decimal,
    },
    /// Paid by the hour on submitted payment requests.
    Hourly {
        /// Rate per hour worked.
        hourly_rate: Decimal,
    },
}

/// The details needed to hire an employee.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct NewEmployee {
    /// Full name.
    pub name: String,
    /// Job title.
    pub position: String,
    /// Salaried or hourly terms.
    pub terms: EmploymentTerms,
}

/// The outcome of one pay cycle run.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PayRunReport {
    /// Unique identifier for this run.
    pub run_id: Uuid,
    /// When the run started.
    pub started_at: DateTime<Utc>,
    /// The date printed on every payslip in this run.
    pub pay_date: NaiveDate,
    /// Payslips issued, in employee file order.
    pub payslips: Vec<Payslip>,
    /// Hourly employees with no submitted payment request.
    pub skipped: Vec<u32>,
}

/// Orchestrates the record store and payroll calculator.
#[derive(Debug, Clone)]
pub struct PayrollService {
    store: RecordStore,
    schedule: DeductionSchedule,
    pay_day_of_month: Option<u32>,
}

impl PayrollService {
    /// Creates a service over `store` using the settings in `config`.
    pub fn new(store: RecordStore, config: &PayrollConfig) -> Self {
        Self {
            store,
            schedule: config.deductions.clone(),
            pay_day_of_month: config.pay_day_of_month,
        }
    }

    /// Creates a service from a loaded configuration.
    pub fn from_loader(loader: &ConfigLoader) -> Self {
        let config = loader.config();
        Self::new(RecordStore::from_config(config), config)
    }

    /// The underlying record store.
    pub fn store(&self) -> &RecordStore {
        &self.store
    }

    /// Hires an employee and returns the stored record.
    ///
    /// Salaried hires take their salary from the scale for the position and
    /// point. `today` becomes the last promotion date. Name and position are
    /// stored trimmed.
    pub fn create_employee(
        &self,
        new_employee: NewEmployee,
        today: NaiveDate,
    ) -> PayrollResult<Employee> {
        let NewEmployee {
            name,
            position,
            terms,
        } = new_employee;
        let name = name.trim().to_string();
        let position = position.trim().to_string();
        require_text("name", &name)?;
        require_text("position", &position)?;

        let employee = match terms {
            EmploymentTerms::Salaried {
                salary_point,
                health_insurance_rate,
            } => {
                require_percentage("health_insurance_rate", health_insurance_rate)?;
                let salary = self.scale_salary(&position, salary_point)?;
                let employee_id = self.store.allocate_id()?;
                Employee::salaried(
                    employee_id,
                    name,
                    position,
                    salary,
                    salary_point,
                    today,
                    health_insurance_rate,
                )
            }
            EmploymentTerms::Hourly { hourly_rate } => {
                require_money("hourly_rate", hourly_rate)?;
                let employee_id = self.store.allocate_id()?;
                Employee::hourly(employee_id, name, position, hourly_rate, today)
            }
        };

        self.store.create_employee(&employee)?;
        info!(
            employee_id = employee.employee_id,
            position = %employee.position,
            "Hired employee"
        );
        Ok(employee)
    }

    /// Returns the employee with `employee_id`.
    pub fn find_employee(&self, employee_id: u32) -> PayrollResult<Employee> {
        self.store.find_by_id(employee_id)
    }

    /// Moves a salaried employee to a new position and scale point.
    pub fn promote_employee(
        &self,
        employee_id: u32,
        new_position: &str,
        new_salary_point: u32,
        today: NaiveDate,
    ) -> PayrollResult<Employee> {
        let mut employee = self.store.find_by_id(employee_id)?;
        if !employee.can_be_promoted() {
            return Err(PayrollError::Ineligible {
                employee_id,
                message: "only salaried employees can be promoted".to_string(),
            });
        }

        let new_position = new_position.trim();
        require_text("position", new_position)?;
        let salary = self.scale_salary(new_position, new_salary_point)?;

        employee.position = new_position.to_string();
        employee.salary_point = new_salary_point;
        employee.salary = salary;
        employee.last_promotion_date = today;

        self.store.update_employee(&employee)?;
        info!(
            employee_id,
            position = %employee.position,
            salary_point = new_salary_point,
            salary = %salary,
            "Promoted employee"
        );
        Ok(employee)
    }

    /// Records hours worked for an hourly employee's current pay cycle.
    ///
    /// Returns the requested amount, hours times the hourly rate.
    pub fn submit_payment_request(
        &self,
        employee_id: u32,
        hours_worked: u32,
    ) -> PayrollResult<Decimal> {
        let mut employee = self.store.find_by_id(employee_id)?;

        let supplement = match employee.hourly_supplement_mut() {
            Some(supplement) => supplement,
            None => {
                return Err(PayrollError::Ineligible {
                    employee_id,
                    message: "only hourly employees can submit payment requests".to_string(),
                });
            }
        };
        if supplement.payment_request_submitted {
            return Err(PayrollError::Ineligible {
                employee_id,
                message: "a payment request is already pending for this pay cycle".to_string(),
            });
        }
        if hours_worked == 0 {
            return Err(PayrollError::validation(
                "hours_worked",
                "must be greater than zero",
            ));
        }

        supplement.hours_worked = hours_worked;
        supplement.payment_request_submitted = true;
        let amount = supplement.requested_amount()?;
        require_money("requested_amount", amount)?;

        self.store.update_employee(&employee)?;
        info!(employee_id, hours_worked, amount = %amount, "Payment request submitted");
        Ok(amount)
    }

    /// Issues payslips for every eligible employee.
    ///
    /// Only runs on the configured pay day of the month. Hourly employees
    /// without a submitted request are skipped. Each payslip is appended
    /// before the employee's hourly state is reset, so a failure part-way
    /// leaves earlier payslips recorded and later employees untouched.
    pub fn run_pay_cycle(&self, today: NaiveDate) -> PayrollResult<PayRunReport> {
        if let Some(pay_day) = self.pay_day_of_month {
            if today.day() != pay_day {
                return Err(PayrollError::PayCycleClosed {
                    date: today,
                    pay_day,
                });
            }
        }

        let run_id = Uuid::new_v4();
        let started_at = Utc::now();
        info!(run_id = %run_id, pay_date = %today, "Starting pay cycle");

        let mut payslips = Vec::new();
        let mut skipped = Vec::new();

        for mut employee in self.store.list_employees()? {
            if employee.can_submit_payment_request() {
                warn!(
                    run_id = %run_id,
                    employee_id = employee.employee_id,
                    "Skipping hourly employee with no payment request"
                );
                skipped.push(employee.employee_id);
                continue;
            }

            let calculation = calculate_pay(&employee, today, &self.schedule)?;
            self.store.append_payslip(&calculation.payslip)?;

            // Reset only after this employee's payslip is on disk.
            if employee.reset_pay_cycle() {
                self.store.update_employee(&employee)?;
            }
            payslips.push(calculation.payslip);
        }

        info!(
            run_id = %run_id,
            issued = payslips.len(),
            skipped = skipped.len(),
            "Pay cycle complete"
        );

        Ok(PayRunReport {
            run_id,
            started_at,
            pay_date: today,
            payslips,
            skipped,
        })
    }

    /// Returns every payslip issued to `employee_id`, oldest first.
    pub fn payslip_history(&self, employee_id: u32) -> PayrollResult<Vec<Payslip>> {
        self.store.find_by_id(employee_id)?;
        self.store.read_payslip_history(employee_id)
    }

    /// Returns the payslip with the latest pay date, if any.
    pub fn most_recent_payslip(&self, employee_id: u32) -> PayrollResult<Option<Payslip>> {
        let history = self.payslip_history(employee_id)?;
        Ok(Payslip::most_recent(&history).cloned())
    }

    fn scale_salary(&self, position: &str, salary_point: u32) -> PayrollResult<Decimal> {
        self.store
            .read_salary_scale(position, salary_point)?
            .ok_or_else(|| PayrollError::SalaryScaleNotFound {
                position: position.to_string(),
                salary_point,
            })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::fs;
    use std::str::FromStr;

    fn dec(s: &str) -> Decimal {
        Decimal::from_str(s).unwrap()
    }

    fn pay_day() -> NaiveDate {
        NaiveDate::from_ymd_opt(2025, 1, 25).unwrap()
    }

    fn hire_day() -> NaiveDate {
        NaiveDate::from_ymd_opt(2024, 9, 1).unwrap()
    }

    fn service() -> (tempfile::TempDir, PayrollService) {
        let dir = tempfile::tempdir().unwrap();
        fs::write(
            dir.path().join("ULSalaryInformation.csv"),
            "position,salaryPoint,salary\n\
             Lecturer,4,36000.00\n\
             Senior Lecturer,1,60000.00\n",
        )
        .unwrap();
        let service = PayrollService::new(
            RecordStore::in_dir(dir.path()),
            &PayrollConfig::default(),
        );
        (dir, service)
    }

    fn lecturer() -> NewEmployee {
        NewEmployee {
            name: "Ada Lovelace".to_string(),
            position: "Lecturer".to_string(),
            terms: EmploymentTerms::Salaried {
                salary_point: 4,
                health_insurance_rate: dec("5"),
            },
        }
    }

    fn tutor() -> NewEmployee {
        NewEmployee {
            name: "Grace Hopper".to_string(),
            position: "Tutor".to_string(),
            terms: EmploymentTerms::Hourly {
                hourly_rate: dec("20"),
            },
        }
    }

    #[test]
    fn test_create_salaried_uses_scale() {
        let (_dir, service) = service();
        let employee = service.create_employee(lecturer(), hire_day()).unwrap();

        assert_eq!(employee.employee_id, 1);
        assert_eq!(employee.salary, dec("36000"));
        assert_eq!(employee.last_promotion_date, hire_day());
        assert_eq!(service.find_employee(1).unwrap(), employee);
    }

    #[test]
    fn test_create_salaried_unknown_scale_entry() {
        let (_dir, service) = service();
        let mut new_employee = lecturer();
        new_employee.terms = EmploymentTerms::Salaried {
            salary_point: 9,
            health_insurance_rate: dec("5"),
        };

        match service.create_employee(new_employee, hire_day()) {
            Err(PayrollError::SalaryScaleNotFound { salary_point, .. }) => {
                assert_eq!(salary_point, 9)
            }
            other => panic!("Expected SalaryScaleNotFound, got {:?}", other),
        }
        assert!(service.store().list_employees().unwrap().is_empty());
    }

    #[test]
    fn test_create_rejects_bad_health_rate() {
        let (_dir, service) = service();
        let mut new_employee = lecturer();
        new_employee.terms = EmploymentTerms::Salaried {
            salary_point: 4,
            health_insurance_rate: dec("101"),
        };
        assert!(matches!(
            service.create_employee(new_employee, hire_day()),
            Err(PayrollError::Validation { .. })
        ));
    }

    #[test]
    fn test_create_trims_name_and_position() {
        let (_dir, service) = service();
        let mut new_employee = lecturer();
        new_employee.name = " Ada Lovelace".to_string();
        new_employee.position = "Lecturer ".to_string();

        let created = service.create_employee(new_employee, hire_day()).unwrap();
        assert_eq!(created.name, "Ada Lovelace");
        assert_eq!(created.position, "Lecturer");
        assert_eq!(service.find_employee(1).unwrap(), created);
    }

    #[test]
    fn test_create_rejects_blank_name_after_trim() {
        let (_dir, service) = service();
        let mut new_employee = lecturer();
        new_employee.name = "   ".to_string();
        assert!(matches!(
            service.create_employee(new_employee, hire_day()),
            Err(PayrollError::Validation { .. })
        ));
    }

    #[test]
    fn test_create_rejects_oversized_hourly_rate() {
        let (_dir, service) = service();
        let mut new_employee = tutor();
        new_employee.terms = EmploymentTerms::Hourly {
            hourly_rate: Decimal::MAX,
        };
        assert!(matches!(
            service.create_employee(new_employee, hire_day()),
            Err(PayrollError::Validation { .. })
        ));
        assert!(service.store().list_employees().unwrap().is_empty());
    }

    #[test]
    fn test_submit_oversized_request_leaves_record() {
        let (_dir, service) = service();
        let mut new_employee = tutor();
        new_employee.terms = EmploymentTerms::Hourly {
            hourly_rate: crate::validation::MAX_MONEY,
        };
        service.create_employee(new_employee, hire_day()).unwrap();

        match service.submit_payment_request(1, 2) {
            Err(PayrollError::Validation { field, .. }) => assert_eq!(field, "requested_amount"),
            other => panic!("Expected Validation error, got {:?}", other),
        }
        assert!(service.find_employee(1).unwrap().can_submit_payment_request());
    }

    #[test]
    fn test_create_hourly_starts_clean() {
        let (_dir, service) = service();
        let employee = service.create_employee(tutor(), hire_day()).unwrap();

        assert!(employee.is_hourly());
        assert_eq!(employee.health_insurance_rate, Decimal::ZERO);
        assert!(employee.can_submit_payment_request());
    }

    #[test]
    fn test_promote_salaried() {
        let (_dir, service) = service();
        service.create_employee(lecturer(), hire_day()).unwrap();

        let promoted = service
            .promote_employee(1, "senior lecturer", 1, pay_day())
            .unwrap();
        assert_eq!(promoted.position, "senior lecturer");
        assert_eq!(promoted.salary, dec("60000"));
        assert_eq!(promoted.last_promotion_date, pay_day());
        assert_eq!(service.find_employee(1).unwrap(), promoted);
    }

    #[test]
    fn test_promote_hourly_is_ineligible() {
        let (_dir, service) = service();
        service.create_employee(tutor(), hire_day()).unwrap();

        assert!(matches!(
            service.promote_employee(1, "Lecturer", 4, pay_day()),
            Err(PayrollError::Ineligible { employee_id: 1, .. })
        ));
    }

    #[test]
    fn test_promote_to_missing_scale_entry_leaves_record() {
        let (_dir, service) = service();
        let original = service.create_employee(lecturer(), hire_day()).unwrap();

        assert!(matches!(
            service.promote_employee(1, "Professor", 1, pay_day()),
            Err(PayrollError::SalaryScaleNotFound { .. })
        ));
        assert_eq!(service.find_employee(1).unwrap(), original);
    }

    #[test]
    fn test_submit_payment_request_flow() {
        let (_dir, service) = service();
        service.create_employee(tutor(), hire_day()).unwrap();

        assert_eq!(service.submit_payment_request(1, 100).unwrap(), dec("2000"));

        match service.submit_payment_request(1, 10) {
            Err(PayrollError::Ineligible { message, .. }) => {
                assert!(message.contains("already pending"))
            }
            other => panic!("Expected Ineligible, got {:?}", other),
        }
    }

    #[test]
    fn test_submit_zero_hours_rejected() {
        let (_dir, service) = service();
        service.create_employee(tutor(), hire_day()).unwrap();

        assert!(matches!(
            service.submit_payment_request(1, 0),
            Err(PayrollError::Validation { .. })
        ));
        assert!(service.find_employee(1).unwrap().can_submit_payment_request());
    }

    #[test]
    fn test_submit_for_salaried_is_ineligible() {
        let (_dir, service) = service();
        service.create_employee(lecturer(), hire_day()).unwrap();
        assert!(matches!(
            service.submit_payment_request(1, 10),
            Err(PayrollError::Ineligible { .. })
        ));
    }

    #[test]
    fn test_pay_cycle_gated_to_pay_day() {
        let (_dir, service) = service();
        let not_pay_day = NaiveDate::from_ymd_opt(2025, 1, 24).unwrap();

        match service.run_pay_cycle(not_pay_day) {
            Err(PayrollError::PayCycleClosed { pay_day, .. }) => assert_eq!(pay_day, 25),
            other => panic!("Expected PayCycleClosed, got {:?}", other),
        }
    }

    #[test]
    fn test_pay_cycle_gate_can_be_disabled() {
        let dir = tempfile::tempdir().unwrap();
        let config = PayrollConfig {
            pay_day_of_month: None,
            ..PayrollConfig::default()
        };
        let service = PayrollService::new(RecordStore::in_dir(dir.path()), &config);

        let report = service
            .run_pay_cycle(NaiveDate::from_ymd_opt(2025, 1, 3).unwrap())
            .unwrap();
        assert!(report.payslips.is_empty());
    }

    #[test]
    fn test_pay_cycle_issues_and_resets() {
        let (_dir, service) = service();
        service.create_employee(lecturer(), hire_day()).unwrap();
        service.create_employee(tutor(), hire_day()).unwrap();
        service.create_employee(tutor(), hire_day()).unwrap();
        service.submit_payment_request(2, 100).unwrap();

        let report = service.run_pay_cycle(pay_day()).unwrap();

        assert_eq!(report.pay_date, pay_day());
        assert_eq!(report.skipped, vec![3]);
        assert_eq!(report.payslips.len(), 2);
        assert_eq!(report.payslips[0].net_pay, dec("2040.95"));
        assert_eq!(report.payslips[1].gross_pay, dec("2000"));

        let tutor = service.find_employee(2).unwrap();
        let supplement = tutor.hourly_supplement().unwrap();
        assert_eq!(supplement.hours_worked, 0);
        assert!(!supplement.payment_request_submitted);

        assert_eq!(service.payslip_history(2).unwrap().len(), 1);
        assert!(service.payslip_history(3).unwrap().is_empty());
    }

    #[test]
    fn test_most_recent_payslip() {
        let (_dir, service) = service();
        service.create_employee(lecturer(), hire_day()).unwrap();
        assert_eq!(service.most_recent_payslip(1).unwrap(), None);

        service.run_pay_cycle(pay_day()).unwrap();
        let february = NaiveDate::from_ymd_opt(2025, 2, 25).unwrap();
        service.run_pay_cycle(february).unwrap();

        let latest = service.most_recent_payslip(1).unwrap().unwrap();
        assert_eq!(latest.pay_date, february);
    }

    #[test]
    fn test_history_for_unknown_employee() {
        let (_dir, service) = service();
        assert!(service.payslip_history(5).unwrap_err().is_not_found());
    }
}
