//! Flat-file row encoding.
//!
//! Each dataset is a comma-separated file with one header line and one
//! record per line in a fixed field order. Fields are never quoted, so text
//! containing commas or line breaks is rejected before it reaches a file.

use std::fs::{self, OpenOptions};
use std::io::{self, Read, Seek, SeekFrom, Write};
use std::path::{Path, PathBuf};
use std::str::FromStr;

use chrono::NaiveDate;
use rust_decimal::Decimal;
use tracing::error;

use crate::error::{PayrollError, PayrollResult};
use crate::models::{Employee, EmploymentType, HourlySupplement, PayBasis, Payslip};
use crate::money::format_money;

/// A record that maps to one line of a dataset file.
pub(crate) trait CsvRecord: Sized {
    /// The header line written at the top of a new file.
    const HEADER: &'static str;

    /// Encodes the record as a line, without the trailing newline.
    fn to_row(&self) -> String;

    /// Decodes a record from trimmed fields.
    fn from_fields(fields: &[&str]) -> Result<Self, String>;
}

/// What to do when a dataset file does not exist.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(crate) enum MissingFile {
    /// Treat the file as an empty collection.
    Empty,
    /// Fail with a storage error.
    Error,
}

fn expect_fields(fields: &[&str], count: usize) -> Result<(), String> {
    if fields.len() != count {
        return Err(format!(
            "expected {} fields, found {}",
            count,
            fields.len()
        ));
    }
    Ok(())
}

fn parse_field<T: FromStr>(name: &str, value: &str) -> Result<T, String> {
    value
        .parse()
        .map_err(|_| format!("invalid {} '{}'", name, value))
}

fn parse_decimal(name: &str, value: &str) -> Result<Decimal, String> {
    Decimal::from_str(value).map_err(|e| format!("invalid {} '{}': {}", name, value, e))
}

fn parse_date(name: &str, value: &str) -> Result<NaiveDate, String> {
    NaiveDate::parse_from_str(value, "%Y-%m-%d")
        .map_err(|e| format!("invalid {} '{}': {}", name, value, e))
}

fn parse_bool(name: &str, value: &str) -> Result<bool, String> {
    if value.eq_ignore_ascii_case("true") {
        Ok(true)
    } else if value.eq_ignore_ascii_case("false") {
        Ok(false)
    } else {
        Err(format!("invalid {} '{}': expected true or false", name, value))
    }
}

/// Employee rows carry no hourly facet; a `PART_TIME` row decodes with a
/// zeroed supplement that the store replaces with the matching
/// supplement row.
impl CsvRecord for Employee {
    const HEADER: &'static str =
        "employeeId,name,employeeType,position,salary,salaryPoint,lastPromotionDate,healthInsuranceRate";

    fn to_row(&self) -> String {
        format!(
            "{},{},{},{},{},{},{},{}",
            self.employee_id,
            self.name,
            self.employment_type(),
            self.position,
            format_money(self.salary),
            self.salary_point,
            self.last_promotion_date,
            format_money(self.health_insurance_rate)
        )
    }

    fn from_fields(fields: &[&str]) -> Result<Self, String> {
        expect_fields(fields, 8)?;

        let employment_type: EmploymentType = fields[2].parse().map_err(|_| {
            format!(
                "invalid employeeType '{}': expected FULL_TIME or PART_TIME",
                fields[2]
            )
        })?;
        let pay_basis = match employment_type {
            EmploymentType::FullTime => PayBasis::Salaried,
            EmploymentType::PartTime => PayBasis::Hourly(HourlySupplement::new(Decimal::ZERO)),
        };

        Ok(Employee {
            employee_id: parse_field("employeeId", fields[0])?,
            name: fields[1].to_string(),
            position: fields[3].to_string(),
            salary: parse_decimal("salary", fields[4])?,
            salary_point: parse_field("salaryPoint", fields[5])?,
            last_promotion_date: parse_date("lastPromotionDate", fields[6])?,
            health_insurance_rate: parse_decimal("healthInsuranceRate", fields[7])?,
            pay_basis,
        })
    }
}

/// One row of the hourly supplement file.
#[derive(Debug, Clone, PartialEq, Eq)]
pub(crate) struct SupplementRow {
    pub employee_id: u32,
    pub supplement: HourlySupplement,
}

impl CsvRecord for SupplementRow {
    const HEADER: &'static str = "employeeId,hourlyRate,hoursWorked,paymentRequestSubmitted";

    fn to_row(&self) -> String {
        format!(
            "{},{},{},{}",
            self.employee_id,
            format_money(self.supplement.hourly_rate),
            self.supplement.hours_worked,
            self.supplement.payment_request_submitted
        )
    }

    fn from_fields(fields: &[&str]) -> Result<Self, String> {
        expect_fields(fields, 4)?;
        Ok(SupplementRow {
            employee_id: parse_field("employeeId", fields[0])?,
            supplement: HourlySupplement {
                hourly_rate: parse_decimal("hourlyRate", fields[1])?,
                hours_worked: parse_field("hoursWorked", fields[2])?,
                payment_request_submitted: parse_bool("paymentRequestSubmitted", fields[3])?,
            },
        })
    }
}

impl CsvRecord for Payslip {
    const HEADER: &'static str = "employeeId,employeeName,payDate,grossPay,netPay";

    fn to_row(&self) -> String {
        format!(
            "{},{},{},{},{}",
            self.employee_id,
            self.employee_name,
            self.pay_date,
            format_money(self.gross_pay),
            format_money(self.net_pay)
        )
    }

    fn from_fields(fields: &[&str]) -> Result<Self, String> {
        expect_fields(fields, 5)?;
        Ok(Payslip {
            employee_id: parse_field("employeeId", fields[0])?,
            employee_name: fields[1].to_string(),
            pay_date: parse_date("payDate", fields[2])?,
            gross_pay: parse_decimal("grossPay", fields[3])?,
            net_pay: parse_decimal("netPay", fields[4])?,
        })
    }
}

fn storage_error(path: &Path, source: io::Error) -> PayrollError {
    error!(path = %path.display(), error = %source, "Data file access failed");
    PayrollError::Storage {
        path: path.display().to_string(),
        source,
    }
}

fn decode_line<T: CsvRecord>(line: &str) -> Result<T, String> {
    let fields: Vec<&str> = line.split(',').map(str::trim).collect();
    T::from_fields(&fields)
}

/// Reads every record of a dataset, skipping the header and blank lines.
pub(crate) fn read_records<T: CsvRecord>(
    path: &Path,
    missing: MissingFile,
) -> PayrollResult<Vec<T>> {
    let content = match fs::read_to_string(path) {
        Ok(content) => content,
        Err(e) if e.kind() == io::ErrorKind::NotFound && missing == MissingFile::Empty => {
            return Ok(Vec::new());
        }
        Err(e) => return Err(storage_error(path, e)),
    };

    content
        .lines()
        .enumerate()
        .skip(1)
        .filter(|(_, line)| !line.trim().is_empty())
        .map(|(index, line)| {
            decode_line(line).map_err(|message| PayrollError::CorruptRecord {
                path: path.display().to_string(),
                line: index + 1,
                message,
            })
        })
        .collect()
}

fn ensure_parent_dir(path: &Path) -> PayrollResult<()> {
    match path.parent() {
        Some(parent) if !parent.as_os_str().is_empty() => {
            fs::create_dir_all(parent).map_err(|e| storage_error(path, e))
        }
        _ => Ok(()),
    }
}

fn ends_without_newline(file: &mut fs::File) -> io::Result<bool> {
    let len = file.metadata()?.len();
    if len == 0 {
        return Ok(false);
    }
    file.seek(SeekFrom::Start(len - 1))?;
    let mut last = [0u8; 1];
    file.read_exact(&mut last)?;
    Ok(last[0] != b'\n')
}

/// Appends records to a dataset, writing the header first if the file is
/// new or empty.
pub(crate) fn append_records<T: CsvRecord>(path: &Path, records: &[T]) -> PayrollResult<()> {
    ensure_parent_dir(path)?;

    let mut file = OpenOptions::new()
        .read(true)
        .append(true)
        .create(true)
        .open(path)
        .map_err(|e| storage_error(path, e))?;

    let is_empty = file.metadata().map_err(|e| storage_error(path, e))?.len() == 0;
    let mut buffer = String::new();
    if is_empty {
        buffer.push_str(T::HEADER);
        buffer.push('\n');
    } else if ends_without_newline(&mut file).map_err(|e| storage_error(path, e))? {
        buffer.push('\n');
    }
    for record in records {
        buffer.push_str(&record.to_row());
        buffer.push('\n');
    }

    file.write_all(buffer.as_bytes())
        .and_then(|_| file.flush())
        .map_err(|e| storage_error(path, e))
}

fn temp_path(path: &Path) -> PathBuf {
    let mut name = path
        .file_name()
        .map(|name| name.to_os_string())
        .unwrap_or_default();
    name.push(".tmp");
    path.with_file_name(name)
}

/// Replaces a dataset with exactly `records`.
///
/// The new content is written to a sibling temporary file and renamed over
/// the original, so readers see either the old or the new file.
pub(crate) fn rewrite_records<T: CsvRecord>(path: &Path, records: &[T]) -> PayrollResult<()> {
    ensure_parent_dir(path)?;

    let mut buffer = String::with_capacity(T::HEADER.len() + 1 + records.len() * 64);
    buffer.push_str(T::HEADER);
    buffer.push('\n');
    for record in records {
        buffer.push_str(&record.to_row());
        buffer.push('\n');
    }

    let temp = temp_path(path);
    fs::write(&temp, buffer).map_err(|e| storage_error(&temp, e))?;
    if let Err(e) = fs::rename(&temp, path) {
        let _ = fs::remove_file(&temp);
        return Err(storage_error(path, e));
    }
    Ok(())
}
