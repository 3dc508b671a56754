//! Input validation shared by the models, the deduction engine and the
//! payroll service.
//!
//! Every check fails with [`PayrollError::Validation`] naming the field.

use rust_decimal::Decimal;

use crate::error::{PayrollError, PayrollResult};

/// Characters the flat-file format cannot carry inside a field.
const FORBIDDEN_TEXT_CHARS: [char; 3] = [',', '\n', '\r'];

/// Largest money amount accepted as an input (one trillion).
///
/// Keeps every product the engine forms far inside `Decimal`'s range.
pub const MAX_MONEY: Decimal = Decimal::from_parts(0xD4A5_1000, 0xE8, 0, false, 0);

/// Requires a value to be zero or greater.
pub fn require_non_negative(field: &str, value: Decimal) -> PayrollResult<()> {
    if value.is_sign_negative() && !value.is_zero() {
        return Err(PayrollError::validation(
            field,
            format!("must not be negative (got {})", value),
        ));
    }
    Ok(())
}

/// Requires a money amount between zero and [`MAX_MONEY`].
pub fn require_money(field: &str, value: Decimal) -> PayrollResult<()> {
    require_non_negative(field, value)?;
    if value > MAX_MONEY {
        return Err(PayrollError::validation(
            field,
            format!("must not exceed {} (got {})", MAX_MONEY, value),
        ));
    }
    Ok(())
}

/// Requires a percentage in the inclusive range 0 to 100.
pub fn require_percentage(field: &str, value: Decimal) -> PayrollResult<()> {
    if value < Decimal::ZERO || value > Decimal::ONE_HUNDRED {
        return Err(PayrollError::validation(
            field,
            format!("must be between 0 and 100 (got {})", value),
        ));
    }
    Ok(())
}

/// Requires text that is non-empty, already trimmed and storable in a row.
///
/// Rows are trimmed on read, so surrounding whitespace would not survive a
/// write and read back.
pub fn require_text(field: &str, value: &str) -> PayrollResult<()> {
    if value.trim().is_empty() {
        return Err(PayrollError::validation(field, "must not be empty"));
    }
    if value.trim() != value {
        return Err(PayrollError::validation(
            field,
            "must not start or end with whitespace",
        ));
    }
    if value.contains(FORBIDDEN_TEXT_CHARS) {
        return Err(PayrollError::validation(
            field,
            "must not contain commas or line breaks",
        ));
    }
    Ok(())
}
