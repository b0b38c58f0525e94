//! Field-level validation of submitted patient records.
//!
//! Every rule is evaluated independently and all failures for one call
//! are collected into a single [`Violations`] set; nothing short-circuits
//! at the first bad field. Validation never touches storage and never
//! mutates its input.

use std::fmt;

use chrono::{Months, Utc};
use serde::Serialize;

use crate::models::PatientInput;

/// Longest accepted first or last name, in characters.
pub const MAX_NAME_LENGTH: usize = 100;
/// Longest accepted phone number, in characters.
pub const MAX_PHONE_LENGTH: usize = 20;
/// Longest accepted zip code, in characters.
pub const MAX_ZIP_LENGTH: usize = 10;
/// Oldest accepted patient age, in years.
pub const MAX_PATIENT_AGE_YEARS: u32 = 150;

/// A single field-level validation failure.
///
/// `field` carries the wire-facing (camelCase) field name.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Violation {
    pub field: &'static str,
    pub message: String,
}

/// The complete set of validation failures for one submitted record.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct Violations(Vec<Violation>);

impl Violations {
    fn push(&mut self, field: &'static str, message: impl Into<String>) {
        self.0.push(Violation {
            field,
            message: message.into(),
        });
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn iter(&self) -> impl Iterator<Item = &Violation> {
        self.0.iter()
    }

    /// Whether any violation was recorded against the given field.
    pub fn contains_field(&self, field: &str) -> bool {
        self.0.iter().any(|v| v.field == field)
    }

    fn into_result(self) -> Result<(), Violations> {
        if self.is_empty() {
            Ok(())
        } else {
            Err(self)
        }
    }
}

impl fmt::Display for Violations {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for (i, v) in self.0.iter().enumerate() {
            if i > 0 {
                f.write_str("; ")?;
            }
            write!(f, "{}: {}", v.field, v.message)?;
        }
        Ok(())
    }
}

/// Validate submitted fields for record creation.
pub fn validate_create(input: &PatientInput) -> Result<(), Violations> {
    validate_fields(input, false)
}

/// Validate submitted fields for record update.
///
/// Identical to [`validate_create`] except the identifier must be
/// present.
pub fn validate_update(input: &PatientInput) -> Result<(), Violations> {
    validate_fields(input, true)
}

fn validate_fields(input: &PatientInput, require_id: bool) -> Result<(), Violations> {
    let mut violations = Violations::default();

    if require_id && input.id.is_none() {
        violations.push("id", "Patient ID is required");
    }

    if input.first_name.is_empty() {
        violations.push("firstName", "First name is required");
    } else if input.first_name.chars().count() > MAX_NAME_LENGTH {
        violations.push("firstName", "First name cannot exceed 100 characters");
    }

    if input.last_name.is_empty() {
        violations.push("lastName", "Last name is required");
    } else if input.last_name.chars().count() > MAX_NAME_LENGTH {
        violations.push("lastName", "Last name cannot exceed 100 characters");
    }

    let today = Utc::now().date_naive();
    let earliest = today - Months::new(12 * MAX_PATIENT_AGE_YEARS);
    if input.date_of_birth >= today {
        violations.push("dateOfBirth", "Date of birth must be in the past");
    }
    if input.date_of_birth <= earliest {
        violations.push("dateOfBirth", "Invalid date of birth");
    }

    if let Some(email) = &input.email {
        if !email.is_empty() && !is_valid_email(email) {
            violations.push("email", "Invalid email address");
        }
    }

    if input.phone_number.is_empty() {
        violations.push("phoneNumber", "Phone number is required");
    } else {
        if input.phone_number.chars().count() > MAX_PHONE_LENGTH {
            violations.push("phoneNumber", "Phone number cannot exceed 20 characters");
        }
        if !input.phone_number.chars().all(is_valid_phone_char) {
            violations.push("phoneNumber", "Invalid phone number format");
        }
    }

    if let Some(zip) = &input.zip_code {
        if zip.chars().count() > MAX_ZIP_LENGTH {
            violations.push("zipCode", "Zip code cannot exceed 10 characters");
        }
    }

    violations.into_result()
}

/// Minimal email syntax check: one `@` with non-empty sides, no
/// whitespace. Deliverability is not this crate's concern.
fn is_valid_email(value: &str) -> bool {
    if value.chars().any(char::is_whitespace) {
        return false;
    }
    match value.split_once('@') {
        Some((local, domain)) => {
            !local.is_empty() && !domain.is_empty() && !domain.contains('@')
        }
        None => false,
    }
}

fn is_valid_phone_char(c: char) -> bool {
    c.is_ascii_digit() || matches!(c, ' ' | '-' | '+' | '(' | ')')
}
