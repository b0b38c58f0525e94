//! Patient entity and its enumerated field types.

use std::fmt;
use std::str::FromStr;

use chrono::{DateTime, Datelike, NaiveDate, Utc};
use serde::{Deserialize, Serialize};
use thiserror::Error;

use super::input::PatientInput;

/// Rejected label for an enumerated patient field.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("{0}")]
pub struct LabelError(pub String);

/// Patient gender as captured on the intake form.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum Gender {
    Male,
    Female,
    Other,
}

impl Gender {
    /// Wire/storage label for this gender.
    pub fn as_str(&self) -> &'static str {
        match self {
            Gender::Male => "Male",
            Gender::Female => "Female",
            Gender::Other => "Other",
        }
    }
}

impl fmt::Display for Gender {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for Gender {
    type Err = LabelError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "Male" => Ok(Gender::Male),
            "Female" => Ok(Gender::Female),
            "Other" => Ok(Gender::Other),
            _ => Err(LabelError("Gender must be Male, Female, or Other".into())),
        }
    }
}

/// ABO/Rh blood group.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum BloodGroup {
    #[serde(rename = "A+")]
    APositive,
    #[serde(rename = "A-")]
    ANegative,
    #[serde(rename = "B+")]
    BPositive,
    #[serde(rename = "B-")]
    BNegative,
    #[serde(rename = "AB+")]
    AbPositive,
    #[serde(rename = "AB-")]
    AbNegative,
    #[serde(rename = "O+")]
    OPositive,
    #[serde(rename = "O-")]
    ONegative,
}

impl BloodGroup {
    /// All valid blood groups, in display order.
    pub const ALL: [BloodGroup; 8] = [
        BloodGroup::APositive,
        BloodGroup::ANegative,
        BloodGroup::BPositive,
        BloodGroup::BNegative,
        BloodGroup::AbPositive,
        BloodGroup::AbNegative,
        BloodGroup::OPositive,
        BloodGroup::ONegative,
    ];

    /// Wire/storage label for this blood group.
    pub fn as_str(&self) -> &'static str {
        match self {
            BloodGroup::APositive => "A+",
            BloodGroup::ANegative => "A-",
            BloodGroup::BPositive => "B+",
            BloodGroup::BNegative => "B-",
            BloodGroup::AbPositive => "AB+",
            BloodGroup::AbNegative => "AB-",
            BloodGroup::OPositive => "O+",
            BloodGroup::ONegative => "O-",
        }
    }
}

impl fmt::Display for BloodGroup {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for BloodGroup {
    type Err = LabelError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        BloodGroup::ALL
            .iter()
            .find(|bg| bg.as_str() == s)
            .copied()
            .ok_or_else(|| LabelError("Invalid blood group".into()))
    }
}

/// Patient lifecycle state.
///
/// Soft delete is the only exit from `Active`; no exposed operation
/// reverses it.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum PatientStatus {
    Active,
    Deleted,
}

impl PatientStatus {
    /// Lifecycle state as the persisted active flag.
    pub fn is_active(self) -> bool {
        matches!(self, PatientStatus::Active)
    }

    /// Lifecycle state from the persisted active flag.
    pub fn from_active_flag(active: bool) -> Self {
        if active {
            PatientStatus::Active
        } else {
            PatientStatus::Deleted
        }
    }
}

/// A patient record as owned by the store layer.
///
/// Carries the internal audit fields (`created_by`, `updated_by`); those
/// never leave the crate through [`PatientView`](super::PatientView).
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct Patient {
    /// Store-assigned identifier, immutable once assigned
    pub id: i64,
    pub first_name: String,
    pub last_name: String,
    pub date_of_birth: NaiveDate,
    pub gender: Gender,
    pub email: Option<String>,
    pub phone_number: String,
    pub address: Option<String>,
    pub city: Option<String>,
    pub state: Option<String>,
    pub zip_code: Option<String>,
    pub blood_group: Option<BloodGroup>,
    pub emergency_contact_name: Option<String>,
    pub emergency_contact_phone: Option<String>,
    /// Free-text medical history
    pub medical_history: Option<String>,
    /// Free-text allergy notes
    pub allergies: Option<String>,
    /// Lifecycle state, persisted as the `is_active` column
    pub status: PatientStatus,
    /// Creation timestamp, never changes after create
    pub created_at: DateTime<Utc>,
    /// Refreshed by the store on every write
    pub updated_at: DateTime<Utc>,
    /// Internal audit identifier, not exposed externally
    pub created_by: Option<String>,
    /// Internal audit identifier, not exposed externally
    pub updated_by: Option<String>,
}

impl Patient {
    /// Build a fresh record from submitted fields.
    ///
    /// The identifier and timestamps set here are provisional; the store
    /// assigns the real ones on create.
    pub fn from_input(input: PatientInput) -> Self {
        let now = Utc::now();
        Self {
            id: input.id.unwrap_or(0),
            first_name: input.first_name,
            last_name: input.last_name,
            date_of_birth: input.date_of_birth,
            gender: input.gender,
            email: input.email,
            phone_number: input.phone_number,
            address: input.address,
            city: input.city,
            state: input.state,
            zip_code: input.zip_code,
            blood_group: input.blood_group,
            emergency_contact_name: input.emergency_contact_name,
            emergency_contact_phone: input.emergency_contact_phone,
            medical_history: input.medical_history,
            allergies: input.allergies,
            status: PatientStatus::Active,
            created_at: now,
            updated_at: now,
            created_by: None,
            updated_by: None,
        }
    }

    /// Overlay submitted fields onto this record.
    ///
    /// Identifier, lifecycle state, `created_at`, and `created_by` are
    /// untouched; `updated_at` is refreshed by the store on persist.
    pub fn apply_input(&mut self, input: PatientInput) {
        self.first_name = input.first_name;
        self.last_name = input.last_name;
        self.date_of_birth = input.date_of_birth;
        self.gender = input.gender;
        self.email = input.email;
        self.phone_number = input.phone_number;
        self.address = input.address;
        self.city = input.city;
        self.state = input.state;
        self.zip_code = input.zip_code;
        self.blood_group = input.blood_group;
        self.emergency_contact_name = input.emergency_contact_name;
        self.emergency_contact_phone = input.emergency_contact_phone;
        self.medical_history = input.medical_history;
        self.allergies = input.allergies;
    }

    /// First and last name joined by a single space.
    pub fn full_name(&self) -> String {
        format!("{} {}", self.first_name, self.last_name)
    }

    /// Whole years of age as of today.
    pub fn age(&self) -> i32 {
        self.age_on(Utc::now().date_naive())
    }

    /// Whole years of age as of the given date.
    ///
    /// A birthday not yet reached in `today`'s calendar year decrements
    /// the count by one.
    pub fn age_on(&self, today: NaiveDate) -> i32 {
        let mut age = today.year() - self.date_of_birth.year();
        let birthday = (self.date_of_birth.month(), self.date_of_birth.day());
        if (today.month(), today.day()) < birthday {
            age -= 1;
        }
        age
    }
}
