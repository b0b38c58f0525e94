//! Submitted patient fields for create and update.

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

use super::patient::{BloodGroup, Gender};

/// The writable fields of a patient record, as submitted by a caller.
///
/// One shape serves both create and update; `id` is only meaningful on
/// update, where it must match the targeted record. Lifecycle state,
/// timestamps, and audit identifiers are never writable.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct PatientInput {
    /// Target identifier, required on update only
    pub id: Option<i64>,
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
    pub medical_history: Option<String>,
    pub allergies: Option<String>,
}
