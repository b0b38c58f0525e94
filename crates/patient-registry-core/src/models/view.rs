//! External projection of a patient record.

use chrono::{DateTime, NaiveDate, Utc};
use serde::{Deserialize, Serialize};

use super::patient::{BloodGroup, Gender, Patient};

/// The externally visible shape of a patient record.
///
/// Excludes the internal audit identifiers and carries the computed
/// fields as plain values. All external reads go through this type;
/// the entity itself never crosses the boundary.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct PatientView {
    pub id: i64,
    pub first_name: String,
    pub last_name: String,
    /// Computed at mapping time, never read from storage
    pub full_name: String,
    pub date_of_birth: NaiveDate,
    /// Computed at mapping time, never read from storage
    pub age: i32,
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
    pub is_active: bool,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

// Exhaustive literal: a view field without a mapped source fails the
// build. Audit identifiers are dropped here and nowhere else.
impl From<&Patient> for PatientView {
    fn from(patient: &Patient) -> Self {
        Self {
            id: patient.id,
            first_name: patient.first_name.clone(),
            last_name: patient.last_name.clone(),
            full_name: patient.full_name(),
            date_of_birth: patient.date_of_birth,
            age: patient.age(),
            gender: patient.gender,
            email: patient.email.clone(),
            phone_number: patient.phone_number.clone(),
            address: patient.address.clone(),
            city: patient.city.clone(),
            state: patient.state.clone(),
            zip_code: patient.zip_code.clone(),
            blood_group: patient.blood_group,
            emergency_contact_name: patient.emergency_contact_name.clone(),
            emergency_contact_phone: patient.emergency_contact_phone.clone(),
            medical_history: patient.medical_history.clone(),
            allergies: patient.allergies.clone(),
            is_active: patient.status.is_active(),
            created_at: patient.created_at,
            updated_at: patient.updated_at,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::PatientStatus;

    fn sample_patient() -> Patient {
        let now = Utc::now();
        Patient {
            id: 42,
            first_name: "Jane".into(),
            last_name: "Doe".into(),
            date_of_birth: NaiveDate::from_ymd_opt(1990, 4, 12).unwrap(),
            gender: Gender::Female,
            email: Some("jane.doe@example.com".into()),
            phone_number: "555-1234".into(),
            address: None,
            city: None,
            state: None,
            zip_code: Some("62704".into()),
            blood_group: Some(BloodGroup::APositive),
            emergency_contact_name: None,
            emergency_contact_phone: None,
            medical_history: None,
            allergies: Some("Penicillin".into()),
            status: PatientStatus::Active,
            created_at: now,
            updated_at: now,
            created_by: Some("intake-service".into()),
            updated_by: Some("intake-service".into()),
        }
    }

    #[test]
    fn test_view_recomputes_derived_fields() {
        let patient = sample_patient();
        let view = PatientView::from(&patient);

        assert_eq!(view.id, 42);
        assert_eq!(view.full_name, "Jane Doe");
        assert_eq!(view.age, patient.age());
        assert!(view.is_active);
    }

    #[test]
    fn test_view_flattens_lifecycle_state() {
        let mut patient = sample_patient();
        patient.status = PatientStatus::Deleted;
        assert!(!PatientView::from(&patient).is_active);
    }

    #[test]
    fn test_view_json_never_carries_audit_fields() {
        let patient = sample_patient();
        let view = PatientView::from(&patient);
        let json = serde_json::to_value(&view).unwrap();
        let keys = json.as_object().unwrap();

        assert!(keys.contains_key("fullName"));
        assert!(keys.contains_key("isActive"));
        assert!(!keys.contains_key("createdBy"));
        assert!(!keys.contains_key("updatedBy"));
        assert!(!keys.contains_key("created_by"));
        assert!(!keys.contains_key("updated_by"));
    }

    #[test]
    fn test_view_json_is_camel_case() {
        let view = PatientView::from(&sample_patient());
        let json = serde_json::to_value(&view).unwrap();
        let keys = json.as_object().unwrap();

        assert!(keys.contains_key("firstName"));
        assert!(keys.contains_key("dateOfBirth"));
        assert!(keys.contains_key("phoneNumber"));
        assert!(keys.contains_key("bloodGroup"));
        assert!(!keys.contains_key("first_name"));
    }
}
