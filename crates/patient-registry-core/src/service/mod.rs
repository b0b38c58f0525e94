//! Catalog service orchestrating validation and storage.

use tracing::{debug, info};

use crate::db::{DbError, PatientStore};
use crate::models::{Patient, PatientInput, PatientView};
use crate::validation;
use crate::{RegistryError, RegistryResult};

/// The patient catalog: the only surface external callers invoke.
///
/// Generic over the store so tests and alternative backends can swap
/// the persistence layer. Entities never leave this type; every read
/// and write answers with [`PatientView`].
pub struct PatientCatalogService<S> {
    store: S,
}

impl<S: PatientStore> PatientCatalogService<S> {
    pub fn new(store: S) -> Self {
        Self { store }
    }

    /// All active patients, newest first.
    pub fn list_all(&self) -> RegistryResult<Vec<PatientView>> {
        let patients = self.store.list()?;
        debug!("listed {} active patients", patients.len());
        Ok(patients.iter().map(PatientView::from).collect())
    }

    /// The patient with this identifier, in any lifecycle state.
    ///
    /// Absence is an empty result, not an error; callers distinguish
    /// presence through the `Option`.
    pub fn get_by_id(&self, id: i64) -> RegistryResult<Option<PatientView>> {
        Ok(self.store.get(id)?.as_ref().map(PatientView::from))
    }

    /// Validate and persist a new patient record.
    pub fn create(&self, input: PatientInput) -> RegistryResult<PatientView> {
        validation::validate_create(&input)?;

        let record = Patient::from_input(input);
        let stored = self.store.create(&record)?;
        info!("created patient {}", stored.id);
        Ok(PatientView::from(&stored))
    }

    /// Validate and persist changes to an existing patient record.
    ///
    /// The submitted identifier must match `id`; the mismatch check runs
    /// before any storage access. Identifier, `created_at`, `created_by`,
    /// and lifecycle state survive the update untouched.
    pub fn update(&self, id: i64, input: PatientInput) -> RegistryResult<PatientView> {
        if input.id != Some(id) {
            return Err(RegistryError::IdentifierMismatch {
                target: id,
                body: input.id,
            });
        }
        validation::validate_update(&input)?;

        let mut existing = self
            .store
            .get(id)?
            .ok_or(RegistryError::NotFound { id })?;
        existing.apply_input(input);

        let stored = self.store.update(&existing).map_err(|e| match e {
            DbError::NotFound(id) => RegistryError::NotFound { id },
            other => RegistryError::from(other),
        })?;
        info!("updated patient {}", stored.id);
        Ok(PatientView::from(&stored))
    }

    /// Soft-delete a patient record. Returns whether a record matched.
    pub fn delete(&self, id: i64) -> RegistryResult<bool> {
        let deleted = self.store.soft_delete(id)?;
        if deleted {
            info!("soft-deleted patient {}", id);
        }
        Ok(deleted)
    }

    /// Active patients matching the term, newest first. A blank term
    /// lists everything active.
    pub fn search(&self, term: &str) -> RegistryResult<Vec<PatientView>> {
        let patients = self.store.search(term)?;
        debug!("search {:?} matched {} patients", term, patients.len());
        Ok(patients.iter().map(PatientView::from).collect())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::NaiveDate;
    use crate::db::Database;
    use crate::models::Gender;

    fn service() -> PatientCatalogService<Database> {
        PatientCatalogService::new(Database::open_in_memory().unwrap())
    }

    fn valid_input() -> PatientInput {
        PatientInput {
            id: None,
            first_name: "Jane".into(),
            last_name: "Doe".into(),
            date_of_birth: NaiveDate::from_ymd_opt(1990, 4, 12).unwrap(),
            gender: Gender::Female,
            email: None,
            phone_number: "555-1234".into(),
            address: None,
            city: None,
            state: None,
            zip_code: None,
            blood_group: None,
            emergency_contact_name: None,
            emergency_contact_phone: None,
            medical_history: None,
            allergies: None,
        }
    }

    #[test]
    fn test_create_then_get() {
        let service = service();

        let created = service.create(valid_input()).unwrap();
        assert!(created.id > 0);
        assert!(created.is_active);
        assert_eq!(created.full_name, "Jane Doe");

        let fetched = service.get_by_id(created.id).unwrap().unwrap();
        assert_eq!(fetched, created);
    }

    #[test]
    fn test_create_rejects_invalid_input() {
        let service = service();

        let mut input = valid_input();
        input.phone_number = "abc-1234".into();

        let err = service.create(input).unwrap_err();
        match err {
            RegistryError::InvalidInput(violations) => {
                assert!(violations.contains_field("phoneNumber"));
            }
            other => panic!("expected InvalidInput, got {other:?}"),
        }
    }

    #[test]
    fn test_get_missing_is_none_not_error() {
        let service = service();
        assert!(service.get_by_id(999).unwrap().is_none());
    }

    #[test]
    fn test_update_rejects_identifier_mismatch_before_storage() {
        let service = service();

        let mut input = valid_input();
        input.id = Some(2);

        // Target 1 vs body 2: fails even though neither record exists
        let err = service.update(1, input).unwrap_err();
        assert!(matches!(
            err,
            RegistryError::IdentifierMismatch {
                target: 1,
                body: Some(2)
            }
        ));
    }

    #[test]
    fn test_update_missing_record_is_not_found() {
        let service = service();

        let mut input = valid_input();
        input.id = Some(999);

        let err = service.update(999, input).unwrap_err();
        assert!(matches!(err, RegistryError::NotFound { id: 999 }));
    }

    #[test]
    fn test_update_overlays_writable_fields_only() {
        let service = service();

        let created = service.create(valid_input()).unwrap();

        let mut input = valid_input();
        input.id = Some(created.id);
        input.first_name = "Janet".into();
        input.email = Some("janet.doe@example.com".into());

        let updated = service.update(created.id, input).unwrap();
        assert_eq!(updated.first_name, "Janet");
        assert_eq!(updated.full_name, "Janet Doe");
        assert_eq!(updated.email, Some("janet.doe@example.com".into()));
        assert_eq!(updated.created_at, created.created_at);
        assert!(updated.is_active);
    }

    #[test]
    fn test_delete_then_list_excludes_but_get_still_finds() {
        let service = service();

        let created = service.create(valid_input()).unwrap();
        assert!(service.delete(created.id).unwrap());

        assert!(service.list_all().unwrap().is_empty());

        let fetched = service.get_by_id(created.id).unwrap().unwrap();
        assert!(!fetched.is_active);
    }

    #[test]
    fn test_delete_missing_returns_false() {
        let service = service();
        assert!(!service.delete(999).unwrap());
    }

    #[test]
    fn test_search_maps_to_views() {
        let service = service();

        service.create(valid_input()).unwrap();
        let mut other = valid_input();
        other.first_name = "John".into();
        other.last_name = "Smith".into();
        service.create(other).unwrap();

        let hits = service.search("smith").unwrap();
        assert_eq!(hits.len(), 1);
        assert_eq!(hits[0].full_name, "John Smith");

        assert_eq!(service.search("").unwrap().len(), 2);
    }
}
