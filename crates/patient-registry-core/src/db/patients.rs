//! Patient store backed by SQLite.

use chrono::{DateTime, NaiveDate, Utc};
use rusqlite::{params, OptionalExtension, Row};
use tracing::debug;

use super::{Database, DbError, DbResult, PatientStore};
use crate::models::{Patient, PatientStatus};

/// Raw row shape; enum columns are parsed into [`Patient`] afterwards.
struct PatientRow {
    id: i64,
    first_name: String,
    last_name: String,
    date_of_birth: NaiveDate,
    gender: String,
    email: Option<String>,
    phone_number: String,
    address: Option<String>,
    city: Option<String>,
    state: Option<String>,
    zip_code: Option<String>,
    blood_group: Option<String>,
    emergency_contact_name: Option<String>,
    emergency_contact_phone: Option<String>,
    medical_history: Option<String>,
    allergies: Option<String>,
    is_active: bool,
    created_at: DateTime<Utc>,
    updated_at: DateTime<Utc>,
    created_by: Option<String>,
    updated_by: Option<String>,
}

impl TryFrom<PatientRow> for Patient {
    type Error = DbError;

    fn try_from(row: PatientRow) -> Result<Self, Self::Error> {
        let gender = row
            .gender
            .parse()
            .map_err(|_| DbError::Corrupt(format!("gender label '{}'", row.gender)))?;
        let blood_group = row
            .blood_group
            .as_deref()
            .map(|bg| {
                bg.parse()
                    .map_err(|_| DbError::Corrupt(format!("blood group label '{bg}'")))
            })
            .transpose()?;

        Ok(Patient {
            id: row.id,
            first_name: row.first_name,
            last_name: row.last_name,
            date_of_birth: row.date_of_birth,
            gender,
            email: row.email,
            phone_number: row.phone_number,
            address: row.address,
            city: row.city,
            state: row.state,
            zip_code: row.zip_code,
            blood_group,
            emergency_contact_name: row.emergency_contact_name,
            emergency_contact_phone: row.emergency_contact_phone,
            medical_history: row.medical_history,
            allergies: row.allergies,
            status: PatientStatus::from_active_flag(row.is_active),
            created_at: row.created_at,
            updated_at: row.updated_at,
            created_by: row.created_by,
            updated_by: row.updated_by,
        })
    }
}

const PATIENT_COLUMNS: &str = "id, first_name, last_name, date_of_birth, gender, email, \
     phone_number, address, city, state, zip_code, blood_group, \
     emergency_contact_name, emergency_contact_phone, medical_history, \
     allergies, is_active, created_at, updated_at, created_by, updated_by";

fn patient_from_row(row: &Row<'_>) -> rusqlite::Result<PatientRow> {
    Ok(PatientRow {
        id: row.get(0)?,
        first_name: row.get(1)?,
        last_name: row.get(2)?,
        date_of_birth: row.get(3)?,
        gender: row.get(4)?,
        email: row.get(5)?,
        phone_number: row.get(6)?,
        address: row.get(7)?,
        city: row.get(8)?,
        state: row.get(9)?,
        zip_code: row.get(10)?,
        blood_group: row.get(11)?,
        emergency_contact_name: row.get(12)?,
        emergency_contact_phone: row.get(13)?,
        medical_history: row.get(14)?,
        allergies: row.get(15)?,
        is_active: row.get(16)?,
        created_at: row.get(17)?,
        updated_at: row.get(18)?,
        created_by: row.get(19)?,
        updated_by: row.get(20)?,
    })
}

impl PatientStore for Database {
    fn list(&self) -> DbResult<Vec<Patient>> {
        let mut stmt = self.conn.prepare(&format!(
            "SELECT {PATIENT_COLUMNS} FROM patients \
             WHERE is_active = 1 \
             ORDER BY created_at DESC, id DESC"
        ))?;

        let rows = stmt.query_map([], patient_from_row)?;
        rows.map(|row| row.map_err(DbError::from).and_then(Patient::try_from))
            .collect()
    }

    fn get(&self, id: i64) -> DbResult<Option<Patient>> {
        let row = self
            .conn
            .query_row(
                &format!("SELECT {PATIENT_COLUMNS} FROM patients WHERE id = ?"),
                [id],
                patient_from_row,
            )
            .optional()?;

        row.map(Patient::try_from).transpose()
    }

    fn create(&self, patient: &Patient) -> DbResult<Patient> {
        let now = Utc::now();

        self.conn.execute(
            r#"
            INSERT INTO patients (
                first_name, last_name, date_of_birth, gender, email,
                phone_number, address, city, state, zip_code, blood_group,
                emergency_contact_name, emergency_contact_phone,
                medical_history, allergies, is_active, created_at, updated_at,
                created_by, updated_by
            ) VALUES (?1, ?2, ?3, ?4, ?5, ?6, ?7, ?8, ?9, ?10, ?11, ?12, ?13,
                      ?14, ?15, 1, ?16, ?17, ?18, ?19)
            "#,
            params![
                patient.first_name,
                patient.last_name,
                patient.date_of_birth,
                patient.gender.as_str(),
                patient.email,
                patient.phone_number,
                patient.address,
                patient.city,
                patient.state,
                patient.zip_code,
                patient.blood_group.map(|bg| bg.as_str()),
                patient.emergency_contact_name,
                patient.emergency_contact_phone,
                patient.medical_history,
                patient.allergies,
                now,
                now,
                patient.created_by,
                patient.updated_by,
            ],
        )?;

        let id = self.conn.last_insert_rowid();
        debug!("inserted patient {}", id);

        Ok(Patient {
            id,
            status: PatientStatus::Active,
            created_at: now,
            updated_at: now,
            ..patient.clone()
        })
    }

    fn update(&self, patient: &Patient) -> DbResult<Patient> {
        let now = Utc::now();

        let rows_affected = self.conn.execute(
            r#"
            UPDATE patients SET
                first_name = ?2,
                last_name = ?3,
                date_of_birth = ?4,
                gender = ?5,
                email = ?6,
                phone_number = ?7,
                address = ?8,
                city = ?9,
                state = ?10,
                zip_code = ?11,
                blood_group = ?12,
                emergency_contact_name = ?13,
                emergency_contact_phone = ?14,
                medical_history = ?15,
                allergies = ?16,
                updated_at = ?17,
                updated_by = ?18
            WHERE id = ?1
            "#,
            params![
                patient.id,
                patient.first_name,
                patient.last_name,
                patient.date_of_birth,
                patient.gender.as_str(),
                patient.email,
                patient.phone_number,
                patient.address,
                patient.city,
                patient.state,
                patient.zip_code,
                patient.blood_group.map(|bg| bg.as_str()),
                patient.emergency_contact_name,
                patient.emergency_contact_phone,
                patient.medical_history,
                patient.allergies,
                now,
                patient.updated_by,
            ],
        )?;

        if rows_affected == 0 {
            return Err(DbError::NotFound(patient.id));
        }

        Ok(Patient {
            updated_at: now,
            ..patient.clone()
        })
    }

    fn soft_delete(&self, id: i64) -> DbResult<bool> {
        let rows_affected = self.conn.execute(
            "UPDATE patients SET is_active = 0, updated_at = ?2 WHERE id = ?1",
            params![id, Utc::now()],
        )?;
        Ok(rows_affected > 0)
    }

    fn search(&self, term: &str) -> DbResult<Vec<Patient>> {
        if term.trim().is_empty() {
            return self.list();
        }

        // Raw LIKE semantics: % and _ in the term act as wildcards
        let pattern = format!("%{}%", term);
        let mut stmt = self.conn.prepare(&format!(
            "SELECT {PATIENT_COLUMNS} FROM patients \
             WHERE is_active = 1 \
               AND (first_name LIKE ?1 \
                    OR last_name LIKE ?1 \
                    OR email LIKE ?1 \
                    OR phone_number LIKE ?1) \
             ORDER BY created_at DESC, id DESC"
        ))?;

        let rows = stmt.query_map([&pattern], patient_from_row)?;
        rows.map(|row| row.map_err(DbError::from).and_then(Patient::try_from))
            .collect()
    }

    fn exists(&self, id: i64) -> DbResult<bool> {
        let count: i64 =
            self.conn
                .query_row("SELECT COUNT(1) FROM patients WHERE id = ?", [id], |row| {
                    row.get(0)
                })?;
        Ok(count > 0)
    }
}
