//! SQLite schema definition.

/// Complete database schema for the patient registry.
pub const SCHEMA: &str = r#"
-- Enable foreign keys
PRAGMA foreign_keys = ON;

-- ============================================================================
-- Patients
-- ============================================================================

CREATE TABLE IF NOT EXISTS patients (
    id INTEGER PRIMARY KEY AUTOINCREMENT,
    first_name TEXT NOT NULL,
    last_name TEXT NOT NULL,
    date_of_birth TEXT NOT NULL,                 -- ISO-8601 date
    gender TEXT NOT NULL,                        -- Male | Female | Other
    email TEXT,
    phone_number TEXT NOT NULL,
    address TEXT,
    city TEXT,
    state TEXT,
    zip_code TEXT,
    blood_group TEXT,                            -- A+ A- B+ B- AB+ AB- O+ O-
    emergency_contact_name TEXT,
    emergency_contact_phone TEXT,
    medical_history TEXT,
    allergies TEXT,
    is_active INTEGER NOT NULL DEFAULT 1,        -- 0 = soft-deleted
    created_at TEXT NOT NULL,
    updated_at TEXT NOT NULL,
    created_by TEXT,
    updated_by TEXT
);

-- Listing and search both filter on is_active and order by created_at
CREATE INDEX IF NOT EXISTS idx_patients_active_created
    ON patients(is_active, created_at);
CREATE INDEX IF NOT EXISTS idx_patients_last_name ON patients(last_name);
"#;

#[cfg(test)]
mod tests {
    use super::*;
    use rusqlite::Connection;

    #[test]
    fn test_schema_valid() {
        let conn = Connection::open_in_memory().unwrap();
        let result = conn.execute_batch(SCHEMA);
        assert!(result.is_ok(), "Schema should be valid SQL: {:?}", result);
    }

    #[test]
    fn test_schema_is_idempotent() {
        let conn = Connection::open_in_memory().unwrap();
        conn.execute_batch(SCHEMA).unwrap();
        assert!(conn.execute_batch(SCHEMA).is_ok());
    }

    #[test]
    fn test_new_rows_default_to_active() {
        let conn = Connection::open_in_memory().unwrap();
        conn.execute_batch(SCHEMA).unwrap();

        conn.execute(
            r#"
            INSERT INTO patients (
                first_name, last_name, date_of_birth, gender, phone_number,
                created_at, updated_at
            ) VALUES ('Jane', 'Doe', '1990-04-12', 'Female', '555-1234',
                      '2024-01-01T00:00:00Z', '2024-01-01T00:00:00Z')
            "#,
            [],
        )
        .unwrap();

        let active: bool = conn
            .query_row("SELECT is_active FROM patients LIMIT 1", [], |row| {
                row.get(0)
            })
            .unwrap();
        assert!(active);
    }
}
