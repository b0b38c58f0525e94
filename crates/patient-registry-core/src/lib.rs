//! Patient Registry Core Library
//!
//! CRUD core for a hospital patient registry: one `Patient` record with
//! computed fields, field-level validation, and a soft-delete lifecycle
//! over SQLite.
//!
//! # Architecture
//!
//! ```text
//! caller ──► PatientCatalogService ──► validation (writes only)
//!                     │
//!                     ▼
//!             PatientStore trait ──► Database (SQLite)
//!                     │
//!                     ▼
//!              Patient entity ──► PatientView (external projection,
//!                                 audit fields stripped, full name and
//!                                 age computed at mapping time)
//! ```
//!
//! # Core principle
//!
//! **The entity never crosses the boundary.** External callers only see
//! [`PatientView`]; the audit identifiers on [`Patient`] stay inside the
//! crate. Records are never hard-deleted, only marked
//! [`PatientStatus::Deleted`](models::PatientStatus).
//!
//! # Modules
//!
//! - [`models`]: domain types (Patient, PatientInput, PatientView, enums)
//! - [`validation`]: field rules and the collected violation set
//! - [`db`]: SQLite store behind the [`PatientStore`] trait
//! - [`service`]: the catalog service external callers invoke

pub mod db;
pub mod models;
pub mod service;
pub mod validation;

// Re-export commonly used types
pub use db::{Database, DatabaseConfig, DbError, PatientStore};
pub use models::{BloodGroup, Gender, Patient, PatientInput, PatientStatus, PatientView};
pub use service::PatientCatalogService;
pub use validation::{Violation, Violations};

use thiserror::Error;

/// Errors surfaced by the catalog service.
///
/// The first three variants are recoverable at the request boundary;
/// storage failures pass through unclassified.
#[derive(Debug, Error)]
pub enum RegistryError {
    #[error("validation failed: {0}")]
    InvalidInput(Violations),

    #[error("patient {id} not found")]
    NotFound { id: i64 },

    #[error("target identifier {target} does not match submitted identifier {body:?}")]
    IdentifierMismatch { target: i64, body: Option<i64> },

    #[error(transparent)]
    Database(#[from] DbError),
}

impl From<Violations> for RegistryError {
    fn from(violations: Violations) -> Self {
        RegistryError::InvalidInput(violations)
    }
}

pub type RegistryResult<T> = Result<T, RegistryError>;
