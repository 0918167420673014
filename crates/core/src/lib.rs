//! # Patientor Core
//!
//! Core logic of the Patientor patient-records front-end.
//!
//! This crate contains:
//! - The medical entry model: a closed set of three variants sharing a common base
//! - The flat entry-creation form and its reconciliation into a single variant payload
//! - Read-only rendering of patients and entries, with diagnosis-name lookup
//! - The [`api::PatientsApi`] collaborator seam and its `reqwest` implementation
//! - The [`page::PatientPage`] coordinator that ties fetching, the modal and submission together
//!
//! **No presentation concerns**: layout and terminal output belong in `patientor-cli`.

pub mod api;
pub mod config;
pub mod constants;
pub mod diagnosis;
pub mod entry;
pub mod error;
pub mod form;
pub mod page;
pub mod patient;
pub mod render;
pub mod validation;

pub use api::{HttpPatientsApi, PatientsApi};
pub use config::ClientConfig;
pub use constants::DEFAULT_API_BASE_URL;
pub use diagnosis::{Diagnosis, DiagnosisTable};
pub use entry::{
    BaseEntry, Discharge, Entry, EntryDetails, EntryFormValues, EntryType, HealthCheckRating,
    SickLeave,
};
pub use error::{
    ApiError, ApiResult, FormError, PatientorError, PatientorResult, ResponseBody, SubmitError,
};
pub use form::{EntryForm, FormField};
pub use page::{EntryModal, Fetch, PageView, PatientPage};
pub use patient::{Gender, Patient};
pub use render::{EntryView, PatientView};

// Re-export validated primitives so callers do not need a direct dependency.
pub use patientor_types::{IsoDate, NonEmptyText, TextError};
