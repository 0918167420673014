//! Constants used throughout the Patientor core crate.
//!
//! This module keeps API paths, default configuration values and user-facing fallback messages
//! in one place.

/// Default base URL of the patients API when nothing is configured.
pub const DEFAULT_API_BASE_URL: &str = "http://localhost:3001/api";

/// Path segment for the patients resource.
pub const PATIENTS_PATH: &str = "patients";

/// Path segment for entries nested under a patient.
pub const ENTRIES_PATH: &str = "entries";

/// Path segment for the diagnosis reference list.
pub const DIAGNOSES_PATH: &str = "diagnoses";

/// Separator between codes in the diagnosis-codes form field.
pub const DIAGNOSIS_CODE_SEPARATOR: char = ',';

/// Prefix the server puts in front of validation messages.
pub const SERVER_ERROR_PREFIX: &str = "Something went wrong. Error: ";

/// Shown when a transport error carries no usable text body.
pub const UNRECOGNIZED_TRANSPORT_ERROR: &str = "Unrecognized transport error";

/// Shown for any other failure shape.
pub const UNKNOWN_ERROR: &str = "Unknown error";
