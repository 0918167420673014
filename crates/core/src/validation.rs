//! Input validation utilities.
//!
//! This module contains the client-side checks applied to raw form and configuration input
//! before it is used. Form checks are advisory only; the patients API remains the authority.

use crate::constants::DIAGNOSIS_CODE_SEPARATOR;
use crate::{PatientorError, PatientorResult};
use patientor_types::IsoDate;
use url::Url;

/// Splits the comma-separated diagnosis-codes field into individual codes.
///
/// Segments are trimmed and empty segments dropped. Returns `None` when no code remains, so
/// an empty field yields no `diagnosisCodes` at all rather than an empty list.
pub fn parse_diagnosis_codes(raw: &str) -> Option<Vec<String>> {
    let codes: Vec<String> = raw
        .split(DIAGNOSIS_CODE_SEPARATOR)
        .map(str::trim)
        .filter(|code| !code.is_empty())
        .map(str::to_owned)
        .collect();

    if codes.is_empty() {
        None
    } else {
        Some(codes)
    }
}

/// Returns the codes that are not in `known`, in input order.
pub fn unknown_diagnosis_codes<S: AsRef<str>>(codes: &[String], known: &[S]) -> Vec<String> {
    codes
        .iter()
        .filter(|code| !known.iter().any(|k| k.as_ref() == code.as_str()))
        .cloned()
        .collect()
}

/// Whether `end` falls on a calendar day before `start`.
///
/// Values that are not `YYYY-MM-DD` dates never compare, so a half-typed date does not
/// trigger a reset.
pub fn end_date_precedes_start(start: &str, end: &str) -> bool {
    match (IsoDate::parse(start), IsoDate::parse(end)) {
        (Ok(start), Ok(end)) => end < start,
        _ => false,
    }
}

/// Parses and validates an API base URL.
///
/// - Rejects empty or whitespace-only strings
/// - Requires an `http` or `https` URL with a host
/// - Rejects a query or fragment, since request paths are appended to the base
///
/// A trailing slash is dropped so request segments join onto the last base segment.
///
/// # Errors
///
/// Returns a `PatientorError::InvalidInput` if the URL is invalid.
pub fn parse_api_base_url(raw: &str) -> PatientorResult<Url> {
    let raw = raw.trim();
    if raw.is_empty() {
        return Err(PatientorError::InvalidInput(
            "API base URL cannot be empty".into(),
        ));
    }

    let mut url = Url::parse(raw).map_err(|e| {
        PatientorError::InvalidInput(format!("invalid API base URL '{raw}': {e}"))
    })?;

    if !matches!(url.scheme(), "http" | "https") {
        return Err(PatientorError::InvalidInput(format!(
            "API base URL must use http:// or https://, got '{}'",
            url.scheme()
        )));
    }

    if url.host_str().map_or(true, str::is_empty) {
        return Err(PatientorError::InvalidInput(
            "API base URL is missing a host".into(),
        ));
    }

    if url.query().is_some() || url.fragment().is_some() {
        return Err(PatientorError::InvalidInput(
            "API base URL must not carry a query or fragment".into(),
        ));
    }

    url.path_segments_mut()
        .map_err(|_| PatientorError::InvalidInput("API base URL cannot be a base".into()))?
        .pop_if_empty();

    Ok(url)
}
