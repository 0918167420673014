//! Client runtime configuration.
//!
//! This module defines configuration that should be resolved once at process startup and then
//! passed into the API client. Library code never reads environment variables itself; binaries
//! read them and hand the raw values to the `*_from_env_value` helpers below.

use crate::constants::DEFAULT_API_BASE_URL;
use crate::validation::parse_api_base_url;
use crate::{PatientorError, PatientorResult};
use std::time::Duration;
use url::Url;

/// Client configuration resolved at startup.
#[derive(Clone, Debug)]
pub struct ClientConfig {
    api_base_url: Url,
    request_timeout: Option<Duration>,
}

impl ClientConfig {
    /// Create a new `ClientConfig`.
    ///
    /// The base URL is parsed, validated and stored without a trailing slash.
    pub fn new(api_base_url: &str, request_timeout: Option<Duration>) -> PatientorResult<Self> {
        Ok(Self {
            api_base_url: parse_api_base_url(api_base_url)?,
            request_timeout,
        })
    }

    pub fn api_base_url(&self) -> &Url {
        &self.api_base_url
    }

    /// Per-request timeout. `None` means requests wait until the transport gives up.
    pub fn request_timeout(&self) -> Option<Duration> {
        self.request_timeout
    }
}

/// Resolve the API base URL from an optional raw value.
///
/// If `value` is `None` or empty/whitespace, returns the default local API URL.
pub fn api_base_url_from_env_value(value: Option<String>) -> String {
    value
        .map(|v| v.trim().to_string())
        .filter(|v| !v.is_empty())
        .unwrap_or_else(|| DEFAULT_API_BASE_URL.to_string())
}

/// Parse the request timeout (whole seconds) from an optional raw value.
///
/// If `value` is `None` or empty/whitespace, no timeout is applied. Zero is rejected because
/// it would fail every request.
pub fn request_timeout_from_env_value(value: Option<String>) -> PatientorResult<Option<Duration>> {
    let value = value
        .map(|v| v.trim().to_string())
        .filter(|v| !v.is_empty());

    let Some(value) = value else {
        return Ok(None);
    };

    let secs = value.parse::<u64>().map_err(|_| {
        PatientorError::InvalidInput(format!(
            "request timeout must be a whole number of seconds, got '{value}'"
        ))
    })?;

    if secs == 0 {
        return Err(PatientorError::InvalidInput(
            "request timeout must be greater than zero".into(),
        ));
    }

    Ok(Some(Duration::from_secs(secs)))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn trims_trailing_slash_from_base_url() {
        let cfg = ClientConfig::new("http://localhost:3001/api/", None).expect("valid config");
        assert_eq!(cfg.api_base_url().as_str(), "http://localhost:3001/api");
    }

    #[test]
    fn default_base_url_is_valid() {
        let cfg = ClientConfig::new(&api_base_url_from_env_value(None), None).expect("valid config");
        assert_eq!(cfg.api_base_url().path(), "/api");
        assert_eq!(cfg.request_timeout(), None);
    }

    #[test]
    fn rejects_invalid_base_url() {
        let err = ClientConfig::new("localhost:3001", None).expect_err("missing scheme");
        assert!(matches!(err, PatientorError::InvalidInput(_)));
    }

    #[test]
    fn base_url_falls_back_to_default() {
        assert_eq!(api_base_url_from_env_value(None), DEFAULT_API_BASE_URL);
        assert_eq!(
            api_base_url_from_env_value(Some("   ".into())),
            DEFAULT_API_BASE_URL
        );
        assert_eq!(
            api_base_url_from_env_value(Some(" https://api.example.org ".into())),
            "https://api.example.org"
        );
    }

    #[test]
    fn timeout_is_optional() {
        assert_eq!(request_timeout_from_env_value(None).expect("ok"), None);
        assert_eq!(
            request_timeout_from_env_value(Some("30".into())).expect("ok"),
            Some(Duration::from_secs(30))
        );
    }

    #[test]
    fn timeout_rejects_garbage_and_zero() {
        assert!(request_timeout_from_env_value(Some("soon".into())).is_err());
        assert!(request_timeout_from_env_value(Some("0".into())).is_err());
    }
}
