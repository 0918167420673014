use crate::constants::{SERVER_ERROR_PREFIX, UNKNOWN_ERROR, UNRECOGNIZED_TRANSPORT_ERROR};

/// Local, advisory validation failures raised by the entry form.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum FormError {
    #[error("Incorrect diagnosis code: {}", .codes.join(", "))]
    UnknownDiagnosisCodes { codes: Vec<String> },
    #[error("Incorrect end date: {end} is before {start}")]
    SickLeaveEndBeforeStart { start: String, end: String },
}

/// Body of a non-success HTTP response, classified by content type.
#[derive(Debug, Clone, PartialEq)]
pub enum ResponseBody {
    Empty,
    Text(String),
    Json(serde_json::Value),
}

/// Failures reported by a [`crate::api::PatientsApi`] implementation.
#[derive(Debug, thiserror::Error)]
pub enum ApiError {
    #[error("request failed with status {status}")]
    Status { status: u16, body: ResponseBody },
    #[error("transport error: {0}")]
    Transport(String),
    #[error("failed to decode response: {0}")]
    Decode(String),
    #[error("invalid request path: {0}")]
    InvalidPath(String),
}

impl ApiError {
    /// Message to show the user for this failure.
    ///
    /// A textual response body is the server's own validation message; its known prefix is
    /// stripped. Responses without a usable body fall back to a generic transport message and
    /// anything else to a generic unknown-error message.
    pub fn user_message(&self) -> String {
        match self {
            ApiError::Status {
                body: ResponseBody::Text(text),
                ..
            } if !text.is_empty() => text
                .strip_prefix(SERVER_ERROR_PREFIX)
                .unwrap_or(text)
                .to_string(),
            ApiError::Status { .. } | ApiError::Transport(_) => {
                UNRECOGNIZED_TRANSPORT_ERROR.to_string()
            }
            ApiError::Decode(_) | ApiError::InvalidPath(_) => UNKNOWN_ERROR.to_string(),
        }
    }
}

pub type ApiResult<T> = std::result::Result<T, ApiError>;

/// Reasons an entry submission did not complete.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum SubmitError {
    #[error("patient has not been loaded")]
    PatientNotLoaded,
    #[error("an entry submission is already in flight")]
    SubmissionInFlight,
    #[error("diagnosis codes cannot be checked until the diagnosis list has loaded")]
    DiagnosesUnavailable,
    #[error(transparent)]
    Invalid(#[from] FormError),
    #[error("{0}")]
    Rejected(String),
}

#[derive(Debug, thiserror::Error)]
pub enum PatientorError {
    #[error("invalid input: {0}")]
    InvalidInput(String),
    #[error("failed to build HTTP client: {0}")]
    HttpClient(String),
    #[error("invalid value: {0}")]
    Text(#[from] patientor_types::TextError),
    #[error(transparent)]
    Api(#[from] ApiError),
    #[error(transparent)]
    Submit(#[from] SubmitError),
}

pub type PatientorResult<T> = std::result::Result<T, PatientorError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn text_rejection_has_server_prefix_stripped() {
        let err = ApiError::Status {
            status: 400,
            body: ResponseBody::Text(
                "Something went wrong. Error: Incorrect or missing date".into(),
            ),
        };
        assert_eq!(err.user_message(), "Incorrect or missing date");
    }

    #[test]
    fn text_rejection_without_prefix_is_shown_verbatim() {
        let err = ApiError::Status {
            status: 400,
            body: ResponseBody::Text("missing specialist".into()),
        };
        assert_eq!(err.user_message(), "missing specialist");
    }

    #[test]
    fn json_and_empty_bodies_are_unrecognized() {
        let json = ApiError::Status {
            status: 400,
            body: ResponseBody::Json(serde_json::json!({ "error": "bad" })),
        };
        let empty = ApiError::Status {
            status: 500,
            body: ResponseBody::Text(String::new()),
        };
        assert_eq!(json.user_message(), UNRECOGNIZED_TRANSPORT_ERROR);
        assert_eq!(empty.user_message(), UNRECOGNIZED_TRANSPORT_ERROR);
        assert_eq!(
            ApiError::Transport("connection refused".into()).user_message(),
            UNRECOGNIZED_TRANSPORT_ERROR
        );
    }

    #[test]
    fn decode_failures_are_unknown() {
        assert_eq!(
            ApiError::Decode("expected value".into()).user_message(),
            UNKNOWN_ERROR
        );
    }

    #[test]
    fn unknown_codes_message_lists_codes() {
        let err = FormError::UnknownDiagnosisCodes {
            codes: vec!["X1".into(), "X2".into()],
        };
        assert_eq!(err.to_string(), "Incorrect diagnosis code: X1, X2");
    }
}
