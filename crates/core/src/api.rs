//! Patients API collaborator.
//!
//! [`PatientsApi`] is the seam between the page coordinator and the remote service. The
//! coordinator only ever sees this trait; [`HttpPatientsApi`] is the `reqwest` implementation
//! used by the binaries.

use crate::config::ClientConfig;
use crate::constants::{DIAGNOSES_PATH, ENTRIES_PATH, PATIENTS_PATH};
use crate::diagnosis::Diagnosis;
use crate::entry::{Entry, EntryFormValues};
use crate::error::{ApiError, ApiResult, ResponseBody};
use crate::patient::Patient;
use crate::{PatientorError, PatientorResult};
use async_trait::async_trait;
use reqwest::header::CONTENT_TYPE;
use serde::de::DeserializeOwned;
use url::Url;

#[async_trait]
pub trait PatientsApi: Send + Sync {
    /// Fails on not-found or transport error.
    async fn get_patient_by_id(&self, id: &str) -> ApiResult<Patient>;

    async fn get_all_diagnoses(&self) -> ApiResult<Vec<Diagnosis>>;

    /// Creates an entry for the patient. The returned entry carries the server-assigned id.
    async fn create_entry(&self, patient_id: &str, values: &EntryFormValues) -> ApiResult<Entry>;
}

/// HTTP client for the patients API.
#[derive(Clone, Debug)]
pub struct HttpPatientsApi {
    base_url: Url,
    client: reqwest::Client,
}

impl HttpPatientsApi {
    pub fn new(cfg: &ClientConfig) -> PatientorResult<Self> {
        let mut builder = reqwest::Client::builder();
        if let Some(timeout) = cfg.request_timeout() {
            builder = builder.timeout(timeout);
        }
        let client = builder
            .build()
            .map_err(|e| PatientorError::HttpClient(e.to_string()))?;

        Ok(Self {
            base_url: cfg.api_base_url().clone(),
            client,
        })
    }

    /// Appends `segments` to the base URL, percent-encoding each one.
    ///
    /// A segment never escapes into a neighbouring path, query or fragment. Empty and dot
    /// segments are refused.
    fn url(&self, segments: &[&str]) -> ApiResult<Url> {
        if let Some(segment) = segments.iter().find(|s| matches!(**s, "" | "." | "..")) {
            return Err(ApiError::InvalidPath(format!(
                "'{segment}' is not a valid path segment"
            )));
        }

        let mut url = self.base_url.clone();
        url.path_segments_mut()
            .map_err(|_| ApiError::InvalidPath(format!("{} cannot be a base", self.base_url)))?
            .pop_if_empty()
            .extend(segments);
        Ok(url)
    }
}

#[async_trait]
impl PatientsApi for HttpPatientsApi {
    async fn get_patient_by_id(&self, id: &str) -> ApiResult<Patient> {
        let response = self
            .client
            .get(self.url(&[PATIENTS_PATH, id])?)
            .send()
            .await
            .map_err(transport_error)?;
        read_json(response).await
    }

    async fn get_all_diagnoses(&self) -> ApiResult<Vec<Diagnosis>> {
        let response = self
            .client
            .get(self.url(&[DIAGNOSES_PATH])?)
            .send()
            .await
            .map_err(transport_error)?;
        read_json(response).await
    }

    async fn create_entry(&self, patient_id: &str, values: &EntryFormValues) -> ApiResult<Entry> {
        let response = self
            .client
            .post(self.url(&[PATIENTS_PATH, patient_id, ENTRIES_PATH])?)
            .json(values)
            .send()
            .await
            .map_err(transport_error)?;
        read_json(response).await
    }
}

fn transport_error(e: reqwest::Error) -> ApiError {
    if e.is_timeout() {
        ApiError::Transport(format!("request timed out: {e}"))
    } else {
        ApiError::Transport(e.to_string())
    }
}

/// Decodes a success body, or turns a non-success response into [`ApiError::Status`].
async fn read_json<T: DeserializeOwned>(response: reqwest::Response) -> ApiResult<T> {
    let status = response.status();

    if !status.is_success() {
        let is_json = response
            .headers()
            .get(CONTENT_TYPE)
            .and_then(|v| v.to_str().ok())
            .is_some_and(|ct| ct.contains("json"));
        let text = response.text().await.map_err(transport_error)?;

        let body = if text.is_empty() {
            ResponseBody::Empty
        } else if is_json {
            match serde_json::from_str(&text) {
                Ok(value) => ResponseBody::Json(value),
                Err(_) => ResponseBody::Text(text),
            }
        } else {
            ResponseBody::Text(text)
        };

        return Err(ApiError::Status {
            status: status.as_u16(),
            body,
        });
    }

    let bytes = response.bytes().await.map_err(transport_error)?;
    serde_json::from_slice(&bytes).map_err(|e| ApiError::Decode(e.to_string()))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::constants::UNRECOGNIZED_TRANSPORT_ERROR;
    use crate::entry::{BaseEntry, EntryDetails, EntryType, HealthCheckRating};
    use axum::extract::Path;
    use axum::http::StatusCode;
    use axum::response::{IntoResponse, Response};
    use axum::routing::{get, post};
    use axum::{Json, Router};
    use serde_json::{json, Value};

    const PATIENT_ID: &str = "d2773336-f723-11e9-8f0b-362b9e155667";

    async fn patient(Path(id): Path<String>) -> Response {
        if id != PATIENT_ID {
            return (
                StatusCode::NOT_FOUND,
                Json(json!({ "error": "patient not found" })),
            )
                .into_response();
        }
        Json(json!({
            "id": PATIENT_ID,
            "name": "John McClane",
            "occupation": "New york city cop",
            "gender": "male",
            "ssn": "090786-122X",
            "entries": []
        }))
        .into_response()
    }

    async fn diagnoses() -> Json<Value> {
        Json(json!([
            { "code": "Z57.1", "name": "Occupational exposure to radiation" },
            { "code": "S62.5", "name": "Fracture of thumb", "latin": "Fractura [ossis] pollicis" }
        ]))
    }

    async fn add_entry(Path(_id): Path<String>, Json(mut body): Json<Value>) -> Response {
        if body["specialist"] == "" {
            return (
                StatusCode::BAD_REQUEST,
                "Something went wrong. Error: Incorrect or missing specialist",
            )
                .into_response();
        }
        body["id"] = json!("b4f4eca1-2aa7-4b13-9a18-4a5535c3c8da");
        Json(body).into_response()
    }

    async fn spawn_stub() -> HttpPatientsApi {
        let app = Router::new()
            .route("/api/patients/:id", get(patient))
            .route("/api/patients/:id/entries", post(add_entry))
            .route("/api/diagnoses", get(diagnoses));

        let listener = tokio::net::TcpListener::bind("127.0.0.1:0")
            .await
            .expect("bind stub server");
        let addr = listener.local_addr().expect("stub address");
        tokio::spawn(async move {
            axum::serve(listener, app).await.expect("serve stub");
        });

        let cfg = ClientConfig::new(&format!("http://{addr}/api/"), None).expect("valid config");
        HttpPatientsApi::new(&cfg).expect("build client")
    }

    fn health_check(specialist: &str) -> EntryFormValues {
        EntryFormValues {
            base: BaseEntry {
                description: "Yearly control visit.".into(),
                date: "2019-10-20".into(),
                specialist: specialist.into(),
                diagnosis_codes: None,
            },
            details: EntryDetails::HealthCheck {
                health_check_rating: HealthCheckRating::LowRisk,
            },
        }
    }

    #[test]
    fn url_joins_segments_onto_base() {
        let cfg = ClientConfig::new("http://localhost:3001/api/", None).expect("valid config");
        let api = HttpPatientsApi::new(&cfg).expect("build client");
        let url = api.url(&[PATIENTS_PATH, "p1", ENTRIES_PATH]).expect("url");
        assert_eq!(url.as_str(), "http://localhost:3001/api/patients/p1/entries");
    }

    #[test]
    fn url_encodes_each_segment() {
        let cfg = ClientConfig::new("http://localhost:3001/api", None).expect("valid config");
        let api = HttpPatientsApi::new(&cfg).expect("build client");

        let slash = api.url(&[PATIENTS_PATH, "a/b"]).expect("url");
        let parent = api.url(&[PATIENTS_PATH, "../diagnoses"]).expect("url");
        let query = api.url(&[PATIENTS_PATH, "a?b#c"]).expect("url");

        assert_eq!(slash.as_str(), "http://localhost:3001/api/patients/a%2Fb");
        assert_eq!(
            parent.as_str(),
            "http://localhost:3001/api/patients/..%2Fdiagnoses"
        );
        assert_eq!(query.as_str(), "http://localhost:3001/api/patients/a%3Fb%23c");
        assert_eq!(query.query(), None);
        assert_eq!(query.fragment(), None);
    }

    #[test]
    fn url_refuses_dot_segments() {
        let cfg = ClientConfig::new("http://localhost:3001/api", None).expect("valid config");
        let api = HttpPatientsApi::new(&cfg).expect("build client");

        assert!(matches!(
            api.url(&[PATIENTS_PATH, ".."]),
            Err(ApiError::InvalidPath(_))
        ));
        assert!(matches!(
            api.url(&[PATIENTS_PATH, "."]),
            Err(ApiError::InvalidPath(_))
        ));
    }

    #[tokio::test]
    async fn fetches_patient_by_id() {
        let api = spawn_stub().await;
        let patient = api.get_patient_by_id(PATIENT_ID).await.expect("patient");
        assert_eq!(patient.name, "John McClane");
        assert!(patient.entries.is_empty());
    }

    #[tokio::test]
    async fn fetches_all_diagnoses() {
        let api = spawn_stub().await;
        let diagnoses = api.get_all_diagnoses().await.expect("diagnoses");
        assert_eq!(diagnoses.len(), 2);
        assert_eq!(
            diagnoses[1].latin.as_deref(),
            Some("Fractura [ossis] pollicis")
        );
    }

    #[tokio::test]
    async fn created_entry_carries_server_id() {
        let api = spawn_stub().await;
        let entry = api
            .create_entry(PATIENT_ID, &health_check("MD House"))
            .await
            .expect("created entry");
        assert_eq!(entry.id, "b4f4eca1-2aa7-4b13-9a18-4a5535c3c8da");
        assert_eq!(entry.entry_type(), EntryType::HealthCheck);
        assert_eq!(entry.values, health_check("MD House"));
    }

    #[tokio::test]
    async fn text_rejection_is_surfaced_without_prefix() {
        let api = spawn_stub().await;
        let err = api
            .create_entry(PATIENT_ID, &health_check(""))
            .await
            .expect_err("server rejects empty specialist");

        assert!(matches!(
            &err,
            ApiError::Status { status: 400, body: ResponseBody::Text(_) }
        ));
        assert_eq!(err.user_message(), "Incorrect or missing specialist");
    }

    #[tokio::test]
    async fn json_rejection_is_unrecognized() {
        let api = spawn_stub().await;
        let err = api
            .get_patient_by_id("nobody")
            .await
            .expect_err("unknown patient");

        assert!(matches!(
            &err,
            ApiError::Status { status: 404, body: ResponseBody::Json(_) }
        ));
        assert_eq!(err.user_message(), UNRECOGNIZED_TRANSPORT_ERROR);
    }

    #[tokio::test]
    async fn id_with_path_characters_stays_on_patient_route() {
        let api = spawn_stub().await;
        let err = api
            .get_patient_by_id("../diagnoses")
            .await
            .expect_err("no such patient");

        assert!(matches!(
            &err,
            ApiError::Status { status: 404, body: ResponseBody::Json(_) }
        ));
    }

    #[tokio::test]
    async fn connection_failure_is_a_transport_error() {
        let listener = tokio::net::TcpListener::bind("127.0.0.1:0")
            .await
            .expect("bind");
        let addr = listener.local_addr().expect("address");
        drop(listener);

        let cfg = ClientConfig::new(&format!("http://{addr}/api"), None).expect("valid config");
        let api = HttpPatientsApi::new(&cfg).expect("build client");

        let err = api.get_all_diagnoses().await.expect_err("nothing listening");
        assert!(matches!(err, ApiError::Transport(_)));
    }
}
