//! Patient detail page coordinator.
//!
//! [`PatientPage`] owns the patient aggregate and the diagnosis lookup table for the lifetime
//! of the page. It fetches both on mount, tracks the add-entry modal, and appends a new entry
//! only once the server has accepted it.
//!
//! Handlers take `&mut self`, so each runs to completion (or suspends at its awaited call)
//! before the next one. Submission is split into [`PatientPage::start_submission`] and
//! [`PatientPage::finish_submission`] so an event loop can keep the page available while the
//! create call is in flight; the in-flight flag refuses a second submission until the first
//! resolves.

use crate::api::PatientsApi;
use crate::diagnosis::{Diagnosis, DiagnosisTable};
use crate::entry::{Entry, EntryFormValues};
use crate::error::{ApiError, ApiResult, SubmitError};
use crate::form::EntryForm;
use crate::patient::Patient;
use crate::render::PatientView;
use crate::validation::parse_diagnosis_codes;
use patientor_types::NonEmptyText;

/// State of one remotely fetched slot.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum Fetch<T> {
    NotLoaded,
    Loaded(T),
    Failed(String),
}

impl<T> Fetch<T> {
    pub fn loaded(&self) -> Option<&T> {
        match self {
            Fetch::Loaded(value) => Some(value),
            Fetch::NotLoaded | Fetch::Failed(_) => None,
        }
    }
}

/// What the page currently has to show.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum PageView {
    Loading,
    Failed(String),
    Ready(PatientView),
}

/// Add-entry modal state.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct EntryModal {
    pub open: bool,
    pub error: Option<String>,
    pub submitting: bool,
}

pub struct PatientPage<A> {
    api: A,
    patient_id: NonEmptyText,
    patient: Fetch<Patient>,
    diagnoses: Fetch<DiagnosisTable>,
    modal: EntryModal,
}

impl<A: PatientsApi> PatientPage<A> {
    pub fn new(api: A, patient_id: NonEmptyText) -> Self {
        Self {
            api,
            patient_id,
            patient: Fetch::NotLoaded,
            diagnoses: Fetch::NotLoaded,
            modal: EntryModal::default(),
        }
    }

    /// Fetches the patient and the diagnosis list concurrently.
    ///
    /// The two results land in separate slots, so one failing does not affect the other.
    /// Calling `mount` again retries both.
    pub async fn mount(&mut self) {
        tracing::info!("loading patient {}", self.patient_id);

        let (patient, diagnoses) = tokio::join!(
            self.api.get_patient_by_id(self.patient_id.as_str()),
            self.api.get_all_diagnoses()
        );

        self.apply_patient(patient);
        self.apply_diagnoses(diagnoses);
    }

    pub fn apply_patient(&mut self, result: ApiResult<Patient>) {
        self.patient = match result {
            Ok(patient) => Fetch::Loaded(patient),
            Err(e) => {
                tracing::error!("failed to load patient {}: {}", self.patient_id, e);
                Fetch::Failed(e.user_message())
            }
        };
    }

    pub fn apply_diagnoses(&mut self, result: ApiResult<Vec<Diagnosis>>) {
        self.diagnoses = match result {
            Ok(diagnoses) => Fetch::Loaded(DiagnosisTable::new(diagnoses)),
            Err(e) => {
                tracing::error!("failed to load diagnoses: {}", e);
                Fetch::Failed(e.user_message())
            }
        };
    }

    pub fn patient(&self) -> Option<&Patient> {
        self.patient.loaded()
    }

    pub fn patient_state(&self) -> &Fetch<Patient> {
        &self.patient
    }

    pub fn diagnoses_state(&self) -> &Fetch<DiagnosisTable> {
        &self.diagnoses
    }

    /// Known diagnoses, empty until the list has loaded.
    pub fn diagnoses(&self) -> DiagnosisTable {
        self.diagnoses.loaded().cloned().unwrap_or_default()
    }

    pub fn modal(&self) -> &EntryModal {
        &self.modal
    }

    /// Renders the page. Diagnosis names fall back to bare codes until the list has loaded.
    pub fn view(&self) -> PageView {
        match &self.patient {
            Fetch::NotLoaded => PageView::Loading,
            Fetch::Failed(message) => PageView::Failed(message.clone()),
            Fetch::Loaded(patient) => PageView::Ready(PatientView::new(patient, &self.diagnoses())),
        }
    }

    pub fn open_modal(&mut self) {
        self.modal.open = true;
    }

    /// Closes the modal and clears any error it was showing.
    pub fn close_modal(&mut self) {
        self.modal.open = false;
        self.modal.error = None;
    }

    /// Whether the submit action is currently enabled.
    pub fn can_submit(&self) -> bool {
        self.patient.loaded().is_some() && !self.modal.submitting
    }

    /// Marks a submission as in flight and returns the id of the patient to post to.
    ///
    /// # Errors
    ///
    /// Returns [`SubmitError::SubmissionInFlight`] if a submission has not resolved yet and
    /// [`SubmitError::PatientNotLoaded`] before the patient has been fetched.
    pub fn start_submission(&mut self) -> Result<String, SubmitError> {
        if self.modal.submitting {
            return Err(SubmitError::SubmissionInFlight);
        }
        let patient = self.patient.loaded().ok_or(SubmitError::PatientNotLoaded)?;
        self.modal.submitting = true;
        Ok(patient.id.clone())
    }

    /// Applies the outcome of a create-entry call.
    ///
    /// On success the entry is appended and the modal closed. On failure the modal stays
    /// open with a user-facing message and the patient is left untouched.
    pub fn finish_submission(&mut self, outcome: ApiResult<Entry>) -> Result<(), SubmitError> {
        self.modal.submitting = false;

        match outcome {
            Ok(entry) => {
                let Fetch::Loaded(patient) = &mut self.patient else {
                    tracing::error!(
                        "entry {} was created for patient {} but the patient is no longer loaded",
                        entry.id,
                        self.patient_id
                    );
                    return Err(SubmitError::PatientNotLoaded);
                };
                tracing::info!("added entry {} to patient {}", entry.id, patient.id);
                patient.append_entry(entry);
                self.close_modal();
                Ok(())
            }
            Err(e) => {
                let message = e.user_message();
                log_rejection(&e, &message);
                self.modal.error = Some(message.clone());
                Err(SubmitError::Rejected(message))
            }
        }
    }

    /// Sends `values` to the create-entry collaborator and applies the result.
    pub async fn submit_new_entry(&mut self, values: &EntryFormValues) -> Result<(), SubmitError> {
        let patient_id = self.start_submission()?;
        let outcome = self.api.create_entry(&patient_id, values).await;
        self.finish_submission(outcome)
    }

    /// Reconciles the form against the loaded diagnosis codes and submits the result.
    ///
    /// A local validation failure makes no remote call. The form keeps its state on a server
    /// rejection so the user can correct it and resubmit. Diagnosis codes cannot be checked
    /// until the diagnosis list has loaded, so a form carrying codes is refused until then
    /// and its codes field is left as entered.
    pub async fn submit_form(&mut self, form: &mut EntryForm) -> Result<(), SubmitError> {
        if !self.can_submit() {
            return Err(if self.modal.submitting {
                SubmitError::SubmissionInFlight
            } else {
                SubmitError::PatientNotLoaded
            });
        }

        let values = match self.diagnoses.loaded() {
            Some(table) => form.reconcile(&table.codes())?,
            None if parse_diagnosis_codes(form.diagnosis_codes()).is_some() => {
                tracing::warn!("diagnosis codes entered before the diagnosis list loaded");
                return Err(SubmitError::DiagnosesUnavailable);
            }
            None => form.reconcile::<&str>(&[])?,
        };
        self.submit_new_entry(&values).await
    }
}

fn log_rejection(e: &ApiError, message: &str) {
    match e {
        ApiError::Status { status, .. } => {
            tracing::error!("create entry rejected with status {}: {}", status, message)
        }
        ApiError::Transport(_) | ApiError::Decode(_) | ApiError::InvalidPath(_) => {
            tracing::error!("create entry failed: {:?}", e)
        }
    }
}
