//! Entry creation form.
//!
//! The form keeps one flat, untyped field per attribute across all three entry variants,
//! regardless of which variant is selected. Switching the selector never clears the fields of
//! the other variants; those values are simply dropped when [`EntryForm::reconcile`] narrows
//! the state into a single [`EntryFormValues`] variant at submit time.

use crate::entry::{
    BaseEntry, Discharge, EntryDetails, EntryFormValues, EntryType, HealthCheckRating, SickLeave,
};
use crate::error::FormError;
use crate::validation::{end_date_precedes_start, parse_diagnosis_codes, unknown_diagnosis_codes};

/// Individual inputs of the form.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum FormField {
    Specialist,
    Description,
    Date,
    DiagnosisCodes,
    EntryType,
    DischargeDate,
    DischargeCriteria,
    EmployerName,
    SickLeaveStartDate,
    SickLeaveEndDate,
    HealthCheckRating,
}

impl FormField {
    /// The variant this field belongs to, or `None` for fields shared by every variant.
    pub fn variant(self) -> Option<EntryType> {
        match self {
            FormField::Specialist
            | FormField::Description
            | FormField::Date
            | FormField::DiagnosisCodes
            | FormField::EntryType => None,
            FormField::DischargeDate | FormField::DischargeCriteria => Some(EntryType::Hospital),
            FormField::EmployerName
            | FormField::SickLeaveStartDate
            | FormField::SickLeaveEndDate => Some(EntryType::OccupationalHealthCare),
            FormField::HealthCheckRating => Some(EntryType::HealthCheck),
        }
    }
}

#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct EntryForm {
    entry_type: EntryType,
    specialist: String,
    description: String,
    date: String,
    diagnosis_codes: String,
    discharge_date: String,
    discharge_criteria: String,
    employer_name: String,
    sick_leave_start_date: String,
    sick_leave_end_date: String,
    health_check_rating: HealthCheckRating,
}

impl EntryForm {
    /// An empty form with the Hospital variant and a Healthy rating selected.
    pub fn new() -> Self {
        Self::default()
    }

    pub fn entry_type(&self) -> EntryType {
        self.entry_type
    }

    /// Whether `field` is exposed for the currently selected variant.
    pub fn is_enabled(&self, field: FormField) -> bool {
        field
            .variant()
            .map_or(true, |variant| variant == self.entry_type)
    }

    pub fn select_entry_type(&mut self, entry_type: EntryType) {
        self.entry_type = entry_type;
    }

    /// Selects a variant by its tag. Unknown values leave the selection unchanged.
    pub fn select_entry_type_str(&mut self, value: &str) {
        if let Ok(entry_type) = value.parse() {
            self.entry_type = entry_type;
        }
    }

    pub fn select_health_check_rating(&mut self, rating: HealthCheckRating) {
        self.health_check_rating = rating;
    }

    /// Selects a rating by rank or label. Unknown values leave the selection unchanged.
    pub fn select_health_check_rating_str(&mut self, value: &str) {
        if let Ok(rating) = value.parse() {
            self.health_check_rating = rating;
        }
    }

    pub fn set_specialist(&mut self, value: impl Into<String>) {
        self.specialist = value.into();
    }

    pub fn set_description(&mut self, value: impl Into<String>) {
        self.description = value.into();
    }

    pub fn set_date(&mut self, value: impl Into<String>) {
        self.date = value.into();
    }

    /// Sets the raw comma-separated diagnosis codes.
    pub fn set_diagnosis_codes(&mut self, value: impl Into<String>) {
        self.diagnosis_codes = value.into();
    }

    pub fn set_discharge_date(&mut self, value: impl Into<String>) {
        self.discharge_date = value.into();
    }

    pub fn set_discharge_criteria(&mut self, value: impl Into<String>) {
        self.discharge_criteria = value.into();
    }

    pub fn set_employer_name(&mut self, value: impl Into<String>) {
        self.employer_name = value.into();
    }

    pub fn set_sick_leave_start_date(&mut self, value: impl Into<String>) {
        self.sick_leave_start_date = value.into();
    }

    /// Sets the sick-leave end date, rejecting one that precedes the current start date.
    ///
    /// On rejection the end date is reset to empty and the start date is left untouched.
    pub fn set_sick_leave_end_date(&mut self, value: impl Into<String>) -> Result<(), FormError> {
        let end = value.into();
        if end_date_precedes_start(&self.sick_leave_start_date, &end) {
            tracing::warn!(
                "sick leave end {} precedes start {}",
                end,
                self.sick_leave_start_date
            );
            self.sick_leave_end_date.clear();
            return Err(FormError::SickLeaveEndBeforeStart {
                start: self.sick_leave_start_date.clone(),
                end,
            });
        }
        self.sick_leave_end_date = end;
        Ok(())
    }

    pub fn specialist(&self) -> &str {
        &self.specialist
    }

    pub fn description(&self) -> &str {
        &self.description
    }

    pub fn date(&self) -> &str {
        &self.date
    }

    pub fn diagnosis_codes(&self) -> &str {
        &self.diagnosis_codes
    }

    pub fn discharge_date(&self) -> &str {
        &self.discharge_date
    }

    pub fn discharge_criteria(&self) -> &str {
        &self.discharge_criteria
    }

    pub fn employer_name(&self) -> &str {
        &self.employer_name
    }

    pub fn sick_leave_start_date(&self) -> &str {
        &self.sick_leave_start_date
    }

    pub fn sick_leave_end_date(&self) -> &str {
        &self.sick_leave_end_date
    }

    pub fn health_check_rating(&self) -> HealthCheckRating {
        self.health_check_rating
    }

    /// Narrows the flat form state into the payload for the selected variant.
    ///
    /// Diagnosis codes must all appear in `known_codes`. If any do not, the codes field is
    /// cleared and nothing is built. Fields belonging to unselected variants are dropped.
    ///
    /// # Errors
    ///
    /// Returns [`FormError::UnknownDiagnosisCodes`] listing every unrecognised code.
    pub fn reconcile<S: AsRef<str>>(
        &mut self,
        known_codes: &[S],
    ) -> Result<EntryFormValues, FormError> {
        let diagnosis_codes = parse_diagnosis_codes(&self.diagnosis_codes);

        if let Some(codes) = &diagnosis_codes {
            let unknown = unknown_diagnosis_codes(codes, known_codes);
            if !unknown.is_empty() {
                tracing::warn!("rejecting unknown diagnosis codes: {:?}", unknown);
                self.diagnosis_codes.clear();
                return Err(FormError::UnknownDiagnosisCodes { codes: unknown });
            }
        }

        let base = BaseEntry {
            description: self.description.clone(),
            date: self.date.clone(),
            specialist: self.specialist.clone(),
            diagnosis_codes,
        };

        let details = match self.entry_type {
            EntryType::Hospital => EntryDetails::Hospital {
                discharge: Discharge {
                    date: self.discharge_date.clone(),
                    criteria: self.discharge_criteria.clone(),
                },
            },
            EntryType::HealthCheck => EntryDetails::HealthCheck {
                health_check_rating: self.health_check_rating,
            },
            EntryType::OccupationalHealthCare => EntryDetails::OccupationalHealthCare {
                employer_name: self.employer_name.clone(),
                sick_leave: SickLeave {
                    start_date: self.sick_leave_start_date.clone(),
                    end_date: self.sick_leave_end_date.clone(),
                },
            },
        };

        Ok(EntryFormValues { base, details })
    }
}
