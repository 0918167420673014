//! Read-only rendering of patients and their entries.
//!
//! Rendering produces plain view values that a front-end lays out however it likes. The
//! `Display` implementations give the plain-text layout used by the terminal front-end.
//! Dispatch over entry variants and ratings is exhaustive: adding a variant will not compile
//! until it has a rendering here.

use crate::diagnosis::DiagnosisTable;
use crate::entry::{Entry, EntryDetails, HealthCheckRating};
use crate::patient::{Gender, Patient};
use std::fmt;

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum EntryIcon {
    MedicalServices,
    Favourite,
    HealthAndSafety,
}

impl EntryIcon {
    pub fn glyph(self) -> &'static str {
        match self {
            EntryIcon::MedicalServices => "✚",
            EntryIcon::Favourite => "♥",
            EntryIcon::HealthAndSafety => "⛑",
        }
    }
}

/// Colour of the heart indicator shown for a health check, by increasing risk.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum RatingColour {
    Primary,
    Secondary,
    Warning,
    Disabled,
}

impl RatingColour {
    pub fn for_rating(rating: HealthCheckRating) -> Self {
        match rating {
            HealthCheckRating::Healthy => RatingColour::Primary,
            HealthCheckRating::LowRisk => RatingColour::Secondary,
            HealthCheckRating::HighRisk => RatingColour::Warning,
            HealthCheckRating::CriticalRisk => RatingColour::Disabled,
        }
    }

    pub fn as_str(self) -> &'static str {
        match self {
            RatingColour::Primary => "primary",
            RatingColour::Secondary => "secondary",
            RatingColour::Warning => "warning",
            RatingColour::Disabled => "disabled",
        }
    }
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum GenderIcon {
    Male,
    Female,
    Transgender,
}

impl GenderIcon {
    pub fn for_gender(gender: Gender) -> Self {
        match gender {
            Gender::Male => GenderIcon::Male,
            Gender::Female => GenderIcon::Female,
            Gender::Other => GenderIcon::Transgender,
        }
    }

    pub fn glyph(self) -> &'static str {
        match self {
            GenderIcon::Male => "♂",
            GenderIcon::Female => "♀",
            GenderIcon::Transgender => "⚧",
        }
    }
}

/// A diagnosis code with its resolved name, if the lookup table knows it.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct DiagnosisLine {
    pub code: String,
    pub name: Option<String>,
}

impl fmt::Display for DiagnosisLine {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match &self.name {
            Some(name) => write!(f, "{} {}", self.code, name),
            None => f.write_str(&self.code),
        }
    }
}

#[derive(Clone, Debug, PartialEq, Eq)]
pub struct EntryView {
    pub id: String,
    pub date: String,
    pub icon: EntryIcon,
    /// Shown next to the icon for occupational entries.
    pub employer_name: Option<String>,
    pub description: String,
    pub rating: Option<RatingColour>,
    pub diagnoses: Vec<DiagnosisLine>,
    pub specialist: String,
}

impl EntryView {
    pub fn new(entry: &Entry, table: &DiagnosisTable) -> Self {
        let (icon, employer_name, rating) = match entry.details() {
            EntryDetails::HealthCheck {
                health_check_rating,
            } => (
                EntryIcon::MedicalServices,
                None,
                Some(RatingColour::for_rating(*health_check_rating)),
            ),
            EntryDetails::Hospital { .. } => (EntryIcon::Favourite, None, None),
            EntryDetails::OccupationalHealthCare { employer_name, .. } => (
                EntryIcon::HealthAndSafety,
                Some(employer_name.clone()),
                None,
            ),
        };

        let diagnoses = entry
            .diagnosis_codes()
            .iter()
            .map(|code| DiagnosisLine {
                code: code.clone(),
                name: table.name_of(code).map(str::to_owned),
            })
            .collect();

        let base = entry.base();
        Self {
            id: entry.id.clone(),
            date: base.date.clone(),
            icon,
            employer_name,
            description: base.description.clone(),
            rating,
            diagnoses,
            specialist: base.specialist.clone(),
        }
    }
}

impl fmt::Display for EntryView {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} {}", self.date, self.icon.glyph())?;
        if let Some(employer) = &self.employer_name {
            write!(f, " {employer}")?;
        }
        writeln!(f)?;
        writeln!(f, "{}", self.description)?;
        if let Some(rating) = self.rating {
            writeln!(f, "{} ({})", EntryIcon::Favourite.glyph(), rating.as_str())?;
        }
        for line in &self.diagnoses {
            writeln!(f, "  - {line}")?;
        }
        write!(f, "diagnose by {}", self.specialist)
    }
}

#[derive(Clone, Debug, PartialEq, Eq)]
pub struct PatientView {
    pub name: String,
    pub gender: GenderIcon,
    pub ssn: Option<String>,
    pub occupation: String,
    pub entries: Vec<EntryView>,
}

impl PatientView {
    pub fn new(patient: &Patient, diagnoses: &DiagnosisTable) -> Self {
        Self {
            name: patient.name.clone(),
            gender: GenderIcon::for_gender(patient.gender),
            ssn: patient.ssn.clone(),
            occupation: patient.occupation.clone(),
            entries: patient
                .entries
                .iter()
                .map(|entry| EntryView::new(entry, diagnoses))
                .collect(),
        }
    }
}

impl fmt::Display for PatientView {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(f, "{} {}", self.name, self.gender.glyph())?;
        writeln!(f)?;
        writeln!(f, "Ssn: {}", self.ssn.as_deref().unwrap_or(""))?;
        writeln!(f, "Occupation: {}", self.occupation)?;
        writeln!(f)?;
        write!(f, "Entries")?;
        for entry in &self.entries {
            write!(f, "\n\n{entry}")?;
        }
        Ok(())
    }
}
