//! Medical entry model.
//!
//! An entry is exactly one of three variants. The variant-specific fields live in
//! [`EntryDetails`], an enum tagged on the wire by `type`, and are flattened next to the fields
//! every entry shares ([`BaseEntry`]). This keeps the JSON shape identical to the patients API
//! while making it impossible to build an entry that mixes fields from two variants.
//!
//! [`EntryFormValues`] is the creation payload: the same shape minus the server-assigned `id`.
//! [`Entry`] is an id plus those values.

use serde::de::{self, Visitor};
use serde::{Deserialize, Deserializer, Serialize, Serializer};

// ============================================================================
// Variant selector
// ============================================================================

/// Discriminant of the entry variants, as used by the form's type selector.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash)]
pub enum EntryType {
    #[default]
    Hospital,
    HealthCheck,
    OccupationalHealthCare,
}

impl EntryType {
    pub const ALL: [EntryType; 3] = [
        EntryType::Hospital,
        EntryType::HealthCheck,
        EntryType::OccupationalHealthCare,
    ];

    /// Wire tag for this variant.
    pub fn as_str(self) -> &'static str {
        match self {
            EntryType::Hospital => "Hospital",
            EntryType::HealthCheck => "HealthCheck",
            EntryType::OccupationalHealthCare => "OccupationalHealthCare",
        }
    }
}

impl std::fmt::Display for EntryType {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

impl std::str::FromStr for EntryType {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        EntryType::ALL
            .into_iter()
            .find(|t| t.as_str() == s)
            .ok_or_else(|| format!("unknown entry type '{s}'"))
    }
}

// ============================================================================
// Health check rating
// ============================================================================

/// Ordered severity scale for health checks. The discriminant is the rank, sent as a string
/// (`"0"` to `"3"`) and accepted as either a string or a number.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub enum HealthCheckRating {
    #[default]
    Healthy = 0,
    LowRisk = 1,
    HighRisk = 2,
    CriticalRisk = 3,
}

impl HealthCheckRating {
    pub const ALL: [HealthCheckRating; 4] = [
        HealthCheckRating::Healthy,
        HealthCheckRating::LowRisk,
        HealthCheckRating::HighRisk,
        HealthCheckRating::CriticalRisk,
    ];

    pub fn rank(self) -> u8 {
        self as u8
    }

    pub fn from_rank(rank: u64) -> Option<Self> {
        HealthCheckRating::ALL
            .into_iter()
            .find(|r| u64::from(r.rank()) == rank)
    }

    pub fn label(self) -> &'static str {
        match self {
            HealthCheckRating::Healthy => "Healthy",
            HealthCheckRating::LowRisk => "LowRisk",
            HealthCheckRating::HighRisk => "HighRisk",
            HealthCheckRating::CriticalRisk => "CriticalRisk",
        }
    }
}

impl std::str::FromStr for HealthCheckRating {
    type Err = String;

    /// Accepts either the rank (`"2"`) or the label (`"HighRisk"`).
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let s = s.trim();
        s.parse::<u64>()
            .ok()
            .and_then(HealthCheckRating::from_rank)
            .or_else(|| HealthCheckRating::ALL.into_iter().find(|r| r.label() == s))
            .ok_or_else(|| format!("unknown health check rating '{s}'"))
    }
}

impl Serialize for HealthCheckRating {
    fn serialize<S>(&self, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: Serializer,
    {
        serializer.serialize_str(&self.rank().to_string())
    }
}

impl<'de> Deserialize<'de> for HealthCheckRating {
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: Deserializer<'de>,
    {
        struct RatingVisitor;

        impl<'de> Visitor<'de> for RatingVisitor {
            type Value = HealthCheckRating;

            fn expecting(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
                f.write_str("a health check rating rank between 0 and 3")
            }

            fn visit_u64<E: de::Error>(self, v: u64) -> Result<Self::Value, E> {
                HealthCheckRating::from_rank(v)
                    .ok_or_else(|| E::custom(format!("invalid health check rating {v}")))
            }

            fn visit_i64<E: de::Error>(self, v: i64) -> Result<Self::Value, E> {
                u64::try_from(v)
                    .ok()
                    .and_then(HealthCheckRating::from_rank)
                    .ok_or_else(|| E::custom(format!("invalid health check rating {v}")))
            }

            fn visit_str<E: de::Error>(self, v: &str) -> Result<Self::Value, E> {
                v.parse().map_err(E::custom)
            }
        }

        deserializer.deserialize_any(RatingVisitor)
    }
}

// ============================================================================
// Entry shape
// ============================================================================

#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct SickLeave {
    #[serde(rename = "startDate")]
    pub start_date: String,
    #[serde(rename = "endDate")]
    pub end_date: String,
}

#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct Discharge {
    pub date: String,
    pub criteria: String,
}

/// Fields shared by every entry variant.
#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct BaseEntry {
    pub description: String,
    pub date: String,
    pub specialist: String,
    #[serde(
        rename = "diagnosisCodes",
        default,
        skip_serializing_if = "Option::is_none"
    )]
    pub diagnosis_codes: Option<Vec<String>>,
}

/// Variant-specific fields, tagged by `type` on the wire.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "type")]
pub enum EntryDetails {
    Hospital {
        discharge: Discharge,
    },
    HealthCheck {
        #[serde(rename = "healthCheckRating")]
        health_check_rating: HealthCheckRating,
    },
    OccupationalHealthCare {
        #[serde(rename = "employerName")]
        employer_name: String,
        #[serde(rename = "sickLeave")]
        sick_leave: SickLeave,
    },
}

impl EntryDetails {
    pub fn entry_type(&self) -> EntryType {
        match self {
            EntryDetails::Hospital { .. } => EntryType::Hospital,
            EntryDetails::HealthCheck { .. } => EntryType::HealthCheck,
            EntryDetails::OccupationalHealthCare { .. } => EntryType::OccupationalHealthCare,
        }
    }
}

/// An entry as submitted for creation, before the server assigns an id.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct EntryFormValues {
    #[serde(flatten)]
    pub base: BaseEntry,
    #[serde(flatten)]
    pub details: EntryDetails,
}

impl EntryFormValues {
    pub fn entry_type(&self) -> EntryType {
        self.details.entry_type()
    }
}

/// A persisted entry belonging to a patient.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct Entry {
    pub id: String,
    #[serde(flatten)]
    pub values: EntryFormValues,
}

impl Entry {
    pub fn entry_type(&self) -> EntryType {
        self.values.entry_type()
    }

    pub fn base(&self) -> &BaseEntry {
        &self.values.base
    }

    pub fn details(&self) -> &EntryDetails {
        &self.values.details
    }

    /// Diagnosis codes attached to the entry, empty when the field is absent.
    pub fn diagnosis_codes(&self) -> &[String] {
        self.values.base.diagnosis_codes.as_deref().unwrap_or(&[])
    }
}
