//! Patient aggregate as served by the patients API.

use crate::entry::Entry;
use serde::{Deserialize, Serialize};

#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Gender {
    Male,
    Female,
    Other,
}

/// A patient together with their ordered medical history.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct Patient {
    pub id: String,
    pub name: String,
    pub occupation: String,
    pub gender: Gender,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub ssn: Option<String>,
    #[serde(
        rename = "dateOfBirth",
        default,
        skip_serializing_if = "Option::is_none"
    )]
    pub date_of_birth: Option<String>,
    #[serde(default)]
    pub entries: Vec<Entry>,
}

impl Patient {
    /// Appends an entry the server has accepted. Existing entries keep their order.
    pub fn append_entry(&mut self, entry: Entry) {
        self.entries.push(entry);
    }
}
