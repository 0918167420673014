//! Diagnosis reference data and the lookup table built from it.

use serde::{Deserialize, Serialize};

/// A diagnosis as published by the diagnoses service.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct Diagnosis {
    /// Unique diagnosis code (for example `M24.2`).
    pub code: String,
    pub name: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub latin: Option<String>,
}

/// Immutable lookup table over the known diagnoses, in server order.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct DiagnosisTable {
    diagnoses: Vec<Diagnosis>,
}

impl DiagnosisTable {
    pub fn new(diagnoses: Vec<Diagnosis>) -> Self {
        Self { diagnoses }
    }

    /// Resolves a code to its human-readable name.
    pub fn name_of(&self, code: &str) -> Option<&str> {
        self.diagnoses
            .iter()
            .find(|d| d.code == code)
            .map(|d| d.name.as_str())
    }

    pub fn contains(&self, code: &str) -> bool {
        self.diagnoses.iter().any(|d| d.code == code)
    }

    /// All known codes, in server order.
    pub fn codes(&self) -> Vec<&str> {
        self.diagnoses.iter().map(|d| d.code.as_str()).collect()
    }

    pub fn iter(&self) -> impl Iterator<Item = &Diagnosis> {
        self.diagnoses.iter()
    }

    pub fn is_empty(&self) -> bool {
        self.diagnoses.is_empty()
    }

    pub fn len(&self) -> usize {
        self.diagnoses.len()
    }
}

impl From<Vec<Diagnosis>> for DiagnosisTable {
    fn from(diagnoses: Vec<Diagnosis>) -> Self {
        Self::new(diagnoses)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn table() -> DiagnosisTable {
        let json = r#"[
            {"code": "M24.2", "name": "Disorder of ligament", "latin": "Morbositas ligamenti"},
            {"code": "Z57.1", "name": "Occupational exposure to radiation"}
        ]"#;
        DiagnosisTable::new(serde_json::from_str(json).expect("valid diagnoses"))
    }

    #[test]
    fn resolves_known_code_to_name() {
        assert_eq!(table().name_of("Z57.1"), Some("Occupational exposure to radiation"));
    }

    #[test]
    fn unknown_code_has_no_name() {
        let table = table();
        assert_eq!(table.name_of("S03.5"), None);
        assert!(!table.contains("S03.5"));
    }

    #[test]
    fn codes_keep_server_order() {
        assert_eq!(table().codes(), vec!["M24.2", "Z57.1"]);
    }

    #[test]
    fn latin_is_omitted_when_absent() {
        let table = table();
        let second = table.iter().nth(1).expect("two diagnoses");
        let json = serde_json::to_string(second).expect("serialise");
        assert!(!json.contains("latin"));
    }
}
