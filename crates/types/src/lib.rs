//! Validated primitive types shared across the Patientor crates.
//!
//! These wrappers enforce their invariant once at construction, so downstream code can rely on
//! it without re-checking.

use chrono::NaiveDate;

/// Errors that can occur when creating validated primitive types.
#[derive(Debug, thiserror::Error, PartialEq, Eq)]
pub enum TextError {
    /// The input text was empty or contained only whitespace
    #[error("Text cannot be empty")]
    Empty,
    /// The input text was not a calendar date in `YYYY-MM-DD` form
    #[error("Invalid date '{0}' (expected YYYY-MM-DD)")]
    InvalidDate(String),
}

/// A string type that guarantees non-empty content.
///
/// This type wraps a `String` and ensures it contains at least one non-whitespace character.
/// The input is automatically trimmed of leading and trailing whitespace during construction.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NonEmptyText(String);

impl NonEmptyText {
    /// Creates a new `NonEmptyText` from the given input.
    ///
    /// The input is trimmed of leading and trailing whitespace. If the trimmed
    /// result is empty, an error is returned.
    ///
    /// # Arguments
    ///
    /// * `input` - Any type that can be converted to a string reference
    ///
    /// # Returns
    ///
    /// Returns `Ok(NonEmptyText)` if the trimmed input is non-empty,
    /// or `Err(TextError::Empty)` if it's empty or contains only whitespace.
    pub fn new(input: impl AsRef<str>) -> Result<Self, TextError> {
        let trimmed = input.as_ref().trim();
        if trimmed.is_empty() {
            return Err(TextError::Empty);
        }
        Ok(Self(trimmed.to_owned()))
    }

    /// Returns the inner string as a string slice.
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl std::fmt::Display for NonEmptyText {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl AsRef<str> for NonEmptyText {
    fn as_ref(&self) -> &str {
        &self.0
    }
}

impl serde::Serialize for NonEmptyText {
    fn serialize<S>(&self, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: serde::Serializer,
    {
        serializer.serialize_str(&self.0)
    }
}

impl<'de> serde::Deserialize<'de> for NonEmptyText {
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: serde::Deserializer<'de>,
    {
        let s = String::deserialize(deserializer)?;
        NonEmptyText::new(&s).map_err(serde::de::Error::custom)
    }
}

/// A calendar date parsed from the ISO `YYYY-MM-DD` form used by date inputs.
///
/// Ordering follows the calendar, so two `IsoDate` values can be compared directly.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct IsoDate(NaiveDate);

impl IsoDate {
    /// Wire format for dates.
    pub const FORMAT: &'static str = "%Y-%m-%d";

    /// Parses a `YYYY-MM-DD` string, ignoring surrounding whitespace.
    ///
    /// # Errors
    ///
    /// Returns `TextError::Empty` for blank input and `TextError::InvalidDate` when the value is
    /// not a real calendar date.
    pub fn parse(input: impl AsRef<str>) -> Result<Self, TextError> {
        let trimmed = input.as_ref().trim();
        if trimmed.is_empty() {
            return Err(TextError::Empty);
        }
        NaiveDate::parse_from_str(trimmed, Self::FORMAT)
            .map(Self)
            .map_err(|_| TextError::InvalidDate(trimmed.to_owned()))
    }

    pub fn as_naive_date(&self) -> NaiveDate {
        self.0
    }
}

impl std::fmt::Display for IsoDate {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.0.format(Self::FORMAT))
    }
}

impl std::str::FromStr for IsoDate {
    type Err = TextError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::parse(s)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn non_empty_text_trims_input() {
        let text = NonEmptyText::new("  d2773336  ").expect("valid text");
        assert_eq!(text.as_str(), "d2773336");
    }

    #[test]
    fn non_empty_text_rejects_whitespace() {
        assert_eq!(NonEmptyText::new("   "), Err(TextError::Empty));
    }

    #[test]
    fn non_empty_text_deserialize_rejects_empty_string() {
        let err = serde_json::from_str::<NonEmptyText>("\"\"").expect_err("should reject");
        assert!(err.to_string().contains("empty"));
    }

    #[test]
    fn iso_date_orders_chronologically() {
        let earlier = IsoDate::parse("2020-01-01").expect("valid date");
        let later = IsoDate::parse("2020-02-01").expect("valid date");
        assert!(earlier < later);
        assert_eq!(later.to_string(), "2020-02-01");
    }

    #[test]
    fn iso_date_rejects_impossible_dates() {
        let err = IsoDate::parse("2020-02-30").expect_err("no such day");
        assert!(matches!(err, TextError::InvalidDate(value) if value == "2020-02-30"));
    }

    #[test]
    fn iso_date_rejects_blank_input() {
        assert_eq!(IsoDate::parse(""), Err(TextError::Empty));
    }
}
