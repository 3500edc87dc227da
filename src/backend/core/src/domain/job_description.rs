//! The description owned by every job offer.

use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;
use uuid::Uuid;

/// Kind of employment a job offer is for.
///
/// On the wire the type travels as a one-letter code (`F`, `P`, `I`, `C`),
/// accepted in either case. The store keeps the variant name.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(into = "String", try_from = "String")]
pub enum EmploymentType {
    FullTime,
    PartTime,
    Internship,
    Contract,
}

impl EmploymentType {
    pub const ALL: [EmploymentType; 4] = [
        Self::FullTime,
        Self::PartTime,
        Self::Internship,
        Self::Contract,
    ];

    /// One-letter wire code.
    pub const fn code(&self) -> &'static str {
        match self {
            Self::FullTime => "F",
            Self::PartTime => "P",
            Self::Internship => "I",
            Self::Contract => "C",
        }
    }

    /// Name used in the database column.
    pub const fn as_str(&self) -> &'static str {
        match self {
            Self::FullTime => "FULLTIME",
            Self::PartTime => "PARTTIME",
            Self::Internship => "INTERNSHIP",
            Self::Contract => "CONTRACT",
        }
    }

    /// Parse a wire code, ignoring case.
    pub fn from_code(code: &str) -> Option<Self> {
        Self::ALL
            .into_iter()
            .find(|kind| kind.code().eq_ignore_ascii_case(code))
    }
}

impl fmt::Display for EmploymentType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.code())
    }
}

impl FromStr for EmploymentType {
    type Err = UnknownEmploymentType;

    /// Accepts both the wire code and the stored name.
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::from_code(s)
            .or_else(|| Self::ALL.into_iter().find(|kind| kind.as_str() == s))
            .ok_or_else(|| UnknownEmploymentType(s.to_string()))
    }
}

impl From<EmploymentType> for String {
    fn from(kind: EmploymentType) -> Self {
        kind.code().to_string()
    }
}

impl TryFrom<String> for EmploymentType {
    type Error = UnknownEmploymentType;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        Self::from_code(&value).ok_or(UnknownEmploymentType(value))
    }
}

#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("unknown employment type: {0}")]
pub struct UnknownEmploymentType(pub String);

/// Title, pay and conditions of a job offer.
#[derive(Debug, Clone, PartialEq)]
pub struct JobDescription {
    pub id: Uuid,
    pub title: String,
    pub location: String,
    pub salary: Decimal,
    pub summary: String,
    pub responsibilities: String,
    pub requirements: String,
    pub employment: EmploymentType,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_employment_code_is_case_insensitive() {
        assert_eq!(EmploymentType::from_code("f"), Some(EmploymentType::FullTime));
        assert_eq!(EmploymentType::from_code("C"), Some(EmploymentType::Contract));
        assert_eq!(EmploymentType::from_code("X"), None);
    }

    #[test]
    fn test_employment_serde_uses_code() {
        let json = serde_json::to_string(&EmploymentType::Internship).unwrap();
        assert_eq!(json, "\"I\"");

        let parsed: EmploymentType = serde_json::from_str("\"p\"").unwrap();
        assert_eq!(parsed, EmploymentType::PartTime);

        assert!(serde_json::from_str::<EmploymentType>("\"FULL\"").is_err());
    }

    #[test]
    fn test_employment_from_stored_name() {
        assert_eq!("PARTTIME".parse::<EmploymentType>(), Ok(EmploymentType::PartTime));
    }
}
