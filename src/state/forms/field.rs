//! Form field value objects

use crate::error::FormError;
use regex::Regex;
use std::fmt;
use std::str::FromStr;

/// Closed set of fields on the employer form, in display order
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum FieldName {
    Title,
    Name,
    Location,
    JobType,
    Description,
    StartTime,
    EndTime,
    JobCategory,
    SalaryRange,
    Address,
    State,
    City,
}

impl FieldName {
    pub const ALL: [FieldName; 12] = [
        Self::Title,
        Self::Name,
        Self::Location,
        Self::JobType,
        Self::Description,
        Self::StartTime,
        Self::EndTime,
        Self::JobCategory,
        Self::SalaryRange,
        Self::Address,
        Self::State,
        Self::City,
    ];

    /// Wire name used in the JSON payload and error maps
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Title => "title",
            Self::Name => "name",
            Self::Location => "location",
            Self::JobType => "type",
            Self::Description => "description",
            Self::StartTime => "start_time",
            Self::EndTime => "end_time",
            Self::JobCategory => "job_category",
            Self::SalaryRange => "salary_range",
            Self::Address => "address",
            Self::State => "state",
            Self::City => "city",
        }
    }

    /// Position in [`FieldName::ALL`]
    pub fn index(self) -> usize {
        self as usize
    }
}

impl fmt::Display for FieldName {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for FieldName {
    type Err = FormError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::ALL
            .into_iter()
            .find(|field| field.as_str() == s)
            .ok_or_else(|| FormError::UnknownField(s.to_string()))
    }
}

/// Type-safe field values
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum FieldValue {
    Text(String),
    Range(u32, u32),
}

impl FieldValue {
    pub fn text(value: impl Into<String>) -> Self {
        FieldValue::Text(value.into())
    }

    /// Short shape name used in kind mismatch errors
    pub fn shape(&self) -> &'static str {
        match self {
            FieldValue::Text(_) => "text",
            FieldValue::Range(..) => "range",
        }
    }
}

impl From<&str> for FieldValue {
    fn from(value: &str) -> Self {
        FieldValue::Text(value.to_string())
    }
}

impl From<String> for FieldValue {
    fn from(value: String) -> Self {
        FieldValue::Text(value)
    }
}

impl From<[u32; 2]> for FieldValue {
    fn from([min, max]: [u32; 2]) -> Self {
        FieldValue::Range(min, max)
    }
}

/// Input kind of a field
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FieldKind {
    /// Free text with no pattern
    Text,
    /// Free text constrained by a pattern
    Regex,
    /// Two-handle numeric slider
    NumericRange,
    /// 24-hour `HH:MM` clock value
    TimeOfDay,
    /// Selected option id
    EnumSelect,
}

/// Slider limits for numeric ranges. Enforced by the widget, not the engine.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct RangeBounds {
    pub min: u32,
    pub max: u32,
    pub step: u32,
}

/// Validation rule attached to a field beyond its required check
#[derive(Debug, Clone)]
pub enum FieldRule {
    /// Value must match the whole pattern
    Pattern { regex: Regex, message: &'static str },
    /// `min < max`
    Ordered {
        bounds: RangeBounds,
        message: &'static str,
    },
    /// Time must be strictly later than the time in another field
    After {
        field: FieldName,
        message: &'static str,
    },
}

/// Static declaration of a single field
#[derive(Debug, Clone)]
pub struct FieldSpec {
    pub name: FieldName,
    pub label: &'static str,
    pub required: bool,
    pub kind: FieldKind,
    pub rule: Option<FieldRule>,
    /// Fixed choices for selects not backed by a remote list
    pub choices: &'static [&'static str],
}

impl FieldSpec {
    pub fn required_message(&self) -> String {
        format!("{} is required", self.label)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_wire_names_round_trip_through_from_str() {
        for field in FieldName::ALL {
            assert_eq!(field.as_str().parse::<FieldName>().unwrap(), field);
        }
    }

    #[test]
    fn test_job_type_uses_type_on_the_wire() {
        assert_eq!(FieldName::JobType.as_str(), "type");
        assert_eq!("type".parse::<FieldName>().unwrap(), FieldName::JobType);
    }

    #[test]
    fn test_unknown_field_is_an_error() {
        let err = "salary".parse::<FieldName>().unwrap_err();
        assert!(matches!(err, FormError::UnknownField(ref s) if s == "salary"));
    }

    #[test]
    fn test_index_matches_position_in_all() {
        for (i, field) in FieldName::ALL.iter().enumerate() {
            assert_eq!(field.index(), i);
        }
    }

    #[test]
    fn test_from_conversions() {
        assert_eq!(FieldValue::from("a"), FieldValue::Text("a".to_string()));
        assert_eq!(FieldValue::from([1, 2]), FieldValue::Range(1, 2));
    }
}
