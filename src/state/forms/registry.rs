//! Static field declarations for the employer form

use super::field::{FieldKind, FieldName, FieldRule, FieldSpec, RangeBounds};
use crate::error::Result;
use regex::Regex;

/// Letters and whitespace only
const NAME_PATTERN: &str = r"^[A-Za-z\s]+$";
/// Letters, digits, whitespace and commas
const LOCATION_PATTERN: &str = r"^[A-Za-z0-9\s,]+$";

pub const SALARY_BOUNDS: RangeBounds = RangeBounds {
    min: 10_000,
    max: 200_000,
    step: 1_000,
};

pub const JOB_TYPES: &[&str] = &["Full Time", "Part Time", "Contract"];

/// Read-only registry of every field, ordered as [`FieldName::ALL`]
#[derive(Debug, Clone)]
pub struct FieldRegistry {
    specs: Vec<FieldSpec>,
}

impl FieldRegistry {
    /// Build the employer form declarations
    pub fn employer() -> Result<Self> {
        let name = Regex::new(NAME_PATTERN)?;
        let location = Regex::new(LOCATION_PATTERN)?;

        let specs = FieldName::ALL
            .into_iter()
            .map(|field| match field {
                FieldName::Title => spec(
                    field,
                    "Job title",
                    FieldKind::Regex,
                    Some(FieldRule::Pattern {
                        regex: name.clone(),
                        message: "Job title should contain only letters and spaces",
                    }),
                ),
                FieldName::Name => spec(
                    field,
                    "Employer name",
                    FieldKind::Regex,
                    Some(FieldRule::Pattern {
                        regex: name.clone(),
                        message: "Employer name should contain only letters and spaces",
                    }),
                ),
                FieldName::Location => spec(
                    field,
                    "Location",
                    FieldKind::Regex,
                    Some(FieldRule::Pattern {
                        regex: location.clone(),
                        message: "Location should contain letters, numbers, and commas only",
                    }),
                ),
                FieldName::JobType => FieldSpec {
                    choices: JOB_TYPES,
                    ..spec(field, "Job type", FieldKind::EnumSelect, None)
                },
                FieldName::Description => spec(field, "Job description", FieldKind::Text, None),
                FieldName::StartTime => spec(field, "Start time", FieldKind::TimeOfDay, None),
                FieldName::EndTime => spec(
                    field,
                    "End time",
                    FieldKind::TimeOfDay,
                    Some(FieldRule::After {
                        field: FieldName::StartTime,
                        message: "End time must be later than start time",
                    }),
                ),
                FieldName::JobCategory => spec(field, "Job category", FieldKind::Text, None),
                FieldName::SalaryRange => FieldSpec {
                    // always holds a pair, nothing to be "missing"
                    required: false,
                    ..spec(
                        field,
                        "Salary range",
                        FieldKind::NumericRange,
                        Some(FieldRule::Ordered {
                            bounds: SALARY_BOUNDS,
                            message: "Minimum salary should be less than maximum salary",
                        }),
                    )
                },
                FieldName::Address => spec(
                    field,
                    "Address",
                    FieldKind::Regex,
                    Some(FieldRule::Pattern {
                        regex: location.clone(),
                        message: "Address should contain letters, numbers, and commas only",
                    }),
                ),
                FieldName::State => spec(field, "State", FieldKind::EnumSelect, None),
                FieldName::City => spec(field, "City", FieldKind::EnumSelect, None),
            })
            .collect();

        Ok(Self { specs })
    }

    pub fn spec_for(&self, name: FieldName) -> &FieldSpec {
        &self.specs[name.index()]
    }

    pub fn all_fields(&self) -> &[FieldSpec] {
        &self.specs
    }
}

fn spec(
    name: FieldName,
    label: &'static str,
    kind: FieldKind,
    rule: Option<FieldRule>,
) -> FieldSpec {
    FieldSpec {
        name,
        label,
        required: true,
        kind,
        rule,
        choices: &[],
    }
}
