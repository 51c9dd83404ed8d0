//! Client-side validation of the employer form

use super::field::{FieldKind, FieldName, FieldRule, FieldSpec};
use super::registry::FieldRegistry;
use super::values::FormValues;
use crate::state::RemoteOption;
use chrono::NaiveTime;
use std::collections::BTreeMap;
use std::fmt;

const TIME_FORMAT: &str = "%H:%M";

pub const CITY_NOT_LISTED: &str = "Please select a city from the list";

/// Per-field error messages from one validation pass. Empty means valid.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ValidationErrors {
    errors: BTreeMap<FieldName, String>,
}

impl ValidationErrors {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn insert(&mut self, field: FieldName, message: impl Into<String>) {
        self.errors.insert(field, message.into());
    }

    pub fn get(&self, field: FieldName) -> Option<&str> {
        self.errors.get(&field).map(String::as_str)
    }

    pub fn contains(&self, field: FieldName) -> bool {
        self.errors.contains_key(&field)
    }

    pub fn is_empty(&self) -> bool {
        self.errors.is_empty()
    }

    pub fn len(&self) -> usize {
        self.errors.len()
    }

    /// Fields with errors, in form order
    pub fn fields(&self) -> impl Iterator<Item = FieldName> + '_ {
        self.errors.keys().copied()
    }

    pub fn iter(&self) -> impl Iterator<Item = (FieldName, &str)> {
        self.errors.iter().map(|(f, m)| (*f, m.as_str()))
    }
}

impl fmt::Display for ValidationErrors {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for (field, message) in &self.errors {
            writeln!(f, "{field}: {message}")?;
        }
        Ok(())
    }
}

/// Stateless validator over a field registry
#[derive(Debug, Clone, Copy)]
pub struct Validator<'a> {
    registry: &'a FieldRegistry,
}

impl<'a> Validator<'a> {
    pub fn new(registry: &'a FieldRegistry) -> Self {
        Self { registry }
    }

    /// Check every field independently and collect all errors
    pub fn validate(&self, values: &FormValues) -> ValidationErrors {
        let mut errors = ValidationErrors::new();
        for spec in self.registry.all_fields() {
            if let Some(message) = check_field(spec, values) {
                errors.insert(spec.name, message);
            }
        }
        errors
    }

    /// A selected city must be one of the options resolved for the
    /// current state. An empty city is left to the required check.
    pub fn check_city_membership(
        &self,
        values: &FormValues,
        city_options: &[RemoteOption],
    ) -> Option<String> {
        if values.city.is_empty() || city_options.iter().any(|c| c.id == values.city) {
            None
        } else {
            Some(CITY_NOT_LISTED.to_string())
        }
    }
}

fn check_field(spec: &FieldSpec, values: &FormValues) -> Option<String> {
    if spec.kind == FieldKind::NumericRange {
        let [min, max] = values.salary_range;
        return match &spec.rule {
            Some(FieldRule::Ordered { message, .. }) if min >= max => Some(message.to_string()),
            _ => None,
        };
    }

    let value = values.text(spec.name);
    if value.is_empty() {
        return spec.required.then(|| spec.required_message());
    }

    if spec.kind == FieldKind::TimeOfDay && parse_time(value).is_none() {
        return Some(format!("{} must be a valid HH:MM time", spec.label));
    }

    match &spec.rule {
        Some(FieldRule::Pattern { regex, message }) if !regex.is_match(value) => {
            Some(message.to_string())
        }
        Some(FieldRule::After { field, message }) => {
            // an unparseable or missing start is reported on its own field
            let start = parse_time(values.text(*field))?;
            let end = parse_time(value)?;
            (end <= start).then(|| message.to_string())
        }
        _ => None,
    }
}

fn parse_time(value: &str) -> Option<NaiveTime> {
    NaiveTime::parse_from_str(value, TIME_FORMAT).ok()
}
