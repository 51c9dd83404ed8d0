//! Current values of the employer form

use super::field::{FieldName, FieldValue};
use serde::{Deserialize, Serialize};

pub const DEFAULT_SALARY_RANGE: [u32; 2] = [30_000, 90_000];
pub const DEFAULT_START_TIME: &str = "07:00";
pub const DEFAULT_END_TIME: &str = "17:00";

/// Form values, serialized as the `POST /api/employers` body
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct FormValues {
    pub title: String,
    pub name: String,
    pub location: String,
    #[serde(rename = "type")]
    pub job_type: String,
    pub description: String,
    pub start_time: String,
    pub end_time: String,
    pub job_category: String,
    pub salary_range: [u32; 2],
    pub address: String,
    pub state: String,
    pub city: String,
}

impl Default for FormValues {
    fn default() -> Self {
        Self {
            title: String::new(),
            name: String::new(),
            location: String::new(),
            job_type: String::new(),
            description: String::new(),
            start_time: DEFAULT_START_TIME.to_string(),
            end_time: DEFAULT_END_TIME.to_string(),
            job_category: String::new(),
            salary_range: DEFAULT_SALARY_RANGE,
            address: String::new(),
            state: String::new(),
            city: String::new(),
        }
    }
}

impl FormValues {
    /// Text value of a field (empty for the salary range)
    pub fn text(&self, field: FieldName) -> &str {
        match field {
            FieldName::Title => &self.title,
            FieldName::Name => &self.name,
            FieldName::Location => &self.location,
            FieldName::JobType => &self.job_type,
            FieldName::Description => &self.description,
            FieldName::StartTime => &self.start_time,
            FieldName::EndTime => &self.end_time,
            FieldName::JobCategory => &self.job_category,
            FieldName::SalaryRange => "",
            FieldName::Address => &self.address,
            FieldName::State => &self.state,
            FieldName::City => &self.city,
        }
    }

    pub fn get(&self, field: FieldName) -> FieldValue {
        match field {
            FieldName::SalaryRange => FieldValue::Range(self.salary_range[0], self.salary_range[1]),
            other => FieldValue::Text(self.text(other).to_string()),
        }
    }

    /// Store a value. Returns false when the shape does not fit the field.
    pub(crate) fn set(&mut self, field: FieldName, value: FieldValue) -> bool {
        match (field, value) {
            (FieldName::SalaryRange, FieldValue::Range(min, max)) => {
                self.salary_range = [min, max];
                true
            }
            (field, FieldValue::Text(text)) => match self.text_mut(field) {
                Some(target) => {
                    *target = text;
                    true
                }
                None => false,
            },
            _ => false,
        }
    }

    fn text_mut(&mut self, field: FieldName) -> Option<&mut String> {
        Some(match field {
            FieldName::Title => &mut self.title,
            FieldName::Name => &mut self.name,
            FieldName::Location => &mut self.location,
            FieldName::JobType => &mut self.job_type,
            FieldName::Description => &mut self.description,
            FieldName::StartTime => &mut self.start_time,
            FieldName::EndTime => &mut self.end_time,
            FieldName::JobCategory => &mut self.job_category,
            FieldName::SalaryRange => return None,
            FieldName::Address => &mut self.address,
            FieldName::State => &mut self.state,
            FieldName::City => &mut self.city,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    #[test]
    fn test_defaults() {
        let values = FormValues::default();
        assert_eq!(values.salary_range, [30_000, 90_000]);
        assert_eq!(values.start_time, "07:00");
        assert_eq!(values.end_time, "17:00");
        assert_eq!(values.title, "");
        assert_eq!(values.city, "");
    }

    #[test]
    fn test_serializes_with_wire_field_names() {
        let json = serde_json::to_value(FormValues::default()).unwrap();
        let mut keys: Vec<_> = json.as_object().unwrap().keys().cloned().collect();
        keys.sort();
        let mut expected: Vec<_> = FieldName::ALL.iter().map(|f| f.as_str().to_string()).collect();
        expected.sort();
        assert_eq!(keys, expected);
        assert_eq!(json["salary_range"], serde_json::json!([30000, 90000]));
    }

    #[test]
    fn test_set_text_field() {
        let mut values = FormValues::default();
        assert!(values.set(FieldName::JobType, FieldValue::text("Contract")));
        assert_eq!(values.job_type, "Contract");
        assert_eq!(values.get(FieldName::JobType), FieldValue::text("Contract"));
    }

    #[test]
    fn test_set_salary_range() {
        let mut values = FormValues::default();
        assert!(values.set(FieldName::SalaryRange, FieldValue::Range(40_000, 50_000)));
        assert_eq!(values.salary_range, [40_000, 50_000]);
    }

    #[test]
    fn test_set_rejects_mismatched_shape() {
        let mut values = FormValues::default();
        assert!(!values.set(FieldName::SalaryRange, FieldValue::text("40000")));
        assert!(!values.set(FieldName::Title, FieldValue::Range(1, 2)));
        assert_eq!(values, FormValues::default());
    }
}
