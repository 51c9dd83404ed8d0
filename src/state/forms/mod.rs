//! Form domain layer
//!
//! Field declarations, current values and client-side validation for the
//! employer form.

mod field;
mod registry;
mod validation;
mod values;

pub use field::{FieldKind, FieldName, FieldRule, FieldSpec, FieldValue, RangeBounds};
pub use registry::{FieldRegistry, JOB_TYPES, SALARY_BOUNDS};
pub use validation::{ValidationErrors, Validator, CITY_NOT_LISTED};
pub use values::{FormValues, DEFAULT_END_TIME, DEFAULT_SALARY_RANGE, DEFAULT_START_TIME};
