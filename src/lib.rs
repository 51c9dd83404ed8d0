//! Employer form engine
//!
//! Headless engine behind a job-posting form: field declarations,
//! client-side validation, cascading state → city option lists resolved
//! from the backend, and the submit/settle cycle.
//!
//! ```no_run
//! use employer_form::{FieldName, FormConfig, FormStateController};
//!
//! # async fn run() -> employer_form::Result<()> {
//! let config = FormConfig::load().unwrap_or_default();
//! let mut form = FormStateController::from_config(&config).await?;
//! form.set_field(FieldName::Title, "Software Engineer")?;
//! form.set_field(FieldName::State, "tx")?;
//! form.next_update().await;
//! let outcome = form.submit().await?;
//! println!("{:?}", outcome.message());
//! # Ok(())
//! # }
//! ```

pub mod backend;
pub mod config;
pub mod controller;
pub mod error;
pub mod state;
pub mod telemetry;

pub use backend::{EmployerApi, HttpEmployerApi, SubmissionOutcome, SubmitResponse};
pub use config::FormConfig;
pub use controller::{FormPhase, FormStateController, FormUpdate, SubmitStart};
pub use error::{FormError, Result};
pub use state::{
    CityUpdate, DependentOptionResolver, FieldName, FieldRegistry, FieldSpec, FieldValue,
    FormValues, RemoteOption, ValidationErrors, Validator,
};
