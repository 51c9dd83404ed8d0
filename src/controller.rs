//! Form session controller
//!
//! Owns the values, errors and option lists of one employer form and drives
//! the validate → submit → settle cycle. Backend work runs on spawned tasks;
//! their results only touch form state when applied through
//! [`FormStateController::next_update`] or [`FormStateController::pump`].

use crate::backend::{classify, EmployerApi, HttpEmployerApi, SubmissionOutcome, SubmitResponse};
use crate::config::FormConfig;
use crate::error::{FormError, Result};
use crate::state::{
    CityUpdate, DependentOptionResolver, FieldName, FieldRegistry, FieldSpec, FieldValue,
    FormValues, RemoteOption, ValidationErrors, Validator,
};
use std::future;
use std::sync::Arc;
use tokio::sync::oneshot;
use tracing::Instrument;
use uuid::Uuid;

type PendingSubmission = oneshot::Receiver<anyhow::Result<SubmitResponse>>;

/// Where the form is in its submit cycle
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum FormPhase {
    #[default]
    Editing,
    Validating,
    Submitting,
}

/// Result of starting a submission
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SubmitStart {
    /// Payload is on its way to the backend
    Started,
    /// Validation failed; nothing was sent
    Invalid(ValidationErrors),
    /// An earlier submission is still waiting for the backend
    AlreadySubmitting,
}

/// A background result applied to the form
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum FormUpdate {
    Cities(CityUpdate),
    Settled(SubmissionOutcome),
}

/// Single owner of one form session's state
pub struct FormStateController {
    session_id: Uuid,
    span: tracing::Span,
    registry: FieldRegistry,
    api: Arc<dyn EmployerApi>,
    resolver: DependentOptionResolver,
    values: FormValues,
    errors: ValidationErrors,
    phase: FormPhase,
    outcome: Option<SubmissionOutcome>,
    submission: Option<PendingSubmission>,
}

impl FormStateController {
    /// Create a session without loading remote options
    pub fn new(registry: FieldRegistry, api: Arc<dyn EmployerApi>) -> Self {
        let session_id = Uuid::new_v4();
        let span = tracing::info_span!("employer_form", session = %session_id);
        Self {
            session_id,
            span,
            registry,
            resolver: DependentOptionResolver::new(Arc::clone(&api)),
            api,
            values: FormValues::default(),
            errors: ValidationErrors::new(),
            phase: FormPhase::Editing,
            outcome: None,
            submission: None,
        }
    }

    /// Create a session and load the state list
    pub async fn mount(api: Arc<dyn EmployerApi>) -> Result<Self> {
        let mut controller = Self::new(FieldRegistry::employer()?, api);
        let span = controller.span.clone();
        async {
            tracing::info!("mounting form");
            controller.resolver.load_states().await;
        }
        .instrument(span)
        .await;
        Ok(controller)
    }

    /// Mount a session against the configured HTTP backend
    pub async fn from_config(config: &FormConfig) -> Result<Self> {
        let api = HttpEmployerApi::new(config)?;
        tracing::info!(backend = %api.base_url(), "using http backend");
        Self::mount(Arc::new(api)).await
    }

    /// Update a field. Editing the state clears the city and refetches
    /// the city list.
    pub fn set_field(&mut self, name: FieldName, value: impl Into<FieldValue>) -> Result<()> {
        if self.phase == FormPhase::Submitting {
            return Err(FormError::SubmissionInFlight);
        }

        let value = value.into();
        let shape = value.shape();
        if !self.values.set(name, value) {
            return Err(FormError::KindMismatch {
                field: name.to_string(),
                shape,
            });
        }

        let _guard = self.span.enter();
        tracing::debug!(field = %name, "field updated");

        if name == FieldName::State {
            self.values.city.clear();
            self.resolver.state_changed(&self.values.state);
        }
        Ok(())
    }

    /// [`Self::set_field`] for callers holding wire field names
    pub fn set_named(&mut self, name: &str, value: impl Into<FieldValue>) -> Result<()> {
        self.set_field(name.parse()?, value)
    }

    /// Validate and, if the form is valid, send it to the backend.
    ///
    /// The outcome is delivered later as [`FormUpdate::Settled`]. Errors
    /// and the outcome message from a previous attempt are replaced.
    pub fn begin_submit(&mut self) -> SubmitStart {
        let _guard = self.span.enter();

        if self.phase == FormPhase::Submitting {
            tracing::debug!("submit ignored, submission in flight");
            return SubmitStart::AlreadySubmitting;
        }

        self.phase = FormPhase::Validating;
        let errors = self.validation_errors();
        if !errors.is_empty() {
            tracing::info!(fields = errors.len(), "form has validation errors");
            self.errors = errors.clone();
            self.outcome = Some(SubmissionOutcome::Invalid {
                errors: errors.clone(),
            });
            self.phase = FormPhase::Editing;
            return SubmitStart::Invalid(errors);
        }

        self.errors = ValidationErrors::new();
        self.outcome = None;
        self.phase = FormPhase::Submitting;
        tracing::info!("submitting employer");

        let (tx, rx) = oneshot::channel();
        let api = Arc::clone(&self.api);
        let payload = self.values.clone();
        tokio::spawn(
            async move {
                let result = api.submit_employer(&payload).await;
                // receiver gone means the form was dropped
                let _ = tx.send(result);
            }
            .instrument(self.span.clone()),
        );
        self.submission = Some(rx);
        SubmitStart::Started
    }

    /// Validate, submit and wait for the backend's answer. City lists that
    /// arrive meanwhile are applied as usual.
    pub async fn submit(&mut self) -> Result<SubmissionOutcome> {
        match self.begin_submit() {
            SubmitStart::AlreadySubmitting => Err(FormError::SubmissionInFlight),
            SubmitStart::Invalid(errors) => Ok(SubmissionOutcome::Invalid { errors }),
            SubmitStart::Started => loop {
                if let FormUpdate::Settled(outcome) = self.next_update().await {
                    return Ok(outcome);
                }
            },
        }
    }

    /// Wait for the next background result and apply it.
    /// Stays pending while nothing is in flight.
    pub async fn next_update(&mut self) -> FormUpdate {
        let waiting = self.submission.is_some();
        let resolver = &mut self.resolver;
        let submission = &mut self.submission;

        enum Event {
            Cities(crate::state::CityFetch),
            Submitted(anyhow::Result<SubmitResponse>),
        }

        let event = tokio::select! {
            Some(fetch) = resolver.recv() => Event::Cities(fetch),
            result = wait_for(submission), if waiting => Event::Submitted(result),
        };

        match event {
            Event::Cities(fetch) => self.apply_cities(fetch),
            Event::Submitted(result) => FormUpdate::Settled(self.settle(result)),
        }
    }

    /// Apply every result that has already arrived, without waiting
    pub fn pump(&mut self) -> Vec<FormUpdate> {
        let mut updates = Vec::new();
        while let Some(fetch) = self.resolver.try_recv() {
            updates.push(self.apply_cities(fetch));
        }

        let finished = match self.submission.as_mut().map(|rx| rx.try_recv()) {
            Some(Ok(result)) => Some(result),
            Some(Err(oneshot::error::TryRecvError::Closed)) => Some(Err(dropped_submission())),
            Some(Err(oneshot::error::TryRecvError::Empty)) | None => None,
        };
        if let Some(result) = finished {
            updates.push(FormUpdate::Settled(self.settle(result)));
        }
        updates
    }

    fn apply_cities(&mut self, fetch: crate::state::CityFetch) -> FormUpdate {
        let _guard = self.span.enter();
        FormUpdate::Cities(self.resolver.apply(fetch))
    }

    fn settle(&mut self, result: anyhow::Result<SubmitResponse>) -> SubmissionOutcome {
        let _guard = self.span.enter();
        self.submission = None;

        let outcome = classify(result);
        if outcome.is_success() {
            tracing::info!("employer submitted, resetting form");
            self.values = FormValues::default();
            self.errors = ValidationErrors::new();
            self.resolver.reset_cities();
        } else {
            tracing::info!(outcome = ?outcome, "submission not accepted");
        }

        self.phase = FormPhase::Editing;
        self.outcome = Some(outcome.clone());
        outcome
    }

    fn validation_errors(&self) -> ValidationErrors {
        let validator = Validator::new(&self.registry);
        let mut errors = validator.validate(&self.values);
        if !errors.contains(FieldName::City) {
            if let Some(message) =
                validator.check_city_membership(&self.values, self.resolver.city_options())
            {
                errors.insert(FieldName::City, message);
            }
        }
        errors
    }

    pub fn session_id(&self) -> Uuid {
        self.session_id
    }

    pub fn fields(&self) -> &[FieldSpec] {
        self.registry.all_fields()
    }

    pub fn values(&self) -> &FormValues {
        &self.values
    }

    pub fn errors(&self) -> &ValidationErrors {
        &self.errors
    }

    pub fn error_for(&self, name: FieldName) -> Option<&str> {
        self.errors.get(name)
    }

    /// Whether the current values would pass validation
    pub fn is_valid(&self) -> bool {
        self.validation_errors().is_empty()
    }

    pub fn phase(&self) -> FormPhase {
        self.phase
    }

    pub fn outcome(&self) -> Option<&SubmissionOutcome> {
        self.outcome.as_ref()
    }

    /// Banner message of the last settled submission
    pub fn message(&self) -> Option<&str> {
        self.outcome.as_ref().and_then(SubmissionOutcome::message)
    }

    pub fn state_options(&self) -> &[RemoteOption] {
        self.resolver.state_options()
    }

    pub fn city_options(&self) -> &[RemoteOption] {
        self.resolver.city_options()
    }

    /// Last non-fatal option loading warning
    pub fn warning(&self) -> Option<&str> {
        self.resolver.warning()
    }
}

async fn wait_for(submission: &mut Option<PendingSubmission>) -> anyhow::Result<SubmitResponse> {
    match submission {
        Some(rx) => rx.await.unwrap_or_else(|_| Err(dropped_submission())),
        None => future::pending().await,
    }
}

fn dropped_submission() -> anyhow::Error {
    anyhow::anyhow!("submission task ended without a response")
}
