//! Trait abstraction for the employer backend to enable mocking in tests

use crate::state::{FormValues, RemoteOption};
use anyhow::Result;
use async_trait::async_trait;

use super::submission::SubmitResponse;

/// Trait for backend operations, enabling mocking in tests
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait EmployerApi: Send + Sync {
    /// List the selectable states
    async fn list_states(&self) -> Result<Vec<RemoteOption>>;

    /// List the cities of a state
    async fn list_cities(&self, state_id: &str) -> Result<Vec<RemoteOption>>;

    /// Create an employer posting from validated form values.
    /// Non-2xx answers are `Ok` with `ok == false`; only transport or
    /// decoding failures are `Err`.
    async fn submit_employer(&self, payload: &FormValues) -> Result<SubmitResponse>;
}
