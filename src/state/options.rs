//! Remote option lists and the cascading state → city resolver

use crate::backend::EmployerApi;
use serde::{Deserialize, Deserializer, Serialize};
use std::sync::Arc;
use tokio::sync::mpsc;

/// A selectable option fetched from the backend
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct RemoteOption {
    #[serde(deserialize_with = "id_from_string_or_number")]
    pub id: String,
    #[serde(rename = "name")]
    pub label: String,
}

impl RemoteOption {
    pub fn new(id: impl Into<String>, label: impl Into<String>) -> Self {
        Self {
            id: id.into(),
            label: label.into(),
        }
    }
}

/// Backends return ids either as strings or as integers
fn id_from_string_or_number<'de, D>(deserializer: D) -> Result<String, D::Error>
where
    D: Deserializer<'de>,
{
    #[derive(Deserialize)]
    #[serde(untagged)]
    enum RawId {
        Text(String),
        Number(serde_json::Number),
    }

    Ok(match RawId::deserialize(deserializer)? {
        RawId::Text(s) => s,
        RawId::Number(n) => n.to_string(),
    })
}

/// Completed city fetch, tagged with the generation it was issued under
#[derive(Debug)]
pub struct CityFetch {
    pub generation: u64,
    pub state_id: String,
    pub result: anyhow::Result<Vec<RemoteOption>>,
}

/// What applying a city fetch did
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum CityUpdate {
    /// Result was current and replaced the city list
    Applied { state_id: String, count: usize },
    /// Result was current but the fetch failed; the list stays empty
    Failed { state_id: String },
    /// A newer state edit superseded this fetch
    Discarded { generation: u64 },
}

/// Fetches state options once and city options on every state change,
/// keeping only the city list for the most recent state edit.
pub struct DependentOptionResolver {
    api: Arc<dyn EmployerApi>,
    state_options: Vec<RemoteOption>,
    city_options: Vec<RemoteOption>,
    generation: u64,
    states_warning: Option<String>,
    cities_warning: Option<String>,
    tx: mpsc::UnboundedSender<CityFetch>,
    rx: mpsc::UnboundedReceiver<CityFetch>,
}

impl DependentOptionResolver {
    pub fn new(api: Arc<dyn EmployerApi>) -> Self {
        let (tx, rx) = mpsc::unbounded_channel();
        Self {
            api,
            state_options: Vec::new(),
            city_options: Vec::new(),
            generation: 0,
            states_warning: None,
            cities_warning: None,
            tx,
            rx,
        }
    }

    /// Load the state list. A failure leaves it empty and records a warning.
    pub async fn load_states(&mut self) {
        match self.api.list_states().await {
            Ok(states) => {
                tracing::info!(count = states.len(), "loaded states");
                self.state_options = states;
                self.states_warning = None;
            }
            Err(e) => {
                tracing::warn!("failed to load states: {e:#}");
                self.state_options.clear();
                self.states_warning = Some("Could not load states".to_string());
            }
        }
    }

    /// React to an edit of the state field.
    ///
    /// Every call starts a new generation and clears the city list
    /// immediately. For a non-empty id a fetch tagged with the new
    /// generation is spawned and its result arrives through [`Self::recv`].
    pub fn state_changed(&mut self, state_id: &str) {
        self.generation += 1;
        self.city_options.clear();
        self.cities_warning = None;

        if state_id.is_empty() {
            return;
        }

        let generation = self.generation;
        let state_id = state_id.to_string();
        let api = Arc::clone(&self.api);
        let tx = self.tx.clone();
        tracing::debug!(generation, state_id = %state_id, "fetching cities");

        tokio::spawn(async move {
            let result = api.list_cities(&state_id).await;
            // receiver gone means the form was dropped
            let _ = tx.send(CityFetch {
                generation,
                state_id,
                result,
            });
        });
    }

    /// Drop the city list and supersede any fetch still in flight
    pub fn reset_cities(&mut self) {
        self.generation += 1;
        self.city_options.clear();
        self.cities_warning = None;
    }

    /// Apply a finished fetch if it is still current
    pub fn apply(&mut self, fetch: CityFetch) -> CityUpdate {
        if fetch.generation != self.generation {
            tracing::debug!(
                generation = fetch.generation,
                current = self.generation,
                "discarding stale city list"
            );
            return CityUpdate::Discarded {
                generation: fetch.generation,
            };
        }

        match fetch.result {
            Ok(cities) => {
                let count = cities.len();
                self.city_options = cities;
                self.cities_warning = None;
                CityUpdate::Applied {
                    state_id: fetch.state_id,
                    count,
                }
            }
            Err(e) => {
                tracing::warn!(state_id = %fetch.state_id, "failed to load cities: {e:#}");
                self.city_options.clear();
                self.cities_warning = Some("Could not load cities".to_string());
                CityUpdate::Failed {
                    state_id: fetch.state_id,
                }
            }
        }
    }

    /// Wait for the next finished city fetch
    pub async fn recv(&mut self) -> Option<CityFetch> {
        self.rx.recv().await
    }

    /// Take a finished city fetch without waiting
    pub fn try_recv(&mut self) -> Option<CityFetch> {
        self.rx.try_recv().ok()
    }

    pub fn state_options(&self) -> &[RemoteOption] {
        &self.state_options
    }

    pub fn city_options(&self) -> &[RemoteOption] {
        &self.city_options
    }

    pub fn generation(&self) -> u64 {
        self.generation
    }

    /// Set while the state list could not be loaded
    pub fn states_warning(&self) -> Option<&str> {
        self.states_warning.as_deref()
    }

    /// Set while the city list for the current state could not be loaded
    pub fn cities_warning(&self) -> Option<&str> {
        self.cities_warning.as_deref()
    }

    /// Most relevant non-fatal fetch warning: cities first, then states
    pub fn warning(&self) -> Option<&str> {
        self.cities_warning().or(self.states_warning())
    }
}
