//! The search session: the single owner of the user position and the
//! published result set.
//!
//! Searches may overlap (a slow response can still be in flight when the
//! user changes category). Every dispatched request takes the next sequence
//! number, and a response is applied only if its number is still the latest
//! issued; anything older is dropped on arrival. In-flight requests are not
//! aborted.

use std::sync::{Mutex, MutexGuard, PoisonError};

use wayfind_core::{categories, AppConfig, Coordinate, OutputMode};
use wayfind_overpass::{build_query, normalize_and_rank, OverpassClient, Place, QueryParams};
use wayfind_overpass::{DEFAULT_QUERY_TIMEOUT_SECS, DEFAULT_RADIUS_M};

use crate::error::SearchError;
use crate::locate::{Located, LocationStatus};

pub const DEFAULT_RESULT_LIMIT: usize = 50;

#[derive(Debug, Clone)]
pub struct SessionSettings {
    pub radius_m: u32,
    pub query_timeout_secs: u32,
    pub result_limit: usize,
    pub output: OutputMode,
}

impl Default for SessionSettings {
    fn default() -> Self {
        Self {
            radius_m: DEFAULT_RADIUS_M,
            query_timeout_secs: DEFAULT_QUERY_TIMEOUT_SECS,
            result_limit: DEFAULT_RESULT_LIMIT,
            output: OutputMode::default(),
        }
    }
}

impl SessionSettings {
    #[must_use]
    pub fn from_config(config: &AppConfig) -> Self {
        Self {
            radius_m: config.search_radius_m,
            query_timeout_secs: config.query_timeout_secs,
            result_limit: config.result_limit,
            output: config.output_mode,
        }
    }
}

/// Point-in-time copy of the session state, for presenters.
#[derive(Debug, Clone, Default)]
pub struct SessionSnapshot {
    pub coordinate: Option<Coordinate>,
    pub location_status: LocationStatus,
    /// Ascending by distance, at most `result_limit` long.
    pub places: Vec<Place>,
    pub loading: bool,
    pub error: Option<String>,
    /// Category and query of the most recently dispatched search.
    pub category: Option<String>,
    pub query: String,
    /// Sequence number of the search that produced `places` (0 = none yet).
    pub published_seq: u64,
}

#[derive(Debug, Default)]
struct SessionState {
    view: SessionSnapshot,
    /// Highest sequence number handed out so far.
    issued: u64,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SearchOutcome {
    /// The result set was replaced.
    Published { seq: u64, count: usize },
    /// A newer search was dispatched while this one was in flight; its
    /// response (or failure) was discarded.
    Superseded { seq: u64 },
    /// No coordinate has been acquired yet; nothing was sent.
    NoLocation,
}

pub struct SearchSession {
    client: OverpassClient,
    settings: SessionSettings,
    state: Mutex<SessionState>,
}

impl SearchSession {
    #[must_use]
    pub fn new(client: OverpassClient, settings: SessionSettings) -> Self {
        Self {
            client,
            settings,
            state: Mutex::new(SessionState::default()),
        }
    }

    fn lock(&self) -> MutexGuard<'_, SessionState> {
        self.state.lock().unwrap_or_else(PoisonError::into_inner)
    }

    pub fn set_location(&self, located: Located) {
        let mut state = self.lock();
        state.view.coordinate = Some(located.coordinate);
        state.view.location_status = located.status;
    }

    #[must_use]
    pub fn snapshot(&self) -> SessionSnapshot {
        self.lock().view.clone()
    }

    #[must_use]
    pub fn places(&self) -> Vec<Place> {
        self.lock().view.places.clone()
    }

    /// Run one search cycle for `category_id` with an optional free-text
    /// name filter (blank means none).
    ///
    /// # Errors
    ///
    /// - [`SearchError::UnknownCategory`] before anything is dispatched; the
    ///   published places are left untouched.
    /// - [`SearchError::Upstream`] if the request fails and is still the
    ///   latest one issued. The failure is also recorded in the snapshot's
    ///   `error`.
    pub async fn search(
        &self,
        category_id: &str,
        query: &str,
    ) -> Result<SearchOutcome, SearchError> {
        let (origin, category, seq) = {
            let mut state = self.lock();
            let Some(origin) = state.view.coordinate else {
                tracing::debug!(category = category_id, "no location yet; search skipped");
                return Ok(SearchOutcome::NoLocation);
            };
            let category = match categories::lookup(category_id) {
                Ok(c) => c,
                Err(e) => {
                    let err = SearchError::from(e);
                    state.view.error = Some(err.user_message());
                    return Err(err);
                }
            };
            state.issued += 1;
            let seq = state.issued;
            state.view.loading = true;
            state.view.error = None;
            state.view.category = Some(category.id.to_string());
            state.view.query = query.to_string();
            (origin, category, seq)
        };

        let params = QueryParams::new(category.tags, origin)
            .radius_m(self.settings.radius_m)
            .timeout_secs(self.settings.query_timeout_secs)
            .output(self.settings.output)
            .name_filter(query);
        let text = build_query(&params);
        tracing::debug!(
            seq,
            category = category.id,
            filtered = params.name_filter.is_some(),
            "search dispatched"
        );

        let result = self.client.fetch(&text).await;

        let mut state = self.lock();
        if state.issued != seq {
            tracing::debug!(
                seq,
                latest = state.issued,
                "discarding superseded search response"
            );
            return Ok(SearchOutcome::Superseded { seq });
        }
        state.view.loading = false;

        match result {
            Ok(elements) => {
                let places = normalize_and_rank(&elements, origin, self.settings.result_limit);
                let count = places.len();
                state.view.places = places;
                state.view.published_seq = seq;
                tracing::info!(
                    seq,
                    category = category.id,
                    count,
                    "published search results"
                );
                Ok(SearchOutcome::Published { seq, count })
            }
            Err(e) => {
                let err = SearchError::from(e);
                state.view.error = Some(err.user_message());
                tracing::warn!(
                    seq,
                    category = category.id,
                    error = %err,
                    "search failed"
                );
                Err(err)
            }
        }
    }
}
