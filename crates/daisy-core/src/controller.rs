//! SearchController — the search state machine as a pure reducer.
//!
//! [`reduce`] applies one [`SearchEvent`] to a [`SearchState`] and returns
//! the [`Effect`]s the caller must perform. It never does IO, so every
//! transition can be tested without a runtime or a UI. The
//! [`session`](crate::session) module runs the effects.
//!
//! # Phases
//!
//! ```text
//!            Started
//!               │ LoadCache
//!               ▼
//!   ┌──────── Idle ◄───────────── fetch failed (error shown)
//!   │           │ cache hit / common fetch ok
//!   │ typing    ▼
//!   └──► LocalSuggesting ── Submit ──► Submitting ── ok ──► Loaded
//! ```
//!
//! Every fetch is tagged with a generation number. A response carrying an
//! older generation than the latest request is dropped on arrival, so the
//! last *submitted* search wins rather than the last to complete.

use std::time::Duration;

use crate::{
    debounce::DEFAULT_QUIET_PERIOD, reference::ReferenceIndex, types::PlantRecord,
    types::ReferenceTerm, ProviderError,
};

/// Where the screen is in its search lifecycle.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Phase {
    /// No results on screen: first start, or after a failed common fetch.
    #[default]
    Idle,
    /// The query input is active and reference suggestions are shown.
    LocalSuggesting,
    /// A submitted search is in flight.
    Submitting,
    /// Results are on screen (from cache, common fetch, or a search).
    Loaded,
}

/// Behaviour switches taken from configuration.
#[derive(Debug, Clone, Copy)]
pub struct SearchOptions {
    /// How long the query must be stable before it settles.
    pub quiet_period: Duration,
    /// Submit automatically when a non-blank query settles.
    pub auto_submit: bool,
}

impl Default for SearchOptions {
    fn default() -> Self {
        Self { quiet_period: DEFAULT_QUIET_PERIOD, auto_submit: false }
    }
}

/// Snapshot of one search screen.
#[derive(Debug, Clone, Default)]
pub struct SearchState {
    pub query: String,
    pub keyboard_active: bool,
    /// True while the latest edit has not yet settled through the debouncer.
    pub is_searching: bool,
    pub phase: Phase,
    pub suggestions: Vec<ReferenceTerm>,
    pub results: Vec<PlantRecord>,
    /// Result the user last picked, cleared when new results arrive.
    pub selected: Option<usize>,
    /// A provider call whose result will be applied is in flight.
    pub loading: bool,
    /// Last failure, shown until the next successful load or dismissal.
    pub error: Option<String>,
    /// Generation of the latest issued fetch.
    pub generation: u64,
}

impl SearchState {
    fn resting_phase(&self) -> Phase {
        if self.keyboard_active {
            Phase::LocalSuggesting
        } else if self.results.is_empty() {
            Phase::Idle
        } else {
            Phase::Loaded
        }
    }

    fn next_generation(&mut self) -> u64 {
        self.generation += 1;
        self.generation
    }
}

/// Input to the reducer: user intents and effect outcomes.
#[derive(Debug, Clone, PartialEq)]
pub enum SearchEvent {
    /// The screen was opened.
    Started,
    CacheLoaded(Vec<PlantRecord>),
    CommonFetched {
        generation: u64,
        outcome: Result<Vec<PlantRecord>, ProviderError>,
    },
    KeyboardOpened,
    KeyboardClosed,
    QueryChanged(String),
    /// The debouncer emitted a settled query.
    QuerySettled(String),
    /// Search icon or the input's search action.
    Submit,
    SelectSuggestion(usize),
    SelectResult(usize),
    QueryFetched {
        generation: u64,
        outcome: Result<Vec<PlantRecord>, ProviderError>,
    },
    /// Re-fetch the common list, ignoring the cache.
    Refresh,
    DismissError,
}

/// Work the reducer asks the session to perform.
#[derive(Debug, Clone, PartialEq)]
pub enum Effect {
    LoadCache,
    SaveCache(Vec<PlantRecord>),
    FetchCommon { generation: u64 },
    FetchQuery { term: String, generation: u64 },
    Debounce(String),
}

/// Apply `event` to `state`, returning the effects to run.
pub fn reduce(
    state: &mut SearchState,
    event: SearchEvent,
    index: &ReferenceIndex,
    options: &SearchOptions,
) -> Vec<Effect> {
    match event {
        SearchEvent::Started => {
            *state = SearchState {
                loading: true,
                suggestions: index.matches(""),
                ..SearchState::default()
            };
            vec![Effect::LoadCache]
        }

        SearchEvent::CacheLoaded(records) => {
            if state.generation != 0 {
                tracing::debug!("controller: cache arrived after a fetch was issued, ignored");
                return Vec::new();
            }
            if records.is_empty() {
                let generation = state.next_generation();
                tracing::debug!(generation, "controller: cache empty, fetching common plants");
                vec![Effect::FetchCommon { generation }]
            } else {
                tracing::debug!(count = records.len(), "controller: loaded from cache");
                state.results = records;
                state.loading = false;
                state.phase = state.resting_phase();
                Vec::new()
            }
        }

        SearchEvent::CommonFetched { generation, outcome } => {
            let current = generation == state.generation;
            match outcome {
                Ok(records) => {
                    let effects = vec![Effect::SaveCache(records.clone())];
                    if current {
                        state.results = records;
                        state.selected = None;
                        state.loading = false;
                        state.error = None;
                        state.phase = state.resting_phase();
                    } else {
                        tracing::debug!(generation, "controller: stale common list cached but not shown");
                    }
                    effects
                }
                Err(e) => {
                    tracing::error!(generation, error = %e, "controller: common fetch failed");
                    if current {
                        state.loading = false;
                        state.error = Some(e.to_string());
                        state.phase = state.resting_phase();
                    }
                    Vec::new()
                }
            }
        }

        SearchEvent::KeyboardOpened => {
            state.keyboard_active = true;
            state.suggestions = index.matches(&state.query);
            if state.phase != Phase::Submitting {
                state.phase = Phase::LocalSuggesting;
            }
            Vec::new()
        }

        SearchEvent::KeyboardClosed => {
            state.keyboard_active = false;
            if state.phase != Phase::Submitting {
                state.phase = state.resting_phase();
            }
            Vec::new()
        }

        SearchEvent::QueryChanged(text) => {
            state.keyboard_active = true;
            state.suggestions = index.matches(&text);
            state.is_searching = true;
            if state.phase != Phase::Submitting {
                state.phase = Phase::LocalSuggesting;
            }
            state.query = text.clone();
            vec![Effect::Debounce(text)]
        }

        SearchEvent::QuerySettled(text) => {
            // An older value settling does not end the wait for the newest one.
            if text != state.query {
                return Vec::new();
            }
            state.is_searching = false;
            if options.auto_submit
                && state.keyboard_active
                && !text.trim().is_empty()
            {
                return submit(state);
            }
            Vec::new()
        }

        SearchEvent::Submit => submit(state),

        SearchEvent::SelectSuggestion(i) => match state.suggestions.get(i) {
            Some(term) => {
                state.query = term.label.clone();
                submit(state)
            }
            None => Vec::new(),
        },

        SearchEvent::SelectResult(i) => match state.results.get(i) {
            Some(record) => {
                state.query = record.name.clone();
                state.selected = Some(i);
                submit(state)
            }
            None => Vec::new(),
        },

        SearchEvent::QueryFetched { generation, outcome } => {
            if generation != state.generation {
                tracing::debug!(
                    generation,
                    latest = state.generation,
                    "controller: discarding superseded search result"
                );
                return Vec::new();
            }
            state.loading = false;
            match outcome {
                Ok(records) => {
                    tracing::debug!(count = records.len(), "controller: search loaded");
                    state.results = records;
                    state.selected = None;
                    state.error = None;
                    state.phase = if state.keyboard_active {
                        Phase::LocalSuggesting
                    } else {
                        Phase::Loaded
                    };
                }
                Err(e) => {
                    tracing::error!(query = %state.query, error = %e, "controller: search failed");
                    state.error = Some(e.to_string());
                    state.phase = state.resting_phase();
                }
            }
            Vec::new()
        }

        SearchEvent::Refresh => {
            let generation = state.next_generation();
            state.loading = true;
            state.error = None;
            vec![Effect::FetchCommon { generation }]
        }

        SearchEvent::DismissError => {
            state.error = None;
            Vec::new()
        }
    }
}

fn submit(state: &mut SearchState) -> Vec<Effect> {
    let term = state.query.trim().to_string();
    if term.is_empty() {
        tracing::debug!("controller: blank submit ignored");
        return Vec::new();
    }
    let generation = state.next_generation();
    state.keyboard_active = false;
    // A pending edit is superseded by the submitted term.
    state.is_searching = false;
    state.loading = true;
    state.error = None;
    state.phase = Phase::Submitting;
    tracing::debug!(%term, generation, "controller: submitting search");
    vec![Effect::FetchQuery { term, generation }]
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
