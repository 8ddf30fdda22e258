//! Headless entry points: run the search pipeline without a terminal UI.
//!
//! `search` drives a [`SearchSession`] exactly as the TUI would (cache first,
//! then the provider) and returns whatever ends up on screen. Failures that
//! the TUI would show in its status line are returned as errors.

use std::path::Path;
use std::sync::Arc;

use anyhow::Context;
use daisy_core::{
    blog::{self, BlogEntry},
    controller::{SearchEvent, SearchOptions},
    session::SearchSession,
    store::RecordStore,
    Catalog, PlantDataProvider, PlantRecord,
};

/// What to fetch in a headless search.
#[derive(Debug, Clone)]
pub struct SearchRequest {
    pub catalog: Catalog,
    /// `None` loads the common plants list.
    pub term: Option<String>,
    /// Skip the cache and re-fetch the common plants list.
    pub refresh: bool,
}

/// Run one search to completion and return the loaded records.
pub async fn search(
    request: SearchRequest,
    options: SearchOptions,
    provider: Arc<dyn PlantDataProvider>,
    store: Arc<dyn RecordStore>,
) -> anyhow::Result<Vec<PlantRecord>> {
    let mut session = SearchSession::new(request.catalog, options, provider, store);
    session.start();
    session.settle().await;

    if request.refresh {
        session.dispatch(SearchEvent::Refresh);
        session.settle().await;
    }

    if let Some(term) = request.term.filter(|t| !t.trim().is_empty()) {
        tracing::info!(catalog = %request.catalog, %term, "headless search");
        session.dispatch(SearchEvent::QueryChanged(term));
        session.dispatch(SearchEvent::Submit);
        session.settle().await;
    }

    let state = session.state();
    if let Some(err) = &state.error {
        anyhow::bail!("{err}");
    }
    let records = state.results.clone();
    session.shutdown();
    Ok(records)
}

/// Load a blog export and keep the entries matching `filter`.
pub fn blog(path: &Path, filter: &str) -> anyhow::Result<Vec<BlogEntry>> {
    let raw = std::fs::read_to_string(path)
        .with_context(|| format!("reading blog export {}", path.display()))?;
    let entries = blog::parse_export(&raw)
        .with_context(|| format!("parsing blog export {}", path.display()))?;
    let matched: Vec<BlogEntry> = blog::filter_entries(&entries, filter).into_iter().cloned().collect();
    tracing::debug!(total = entries.len(), matched = matched.len(), %filter, "blog filter");
    Ok(matched)
}
