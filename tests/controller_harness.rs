//! End-to-end search flow: SearchSession + HttpProvider + LocalRecordStore.
//!
//! # What this covers
//!
//! - **Cold start**: an empty cache triggers exactly one common-list fetch,
//!   the screen ends `Loaded`, and the store holds the same records.
//! - **Warm start**: a populated cache is shown without any provider call.
//! - **Latest submit wins**: a slow, superseded search never overwrites the
//!   results of the newer one.
//! - **Visible failure**: a provider error is surfaced on the state and the
//!   previous results stay on screen.
//! - **Refresh**: re-fetches the common list and replaces the cache.
//!
//! # Running
//!
//! ```sh
//! cargo test --test controller_harness
//! ```

mod common;
use common::fake_provider::FakeProvider;
use common::*;

use std::sync::Arc;
use std::time::Duration;

use async_trait::async_trait;
use daisy_core::{
    controller::{Phase, SearchEvent, SearchOptions},
    session::SearchSession,
    store::{LocalRecordStore, RecordStore},
    Catalog, PlantDataProvider, PlantRecord, ProviderError,
};
use daisy_provider::HttpProvider;
use pretty_assertions::assert_eq;

fn names(records: &[PlantRecord]) -> Vec<&str> {
    records.iter().map(|r| r.name.as_str()).collect()
}

struct Fixture {
    fake: FakeProvider,
    store: Arc<LocalRecordStore>,
    session: SearchSession,
    _dir: tempfile::TempDir,
}

async fn fixture(catalog: Catalog) -> Fixture {
    let fake = FakeProvider::start().await.unwrap();
    let provider = Arc::new(HttpProvider::new(fake.config("sk-test", "")).unwrap());
    let dir = tempfile::tempdir().unwrap();
    let store = Arc::new(LocalRecordStore::for_catalog(dir.path(), catalog));
    let session = SearchSession::new(catalog, SearchOptions::default(), provider, store.clone());
    Fixture { fake, store, session, _dir: dir }
}

// ---------------------------------------------------------------------------
// Startup
// ---------------------------------------------------------------------------

#[tokio::test]
async fn cold_start_fetches_common_once_and_caches_it() {
    let mut f = fixture(Catalog::Remedies).await;
    f.fake.reply_completion(200, completion_body(COMMON_REMEDY_CONTENT)).await;

    f.session.start();
    assert!(f.session.state().loading);
    f.session.settle().await;

    let state = f.session.state();
    assert_eq!(state.phase, Phase::Loaded);
    assert_eq!(names(&state.results), vec!["Chamomile", "Aloe"]);
    assert_eq!(state.error, None);
    assert_eq!(f.fake.completions().await.len(), 1);
    assert_eq!(f.store.load(), state.results);
}

#[tokio::test]
async fn warm_start_uses_cache_without_provider_call() {
    let mut f = fixture(Catalog::Care).await;
    let cached = vec![PlantRecordBuilder::new("Fern").steps(&["light: shade"]).build()];
    f.store.save(&cached).unwrap();

    f.session.start();
    f.session.settle().await;

    assert_eq!(f.session.state().results, cached);
    assert_eq!(f.session.state().phase, Phase::Loaded);
    assert!(f.fake.completions().await.is_empty());
}

#[tokio::test]
async fn failed_cold_start_is_visible_and_idle() {
    let mut f = fixture(Catalog::Remedies).await;
    f.fake.reply_completion(503, serde_json::json!({ "error": "down" })).await;

    f.session.start();
    f.session.settle().await;

    let state = f.session.state();
    assert_eq!(state.phase, Phase::Idle);
    assert!(state.error.as_deref().unwrap().contains("503"));
    assert!(f.store.load().is_empty());
}

// ---------------------------------------------------------------------------
// Searching
// ---------------------------------------------------------------------------

#[tokio::test]
async fn submitted_search_replaces_results_but_not_cache() {
    let mut f = fixture(Catalog::Remedies).await;
    f.fake.reply_completion(200, completion_body(COMMON_REMEDY_CONTENT)).await;
    f.session.start();
    f.session.settle().await;

    f.fake.reply_completion(200, completion_body(REMEDY_CONTENT)).await;
    f.session.dispatch(SearchEvent::KeyboardOpened);
    f.session.dispatch(SearchEvent::QueryChanged("indigestion".into()));
    assert_eq!(f.session.state().phase, Phase::LocalSuggesting);
    f.session.dispatch(SearchEvent::Submit);
    assert_eq!(f.session.state().phase, Phase::Submitting);
    f.session.settle().await;

    let state = f.session.state();
    assert_eq!(state.phase, Phase::Loaded);
    assert_eq!(names(&state.results), vec!["Mint"]);
    assert_eq!(names(&f.store.load()), vec!["Chamomile", "Aloe"]);
}

#[tokio::test]
async fn failed_search_keeps_previous_results() {
    let mut f = fixture(Catalog::Remedies).await;
    f.fake.reply_completion(200, completion_body(COMMON_REMEDY_CONTENT)).await;
    f.session.start();
    f.session.settle().await;

    f.fake.reply_completion(200, empty_completion_body()).await;
    f.session.dispatch(SearchEvent::QueryChanged("fever".into()));
    f.session.dispatch(SearchEvent::Submit);
    f.session.settle().await;

    let state = f.session.state();
    assert!(state.error.is_some());
    assert_eq!(state.phase, Phase::Loaded);
    assert_eq!(names(&state.results), vec!["Chamomile", "Aloe"]);

    f.session.dispatch(SearchEvent::DismissError);
    assert_eq!(f.session.state().error, None);
}

#[tokio::test]
async fn refresh_refetches_and_replaces_cache() {
    let mut f = fixture(Catalog::Remedies).await;
    f.store.save(&[PlantRecordBuilder::new("Old").build()]).unwrap();
    f.session.start();
    f.session.settle().await;
    assert_eq!(names(&f.session.state().results), vec!["Old"]);

    f.fake.reply_completion(200, completion_body(COMMON_REMEDY_CONTENT)).await;
    f.session.dispatch(SearchEvent::Refresh);
    f.session.settle().await;

    assert_eq!(names(&f.session.state().results), vec!["Chamomile", "Aloe"]);
    assert_eq!(names(&f.store.load()), vec!["Chamomile", "Aloe"]);
}

// ---------------------------------------------------------------------------
// Superseded searches
// ---------------------------------------------------------------------------

/// Answers each query after a delay taken from the term itself.
struct DelayedProvider;

#[async_trait]
impl PlantDataProvider for DelayedProvider {
    async fn fetch_by_query(
        &self,
        _catalog: Catalog,
        term: &str,
    ) -> Result<Vec<PlantRecord>, ProviderError> {
        let delay = if term == "slow" { 500 } else { 20 };
        tokio::time::sleep(Duration::from_millis(delay)).await;
        Ok(vec![PlantRecordBuilder::new(term).build()])
    }

    async fn fetch_common(&self, _catalog: Catalog) -> Result<Vec<PlantRecord>, ProviderError> {
        Ok(Vec::new())
    }
}

#[tokio::test(start_paused = true)]
async fn latest_submit_wins_over_slower_earlier_one() {
    let store = Arc::new(daisy_core::store::MemoryRecordStore::new());
    let mut session = SearchSession::new(
        Catalog::Remedies,
        SearchOptions::default(),
        Arc::new(DelayedProvider),
        store,
    );

    session.dispatch(SearchEvent::QueryChanged("slow".into()));
    session.dispatch(SearchEvent::Submit);
    session.dispatch(SearchEvent::QueryChanged("fast".into()));
    session.dispatch(SearchEvent::Submit);
    session.settle().await;
    assert_eq!(names(&session.state().results), vec!["fast"]);

    // Let the superseded response arrive and be folded in.
    tokio::time::sleep(Duration::from_secs(2)).await;
    session.pump();

    assert_eq!(names(&session.state().results), vec!["fast"]);
    assert_eq!(session.state().phase, Phase::Loaded);
}

// ---------------------------------------------------------------------------
// Headless entry point
// ---------------------------------------------------------------------------

#[tokio::test]
async fn headless_search_returns_submitted_results() {
    let fake = FakeProvider::start().await.unwrap();
    fake.reply_completion(200, completion_body(REMEDY_CONTENT)).await;
    let dir = tempfile::tempdir().unwrap();
    let store = Arc::new(LocalRecordStore::for_catalog(dir.path(), Catalog::Remedies));
    store.save(&[PlantRecordBuilder::new("Cached").build()]).unwrap();

    let request = daisy::headless::SearchRequest {
        catalog: Catalog::Remedies,
        term: Some("indigestion".into()),
        refresh: false,
    };
    let provider = Arc::new(HttpProvider::new(fake.config("sk-test", "")).unwrap());
    let records = daisy::headless::search(request, SearchOptions::default(), provider, store)
        .await
        .unwrap();

    assert_eq!(names(&records), vec!["Mint"]);
    assert_eq!(fake.completions().await.len(), 1);
}

#[tokio::test]
async fn headless_search_surfaces_provider_failure() {
    let fake = FakeProvider::start().await.unwrap();
    fake.reply_completion(500, serde_json::json!({ "error": "boom" })).await;
    let store = Arc::new(daisy_core::store::MemoryRecordStore::new());

    let request = daisy::headless::SearchRequest { catalog: Catalog::Care, term: None, refresh: false };
    let provider = Arc::new(HttpProvider::new(fake.config("sk-test", "")).unwrap());
    let err = daisy::headless::search(request, SearchOptions::default(), provider, store)
        .await
        .unwrap_err();

    assert!(err.to_string().contains("500"));
}
