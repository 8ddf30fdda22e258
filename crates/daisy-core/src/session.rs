//! SearchSession — runs the controller's effects for one catalog screen.
//!
//! A session owns the [`SearchState`] and is the only writer to it. Effects
//! returned by [`reduce`] are performed here: store IO inline, provider calls
//! and debouncing on `tokio` tasks. Their outcomes come back through an
//! unbounded channel and are folded in by [`pump`](SearchSession::pump) (the
//! TUI calls it once per frame) or [`next_event`](SearchSession::next_event)
//! (headless callers await it).
//!
//! Every task is scoped to the session's [`CancellationToken`]. After
//! [`shutdown`](SearchSession::shutdown) no task can touch the state again.

use std::sync::Arc;

use tokio::sync::mpsc;
use tokio_util::sync::CancellationToken;

use crate::{
    catalog::Catalog,
    controller::{reduce, Effect, SearchEvent, SearchOptions, SearchState},
    debounce::QueryDebouncer,
    provider::PlantDataProvider,
    reference::ReferenceIndex,
    store::RecordStore,
};

pub struct SearchSession {
    catalog: Catalog,
    state: SearchState,
    index: ReferenceIndex,
    options: SearchOptions,
    provider: Arc<dyn PlantDataProvider>,
    store: Arc<dyn RecordStore>,
    debouncer: QueryDebouncer,
    events_tx: mpsc::UnboundedSender<SearchEvent>,
    events_rx: mpsc::UnboundedReceiver<SearchEvent>,
    cancel: CancellationToken,
}

impl SearchSession {
    /// Build a session. Must be called from within a tokio runtime.
    pub fn new(
        catalog: Catalog,
        options: SearchOptions,
        provider: Arc<dyn PlantDataProvider>,
        store: Arc<dyn RecordStore>,
    ) -> Self {
        let (events_tx, events_rx) = mpsc::unbounded_channel();
        let cancel = CancellationToken::new();

        let settled_tx = events_tx.clone();
        let debouncer = QueryDebouncer::spawn(options.quiet_period, cancel.child_token(), move |text| {
            let _ = settled_tx.send(SearchEvent::QuerySettled(text));
        });

        Self {
            catalog,
            state: SearchState::default(),
            index: ReferenceIndex::for_catalog(catalog),
            options,
            provider,
            store,
            debouncer,
            events_tx,
            events_rx,
            cancel,
        }
    }

    pub fn catalog(&self) -> Catalog {
        self.catalog
    }

    /// Current snapshot for rendering.
    pub fn state(&self) -> &SearchState {
        &self.state
    }

    /// True while a query edit has not yet settled.
    pub fn is_searching(&self) -> bool {
        self.debouncer.is_searching()
    }

    /// Open the screen: load the cache, falling back to the provider.
    pub fn start(&mut self) {
        self.dispatch(SearchEvent::Started);
    }

    /// Apply one event and run the effects it produces.
    pub fn dispatch(&mut self, event: SearchEvent) {
        if self.cancel.is_cancelled() {
            return;
        }
        let effects = reduce(&mut self.state, event, &self.index, &self.options);
        for effect in effects {
            self.run(effect);
        }
    }

    /// Fold in every event that has already arrived. Returns true if any did.
    pub fn pump(&mut self) -> bool {
        let mut changed = false;
        while !self.cancel.is_cancelled() {
            match self.events_rx.try_recv() {
                Ok(event) => {
                    self.dispatch(event);
                    changed = true;
                }
                Err(_) => break,
            }
        }
        changed
    }

    /// Wait for the next event and fold it in. Returns false once the
    /// session has been shut down.
    pub async fn next_event(&mut self) -> bool {
        let event = tokio::select! {
            biased;
            _ = self.cancel.cancelled() => return false,
            event = self.events_rx.recv() => event,
        };
        match event {
            Some(event) => {
                self.dispatch(event);
                true
            }
            None => false,
        }
    }

    /// Wait until no fetch whose result will be shown is in flight.
    pub async fn settle(&mut self) {
        while self.state.loading {
            if !self.next_event().await {
                return;
            }
        }
    }

    /// Abandon pending debounce and in-flight fetches.
    pub fn shutdown(&mut self) {
        tracing::debug!(catalog = %self.catalog, "session: shutting down");
        self.cancel.cancel();
        self.state = SearchState::default();
    }

    fn run(&mut self, effect: Effect) {
        match effect {
            Effect::LoadCache => {
                let records = self.store.load();
                let _ = self.events_tx.send(SearchEvent::CacheLoaded(records));
            }
            Effect::SaveCache(records) => {
                if let Err(e) = self.store.save(&records) {
                    tracing::warn!(catalog = %self.catalog, error = %e, "session: cache save failed");
                }
            }
            Effect::Debounce(text) => self.debouncer.push(text),
            Effect::FetchCommon { generation } => {
                let provider = Arc::clone(&self.provider);
                let catalog = self.catalog;
                self.spawn_fetch(async move {
                    let outcome = provider.fetch_common(catalog).await;
                    SearchEvent::CommonFetched { generation, outcome }
                });
            }
            Effect::FetchQuery { term, generation } => {
                let provider = Arc::clone(&self.provider);
                let catalog = self.catalog;
                self.spawn_fetch(async move {
                    let outcome = provider.fetch_by_query(catalog, &term).await;
                    SearchEvent::QueryFetched { generation, outcome }
                });
            }
        }
    }

    fn spawn_fetch<F>(&self, fetch: F)
    where
        F: std::future::Future<Output = SearchEvent> + Send + 'static,
    {
        let tx = self.events_tx.clone();
        let token = self.cancel.clone();
        tokio::spawn(async move {
            tokio::select! {
                biased;
                _ = token.cancelled() => {
                    tracing::debug!("session: in-flight fetch abandoned");
                }
                event = fetch => {
                    let _ = tx.send(event);
                }
            }
        });
    }
}

impl Drop for SearchSession {
    fn drop(&mut self) {
        self.cancel.cancel();
    }
}
