//! QueryDebouncer — coalesces rapid query edits into one settled value.
//!
//! Every [`push`](QueryDebouncer::push) restarts the quiet-period timer; the
//! sink only sees a value once the input has been stable for the whole quiet
//! period. Newer input replaces the pending value rather than queueing
//! behind it, so a burst of edits yields exactly one emission: the last one.
//!
//! The timer runs on a `tokio` task scoped to a [`CancellationToken`].
//! Cancelling the token (or dropping the handle) discards any pending value.

use std::sync::Arc;
use std::time::Duration;

use tokio::sync::{mpsc, watch};
use tokio_util::sync::CancellationToken;

/// Quiet period used when the config does not override it.
pub const DEFAULT_QUIET_PERIOD: Duration = Duration::from_millis(1000);

pub struct QueryDebouncer {
    input: mpsc::UnboundedSender<String>,
    searching: Arc<watch::Sender<bool>>,
    cancel: CancellationToken,
}

impl QueryDebouncer {
    /// Spawn the debounce task. Must be called from within a tokio runtime.
    ///
    /// `sink` is invoked on the debounce task with each settled value.
    pub fn spawn<F>(quiet: Duration, cancel: CancellationToken, mut sink: F) -> Self
    where
        F: FnMut(String) + Send + 'static,
    {
        let (input, mut rx) = mpsc::unbounded_channel::<String>();
        let searching = Arc::new(watch::Sender::new(false));
        let flag = Arc::clone(&searching);
        let token = cancel.clone();

        tokio::spawn(async move {
            'idle: loop {
                let mut pending = tokio::select! {
                    biased;
                    _ = token.cancelled() => break 'idle,
                    next = rx.recv() => match next {
                        Some(text) => text,
                        None => break 'idle,
                    },
                };
                flag.send_replace(true);

                loop {
                    tokio::select! {
                        biased;
                        _ = token.cancelled() => {
                            tracing::debug!(discarded = %pending, "debounce: cancelled with pending value");
                            break 'idle;
                        }
                        next = rx.recv() => match next {
                            Some(text) => pending = text,
                            None => break 'idle,
                        },
                        _ = tokio::time::sleep(quiet) => {
                            tracing::debug!(value = %pending, "debounce: settled");
                            flag.send_replace(false);
                            sink(pending);
                            continue 'idle;
                        }
                    }
                }
            }
            flag.send_replace(false);
        });

        Self { input, searching, cancel }
    }

    /// Offer a new query value, restarting the quiet period.
    pub fn push(&self, text: impl Into<String>) {
        if self.cancel.is_cancelled() {
            return;
        }
        self.searching.send_replace(true);
        if self.input.send(text.into()).is_err() {
            tracing::debug!("debounce: task already stopped, input dropped");
        }
    }

    /// True from the first unsettled edit until its value is emitted.
    pub fn is_searching(&self) -> bool {
        *self.searching.borrow()
    }

    /// A receiver that observes the searching flag.
    pub fn subscribe(&self) -> watch::Receiver<bool> {
        self.searching.subscribe()
    }

    /// Discard any pending value and stop the task.
    pub fn cancel(&self) {
        self.cancel.cancel();
    }
}

impl Drop for QueryDebouncer {
    fn drop(&mut self) {
        self.cancel.cancel();
    }
}
