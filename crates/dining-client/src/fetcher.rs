//! Shared handle that issues fetches and publishes [`FetchState`] changes.

use std::sync::Arc;

use chrono::Utc;
use tokio::sync::watch;

use crate::client::StatusSource;
use crate::state::{FetchState, Resolution};

/// Cheaply clonable handle over one status feed.
///
/// Readers either take a [`snapshot`](Self::snapshot) or
/// [`subscribe`](Self::subscribe) to be woken on every applied change. The
/// watch channel is the single writer path for the state.
pub struct StatusFetcher<S> {
    inner: Arc<Inner<S>>,
}

struct Inner<S> {
    source: S,
    state: watch::Sender<FetchState>,
}

impl<S> Clone for StatusFetcher<S> {
    fn clone(&self) -> Self {
        Self {
            inner: Arc::clone(&self.inner),
        }
    }
}

impl<S: StatusSource> StatusFetcher<S> {
    #[must_use]
    pub fn new(source: S) -> Self {
        let (state, _) = watch::channel(FetchState::new());
        Self {
            inner: Arc::new(Inner { source, state }),
        }
    }

    #[must_use]
    pub fn snapshot(&self) -> FetchState {
        self.inner.state.borrow().clone()
    }

    #[must_use]
    pub fn subscribe(&self) -> watch::Receiver<FetchState> {
        self.inner.state.subscribe()
    }

    /// Starts a fetch in the background and returns immediately.
    ///
    /// Overlapping calls are not deduplicated; each one issues its own request.
    /// Must be called from within a tokio runtime.
    pub fn revalidate(&self) {
        let Some(id) = self.begin() else {
            tracing::debug!("revalidate ignored after deactivation");
            return;
        };
        let inner = Arc::clone(&self.inner);
        tokio::spawn(async move {
            inner.complete(id).await;
        });
    }

    /// Issues a fetch and waits for it to resolve.
    pub async fn refresh(&self) {
        if let Some(id) = self.begin() {
            self.inner.complete(id).await;
        }
    }

    /// Stops accepting results. Requests already in flight are left to finish
    /// but their responses are dropped.
    pub fn deactivate(&self) {
        let mut changed = false;
        self.inner.state.send_if_modified(|state| {
            changed = state.terminate();
            changed
        });
        if changed {
            tracing::info!("status feed deactivated");
        }
    }

    fn begin(&self) -> Option<u64> {
        let mut issued = None;
        self.inner.state.send_if_modified(|state| {
            issued = state.begin();
            issued.is_some()
        });
        if let Some(id) = issued {
            tracing::debug!(request_id = id, "issuing status request");
        }
        issued
    }
}

impl<S: StatusSource> Inner<S> {
    async fn complete(&self, id: u64) {
        let result = self.source.fetch_status().await;
        if let Err(ref e) = result {
            tracing::warn!(request_id = id, error = %e, "status request failed");
        }

        let mut resolution = Resolution::Discarded;
        self.state.send_if_modified(|state| {
            resolution = state.resolve(id, result, Utc::now());
            // in_flight changes even when a stale result is dropped
            resolution != Resolution::Discarded
        });

        match resolution {
            Resolution::Applied => tracing::debug!(request_id = id, "status response applied"),
            Resolution::Superseded => {
                tracing::debug!(request_id = id, "dropping out-of-order status response");
            }
            Resolution::Discarded => {
                tracing::debug!(request_id = id, "dropping status response after deactivation");
            }
        }
    }
}
