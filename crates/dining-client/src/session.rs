//! One activation of the live status view.
//!
//! A [`Session`] owns exactly one poll timer for its lifetime. Teardown runs
//! on [`Session::deactivate`] and on drop, so every exit path cancels the
//! timer and stops the fetcher from applying late responses.

use std::time::Duration;

use crate::client::StatusSource;
use crate::fetcher::StatusFetcher;
use crate::poll::{PollHandle, PollScheduler};
use crate::state::FetchState;

pub struct Session<S: StatusSource> {
    fetcher: StatusFetcher<S>,
    poll: Option<PollHandle>,
}

impl<S: StatusSource> Session<S> {
    /// Issues the initial fetch and starts polling every `interval`.
    ///
    /// Must be called from within a tokio runtime.
    pub fn activate(fetcher: StatusFetcher<S>, interval: Duration) -> Self {
        tracing::info!(interval_ms = interval.as_millis(), "activating status session");
        fetcher.revalidate();

        let ticker = fetcher.clone();
        let poll = PollScheduler::start(interval, move || ticker.revalidate());

        Self {
            fetcher,
            poll: Some(poll),
        }
    }

    /// Manual refresh.
    pub fn revalidate(&self) {
        self.fetcher.revalidate();
    }

    #[must_use]
    pub fn fetcher(&self) -> &StatusFetcher<S> {
        &self.fetcher
    }

    #[must_use]
    pub fn snapshot(&self) -> FetchState {
        self.fetcher.snapshot()
    }

    #[must_use]
    pub fn is_active(&self) -> bool {
        self.poll.is_some()
    }

    pub fn deactivate(mut self) {
        self.teardown();
    }

    fn teardown(&mut self) {
        if let Some(poll) = self.poll.take() {
            poll.stop();
            self.fetcher.deactivate();
            tracing::info!("status session deactivated");
        }
    }
}

impl<S: StatusSource> Drop for Session<S> {
    fn drop(&mut self) {
        self.teardown();
    }
}

#[cfg(test)]
mod tests {
    use std::sync::atomic::{AtomicUsize, Ordering};
    use std::sync::Arc;

    use dining_core::LocationStatusResponse;

    use super::*;
    use crate::error::StatusError;
    use crate::state::Phase;

    #[derive(Clone, Default)]
    struct CountingSource {
        calls: Arc<AtomicUsize>,
    }

    impl StatusSource for CountingSource {
        async fn fetch_status(&self) -> Result<LocationStatusResponse, StatusError> {
            self.calls.fetch_add(1, Ordering::SeqCst);
            Ok(LocationStatusResponse::Failure)
        }
    }

    async fn advance(d: Duration) {
        tokio::time::advance(d).await;
        for _ in 0..10 {
            tokio::task::yield_now().await;
        }
    }

    #[tokio::test(start_paused = true)]
    async fn fetches_on_activation_and_every_interval() {
        let source = CountingSource::default();
        let calls = Arc::clone(&source.calls);
        let session = Session::activate(StatusFetcher::new(source), Duration::from_secs(60));

        advance(Duration::ZERO).await;
        assert_eq!(calls.load(Ordering::SeqCst), 1, "initial fetch");

        advance(Duration::from_secs(125)).await;
        assert_eq!(calls.load(Ordering::SeqCst), 3, "initial + two ticks");

        session.revalidate();
        advance(Duration::ZERO).await;
        assert_eq!(calls.load(Ordering::SeqCst), 4);
        assert!(session.is_active());
    }

    #[tokio::test(start_paused = true)]
    async fn no_fetches_after_deactivation() {
        let source = CountingSource::default();
        let calls = Arc::clone(&source.calls);
        let session = Session::activate(StatusFetcher::new(source), Duration::from_secs(60));
        let fetcher = session.fetcher().clone();

        advance(Duration::from_secs(60)).await;
        let before = calls.load(Ordering::SeqCst);
        session.deactivate();

        advance(Duration::from_secs(3600)).await;
        assert_eq!(calls.load(Ordering::SeqCst), before);

        fetcher.revalidate();
        advance(Duration::ZERO).await;
        assert_eq!(calls.load(Ordering::SeqCst), before);
        assert_eq!(fetcher.snapshot().phase(), Phase::Terminated);
    }

    #[tokio::test(start_paused = true)]
    async fn dropping_the_session_tears_down() {
        let source = CountingSource::default();
        let calls = Arc::clone(&source.calls);
        let fetcher = StatusFetcher::new(source);
        {
            let _session = Session::activate(fetcher.clone(), Duration::from_secs(1));
            advance(Duration::ZERO).await;
        }

        let before = calls.load(Ordering::SeqCst);
        advance(Duration::from_secs(30)).await;
        assert_eq!(calls.load(Ordering::SeqCst), before);
        assert!(fetcher.snapshot().is_terminated());
    }

    #[tokio::test(start_paused = true)]
    async fn repeated_activations_do_not_leak_timers() {
        let source = CountingSource::default();
        let calls = Arc::clone(&source.calls);

        for _ in 0..5 {
            let session =
                Session::activate(StatusFetcher::new(source.clone()), Duration::from_secs(10));
            advance(Duration::ZERO).await;
            session.deactivate();
        }
        assert_eq!(calls.load(Ordering::SeqCst), 5);

        advance(Duration::from_secs(100)).await;
        assert_eq!(calls.load(Ordering::SeqCst), 5);
    }
}
