//! Stale-while-revalidate state for the location status feed.
//!
//! [`FetchState`] holds the last applied response and enough bookkeeping to
//! decide whether a completed request may replace it. Every request carries a
//! monotonically increasing id; a completion is applied only when its id is
//! newer than the last applied one, so a slow early request can never
//! overwrite the result of a later one.

use std::sync::Arc;

use chrono::{DateTime, Utc};
use dining_core::LocationStatusResponse;

use crate::error::StatusError;

/// Lifecycle of one activation.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Phase {
    /// Nothing requested yet.
    Idle,
    /// At least one request is in flight.
    Loading,
    /// The last applied request returned a success body.
    Ready,
    /// The last applied request failed or returned a failure body.
    Failed,
    /// Deactivated. No further transitions.
    Terminated,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Outcome {
    Ready,
    Failed,
}

/// What happened to a completed request.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Resolution {
    Applied,
    /// A newer request already resolved.
    Superseded,
    /// The state was terminated before the request resolved.
    Discarded,
}

#[derive(Debug, Clone)]
pub struct FetchState {
    data: Option<Arc<LocationStatusResponse>>,
    last_error: Option<String>,
    fetched_at: Option<DateTime<Utc>>,
    outcome: Option<Outcome>,
    in_flight: usize,
    latest_issued: u64,
    latest_applied: u64,
    terminated: bool,
}

impl Default for FetchState {
    fn default() -> Self {
        Self::new()
    }
}

impl FetchState {
    #[must_use]
    pub fn new() -> Self {
        Self {
            data: None,
            last_error: None,
            fetched_at: None,
            outcome: None,
            in_flight: 0,
            latest_issued: 0,
            latest_applied: 0,
            terminated: false,
        }
    }

    #[must_use]
    pub fn phase(&self) -> Phase {
        if self.terminated {
            Phase::Terminated
        } else if self.in_flight > 0 {
            Phase::Loading
        } else {
            match self.outcome {
                None => Phase::Idle,
                Some(Outcome::Ready) => Phase::Ready,
                Some(Outcome::Failed) => Phase::Failed,
            }
        }
    }

    /// True while any request is outstanding.
    #[must_use]
    pub fn is_loading(&self) -> bool {
        !self.terminated && self.in_flight > 0
    }

    /// Last applied response. Kept while a refresh is in flight and after a
    /// transport failure.
    #[must_use]
    pub fn data(&self) -> Option<&LocationStatusResponse> {
        self.data.as_deref()
    }

    #[must_use]
    pub fn last_error(&self) -> Option<&str> {
        self.last_error.as_deref()
    }

    /// When the current `data` was received.
    #[must_use]
    pub fn fetched_at(&self) -> Option<DateTime<Utc>> {
        self.fetched_at
    }

    #[must_use]
    pub fn is_terminated(&self) -> bool {
        self.terminated
    }

    /// Registers a new request and returns its id, or `None` once terminated.
    pub(crate) fn begin(&mut self) -> Option<u64> {
        if self.terminated {
            return None;
        }
        self.latest_issued += 1;
        self.in_flight += 1;
        Some(self.latest_issued)
    }

    /// Records the completion of request `id`.
    pub(crate) fn resolve(
        &mut self,
        id: u64,
        result: Result<LocationStatusResponse, StatusError>,
        now: DateTime<Utc>,
    ) -> Resolution {
        if self.terminated {
            return Resolution::Discarded;
        }
        self.in_flight = self.in_flight.saturating_sub(1);
        if id <= self.latest_applied {
            return Resolution::Superseded;
        }
        self.latest_applied = id;

        match result {
            Ok(response) => {
                if response.is_success() {
                    self.outcome = Some(Outcome::Ready);
                    self.last_error = None;
                } else {
                    self.outcome = Some(Outcome::Failed);
                    self.last_error = Some("upstream reported failure".to_string());
                }
                self.data = Some(Arc::new(response));
                self.fetched_at = Some(now);
            }
            Err(err) => {
                self.outcome = Some(Outcome::Failed);
                self.last_error = Some(err.to_string());
            }
        }
        Resolution::Applied
    }

    pub(crate) fn terminate(&mut self) -> bool {
        let was_live = !self.terminated;
        self.terminated = true;
        was_live
    }
}
