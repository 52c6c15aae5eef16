//! Location status client: HTTP transport, stale-while-revalidate state,
//! fixed-rate polling and activation lifecycle.

pub mod client;
pub mod error;
pub mod fetcher;
pub mod poll;
pub mod session;
pub mod state;

pub use client::{StatusClient, StatusSource};
pub use error::StatusError;
pub use fetcher::StatusFetcher;
pub use poll::{PollHandle, PollScheduler, DEFAULT_POLL_INTERVAL};
pub use session::Session;
pub use state::{FetchState, Phase, Resolution};
