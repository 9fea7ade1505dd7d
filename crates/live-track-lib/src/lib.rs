//! Live Track Library - Polling and Incremental Rendering of a Live GPS Track
//!
//! This library keeps an in-memory rendering of a remotely recorded GPS track
//! in sync with the server that appends to it. The core type is
//! [`LiveTrackPoller`], which periodically fetches a JSON snapshot of the
//! track and incrementally updates a path drawable plus a current-position
//! marker through the [`MapView`] trait seam.
//!
//! # Architecture
//!
//! - **[`TrackPoint`]**: Wire representation of a single recorded fix
//! - **[`LiveTrackState`]**: Rendering state owned by one poller instance
//! - **[`LiveTrackSource`]**: Abstraction over the remote snapshot endpoint
//! - **[`LiveTrackPoller`]**: The fetch-and-apply loop and its schedule
//!
//! # Failure model
//!
//! No error ever propagates past a poll: transport failures, non-2xx
//! statuses and malformed payloads are logged and swallowed, and state is
//! only mutated after a snapshot has fully parsed. An absent or empty point
//! list is a normal "no data yet" condition, not an error.

mod poller;
mod source;
mod state;
mod view;
mod wire;

// Public API exports
pub use poller::{LiveTrackPoller, PollerConfig, PollerHandle};
pub use source::{HttpLiveTrackSource, LiveTrackSource, TrackSnapshot};
pub use state::LiveTrackState;
pub use view::{MapView, MarkerHandle, PathHandle};
pub use wire::{LiveTrackResponse, TrackPoint};

/// Error types for snapshot fetching
#[derive(Debug, thiserror::Error)]
pub enum FetchError {
    #[error("transport error: {0}")]
    Transport(#[from] reqwest::Error),

    #[error("server returned status {0}")]
    Status(reqwest::StatusCode),

    #[error("malformed payload: {0}")]
    Decode(#[from] serde_json::Error),
}

pub type Result<T> = std::result::Result<T, FetchError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_public_exports() {
        // Verify that all public types are accessible
        let _: fn() -> PollerConfig = PollerConfig::default;
        let _: fn(f64, f64) -> TrackPoint = TrackPoint::new;
    }
}
