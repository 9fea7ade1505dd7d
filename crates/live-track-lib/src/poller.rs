//! The live-track polling and incremental-rendering loop
//!
//! One poll fetches the snapshot of the track recorded so far and
//! synchronizes the local drawables with it: the path's vertices are
//! replaced wholesale, the marker follows the last fix, and the view is
//! recentered exactly once when the first fix arrives. Failures are
//! terminal for that tick only; nothing is mutated before a snapshot has
//! fully parsed, so no observer ever sees a half-applied poll.

use crate::source::{LiveTrackSource, TrackSnapshot};
use crate::state::LiveTrackState;
use crate::view::{MapView, MarkerHandle, PathHandle};
use std::time::Duration;
use tokio::sync::watch;

/// Configuration for a [`LiveTrackPoller`].
#[derive(Debug, Clone)]
pub struct PollerConfig {
    /// Delay between two poll starts. The first poll fires immediately and
    /// the schedule never backs off on failures.
    pub interval: Duration,
    /// Zoom level used for the one-time recenter on the first fix.
    pub first_fix_zoom: f64,
    /// Static label attached to the current-position marker.
    pub marker_label: String,
}

impl Default for PollerConfig {
    fn default() -> Self {
        Self {
            interval: Duration::from_secs(10),
            first_fix_zoom: 13.0,
            marker_label: "Position actuelle".to_string(),
        }
    }
}

/// Periodically synchronizes local rendering state with the remote track.
///
/// The poller owns its [`LiveTrackState`] and the view seam; nothing else
/// writes to either. Use [`LiveTrackPoller::spawn`] for the timer-driven
/// loop, or call [`LiveTrackPoller::poll`] directly (e.g. from tests).
pub struct LiveTrackPoller<S: LiveTrackSource, V: MapView> {
    source: S,
    view: V,
    state: LiveTrackState<V>,
    config: PollerConfig,
    /// Sequence number of the newest snapshot applied so far.
    applied_seq: Option<u64>,
}

impl<S, V> LiveTrackPoller<S, V>
where
    S: LiveTrackSource,
    V: MapView,
{
    pub fn new(source: S, view: V, config: PollerConfig) -> Self {
        Self {
            source,
            view,
            state: LiveTrackState::new(),
            config,
            applied_seq: None,
        }
    }

    /// The rendering state owned by this poller.
    #[inline]
    pub fn state(&self) -> &LiveTrackState<V> {
        &self.state
    }

    #[inline]
    pub fn config(&self) -> &PollerConfig {
        &self.config
    }

    /// Run one poll: fetch the current snapshot and synchronize the
    /// drawables with it.
    ///
    /// Never fails past this boundary. Transport errors, non-2xx statuses
    /// and malformed payloads are logged and swallowed; an absent or empty
    /// point list is a normal "no data yet" condition and is not logged.
    pub async fn poll(&mut self) {
        let snapshot = match self.source.fetch().await {
            Ok(snapshot) => snapshot,
            Err(err) => {
                tracing::warn!("live track poll failed: {err}");
                return;
            }
        };

        self.apply(snapshot);
    }

    /// Apply a fetched snapshot to the rendering state.
    ///
    /// This is the mutation phase of a poll. It is synchronous, so two polls
    /// can never interleave their mutations even when their requests were in
    /// flight concurrently.
    fn apply(&mut self, snapshot: TrackSnapshot) {
        // No data recorded yet; keep state exactly as it was.
        let Some(&last) = snapshot.points.last() else {
            return;
        };

        // A request that outlived the next tick can complete after a newer
        // snapshot was applied; rolling the display back would be worse than
        // dropping the response.
        if let Some(applied) = self.applied_seq
            && snapshot.seq < applied
        {
            tracing::debug!(
                seq = snapshot.seq,
                applied,
                "discarding stale live track snapshot"
            );
            return;
        }
        self.applied_seq = Some(snapshot.seq);

        self.state.points = snapshot.points;

        match &mut self.state.path {
            Some(path) => path.set_points(&self.state.points),
            None => self.state.path = Some(self.view.add_path(&self.state.points)),
        }

        match &mut self.state.marker {
            // The user may have panned or zoomed since the first fix; only
            // the marker follows, the view stays where they left it.
            Some(marker) => marker.move_to(last),
            None => {
                let marker = self.view.add_marker(last, &self.config.marker_label);
                self.state.marker = Some(marker);
                self.view.center_on(last, self.config.first_fix_zoom);
                self.state.has_centered = true;
            }
        }

        tracing::debug!(points = self.state.points.len(), "applied live track snapshot");
    }

    /// Spawn the repeating poll task: once immediately, then every
    /// `config.interval` until the handle stops it.
    ///
    /// The interval is fixed; it does not adapt and does not back off on
    /// repeated failures.
    pub fn spawn(mut self) -> PollerHandle
    where
        V: Send + 'static,
        V::Path: Send + 'static,
        V::Marker: Send + 'static,
    {
        let (stop_tx, mut stop_rx) = watch::channel(false);
        let join = tokio::spawn(async move {
            let mut ticker = tokio::time::interval(self.config.interval);
            loop {
                // A stop request is only observed between polls: once a tick
                // fires, the poll runs to completion and is never aborted.
                tokio::select! {
                    _ = ticker.tick() => self.poll().await,
                    _ = stop_rx.changed() => break,
                }
            }
            tracing::debug!("live track poller stopped");
        });

        PollerHandle { join, stop_tx }
    }
}

/// Handle to a running poll task.
///
/// Dropping the handle leaves the task running for the lifetime of the
/// runtime; call [`PollerHandle::stop`] (or [`PollerHandle::shutdown`]) when
/// the owning component is torn down.
pub struct PollerHandle {
    join: tokio::task::JoinHandle<()>,
    stop_tx: watch::Sender<bool>,
}

impl PollerHandle {
    /// Signal the poll task to stop. Takes effect before the next tick; a
    /// poll already in flight completes normally.
    pub fn stop(&self) {
        let _ = self.stop_tx.send(true);
    }

    /// Stop the task and wait for it to wind down.
    pub async fn shutdown(self) {
        let _ = self.stop_tx.send(true);
        let _ = self.join.await;
    }

    #[inline]
    pub fn is_finished(&self) -> bool {
        self.join.is_finished()
    }
}
