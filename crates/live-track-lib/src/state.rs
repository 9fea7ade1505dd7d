//! Rendering state owned by the poller
//!
//! The original behavior kept the live coordinates, polyline and marker as
//! module-level globals. Here they form an explicit state object owned by
//! one [`LiveTrackPoller`](crate::LiveTrackPoller) instance, so independent
//! pollers can coexist and be tested in isolation.

use crate::TrackPoint;
use crate::view::MapView;

/// In-memory rendering state for one live track.
///
/// Invariant: `path` and `marker` are either both unset (no data ever
/// received) or both set (at least one successful poll with one or more
/// points). `has_centered` is true iff `marker` is set, and `points` is
/// never empty while the handles exist.
pub struct LiveTrackState<V: MapView> {
    /// All fixes of the current snapshot, oldest first. Replaced wholesale
    /// on each successful poll, never partially mutated.
    pub(crate) points: Vec<TrackPoint>,
    /// The rendered path. Created on first data, updated in place after.
    pub(crate) path: Option<V::Path>,
    /// The rendered current-position marker. Created on first data,
    /// repositioned after.
    pub(crate) marker: Option<V::Marker>,
    /// Set on the one-time recenter when the first fix arrives.
    pub(crate) has_centered: bool,
}

impl<V: MapView> LiveTrackState<V> {
    pub fn new() -> Self {
        Self {
            points: Vec::new(),
            path: None,
            marker: None,
            has_centered: false,
        }
    }

    /// All fixes of the most recently applied snapshot.
    #[inline]
    pub fn points(&self) -> &[TrackPoint] {
        &self.points
    }

    /// The current position, i.e. the last fix of the applied snapshot.
    #[inline]
    pub fn last_point(&self) -> Option<TrackPoint> {
        self.points.last().copied()
    }

    /// Whether the one-time first-fix recenter has happened.
    #[inline]
    pub fn has_centered(&self) -> bool {
        self.has_centered
    }

    /// Whether the drawables exist, i.e. at least one non-empty snapshot has
    /// been applied.
    #[inline]
    pub fn is_rendered(&self) -> bool {
        self.path.is_some()
    }
}

impl<V: MapView> Default for LiveTrackState<V> {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::view::{MarkerHandle, PathHandle};

    struct NullView;
    struct NullPath;
    struct NullMarker;

    impl MapView for NullView {
        type Path = NullPath;
        type Marker = NullMarker;
        fn add_path(&mut self, _points: &[TrackPoint]) -> NullPath {
            NullPath
        }
        fn add_marker(&mut self, _position: TrackPoint, _label: &str) -> NullMarker {
            NullMarker
        }
        fn center_on(&mut self, _position: TrackPoint, _zoom: f64) {}
    }
    impl PathHandle for NullPath {
        fn set_points(&mut self, _points: &[TrackPoint]) {}
    }
    impl MarkerHandle for NullMarker {
        fn move_to(&mut self, _position: TrackPoint) {}
    }

    #[test]
    fn test_fresh_state_is_empty() {
        let state = LiveTrackState::<NullView>::new();
        assert!(state.points().is_empty());
        assert!(state.last_point().is_none());
        assert!(!state.has_centered());
        assert!(!state.is_rendered());
    }
}
