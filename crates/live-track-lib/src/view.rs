//! Trait seams to the map view
//!
//! The mapping component is a stable external dependency; the poller only
//! needs to create two drawables, mutate them in place and recenter the view
//! once. Keeping those capabilities behind traits lets the rendering layer
//! stay a black box and makes the poll loop testable without a real map.

use crate::TrackPoint;

/// A map/view component that can host the live track drawables.
pub trait MapView {
    /// Owned handle to a rendered polyline.
    type Path: PathHandle;
    /// Owned handle to a rendered current-position marker.
    type Marker: MarkerHandle;

    /// Create a polyline from an ordered coordinate sequence and add it to
    /// the display.
    fn add_path(&mut self, points: &[TrackPoint]) -> Self::Path;

    /// Create a marker at `position`, attach the static `label` and add it
    /// to the display.
    fn add_marker(&mut self, position: TrackPoint, label: &str) -> Self::Marker;

    /// Recenter the view on `position` at the given zoom level.
    fn center_on(&mut self, position: TrackPoint, zoom: f64);
}

/// A rendered polyline whose vertex sequence can be replaced in place.
pub trait PathHandle {
    /// Replace the polyline's vertices with `points`, without recreating the
    /// drawable.
    fn set_points(&mut self, points: &[TrackPoint]);
}

/// A rendered marker that can be repositioned.
pub trait MarkerHandle {
    fn move_to(&mut self, position: TrackPoint);
}
