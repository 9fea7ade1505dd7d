//! Bridge between the live track poller and the walkers map
//!
//! The poller mutates its drawables through the `MapView` seam. On this side
//! the drawables are retained geometry behind an `Arc<RwLock<..>>` that the
//! render plugin reads every frame, and view recentering is queued as a
//! command the egui update loop applies to the map memory (it owns the
//! camera, the poller task does not).

use live_track_lib::{MapView, MarkerHandle, PathHandle, TrackPoint};
use std::sync::{Arc, Mutex, RwLock};

/// Geometry of the live overlay, shared with the render plugin.
#[derive(Debug, Default)]
pub struct OverlayGeometry {
    /// Vertices of the live path, oldest first.
    pub path: Vec<TrackPoint>,
    /// Current-position marker, if a fix has arrived.
    pub marker: Option<Marker>,
}

#[derive(Debug, Clone)]
pub struct Marker {
    pub position: TrackPoint,
    pub label: String,
}

/// View-level commands queued by the poller for the UI thread.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum ViewCommand {
    Center { position: TrackPoint, zoom: f64 },
}

/// The poller's window onto the map.
///
/// Cloning shares the same geometry and command queue; the app keeps one
/// clone for rendering while the poller owns another.
#[derive(Clone)]
pub struct SharedOverlay {
    geometry: Arc<RwLock<OverlayGeometry>>,
    commands: Arc<Mutex<Vec<ViewCommand>>>,
    ctx: egui::Context,
}

impl SharedOverlay {
    pub fn new(ctx: egui::Context) -> Self {
        Self {
            geometry: Arc::new(RwLock::new(OverlayGeometry::default())),
            commands: Arc::new(Mutex::new(Vec::new())),
            ctx,
        }
    }

    /// The shared geometry, for the render plugin.
    pub fn geometry(&self) -> Arc<RwLock<OverlayGeometry>> {
        self.geometry.clone()
    }

    /// Drain the queued view commands.
    pub fn take_commands(&self) -> Vec<ViewCommand> {
        std::mem::take(&mut *self.commands.lock().unwrap())
    }
}

/// Handle to the live path held by the poller.
pub struct OverlayPath {
    geometry: Arc<RwLock<OverlayGeometry>>,
    ctx: egui::Context,
}

/// Handle to the current-position marker held by the poller.
pub struct OverlayMarker {
    geometry: Arc<RwLock<OverlayGeometry>>,
    ctx: egui::Context,
}

impl MapView for SharedOverlay {
    type Path = OverlayPath;
    type Marker = OverlayMarker;

    fn add_path(&mut self, points: &[TrackPoint]) -> OverlayPath {
        self.geometry.write().unwrap().path = points.to_vec();
        self.ctx.request_repaint();
        OverlayPath {
            geometry: self.geometry.clone(),
            ctx: self.ctx.clone(),
        }
    }

    fn add_marker(&mut self, position: TrackPoint, label: &str) -> OverlayMarker {
        self.geometry.write().unwrap().marker = Some(Marker {
            position,
            label: label.to_string(),
        });
        self.ctx.request_repaint();
        OverlayMarker {
            geometry: self.geometry.clone(),
            ctx: self.ctx.clone(),
        }
    }

    fn center_on(&mut self, position: TrackPoint, zoom: f64) {
        self.commands
            .lock()
            .unwrap()
            .push(ViewCommand::Center { position, zoom });
        self.ctx.request_repaint();
    }
}

impl PathHandle for OverlayPath {
    fn set_points(&mut self, points: &[TrackPoint]) {
        self.geometry.write().unwrap().path = points.to_vec();
        self.ctx.request_repaint();
    }
}

impl MarkerHandle for OverlayMarker {
    fn move_to(&mut self, position: TrackPoint) {
        if let Some(marker) = self.geometry.write().unwrap().marker.as_mut() {
            marker.position = position;
        }
        self.ctx.request_repaint();
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn overlay() -> SharedOverlay {
        SharedOverlay::new(egui::Context::default())
    }

    #[test]
    fn test_path_handle_updates_shared_geometry() {
        let mut view = overlay();
        let geometry = view.geometry();

        let mut path = view.add_path(&[TrackPoint::new(1.0, 2.0)]);
        assert_eq!(geometry.read().unwrap().path.len(), 1);

        path.set_points(&[TrackPoint::new(1.0, 2.0), TrackPoint::new(3.0, 4.0)]);
        assert_eq!(geometry.read().unwrap().path.len(), 2);
    }

    #[test]
    fn test_marker_handle_repositions() {
        let mut view = overlay();
        let geometry = view.geometry();

        let mut marker = view.add_marker(TrackPoint::new(1.0, 2.0), "Position actuelle");
        marker.move_to(TrackPoint::new(3.0, 4.0));

        let geometry = geometry.read().unwrap();
        let marker = geometry.marker.as_ref().unwrap();
        assert_eq!(marker.position, TrackPoint::new(3.0, 4.0));
        assert_eq!(marker.label, "Position actuelle");
    }

    #[test]
    fn test_center_on_queues_a_command() {
        let mut view = overlay();
        view.center_on(TrackPoint::new(1.0, 2.0), 13.0);

        assert_eq!(
            view.take_commands(),
            vec![ViewCommand::Center {
                position: TrackPoint::new(1.0, 2.0),
                zoom: 13.0
            }]
        );
        // Draining leaves the queue empty.
        assert!(view.take_commands().is_empty());
    }
}
