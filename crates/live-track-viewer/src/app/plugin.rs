//! Walkers plugins for rendering the trace and live overlays
//!
//! Both overlays are drawn straight onto the map painter: recorded traces as
//! blue polylines, the live track as a red polyline with a labelled
//! current-position marker.

use crate::app::overlay::OverlayGeometry;
use crate::app::tracks::RecordedTrack;
use egui::{Color32, Stroke};
use std::sync::{Arc, RwLock};
use walkers::{Plugin, Projector};

/// Recorded trace color (the site's boat-track blue, #7593c7).
const TRACE_COLOR: Color32 = Color32::from_rgb(0x75, 0x93, 0xc7);

/// Live track color.
const LIVE_COLOR: Color32 = Color32::from_rgb(0xd9, 0x3b, 0x3b);

const MARKER_RADIUS: f32 = 6.0;

/// Plugin for rendering the recorded GPX traces
pub struct TracesPlugin {
    tracks: Arc<RwLock<Vec<RecordedTrack>>>,
    width: f32,
}

impl TracesPlugin {
    pub fn new(tracks: Arc<RwLock<Vec<RecordedTrack>>>, width: f32) -> Self {
        Self { tracks, width }
    }
}

impl Plugin for TracesPlugin {
    fn run(
        self: Box<Self>,
        ui: &mut egui::Ui,
        _response: &egui::Response,
        projector: &Projector,
        _map_memory: &walkers::MapMemory,
    ) {
        let painter = ui.painter();
        let stroke = Stroke::new(self.width, TRACE_COLOR);

        let tracks = self.tracks.read().unwrap();
        for track in tracks.iter() {
            for segment in &track.segments {
                let screen_points: Vec<egui::Pos2> = segment
                    .iter()
                    .map(|&(lat, lon)| {
                        let screen_vec = projector.project(walkers::lat_lon(lat, lon));
                        egui::Pos2::new(screen_vec.x, screen_vec.y)
                    })
                    .collect();

                if screen_points.len() >= 2 {
                    painter.add(egui::Shape::line(screen_points, stroke));
                }
            }
        }
    }
}

/// Plugin for rendering the live track path and current-position marker
pub struct LiveTrackPlugin {
    geometry: Arc<RwLock<OverlayGeometry>>,
    width: f32,
}

impl LiveTrackPlugin {
    pub fn new(geometry: Arc<RwLock<OverlayGeometry>>, width: f32) -> Self {
        Self { geometry, width }
    }
}

impl Plugin for LiveTrackPlugin {
    fn run(
        self: Box<Self>,
        ui: &mut egui::Ui,
        _response: &egui::Response,
        projector: &Projector,
        _map_memory: &walkers::MapMemory,
    ) {
        let painter = ui.painter();

        let geometry = self.geometry.read().unwrap();

        let screen_points: Vec<egui::Pos2> = geometry
            .path
            .iter()
            .map(|point| {
                let screen_vec = projector.project(walkers::lat_lon(point.lat, point.lng));
                egui::Pos2::new(screen_vec.x, screen_vec.y)
            })
            .collect();

        if screen_points.len() >= 2 {
            painter.add(egui::Shape::line(
                screen_points,
                Stroke::new(self.width, LIVE_COLOR),
            ));
        }

        if let Some(marker) = &geometry.marker {
            let screen_vec =
                projector.project(walkers::lat_lon(marker.position.lat, marker.position.lng));
            let center = egui::Pos2::new(screen_vec.x, screen_vec.y);

            painter.circle(
                center,
                MARKER_RADIUS,
                LIVE_COLOR,
                Stroke::new(2.0, Color32::WHITE),
            );
            painter.text(
                center + egui::vec2(MARKER_RADIUS + 4.0, 0.0),
                egui::Align2::LEFT_CENTER,
                &marker.label,
                egui::FontId::proportional(12.0),
                ui.visuals().strong_text_color(),
            );
        }
    }
}
