//! Application module
//!
//! This module provides the main application structure:
//! - Full-screen walkers map with two base tile layers
//! - Recorded GPX traces with per-trace info in the sidebar
//! - Live position overlay kept up to date by the background poller

mod overlay;
mod plugin;
pub(crate) mod settings;
mod state;
mod tracks;
mod ui_panels;

use crate::app::overlay::{SharedOverlay, ViewCommand};
use crate::app::plugin::{LiveTrackPlugin, TracesPlugin};
use crate::app::settings::Settings;
use crate::app::state::{AppState, BaseLayer};
use eframe::egui;
use live_track_lib::{HttpLiveTrackSource, LiveTrackPoller, PollerConfig, PollerHandle};
use std::time::Duration;
use walkers::{
    HttpTiles, Map, MapMemory, TileId,
    sources::{Attribution, TileSource},
};

/// Initial view before any data arrives (mid-Atlantic overview).
const INITIAL_CENTER: (f64, f64) = (20.0, -30.0);
const INITIAL_ZOOM: f64 = 3.0;

/// Carto light base tile source
pub struct CartoLight;

impl TileSource for CartoLight {
    fn tile_url(&self, tile_id: TileId) -> String {
        format!(
            "https://a.basemaps.cartocdn.com/light_all/{}/{}/{}.png",
            tile_id.zoom, tile_id.x, tile_id.y
        )
    }

    fn attribution(&self) -> Attribution {
        Attribution {
            text: "© OpenStreetMap contributors © Carto",
            url: "https://www.openstreetmap.org/copyright",
            logo_light: None,
            logo_dark: None,
        }
    }

    fn max_zoom(&self) -> u8 {
        19
    }
}

/// GEBCO grayscale bathymetry tile source (note the {z}/{y}/{x} scheme)
pub struct GebcoGray;

impl TileSource for GebcoGray {
    fn tile_url(&self, tile_id: TileId) -> String {
        format!(
            "https://tiles.arcgis.com/tiles/C8EMgrsFcRFL6LrL/arcgis/rest/services/GEBCO_grayscale_basemap_NCEI/MapServer/tile/{}/{}/{}",
            tile_id.zoom, tile_id.y, tile_id.x
        )
    }

    fn attribution(&self) -> Attribution {
        Attribution {
            text: "GEBCO & NOAA NCEI",
            url: "https://www.ncei.noaa.gov/",
            logo_light: None,
            logo_dark: None,
        }
    }

    fn max_zoom(&self) -> u8 {
        12
    }
}

/// Main application structure
pub struct LiveTrackViewerApp {
    /// Application state (traces, UI settings, loader)
    state: AppState,

    /// Map tiles provider (Carto light)
    tiles_carto: HttpTiles,

    /// Map tiles provider (GEBCO grayscale)
    tiles_gebco: HttpTiles,

    /// Map state (camera position, zoom, etc.)
    map_memory: MapMemory,

    /// Live overlay shared with the poller task
    overlay: SharedOverlay,

    /// Handle to the running poll task
    poller: Option<PollerHandle>,

    /// Whether the view was fitted after the initial trace load
    fitted_initial_bounds: bool,
}

impl LiveTrackViewerApp {
    pub fn new(cc: &eframe::CreationContext<'_>) -> Self {
        let cli_args = Settings::from_cli();
        let state = AppState::new(&cli_args);

        let tiles_carto = HttpTiles::new(CartoLight, cc.egui_ctx.clone());
        let tiles_gebco = HttpTiles::new(GebcoGray, cc.egui_ctx.clone());

        let mut map_memory = MapMemory::default();
        map_memory.center_at(walkers::lat_lon(INITIAL_CENTER.0, INITIAL_CENTER.1));
        let _ = map_memory.set_zoom(INITIAL_ZOOM);

        let overlay = SharedOverlay::new(cc.egui_ctx.clone());

        let source = HttpLiveTrackSource::new(&cli_args.api_base, &cli_args.track_id);
        tracing::info!(
            "Polling {} every {}s, {} GPX files queued",
            source.url(),
            cli_args.poll_interval,
            state.loader.pending_files.len()
        );

        let poller = LiveTrackPoller::new(
            source,
            overlay.clone(),
            PollerConfig {
                interval: Duration::from_secs(cli_args.poll_interval),
                ..PollerConfig::default()
            },
        )
        .spawn();

        Self {
            state,
            tiles_carto,
            tiles_gebco,
            map_memory,
            overlay,
            poller: Some(poller),
            fitted_initial_bounds: false,
        }
    }

    /// Apply view commands queued by the poller (the one-time first-fix
    /// recenter). The update loop owns the map memory, so camera moves only
    /// happen here.
    fn apply_view_commands(&mut self) {
        for command in self.overlay.take_commands() {
            match command {
                ViewCommand::Center { position, zoom } => {
                    self.map_memory
                        .center_at(walkers::lat_lon(position.lat, position.lng));
                    let _ = self.map_memory.set_zoom(zoom);
                    tracing::debug!(
                        "Centered view on ({:.4}, {:.4}) at zoom {zoom}",
                        position.lat,
                        position.lng
                    );
                }
            }
        }
    }

    /// Fit the map view to the bounding box of all loaded traces
    fn fit_to_bounds(&mut self) {
        if let Some((min_lat, min_lon, max_lat, max_lon)) = self.state.combined_bounds() {
            let center_lat = (min_lat + max_lat) / 2.0;
            let center_lon = (min_lon + max_lon) / 2.0;

            let lat_span = (max_lat - min_lat).abs();
            let lon_span = (max_lon - min_lon).abs();
            let max_span = lat_span.max(lon_span);

            let zoom = if max_span > 0.0 {
                let zoom_estimate = (4.0 * 360.0 / max_span).log2();
                (zoom_estimate - 0.5).clamp(1.0, 18.0)
            } else {
                12.0
            };

            self.map_memory
                .center_at(walkers::lat_lon(center_lat, center_lon));
            let _ = self.map_memory.set_zoom(zoom);

            tracing::trace!(
                "Fitted view to bounds: ({:.4}, {:.4}) - ({:.4}, {:.4}), zoom: {:.1}",
                min_lat,
                min_lon,
                max_lat,
                max_lon,
                zoom
            );
        }
    }
}

impl eframe::App for LiveTrackViewerApp {
    fn update(&mut self, ctx: &egui::Context, _frame: &mut eframe::Frame) {
        // First-fix recenter queued by the poller task
        self.apply_view_commands();

        if self.state.pending_fit_bounds {
            self.state.pending_fit_bounds = false;
            self.fit_to_bounds();
        }

        ui_panels::render_sidebar(ctx, &mut self.state);

        // Capture values we need before the closure
        let tracks = self.state.tracks.clone();
        let geometry = self.overlay.geometry();
        let line_width = self.state.ui_settings.line_width;
        let show_traces = self.state.ui_settings.show_traces;
        let show_live = self.state.ui_settings.show_live;
        let attribution_text = self.state.ui_settings.base_layer.attribution();

        // Central panel: Map view (full screen)
        egui::CentralPanel::default()
            .frame(egui::Frame::NONE)
            .show(ctx, |ui| {
                let tiles: &mut HttpTiles = match self.state.ui_settings.base_layer {
                    BaseLayer::CartoLight => &mut self.tiles_carto,
                    BaseLayer::GebcoGray => &mut self.tiles_gebco,
                };

                let mut map = Map::new(
                    Some(tiles),
                    &mut self.map_memory,
                    walkers::lat_lon(INITIAL_CENTER.0, INITIAL_CENTER.1),
                );
                if show_traces {
                    map = map.with_plugin(TracesPlugin::new(tracks, line_width));
                }
                if show_live {
                    map = map.with_plugin(LiveTrackPlugin::new(geometry, line_width));
                }

                ui.add(map);

                ui_panels::sidebar_toggle_button(ui, &mut self.state);

                let painter = ui.painter();
                let screen_rect = ui.max_rect();
                painter.text(
                    screen_rect.center_bottom() + egui::vec2(0.0, -5.0),
                    egui::Align2::CENTER_BOTTOM,
                    attribution_text,
                    egui::FontId::proportional(10.0),
                    egui::Color32::from_black_alpha(180),
                );
            });

        // Load at most one pending GPX file per frame for UI responsiveness
        if self.state.loader.is_busy() {
            self.state.process_pending_files();
            ctx.request_repaint();
        }

        // Once the initial batch has loaded, fit the view to all traces
        if !self.fitted_initial_bounds
            && !self.state.loader.is_busy()
            && !self.state.tracks.read().unwrap().is_empty()
        {
            self.fitted_initial_bounds = true;
            self.fit_to_bounds();
        }
    }
}

impl Drop for LiveTrackViewerApp {
    fn drop(&mut self) {
        // Stop the repeating poll task; a poll already in flight completes,
        // but no further tick fires after teardown.
        if let Some(poller) = self.poller.take() {
            poller.stop();
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_carto_tile_url() {
        let url = CartoLight.tile_url(TileId {
            x: 33,
            y: 22,
            zoom: 6,
        });
        assert_eq!(url, "https://a.basemaps.cartocdn.com/light_all/6/33/22.png");
    }

    #[test]
    fn test_gebco_tile_url_swaps_x_and_y() {
        let url = GebcoGray.tile_url(TileId {
            x: 33,
            y: 22,
            zoom: 6,
        });
        assert!(url.ends_with("/MapServer/tile/6/22/33"));
    }

    #[test]
    fn test_gebco_max_zoom_is_limited() {
        assert!(GebcoGray.max_zoom() < CartoLight.max_zoom());
    }
}
