//! Application state management
//!
//! This module manages the recorded trace collection, UI settings and the
//! trace loading queue.

use crate::app::settings::Settings;
use crate::app::tracks::RecordedTrack;
use std::path::PathBuf;
use std::sync::{Arc, RwLock};

/// Main application state
pub struct AppState {
    /// All loaded traces, shared with the render plugin.
    pub tracks: Arc<RwLock<Vec<RecordedTrack>>>,

    /// Current UI settings
    pub ui_settings: UiSettings,

    /// Trace loading state
    pub loader: TraceLoader,

    /// Statistics about loaded data
    pub stats: Stats,

    /// Fit the view to all traces on the next frame
    pub pending_fit_bounds: bool,
}

/// UI-specific settings that can be adjusted at runtime
#[derive(Clone)]
pub struct UiSettings {
    /// Selected base tile layer
    pub base_layer: BaseLayer,

    /// Show the recorded traces overlay
    pub show_traces: bool,

    /// Show the live track overlay
    pub show_live: bool,

    /// Trace line width in pixels
    pub line_width: f32,

    /// Whether sidebar is open
    pub sidebar_open: bool,
}

/// Available base tile layers
#[derive(Clone, Copy, Debug, PartialEq)]
pub enum BaseLayer {
    CartoLight,
    GebcoGray,
}

impl BaseLayer {
    pub fn all() -> &'static [Self] {
        &[Self::CartoLight, Self::GebcoGray]
    }

    pub fn name(&self) -> &'static str {
        match self {
            Self::CartoLight => "Fond clair (Carto)",
            Self::GebcoGray => "GEBCO gris (NOAA)",
        }
    }

    pub fn attribution(&self) -> &'static str {
        match self {
            Self::CartoLight => "© OpenStreetMap contributors © Carto",
            Self::GebcoGray => "GEBCO & NOAA NCEI",
        }
    }
}

/// Trace loading state and operations
pub struct TraceLoader {
    /// Files pending load
    pub pending_files: Vec<PathBuf>,

    /// Total files queued at startup, for progress display
    pub total_files: usize,

    /// Load errors
    pub errors: Vec<(PathBuf, String)>,
}

/// Statistics about loaded data
#[derive(Default)]
pub struct Stats {
    /// Number of loaded traces
    pub track_count: usize,

    /// Total number of trace points
    pub total_points: usize,

    /// Total distance in meters
    pub total_distance: f64,
}

impl AppState {
    /// Create new application state from CLI settings
    pub fn new(settings: &Settings) -> Self {
        let pending_files = settings.resolve_gpx_files();
        let total_files = pending_files.len();

        let ui_settings = UiSettings {
            base_layer: BaseLayer::CartoLight,
            show_traces: true,
            show_live: true,
            line_width: settings.line_width,
            sidebar_open: true,
        };

        Self {
            tracks: Arc::new(RwLock::new(Vec::new())),
            ui_settings,
            loader: TraceLoader {
                pending_files,
                total_files,
                errors: Vec::new(),
            },
            stats: Stats::default(),
            pending_fit_bounds: false,
        }
    }

    /// Load the next pending GPX file, if any.
    ///
    /// Files are loaded one per frame to keep the UI responsive; parse
    /// failures are collected and shown, never fatal.
    pub fn process_pending_files(&mut self) {
        let Some(path) = self.loader.pending_files.pop() else {
            return;
        };

        let index = self.tracks.read().unwrap().len() + self.loader.errors.len();
        let name = format!("Trace {}", index + 1);

        match RecordedTrack::from_file(&path, name) {
            Ok(track) => {
                tracing::info!(
                    "Loaded {} ({:.1} km)",
                    path.display(),
                    track.distance_km()
                );
                self.tracks.write().unwrap().push(track);
                self.update_stats();
            }
            Err(err) => {
                tracing::warn!("Failed to load {}: {err}", path.display());
                self.loader.errors.push((path, err.to_string()));
            }
        }
    }

    /// Combined WGS84 bounds of all loaded traces as
    /// (min_lat, min_lon, max_lat, max_lon).
    pub fn combined_bounds(&self) -> Option<(f64, f64, f64, f64)> {
        let tracks = self.tracks.read().unwrap();
        let mut bounds: Option<(f64, f64, f64, f64)> = None;

        for track in tracks.iter() {
            let t = track.bounds;
            bounds = Some(match bounds {
                Some(b) => (b.0.min(t.0), b.1.min(t.1), b.2.max(t.2), b.3.max(t.3)),
                None => t,
            });
        }

        bounds
    }

    /// Update statistics from the loaded traces
    pub fn update_stats(&mut self) {
        let tracks = self.tracks.read().unwrap();
        self.stats.track_count = tracks.len();
        self.stats.total_points = tracks.iter().map(RecordedTrack::total_points).sum();
        self.stats.total_distance = tracks.iter().map(|t| t.total_distance).sum();
    }
}

impl TraceLoader {
    /// Check if any files are still waiting to be loaded
    #[inline]
    pub fn is_busy(&self) -> bool {
        !self.pending_files.is_empty()
    }

    /// Get load progress (0.0 to 1.0)
    pub fn progress(&self) -> f32 {
        if self.total_files == 0 {
            return 1.0;
        }
        1.0 - (self.pending_files.len() as f32 / self.total_files as f32)
    }
}

impl Stats {
    /// Format distance as human-readable string
    pub fn format_distance(&self) -> String {
        let km = self.total_distance / 1000.0;
        if km < 1.0 {
            format!("{:.0} m", self.total_distance)
        } else if km < 100.0 {
            format!("{:.2} km", km)
        } else {
            format!("{:.0} km", km)
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn empty_state() -> AppState {
        AppState {
            tracks: Arc::new(RwLock::new(Vec::new())),
            ui_settings: UiSettings {
                base_layer: BaseLayer::CartoLight,
                show_traces: true,
                show_live: true,
                line_width: 3.0,
                sidebar_open: true,
            },
            loader: TraceLoader {
                pending_files: Vec::new(),
                total_files: 0,
                errors: Vec::new(),
            },
            stats: Stats::default(),
            pending_fit_bounds: false,
        }
    }

    fn test_track(name: &str, bounds: (f64, f64, f64, f64)) -> RecordedTrack {
        RecordedTrack {
            name: name.to_string(),
            segments: vec![vec![(bounds.0, bounds.1), (bounds.2, bounds.3)]],
            total_distance: 1000.0,
            start_time: None,
            end_time: None,
            bounds,
        }
    }

    #[test]
    fn test_combined_bounds_empty() {
        let state = empty_state();
        assert!(state.combined_bounds().is_none());
    }

    #[test]
    fn test_combined_bounds_spans_all_tracks() {
        let state = empty_state();
        state
            .tracks
            .write()
            .unwrap()
            .push(test_track("Trace 1", (46.0, 6.0, 46.5, 6.5)));
        state
            .tracks
            .write()
            .unwrap()
            .push(test_track("Trace 2", (45.5, 6.2, 46.2, 7.0)));

        assert_eq!(state.combined_bounds(), Some((45.5, 6.0, 46.5, 7.0)));
    }

    #[test]
    fn test_update_stats() {
        let mut state = empty_state();
        state
            .tracks
            .write()
            .unwrap()
            .push(test_track("Trace 1", (46.0, 6.0, 46.5, 6.5)));
        state.update_stats();

        assert_eq!(state.stats.track_count, 1);
        assert_eq!(state.stats.total_points, 2);
        assert_eq!(state.stats.total_distance, 1000.0);
    }

    #[test]
    fn test_loader_progress() {
        let loader = TraceLoader {
            pending_files: vec![PathBuf::from("a.gpx")],
            total_files: 4,
            errors: Vec::new(),
        };
        assert!(loader.is_busy());
        assert_eq!(loader.progress(), 0.75);
    }

    #[test]
    fn test_stats_format_distance() {
        let mut stats = Stats::default();
        stats.total_distance = 500.0;
        assert_eq!(stats.format_distance(), "500 m");
        stats.total_distance = 12_340.0;
        assert_eq!(stats.format_distance(), "12.34 km");
        stats.total_distance = 250_000.0;
        assert_eq!(stats.format_distance(), "250 km");
    }
}
