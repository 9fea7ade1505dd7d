use clap::Parser;
use std::path::PathBuf;

/// Endpoint the live overlay polls when none is given on the command line.
pub const DEFAULT_API_BASE: &str = "http://localhost:8080";

#[derive(Parser, Debug, Clone)]
#[clap(author, version, about, long_about = None)]
/// Live Track Viewer - recorded GPX traces with a polled live position overlay
pub struct Settings {
    /// GPX files to load on startup (defaults to every .gpx in --gpx-dir)
    #[clap(short, long, value_name = "FILE")]
    pub gpx_files: Vec<PathBuf>,

    /// Directory scanned for GPX files when none are given explicitly
    #[clap(long, default_value = "data")]
    pub gpx_dir: PathBuf,

    /// Base URL of the live track API
    #[clap(long, default_value = DEFAULT_API_BASE)]
    pub api_base: String,

    /// Identifier of the live track to follow
    #[clap(long, default_value = "live")]
    pub track_id: String,

    /// Seconds between two live track polls
    #[clap(long, default_value = "10")]
    pub poll_interval: u64,

    /// Trace line width in pixels
    #[clap(long, default_value = "3.0")]
    pub line_width: f32,
}

impl Settings {
    pub fn from_cli() -> Self {
        Settings::parse()
    }

    /// Files to load at startup: the explicit ones, or the contents of the
    /// GPX directory sorted by name.
    pub fn resolve_gpx_files(&self) -> Vec<PathBuf> {
        if !self.gpx_files.is_empty() {
            return self.gpx_files.clone();
        }

        let mut files: Vec<PathBuf> = std::fs::read_dir(&self.gpx_dir)
            .map(|entries| {
                entries
                    .filter_map(|entry| entry.ok())
                    .map(|entry| entry.path())
                    .filter(|path| {
                        path.extension()
                            .is_some_and(|ext| ext.eq_ignore_ascii_case("gpx"))
                    })
                    .collect()
            })
            .unwrap_or_default();
        files.sort();
        files
    }
}
