#![cfg_attr(not(debug_assertions), windows_subsystem = "windows")] // hide console window on Windows in release

use live_track_viewer::LiveTrackViewerApp;
use tracing_subscriber::EnvFilter;

fn main() -> eframe::Result {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")))
        .init();

    let rt = tokio::runtime::Builder::new_multi_thread()
        .enable_all()
        .build()
        .unwrap();

    // The UI runs on the main thread; spawned tasks (the live track poller)
    // need an ambient runtime for the whole application lifetime.
    let _guard = rt.enter();

    eframe::run_native(
        "Live Track Viewer",
        eframe::NativeOptions::default(),
        Box::new(|cc| Ok(Box::new(LiveTrackViewerApp::new(cc)))),
    )
}
