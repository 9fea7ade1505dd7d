//! Live Track Viewer - Application Library
//!
//! Map application showing pre-recorded GPX traces alongside a live position
//! overlay that is kept up to date by polling the tracker endpoint.

mod app;

pub use app::LiveTrackViewerApp;
