//! Recorded GPX traces
//!
//! This module parses the pre-recorded routes shown under the live overlay
//! and precomputes the metadata presented for each of them: total distance,
//! start/end timestamps and the WGS84 bounding box used for view fitting.

use std::path::Path;
use time::OffsetDateTime;
use time::format_description::FormatItem;
use time::macros::format_description;

/// Error types for trace loading
#[derive(Debug, thiserror::Error)]
pub enum TrackError {
    #[error("failed to open file: {0}")]
    Io(#[from] std::io::Error),

    #[error("failed to parse GPX: {0}")]
    Gpx(#[from] gpx::errors::GpxError),

    #[error("track has no points")]
    Empty,
}

/// Date format shown in the trace info (dd.mm.yyyy).
const DATE_FORMAT: &[FormatItem<'_>] = format_description!("[day].[month].[year]");

/// A pre-recorded route with precomputed display metadata.
pub struct RecordedTrack {
    /// Display name ("Trace 1", "Trace 2", ...).
    pub name: String,
    /// One polyline per GPX track segment, as (lat, lon) pairs.
    pub segments: Vec<Vec<(f64, f64)>>,
    /// Total distance in meters (Haversine over consecutive points).
    pub total_distance: f64,
    /// Timestamp of the first point carrying one.
    pub start_time: Option<OffsetDateTime>,
    /// Timestamp of the last point carrying one.
    pub end_time: Option<OffsetDateTime>,
    /// WGS84 bounds as (min_lat, min_lon, max_lat, max_lon).
    pub bounds: (f64, f64, f64, f64),
}

impl RecordedTrack {
    /// Read and parse a GPX file into a trace.
    pub fn from_file(path: &Path, name: String) -> Result<Self, TrackError> {
        let file = std::fs::File::open(path)?;
        let reader = std::io::BufReader::new(file);
        let gpx = gpx::read(reader)?;
        Self::from_gpx(&gpx, name)
    }

    /// Build a trace from parsed GPX data, computing all metadata in a
    /// single pass.
    pub fn from_gpx(gpx: &gpx::Gpx, name: String) -> Result<Self, TrackError> {
        let mut segments: Vec<Vec<(f64, f64)>> = Vec::new();
        let mut total_distance = 0.0;
        let mut start_time: Option<OffsetDateTime> = None;
        let mut end_time: Option<OffsetDateTime> = None;

        let mut min_lat = f64::INFINITY;
        let mut min_lon = f64::INFINITY;
        let mut max_lat = f64::NEG_INFINITY;
        let mut max_lon = f64::NEG_INFINITY;

        for track in &gpx.tracks {
            for segment in &track.segments {
                let mut polyline = Vec::with_capacity(segment.points.len());
                let mut prev: Option<(f64, f64)> = None;

                for waypoint in &segment.points {
                    let point = waypoint.point();
                    let (lat, lon) = (point.y(), point.x());

                    min_lat = min_lat.min(lat);
                    min_lon = min_lon.min(lon);
                    max_lat = max_lat.max(lat);
                    max_lon = max_lon.max(lon);

                    if let Some(prev) = prev {
                        total_distance += haversine_distance(prev, (lat, lon));
                    }
                    prev = Some((lat, lon));

                    if let Some(time) = waypoint.time.clone() {
                        let time: OffsetDateTime = time.into();
                        if start_time.is_none() {
                            start_time = Some(time);
                        }
                        end_time = Some(time);
                    }

                    polyline.push((lat, lon));
                }

                if !polyline.is_empty() {
                    segments.push(polyline);
                }
            }
        }

        if segments.is_empty() {
            return Err(TrackError::Empty);
        }

        Ok(Self {
            name,
            segments,
            total_distance,
            start_time,
            end_time,
            bounds: (min_lat, min_lon, max_lat, max_lon),
        })
    }

    /// Total number of points across all segments.
    pub fn total_points(&self) -> usize {
        self.segments.iter().map(Vec::len).sum()
    }

    #[inline]
    pub fn distance_km(&self) -> f64 {
        self.total_distance / 1000.0
    }

    /// Info lines shown for the trace: distance and date range, matching the
    /// site's trace popups.
    pub fn info_text(&self) -> String {
        format!(
            "Distance : {:.1} km\nDu : {}\nAu : {}",
            self.distance_km(),
            format_date(self.start_time),
            format_date(self.end_time),
        )
    }
}

fn format_date(time: Option<OffsetDateTime>) -> String {
    time.and_then(|t| t.format(DATE_FORMAT).ok())
        .unwrap_or_else(|| "date inconnue".to_string())
}

/// Haversine distance between two (lat, lon) pairs in meters.
pub fn haversine_distance(a: (f64, f64), b: (f64, f64)) -> f64 {
    let lat1 = a.0.to_radians();
    let lat2 = b.0.to_radians();
    let delta_lat = (b.0 - a.0).to_radians();
    let delta_lon = (b.1 - a.1).to_radians();

    let h = (delta_lat / 2.0).sin().powi(2)
        + lat1.cos() * lat2.cos() * (delta_lon / 2.0).sin().powi(2);
    let c = 2.0 * h.sqrt().atan2((1.0 - h).sqrt());

    // Earth's radius in meters
    const EARTH_RADIUS_M: f64 = 6371000.0;
    EARTH_RADIUS_M * c
}

#[cfg(test)]
mod tests {
    use super::*;
    use gpx::{Gpx, Track, TrackSegment, Waypoint};
    use time::macros::datetime;

    fn create_test_waypoint(lat: f64, lon: f64) -> Waypoint {
        Waypoint::new(geo::Point::new(lon, lat))
    }

    fn create_test_gpx() -> Gpx {
        let mut gpx = Gpx::default();
        let mut track = Track::default();
        let mut segment = TrackSegment::default();

        // A few test points (around Lake Geneva)
        segment.points.push(create_test_waypoint(46.45, 6.45));
        segment.points.push(create_test_waypoint(46.46, 6.46));
        segment.points.push(create_test_waypoint(46.47, 6.47));

        track.segments.push(segment);
        gpx.tracks.push(track);
        gpx
    }

    #[test]
    fn test_track_creation() {
        let gpx = create_test_gpx();
        let track = RecordedTrack::from_gpx(&gpx, "Trace 1".to_string()).unwrap();

        assert_eq!(track.name, "Trace 1");
        assert_eq!(track.segments.len(), 1);
        assert_eq!(track.total_points(), 3);
    }

    #[test]
    fn test_empty_track_fails() {
        let gpx = Gpx::default();
        let result = RecordedTrack::from_gpx(&gpx, "Trace 1".to_string());
        assert!(matches!(result, Err(TrackError::Empty)));
    }

    #[test]
    fn test_total_distance() {
        let gpx = create_test_gpx();
        let track = RecordedTrack::from_gpx(&gpx, "Trace 1".to_string()).unwrap();

        // Consecutive points are roughly 1.4 km apart.
        assert!(track.total_distance > 1000.0);
        assert!(track.total_distance < 10000.0);
    }

    #[test]
    fn test_bounds() {
        let gpx = create_test_gpx();
        let track = RecordedTrack::from_gpx(&gpx, "Trace 1".to_string()).unwrap();

        let (min_lat, min_lon, max_lat, max_lon) = track.bounds;
        assert!((min_lat - 46.45).abs() < 1e-9);
        assert!((min_lon - 6.45).abs() < 1e-9);
        assert!((max_lat - 46.47).abs() < 1e-9);
        assert!((max_lon - 6.47).abs() < 1e-9);
    }

    #[test]
    fn test_info_text_without_timestamps() {
        let gpx = create_test_gpx();
        let track = RecordedTrack::from_gpx(&gpx, "Trace 1".to_string()).unwrap();

        let info = track.info_text();
        assert!(info.starts_with("Distance : "));
        assert!(info.contains("Du : date inconnue"));
        assert!(info.contains("Au : date inconnue"));
    }

    #[test]
    fn test_info_text_with_timestamps() {
        let mut gpx = create_test_gpx();
        gpx.tracks[0].segments[0].points[0].time = Some(datetime!(2025-05-01 10:00 UTC).into());
        gpx.tracks[0].segments[0].points[2].time = Some(datetime!(2025-05-03 18:30 UTC).into());

        let track = RecordedTrack::from_gpx(&gpx, "Trace 1".to_string()).unwrap();
        assert_eq!(track.start_time, Some(datetime!(2025-05-01 10:00 UTC)));
        assert_eq!(track.end_time, Some(datetime!(2025-05-03 18:30 UTC)));

        let info = track.info_text();
        assert!(info.contains("Du : 01.05.2025"));
        assert!(info.contains("Au : 03.05.2025"));
    }

    #[test]
    fn test_haversine_known_distance() {
        // Geneva to Lausanne is about 50 km.
        let distance = haversine_distance((46.2044, 6.1432), (46.5197, 6.6323));
        assert!(distance > 45_000.0);
        assert!(distance < 55_000.0);
    }
}
