//! Wire types for the live track endpoint
//!
//! The endpoint returns `{ "points": [ { "lat": .., "lng": .. }, .. ] }`.
//! `points` may be absent or empty to signal that nothing has been recorded
//! yet; both deserialize to an empty vector.

use serde::{Deserialize, Serialize};

/// A single fix of the live track as reported by the remote service.
///
/// Order within a snapshot is significant (chronological).
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct TrackPoint {
    /// Latitude in degrees
    pub lat: f64,
    /// Longitude in degrees
    pub lng: f64,
}

impl TrackPoint {
    pub fn new(lat: f64, lng: f64) -> Self {
        Self { lat, lng }
    }
}

/// Response body of `GET /api/live-track`.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct LiveTrackResponse {
    /// All fixes recorded so far, oldest first.
    #[serde(default)]
    pub points: Vec<TrackPoint>,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_points() {
        let body = r#"{ "points": [ { "lat": 1.0, "lng": 2.0 }, { "lat": 3.5, "lng": -4.5 } ] }"#;
        let response: LiveTrackResponse = serde_json::from_str(body).unwrap();
        assert_eq!(
            response.points,
            vec![TrackPoint::new(1.0, 2.0), TrackPoint::new(3.5, -4.5)]
        );
    }

    #[test]
    fn test_absent_points_is_empty() {
        let response: LiveTrackResponse = serde_json::from_str("{}").unwrap();
        assert!(response.points.is_empty());
    }

    #[test]
    fn test_empty_points() {
        let response: LiveTrackResponse = serde_json::from_str(r#"{ "points": [] }"#).unwrap();
        assert!(response.points.is_empty());
    }

    #[test]
    fn test_integer_coordinates_parse_as_floats() {
        let body = r#"{ "points": [ { "lat": 1, "lng": 2 } ] }"#;
        let response: LiveTrackResponse = serde_json::from_str(body).unwrap();
        assert_eq!(response.points, vec![TrackPoint::new(1.0, 2.0)]);
    }

    #[test]
    fn test_unknown_fields_are_ignored() {
        let body = r#"{ "track_id": "live", "points": [ { "lat": 1.0, "lng": 2.0 } ] }"#;
        let response: LiveTrackResponse = serde_json::from_str(body).unwrap();
        assert_eq!(response.points.len(), 1);
    }

    #[test]
    fn test_missing_coordinate_is_an_error() {
        let body = r#"{ "points": [ { "lat": 1.0 } ] }"#;
        assert!(serde_json::from_str::<LiveTrackResponse>(body).is_err());
    }
}
