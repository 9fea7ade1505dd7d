//! Snapshot sources for the live track endpoint

use crate::wire::LiveTrackResponse;
use crate::{FetchError, Result, TrackPoint};
use std::future::Future;

/// A numbered snapshot of the remote track.
///
/// The sequence number is assigned when the request is issued. Requests are
/// never aborted, so a slow response can complete after a newer one; the
/// poller uses `seq` to discard such stale snapshots instead of letting the
/// last writer win.
#[derive(Debug, Clone)]
pub struct TrackSnapshot {
    pub seq: u64,
    /// All fixes recorded so far, oldest first. May be empty ("no data yet").
    pub points: Vec<TrackPoint>,
}

/// Abstraction over the remote live-track endpoint.
pub trait LiveTrackSource: Send + 'static {
    /// Fetch the current snapshot of the track.
    fn fetch(&mut self) -> impl Future<Output = Result<TrackSnapshot>> + Send;
}

/// Production source backed by `reqwest`.
///
/// Issues `GET {base}/api/live-track?track_id={id}`. Timeout behavior is the
/// client's default; the poll schedule is the only retry mechanism.
pub struct HttpLiveTrackSource {
    client: reqwest::Client,
    url: String,
    next_seq: u64,
}

impl HttpLiveTrackSource {
    pub fn new(base_url: &str, track_id: &str) -> Self {
        let url = format!(
            "{}/api/live-track?track_id={}",
            base_url.trim_end_matches('/'),
            track_id
        );
        Self {
            client: reqwest::Client::new(),
            url,
            next_seq: 0,
        }
    }

    /// The fully resolved endpoint URL.
    #[inline]
    pub fn url(&self) -> &str {
        &self.url
    }
}

impl LiveTrackSource for HttpLiveTrackSource {
    fn fetch(&mut self) -> impl Future<Output = Result<TrackSnapshot>> + Send {
        let seq = self.next_seq;
        self.next_seq += 1;

        let client = self.client.clone();
        let url = self.url.clone();
        async move {
            let response = client.get(&url).send().await?;
            let status = response.status();
            if !status.is_success() {
                return Err(FetchError::Status(status));
            }

            // Read the body as text first so invalid JSON is classified as a
            // decode failure rather than a transport failure.
            let body = response.text().await?;
            let parsed: LiveTrackResponse = serde_json::from_str(&body)?;

            Ok(TrackSnapshot {
                seq,
                points: parsed.points,
            })
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_url_construction() {
        let source = HttpLiveTrackSource::new("http://localhost:8080", "live");
        assert_eq!(
            source.url(),
            "http://localhost:8080/api/live-track?track_id=live"
        );
    }

    #[test]
    fn test_url_trailing_slash_is_trimmed() {
        let source = HttpLiveTrackSource::new("http://localhost:8080/", "boat-1");
        assert_eq!(
            source.url(),
            "http://localhost:8080/api/live-track?track_id=boat-1"
        );
    }

    #[tokio::test]
    async fn test_connection_refused_is_a_transport_error() {
        // Port 9 (discard) is closed on any sane test machine.
        let mut source = HttpLiveTrackSource::new("http://127.0.0.1:9", "live");
        let result = source.fetch().await;
        assert!(matches!(result, Err(FetchError::Transport(_))));
    }
}
