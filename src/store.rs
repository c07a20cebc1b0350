use crate::models::{Coverage, Track};
use tokio::sync::RwLock;

/// Every track imported during the life of the process.
#[derive(Debug, Default)]
pub struct TrackStore {
    tracks: RwLock<Vec<Track>>,
}

impl TrackStore {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_tracks(tracks: Vec<Track>) -> Self {
        TrackStore {
            tracks: RwLock::new(tracks),
        }
    }

    pub async fn add(&self, track: Track) {
        self.tracks.write().await.push(track);
    }

    pub async fn all(&self) -> Vec<Track> {
        self.tracks.read().await.clone()
    }

    pub async fn len(&self) -> usize {
        self.tracks.read().await.len()
    }

    pub async fn is_empty(&self) -> bool {
        self.tracks.read().await.is_empty()
    }

    /// Snapshot of the explored area. The read lock is released before the
    /// value is returned, so callers never hold it across routing calls.
    pub async fn coverage(&self) -> Option<Coverage> {
        let tracks = self.tracks.read().await;
        Coverage::from_tracks(&tracks)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::GeoPoint;
    use std::sync::Arc;

    fn track(lat: f64, lng: f64) -> Track {
        Track::new(
            "walk.gpx".to_string(),
            vec![
                GeoPoint::new_unchecked(lat, lng),
                GeoPoint::new_unchecked(lat + 0.01, lng + 0.01),
            ],
            0.0,
        )
    }

    #[tokio::test]
    async fn test_empty_store() {
        let store = TrackStore::new();
        assert!(store.is_empty().await);
        assert!(store.coverage().await.is_none());
    }

    #[tokio::test]
    async fn test_add_and_coverage() {
        let store = TrackStore::with_tracks(vec![track(52.50, 13.40)]);
        store.add(track(52.52, 13.42)).await;

        assert_eq!(store.len().await, 2);
        let coverage = store.coverage().await.unwrap();
        assert_eq!(coverage.point_count, 4);
        assert_eq!(coverage.bounds.min_lat, 52.50);
        assert!((coverage.bounds.max_lng - 13.43).abs() < 1e-9);
    }

    #[tokio::test]
    async fn test_concurrent_adds() {
        let store = Arc::new(TrackStore::new());
        let handles: Vec<_> = (0..16)
            .map(|i| {
                let store = store.clone();
                tokio::spawn(async move { store.add(track(52.0 + i as f64 * 0.01, 13.0)).await })
            })
            .collect();
        for handle in handles {
            handle.await.unwrap();
        }
        assert_eq!(store.all().await.len(), 16);
    }
}
