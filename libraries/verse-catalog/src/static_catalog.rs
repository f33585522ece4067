//! Static track catalog

use async_trait::async_trait;

use verse_core::{Track, TrackCatalog};

/// In-memory catalog with a fixed track list.
///
/// Useful for bundled demo playlists, offline fixtures, and tests.
#[derive(Debug, Clone, Default)]
pub struct StaticTrackCatalog {
    tracks: Vec<Track>,
}

impl StaticTrackCatalog {
    /// Create a catalog over `tracks`, in playlist order.
    ///
    /// Selection and phase projections are wiped; those belong to the
    /// playback session.
    #[must_use]
    pub fn new(mut tracks: Vec<Track>) -> Self {
        for track in &mut tracks {
            track.clear_projection();
        }
        Self { tracks }
    }

    /// An empty catalog.
    #[must_use]
    pub fn empty() -> Self {
        Self::default()
    }
}

#[async_trait]
impl TrackCatalog for StaticTrackCatalog {
    async fn fetch_all_tracks(&self) -> Vec<Track> {
        self.tracks.clone()
    }
}
