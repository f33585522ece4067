//! Catalog trait
//!
//! The seam between the playback session and wherever tracks come from
//! (an HTTP document store in production, fixed lists in tests).

use async_trait::async_trait;

use crate::types::Track;

/// Source of the session's playlist.
///
/// The returned order is the playlist order. Implementations are
/// infallible by contract: any fetch failure degrades to an empty list
/// (and is logged by the implementation), never to an error the session
/// has to handle.
#[async_trait]
pub trait TrackCatalog: Send + Sync {
    /// Fetch every track, in playlist order.
    async fn fetch_all_tracks(&self) -> Vec<Track>;
}
