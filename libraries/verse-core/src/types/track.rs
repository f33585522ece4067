//! Track types
//!
//! A playable catalog entry plus the session-owned projections
//! (selection flag and per-track phase) that UI layers bind to.

use serde::{Deserialize, Serialize};

use super::phase::PlaybackPhase;

/// A playable track in playlist order.
///
/// `selected` and `phase` are projections owned by the playback session:
/// at most one track in a list is selected, and every non-selected track
/// reports `PlaybackPhase::Idle`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Track {
    /// Stable identifier, also used as the engine media-item id.
    pub id: String,

    /// Display title.
    pub title: String,

    /// Display artist.
    pub artist: String,

    /// Playable stream location.
    pub media_uri: String,

    /// Cover art location, when the catalog has one.
    #[serde(default)]
    pub artwork_uri: Option<String>,

    /// Whether this track is the session's current selection.
    #[serde(default)]
    pub selected: bool,

    /// Phase projection; `Idle` unless this track is selected.
    #[serde(default)]
    pub phase: PlaybackPhase,
}

impl Track {
    /// Create a track with the projections at rest.
    #[must_use]
    pub fn new(
        id: impl Into<String>,
        title: impl Into<String>,
        artist: impl Into<String>,
        media_uri: impl Into<String>,
    ) -> Self {
        Self {
            id: id.into(),
            title: title.into(),
            artist: artist.into(),
            media_uri: media_uri.into(),
            artwork_uri: None,
            selected: false,
            phase: PlaybackPhase::Idle,
        }
    }

    /// Reset the session-owned projections to their resting values.
    pub fn clear_projection(&mut self) {
        self.selected = false;
        self.phase = PlaybackPhase::Idle;
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn new_track_starts_unselected_and_idle() {
        let track = Track::new("t1", "Title", "Artist", "https://cdn.example.com/t1.mp3");
        assert!(!track.selected);
        assert_eq!(track.phase, PlaybackPhase::Idle);
        assert_eq!(track.artwork_uri, None);
    }

    #[test]
    fn clear_projection_resets_flags() {
        let mut track = Track::new("t1", "Title", "Artist", "uri");
        track.selected = true;
        track.phase = PlaybackPhase::Playing;

        track.clear_projection();

        assert!(!track.selected);
        assert_eq!(track.phase, PlaybackPhase::Idle);
    }

    #[test]
    fn serializes_with_camel_case_wire_names() {
        let track = Track::new("t1", "Title", "Artist", "uri");
        let value = serde_json::to_value(&track).unwrap();

        assert!(value.get("mediaUri").is_some());
        assert!(value.get("artworkUri").is_some());
        assert!(value.get("media_uri").is_none());
    }

    #[test]
    fn deserializes_without_projection_fields() {
        let json = r#"{
            "id": "t9",
            "title": "Nine",
            "artist": "Someone",
            "mediaUri": "https://cdn.example.com/t9.mp3"
        }"#;

        let track: Track = serde_json::from_str(json).unwrap();
        assert_eq!(track.id, "t9");
        assert!(!track.selected);
        assert_eq!(track.phase, PlaybackPhase::Idle);
    }
}
