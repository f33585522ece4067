//! Session events
//!
//! Discrete happenings on the broadcast channel, complementing the
//! conflated watch streams (phase, progress, tracks). Receivers that lag
//! past the channel capacity lose the oldest events; the watch streams
//! always hold the latest truth.

use serde::{Deserialize, Serialize};

use verse_core::{PlaybackPhase, PlaybackProgress};

use crate::engine::EngineErrorKind;

/// Discrete session event.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum SessionEvent {
    /// The session phase changed; one event per phase emission.
    PhaseChanged(PlaybackPhase),

    /// A progress snapshot was published.
    Progress(PlaybackProgress),

    /// The selected playlist slot changed.
    SelectionChanged {
        /// New selected index, `None` when nothing is selected.
        index: Option<usize>,
    },

    /// The catalog load finished.
    TracksLoaded {
        /// Number of tracks in the playlist (0 on degrade).
        count: usize,
    },

    /// The engine reported a failure.
    PlaybackFailed {
        /// Failure classification.
        kind: EngineErrorKind,
        /// Engine-provided detail.
        message: String,
        /// True when the session auto-recovered by skipping ahead;
        /// false when the failure surfaced as the error phase.
        recovered: bool,
    },
}
