//! Playback phase types
//!
//! A single authoritative enum for the session's playback lifecycle.
//! Consumers always observe exactly one active phase.

use serde::{Deserialize, Serialize};

/// Direction of a track change, in playlist index order.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum AdvanceDirection {
    /// Selection moved to an equal or higher index.
    Next,
    /// Selection moved to a lower index.
    Previous,
}

impl AdvanceDirection {
    /// Convert to string representation
    #[must_use]
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Next => "next",
            Self::Previous => "previous",
        }
    }
}

impl std::fmt::Display for AdvanceDirection {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

/// Playback phase of a session (and of its selected track).
///
/// Phases are mutually exclusive: the session holds exactly one at any
/// instant. `TrackAdvancing` is transient and is followed by `Playing`
/// for the newly selected track.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case", tag = "phase", content = "direction")]
pub enum PlaybackPhase {
    /// Nothing primed; the resting state of every non-selected track.
    #[default]
    Idle,

    /// The engine is loading or rebuffering the current item.
    Buffering,

    /// The engine is primed and can start immediately.
    Ready,

    /// Audio is advancing.
    Playing,

    /// Primed but intentionally not advancing.
    Paused,

    /// The current item ran to its natural end.
    TrackEnded,

    /// The selection is moving to another track (one emission per
    /// engine transition, tagged with its direction).
    TrackAdvancing(AdvanceDirection),

    /// An unrecoverable engine failure was reported.
    Error,
}

impl PlaybackPhase {
    /// Convert to string representation (direction not included)
    #[must_use]
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Idle => "idle",
            Self::Buffering => "buffering",
            Self::Ready => "ready",
            Self::Playing => "playing",
            Self::Paused => "paused",
            Self::TrackEnded => "ended",
            Self::TrackAdvancing(_) => "advancing",
            Self::Error => "error",
        }
    }

    /// True while audio is advancing.
    #[must_use]
    pub fn is_playing(&self) -> bool {
        matches!(self, Self::Playing)
    }

    /// True for the phases that keep the progress emitter running:
    /// everything except the stopped states.
    #[must_use]
    pub fn keeps_progress_running(&self) -> bool {
        !matches!(
            self,
            Self::Paused | Self::TrackEnded | Self::Error | Self::Idle
        )
    }
}

impl std::fmt::Display for PlaybackPhase {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::TrackAdvancing(direction) => write!(f, "advancing({direction})"),
            other => write!(f, "{}", other.as_str()),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn default_phase_is_idle() {
        assert_eq!(PlaybackPhase::default(), PlaybackPhase::Idle);
    }

    #[test]
    fn only_playing_reports_playing() {
        assert!(PlaybackPhase::Playing.is_playing());
        assert!(!PlaybackPhase::Paused.is_playing());
        assert!(!PlaybackPhase::TrackAdvancing(AdvanceDirection::Next).is_playing());
    }

    #[test]
    fn display_includes_direction() {
        let phase = PlaybackPhase::TrackAdvancing(AdvanceDirection::Previous);
        assert_eq!(phase.to_string(), "advancing(previous)");
        assert_eq!(PlaybackPhase::Paused.to_string(), "paused");
    }

    #[test]
    fn stopped_phases_do_not_keep_progress_running() {
        assert!(PlaybackPhase::Playing.keeps_progress_running());
        assert!(PlaybackPhase::Buffering.keeps_progress_running());
        assert!(!PlaybackPhase::Paused.keeps_progress_running());
        assert!(!PlaybackPhase::Error.keeps_progress_running());
        assert!(!PlaybackPhase::TrackEnded.keeps_progress_running());
    }
}
