//! Error types for playback

use thiserror::Error;

use crate::engine::EngineErrorKind;

/// Errors arising in and around a playback session.
///
/// Failures never cross the session boundary as `Err` values on the phase
/// or progress streams; engine trouble is projected into the `Error` phase
/// and `PlaybackFailed` events instead. This type is what those events and
/// the fallible handle surface carry.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum PlaybackError {
    /// The engine reported a failure
    #[error("engine failure ({kind}): {message}")]
    Engine {
        /// Failure classification.
        kind: EngineErrorKind,
        /// Engine-provided detail.
        message: String,
    },

    /// The catalog produced no tracks; the session degrades to an idle no-op
    #[error("catalog returned no tracks")]
    EmptyCatalog,

    /// A selection index fell outside the playlist
    #[error("track index {index} out of range (playlist has {len} tracks)")]
    IndexOutOfRange {
        /// The rejected index.
        index: usize,
        /// Playlist length at the time.
        len: usize,
    },

    /// A command was sent to a session that already shut down
    #[error("playback session is no longer running")]
    SessionClosed,
}

/// Result type for playback operations.
pub type Result<T> = std::result::Result<T, PlaybackError>;
