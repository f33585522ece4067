//! Engine seam
//!
//! The playback session drives an opaque platform media engine (ExoPlayer
//! on Android, AVPlayer on iOS, a fake in tests) through the
//! [`PlayerEngine`] trait. Transport calls are synchronous and infallible,
//! matching the platform players: outcomes, including failures, arrive
//! asynchronously on the notification channel.

use serde::{Deserialize, Serialize};
use tokio::sync::mpsc;

use verse_core::Track;

/// What the engine is handed for each playlist slot.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct MediaItem {
    /// Stable id, mirrored from the track id.
    pub id: String,
    /// Playable stream location.
    pub uri: String,
    /// Display title for platform media notifications.
    pub title: String,
    /// Display artist for platform media notifications.
    pub artist: String,
    /// Cover art location, when known.
    pub artwork_uri: Option<String>,
}

impl From<&Track> for MediaItem {
    fn from(track: &Track) -> Self {
        Self {
            id: track.id.clone(),
            uri: track.media_uri.clone(),
            title: track.title.clone(),
            artist: track.artist.clone(),
            artwork_uri: track.artwork_uri.clone(),
        }
    }
}

/// Engine lifecycle status, as the platform player reports it.
///
/// Distinct from `PlaybackPhase`: the phase also folds in play-intent and
/// transient conditions; this is only what the engine itself is doing.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum EngineStatus {
    /// Nothing loaded, or stopped.
    #[default]
    Idle,
    /// Loading or rebuffering the current item.
    Buffering,
    /// Primed; playback starts as soon as play-intent is set.
    Ready,
    /// The current item ran to its natural end.
    Ended,
}

/// Why the engine moved to another playlist item.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum TransitionReason {
    /// The previous item finished and the engine advanced on its own.
    Auto,
    /// An explicit seek landed on another item.
    Seek,
}

/// Classification of an engine-reported failure.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum EngineErrorKind {
    /// The stream stalled past the engine's deadline.
    Timeout,
    /// The media source could not be reached or read.
    Source,
    /// The stream was reached but could not be decoded.
    Decode,
    /// Anything the engine did not classify.
    Unknown,
}

impl EngineErrorKind {
    /// Whether the session may try to recover by skipping ahead.
    #[must_use]
    pub fn is_transient(self) -> bool {
        matches!(self, Self::Timeout)
    }

    /// Convert to string representation
    #[must_use]
    pub fn as_str(self) -> &'static str {
        match self {
            Self::Timeout => "timeout",
            Self::Source => "source",
            Self::Decode => "decode",
            Self::Unknown => "unknown",
        }
    }
}

impl std::fmt::Display for EngineErrorKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

/// Asynchronous engine outcome, pushed by the platform integration.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum EngineNotification {
    /// The engine's lifecycle status changed.
    StatusChanged(EngineStatus),
    /// The play-intent flag flipped (user surfaces, remote controls).
    PlayIntentChanged(bool),
    /// The engine is now on another playlist item.
    ItemTransition {
        /// Index of the item the engine is on now.
        index: usize,
        /// Whether the engine advanced on its own or was seeked.
        reason: TransitionReason,
    },
    /// The engine reported a failure.
    Failed {
        /// Failure classification.
        kind: EngineErrorKind,
        /// Engine-provided detail, for logs and events.
        message: String,
    },
}

/// Sending half of the engine notification channel.
pub type NotificationSender = mpsc::UnboundedSender<EngineNotification>;

/// Receiving half of the engine notification channel, consumed by the session.
pub type NotificationReceiver = mpsc::UnboundedReceiver<EngineNotification>;

/// Create the notification channel wiring an engine to a session.
///
/// Unbounded so platform callback threads never block on a full buffer.
#[must_use]
pub fn notification_channel() -> (NotificationSender, NotificationReceiver) {
    mpsc::unbounded_channel()
}

/// Platform media engine seam.
///
/// Implementations wrap the platform player and forward its listener
/// callbacks as [`EngineNotification`]s. Transport methods never fail
/// synchronously; a call that cannot be honored is dropped by the engine
/// and, when the platform reports it, surfaces on the channel.
pub trait PlayerEngine: Send {
    /// Replace the queue with `items`. An empty `items` is silently ignored.
    fn load_items(&mut self, items: Vec<MediaItem>);

    /// Prime the engine for the current queue.
    fn prepare(&mut self);

    /// Set the play-intent flag: whether to advance once ready.
    fn set_play_when_ready(&mut self, play: bool);

    /// Current play-intent flag.
    fn play_when_ready(&self) -> bool;

    /// Current lifecycle status.
    fn status(&self) -> EngineStatus;

    /// Move to playlist slot `index` at `position_ms`.
    fn seek_to_item(&mut self, index: usize, position_ms: u64);

    /// Seek within the current item.
    fn seek_within(&mut self, position_ms: u64);

    /// Skip to the next queue item, if any.
    fn skip_to_next(&mut self);

    /// Position in the current item, in milliseconds.
    ///
    /// May be negative when the engine has no position yet.
    fn position_ms(&self) -> i64;

    /// Duration of the current item, in milliseconds.
    ///
    /// May be negative when the engine has no duration yet.
    fn duration_ms(&self) -> i64;

    /// Whether a next queue item exists.
    fn has_next(&self) -> bool;

    /// Whether a previous queue item exists.
    fn has_previous(&self) -> bool;

    /// Halt playback and drop to idle, keeping the queue.
    fn stop(&mut self);

    /// Free platform resources. The engine is unusable afterwards.
    fn release(&mut self);
}
