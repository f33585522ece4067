//! Session configuration

use std::time::Duration;

use serde::{Deserialize, Serialize};

/// Default progress emission interval in milliseconds
pub const DEFAULT_PROGRESS_INTERVAL_MS: u64 = 250;

/// Default bound on consecutive transient-error recoveries
pub const DEFAULT_MAX_TRANSIENT_RECOVERIES: u32 = 1;

/// Default relative seek backwards, in milliseconds
pub const DEFAULT_SEEK_BACK_MS: u64 = 5_000;

/// Default relative seek forwards, in milliseconds
pub const DEFAULT_SEEK_FORWARD_MS: u64 = 15_000;

/// Default capacity of the session event channel
pub const DEFAULT_EVENT_CAPACITY: usize = 64;

/// What to do when the last playlist item runs to its natural end.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum EndOfPlaylistPolicy {
    /// Re-select index 0 and re-prime the engine at position 0.
    #[default]
    RestartFromStart,
    /// Remain in the ended state with the selection unchanged.
    Stop,
}

/// Configuration for a playback session
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SessionConfig {
    /// Interval between periodic progress emissions while playing
    pub progress_interval: Duration,

    /// Behavior when the last playlist item ends
    pub end_of_playlist: EndOfPlaylistPolicy,

    /// How many consecutive transient failures are auto-recovered before
    /// the session escalates to the error phase
    pub max_transient_recoveries: u32,

    /// Relative seek backwards step
    pub seek_back: Duration,

    /// Relative seek forwards step
    pub seek_forward: Duration,

    /// Capacity of the broadcast event channel
    pub event_capacity: usize,
}

impl Default for SessionConfig {
    fn default() -> Self {
        Self {
            progress_interval: Duration::from_millis(DEFAULT_PROGRESS_INTERVAL_MS),
            end_of_playlist: EndOfPlaylistPolicy::default(),
            max_transient_recoveries: DEFAULT_MAX_TRANSIENT_RECOVERIES,
            seek_back: Duration::from_millis(DEFAULT_SEEK_BACK_MS),
            seek_forward: Duration::from_millis(DEFAULT_SEEK_FORWARD_MS),
            event_capacity: DEFAULT_EVENT_CAPACITY,
        }
    }
}
