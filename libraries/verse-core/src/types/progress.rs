//! Progress snapshot types

use serde::{Deserialize, Serialize};

/// Point-in-time position/duration snapshot of the current track.
///
/// Both fields are already clamped non-negative by the engine adapter;
/// a duration of zero means the engine has not reported one yet.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PlaybackProgress {
    /// Position within the current track, in milliseconds.
    pub position_ms: u64,

    /// Duration of the current track, in milliseconds (0 when unknown).
    pub duration_ms: u64,
}

impl PlaybackProgress {
    /// Create a snapshot.
    #[must_use]
    pub fn new(position_ms: u64, duration_ms: u64) -> Self {
        Self {
            position_ms,
            duration_ms,
        }
    }

    /// Completed fraction in `[0.0, 1.0]`; 0.0 while the duration is unknown.
    #[must_use]
    pub fn fraction(&self) -> f32 {
        if self.duration_ms == 0 {
            return 0.0;
        }
        let fraction = self.position_ms as f32 / self.duration_ms as f32;
        fraction.clamp(0.0, 1.0)
    }

    /// Position as a zero-padded `MM:SS` clock.
    #[must_use]
    pub fn position_clock(&self) -> String {
        format_clock(self.position_ms)
    }

    /// Duration as a zero-padded `MM:SS` clock.
    #[must_use]
    pub fn duration_clock(&self) -> String {
        format_clock(self.duration_ms)
    }
}

/// Format milliseconds as a zero-padded `MM:SS` clock.
///
/// Minutes are not wrapped at 60, so an hour-long track reads `60:00`.
#[must_use]
pub fn format_clock(ms: u64) -> String {
    let total_seconds = ms / 1000;
    let minutes = total_seconds / 60;
    let seconds = total_seconds % 60;
    format!("{minutes:02}:{seconds:02}")
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn fraction_is_zero_without_duration() {
        let progress = PlaybackProgress::new(5_000, 0);
        assert_eq!(progress.fraction(), 0.0);
    }

    #[test]
    fn fraction_is_clamped_to_one() {
        let progress = PlaybackProgress::new(200_000, 180_000);
        assert_eq!(progress.fraction(), 1.0);
    }

    #[test]
    fn fraction_of_half() {
        let progress = PlaybackProgress::new(90_000, 180_000);
        assert!((progress.fraction() - 0.5).abs() < f32::EPSILON);
    }

    #[test]
    fn clock_is_zero_padded() {
        assert_eq!(format_clock(0), "00:00");
        assert_eq!(format_clock(1_000), "00:01");
        assert_eq!(format_clock(61_000), "01:01");
        assert_eq!(format_clock(754_000), "12:34");
    }

    #[test]
    fn clock_does_not_wrap_minutes() {
        assert_eq!(format_clock(3_600_000), "60:00");
    }

    #[test]
    fn sub_second_remainder_is_truncated() {
        assert_eq!(format_clock(1_999), "00:01");
    }
}
