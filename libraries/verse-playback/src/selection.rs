//! Selection coordinator
//!
//! Owns the playlist and the selection/auto-advance bookkeeping. The
//! coordinator only decides; it returns a directive and the session
//! executes any engine work, which keeps this logic synchronous and
//! engine-free.

use tracing::debug;

use verse_core::{AdvanceDirection, PlaybackPhase, SelectionState, Track};

use crate::error::PlaybackError;

/// What the session must do after a selection application.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SelectionDirective {
    /// The selected track was tapped again: toggle play/pause.
    Toggle,
    /// Move the engine to `index`, starting playback if asked.
    Seek {
        /// Target playlist slot.
        index: usize,
        /// Whether play-intent should be set after the seek.
        start_playing: bool,
    },
    /// The engine is already on `index` (engine-driven transition);
    /// no engine call needed.
    AlreadyPrimed {
        /// Playlist slot the engine is already on.
        index: usize,
    },
    /// Out of range or empty playlist; dropped.
    Ignored,
}

/// Playlist selection state machine.
#[derive(Debug, Default)]
pub struct SelectionCoordinator {
    tracks: Vec<Track>,
    state: SelectionState,
    pending_direction: Option<AdvanceDirection>,
}

impl SelectionCoordinator {
    /// Create an empty coordinator.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Replace the playlist, clearing every projection and the selection.
    pub fn set_tracks(&mut self, mut tracks: Vec<Track>) {
        for track in &mut tracks {
            track.clear_projection();
        }
        self.tracks = tracks;
        self.state = SelectionState::default();
        self.pending_direction = None;
    }

    /// The playlist with its current projections.
    #[must_use]
    pub fn tracks(&self) -> &[Track] {
        &self.tracks
    }

    /// Number of playlist entries.
    #[must_use]
    pub fn len(&self) -> usize {
        self.tracks.len()
    }

    /// Whether the playlist is empty.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.tracks.is_empty()
    }

    /// Current selection state.
    #[must_use]
    pub fn selection(&self) -> SelectionState {
        self.state
    }

    /// Index of the selected track, if any.
    #[must_use]
    pub fn selected_index(&self) -> Option<usize> {
        self.state.selected_index
    }

    /// The selected track, if any.
    #[must_use]
    pub fn selected_track(&self) -> Option<&Track> {
        self.state.selected_index.and_then(|i| self.tracks.get(i))
    }

    /// Mark that the engine already moved to the next selection target,
    /// so the following [`select`] must not re-prime it.
    ///
    /// [`select`]: SelectionCoordinator::select
    pub fn mark_engine_driven(&mut self) {
        self.state.auto_advance = true;
    }

    /// Apply a selection.
    ///
    /// Selecting the selected index is a toggle request. Selecting a
    /// different valid index resets the projection flags of every track
    /// (so at most one is ever selected) and either seeks or, when the
    /// transition was engine-driven, merely adopts the engine's position.
    /// Anything out of range is ignored.
    pub fn select(&mut self, index: usize, start_playing: bool) -> SelectionDirective {
        if index >= self.tracks.len() {
            let err = PlaybackError::IndexOutOfRange {
                index,
                len: self.tracks.len(),
            };
            debug!(%err, "selection ignored");
            // An engine-driven flag must not leak into the next selection.
            self.state.take_auto_advance();
            return SelectionDirective::Ignored;
        }

        if self.state.selected_index == Some(index) {
            return SelectionDirective::Toggle;
        }

        // Direction must be read before the selection moves.
        let direction = self.direction_to(index);

        for track in &mut self.tracks {
            track.clear_projection();
        }
        self.tracks[index].selected = true;
        self.state.selected_index = Some(index);

        if self.state.take_auto_advance() {
            SelectionDirective::AlreadyPrimed { index }
        } else {
            self.pending_direction = Some(direction);
            SelectionDirective::Seek {
                index,
                start_playing,
            }
        }
    }

    /// Consume the direction noted for an in-flight seek, if any.
    ///
    /// A `Seek` directive notes its index-order direction here; the
    /// engine's confirming transition picks it up, since by then the
    /// selection has already moved and the order can no longer be read.
    pub fn take_pending_direction(&mut self) -> Option<AdvanceDirection> {
        self.pending_direction.take()
    }

    /// Candidate index for a next-track command.
    ///
    /// With no selection yet, next starts at the top of the playlist.
    /// At the last slot there is no candidate: the edge is a no-op.
    #[must_use]
    pub fn next_index(&self) -> Option<usize> {
        if self.tracks.is_empty() {
            return None;
        }
        match self.state.selected_index {
            None => Some(0),
            Some(i) if i + 1 < self.tracks.len() => Some(i + 1),
            Some(_) => None,
        }
    }

    /// Candidate index for a previous-track command; no-op at slot 0.
    #[must_use]
    pub fn previous_index(&self) -> Option<usize> {
        match self.state.selected_index {
            Some(i) if i > 0 => Some(i - 1),
            _ => None,
        }
    }

    /// Index-order direction from the current selection to `index`.
    #[must_use]
    pub fn direction_to(&self, index: usize) -> AdvanceDirection {
        match self.state.selected_index {
            Some(old) if index < old => AdvanceDirection::Previous,
            _ => AdvanceDirection::Next,
        }
    }

    /// Project `phase` onto the selected track. Returns true when the
    /// projection changed (the track list should be re-published).
    pub fn apply_phase(&mut self, phase: PlaybackPhase) -> bool {
        let Some(index) = self.state.selected_index else {
            return false;
        };
        let Some(track) = self.tracks.get_mut(index) else {
            return false;
        };
        if track.phase == phase {
            return false;
        }
        track.phase = phase;
        true
    }
}
