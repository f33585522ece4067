//! Engine adapter
//!
//! Concurrency-safe facade over a [`PlayerEngine`]. The session actor and
//! the progress emitter share one adapter; every operation takes the lock
//! briefly and never awaits while holding it.
//!
//! The adapter also owns the seam-level guarantees: an empty playlist is
//! never handed to the engine, negative engine clocks are clamped to zero,
//! seek targets are clamped to the track bounds, and release is
//! idempotent.

use std::sync::{Arc, Mutex};

use serde::{Deserialize, Serialize};
use tracing::{debug, trace};

use verse_core::{PlaybackProgress, Track};

use crate::engine::{EngineStatus, MediaItem, PlayerEngine};

/// Whether the engine queue can move in each direction from the current
/// item.
///
/// Refreshed by the session on every selection change; a released engine
/// reports neither direction.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct NavState {
    /// A later queue item exists.
    pub has_next: bool,
    /// An earlier queue item exists.
    pub has_previous: bool,
}

struct AdapterInner {
    engine: Box<dyn PlayerEngine>,
    released: bool,
}

/// Shared handle to the platform engine.
///
/// Cheap to clone; all clones drive the same engine. After [`release`]
/// every operation becomes a no-op.
///
/// [`release`]: EngineAdapter::release
#[derive(Clone)]
pub struct EngineAdapter {
    inner: Arc<Mutex<AdapterInner>>,
}

impl EngineAdapter {
    /// Wrap an engine.
    #[must_use]
    pub fn new(engine: Box<dyn PlayerEngine>) -> Self {
        Self {
            inner: Arc::new(Mutex::new(AdapterInner {
                engine,
                released: false,
            })),
        }
    }

    /// Replace the engine queue with `tracks`.
    ///
    /// An empty list is ignored: the engine keeps whatever it had.
    pub fn load_playlist(&self, tracks: &[Track]) {
        if tracks.is_empty() {
            debug!("ignoring empty playlist load");
            return;
        }
        let items: Vec<MediaItem> = tracks.iter().map(MediaItem::from).collect();
        let mut inner = self.inner.lock().unwrap();
        if inner.released {
            return;
        }
        debug!(count = items.len(), "loading playlist into engine");
        inner.engine.load_items(items);
    }

    /// Toggle play/pause.
    ///
    /// An idle engine is prepared first, so the first tap on a cold
    /// session both primes and starts it.
    pub fn play_pause(&self) {
        let mut inner = self.inner.lock().unwrap();
        if inner.released {
            return;
        }
        if inner.engine.play_when_ready() {
            inner.engine.set_play_when_ready(false);
        } else {
            if inner.engine.status() == EngineStatus::Idle {
                inner.engine.prepare();
            }
            inner.engine.set_play_when_ready(true);
        }
    }

    /// Move the engine to playlist slot `index` at position 0.
    ///
    /// Prepares an idle engine first. Play-intent is set to
    /// `start_playing`; a prepared-but-paused engine therefore stays
    /// paused unless the caller asks otherwise.
    pub fn seek_to_track(&self, index: usize, start_playing: bool) {
        let mut inner = self.inner.lock().unwrap();
        if inner.released {
            return;
        }
        if inner.engine.status() == EngineStatus::Idle {
            inner.engine.prepare();
        }
        inner.engine.seek_to_item(index, 0);
        inner.engine.set_play_when_ready(start_playing);
    }

    /// Re-prime the engine at slot `index`, position 0, without touching
    /// the play-intent flag.
    pub fn reprime_at(&self, index: usize) {
        let mut inner = self.inner.lock().unwrap();
        if inner.released {
            return;
        }
        if inner.engine.status() == EngineStatus::Idle {
            inner.engine.prepare();
        }
        inner.engine.seek_to_item(index, 0);
    }

    /// Seek to an absolute position in the current track, clamped to the
    /// duration when it is known.
    pub fn seek_to_position(&self, position_ms: u64) {
        let mut inner = self.inner.lock().unwrap();
        if inner.released {
            return;
        }
        let duration = inner.engine.duration_ms().max(0) as u64;
        let mut target = position_ms;
        if duration > 0 {
            target = target.min(duration);
        }
        inner.engine.seek_within(target);
    }

    /// Seek relative to the current position, clamped to the track bounds.
    pub fn seek_by(&self, offset_ms: i64) {
        let mut inner = self.inner.lock().unwrap();
        if inner.released {
            return;
        }
        let position = inner.engine.position_ms().max(0);
        let duration = inner.engine.duration_ms().max(0);
        let mut target = position.saturating_add(offset_ms).max(0);
        if duration > 0 {
            target = target.min(duration);
        }
        inner.engine.seek_within(target as u64);
    }

    /// Skip past the current item and re-prime with play-intent set.
    ///
    /// The transient-failure recovery path.
    pub fn skip_to_next_and_reprime(&self) {
        let mut inner = self.inner.lock().unwrap();
        if inner.released {
            return;
        }
        inner.engine.skip_to_next();
        inner.engine.prepare();
        inner.engine.set_play_when_ready(true);
    }

    /// Clamped position/duration snapshot.
    ///
    /// Negative engine clocks (unset position, unknown duration) are
    /// reported as 0.
    #[must_use]
    pub fn progress(&self) -> PlaybackProgress {
        let inner = self.inner.lock().unwrap();
        if inner.released {
            return PlaybackProgress::default();
        }
        let snapshot = PlaybackProgress::new(
            inner.engine.position_ms().max(0) as u64,
            inner.engine.duration_ms().max(0) as u64,
        );
        trace!(position_ms = snapshot.position_ms, "progress snapshot");
        snapshot
    }

    /// Current play-intent flag.
    #[must_use]
    pub fn play_when_ready(&self) -> bool {
        let inner = self.inner.lock().unwrap();
        !inner.released && inner.engine.play_when_ready()
    }

    /// Current engine status.
    #[must_use]
    pub fn status(&self) -> EngineStatus {
        let inner = self.inner.lock().unwrap();
        if inner.released {
            return EngineStatus::Idle;
        }
        inner.engine.status()
    }

    /// Queue-neighbor availability for the current item, read as one
    /// coherent snapshot.
    #[must_use]
    pub fn nav(&self) -> NavState {
        let inner = self.inner.lock().unwrap();
        if inner.released {
            return NavState::default();
        }
        NavState {
            has_next: inner.engine.has_next(),
            has_previous: inner.engine.has_previous(),
        }
    }

    /// Halt playback, clearing play-intent and dropping the engine to
    /// idle. The queue survives; a later play prepares again.
    pub fn stop(&self) {
        let mut inner = self.inner.lock().unwrap();
        if inner.released {
            return;
        }
        inner.engine.set_play_when_ready(false);
        inner.engine.stop();
    }

    /// Release the engine. Safe to call more than once; every call after
    /// the first is a no-op, as is every other operation afterwards.
    pub fn release(&self) {
        let mut inner = self.inner.lock().unwrap();
        if inner.released {
            debug!("engine already released");
            return;
        }
        inner.engine.release();
        inner.released = true;
    }
}
