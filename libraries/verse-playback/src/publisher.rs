//! Progress publisher
//!
//! Owns the periodic progress emitter. At most one emitter task exists at
//! any time: starting always tears down the previous task first, and both
//! teardown paths cancel *and await* the task, so once `stop` returns no
//! further emission can be observed.

use std::time::Duration;

use tokio::sync::{broadcast, watch};
use tokio::task::JoinHandle;
use tokio_util::sync::CancellationToken;
use tracing::{debug, warn};

use verse_core::PlaybackProgress;

use crate::adapter::EngineAdapter;
use crate::events::SessionEvent;

struct EmitterTask {
    token: CancellationToken,
    handle: JoinHandle<()>,
}

/// Periodic progress emitter with single-task ownership.
pub struct ProgressPublisher {
    interval: Duration,
    progress_tx: watch::Sender<PlaybackProgress>,
    event_tx: broadcast::Sender<SessionEvent>,
    task: Option<EmitterTask>,
}

impl ProgressPublisher {
    /// Create a stopped publisher.
    #[must_use]
    pub fn new(
        interval: Duration,
        progress_tx: watch::Sender<PlaybackProgress>,
        event_tx: broadcast::Sender<SessionEvent>,
    ) -> Self {
        Self {
            interval,
            progress_tx,
            event_tx,
            task: None,
        }
    }

    /// Whether an emitter task is currently running.
    #[must_use]
    pub fn is_running(&self) -> bool {
        self.task.is_some()
    }

    /// Start emitting from `adapter`.
    ///
    /// Any previous emitter is cancelled and awaited first; rapid
    /// consecutive starts therefore never stack tasks. The first snapshot
    /// is emitted immediately, then one per interval.
    pub async fn start(&mut self, adapter: EngineAdapter) {
        self.stop().await;

        let token = CancellationToken::new();
        let task_token = token.clone();
        let progress_tx = self.progress_tx.clone();
        let event_tx = self.event_tx.clone();
        let interval = self.interval;

        debug!(interval_ms = interval.as_millis() as u64, "starting progress emitter");
        let handle = tokio::spawn(async move {
            let mut ticker = tokio::time::interval(interval);
            loop {
                tokio::select! {
                    _ = task_token.cancelled() => {
                        debug!("progress emitter stopped");
                        break;
                    }
                    _ = ticker.tick() => {
                        let snapshot = adapter.progress();
                        let _ = progress_tx.send(snapshot);
                        let _ = event_tx.send(SessionEvent::Progress(snapshot));
                    }
                }
            }
        });

        self.task = Some(EmitterTask { token, handle });
    }

    /// Stop the emitter, waiting for the task to finish.
    ///
    /// Idempotent; stopping a stopped publisher does nothing.
    pub async fn stop(&mut self) {
        if let Some(task) = self.task.take() {
            task.token.cancel();
            if let Err(err) = task.handle.await {
                warn!(%err, "progress emitter did not shut down cleanly");
            }
        }
    }

    /// Publish one snapshot without starting the emitter.
    ///
    /// Used on transitions into non-playing phases so consumers hold the
    /// final position.
    pub fn publish_once(&self, adapter: &EngineAdapter) {
        let snapshot = adapter.progress();
        let _ = self.progress_tx.send(snapshot);
        let _ = self.event_tx.send(SessionEvent::Progress(snapshot));
    }
}
