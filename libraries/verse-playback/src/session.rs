//! Playback session actor
//!
//! One tokio task owns the engine adapter, the phase machine, the
//! selection coordinator, and the progress publisher, and drains two
//! channels: user commands and engine notifications. Everything the
//! session emits is serialized through this loop, so the observed phase
//! order always matches the engine notification order, and no command can
//! interleave with a half-handled notification.

use tokio::sync::{broadcast, mpsc, oneshot, watch};
use tracing::{debug, error, info, warn};

use verse_core::{PlaybackPhase, PlaybackProgress, Track, TrackCatalog};

use crate::adapter::{EngineAdapter, NavState};
use crate::config::{EndOfPlaylistPolicy, SessionConfig};
use crate::engine::{EngineNotification, EngineStatus, NotificationReceiver, PlayerEngine};
use crate::error::{PlaybackError, Result};
use crate::events::SessionEvent;
use crate::machine::PhaseMachine;
use crate::publisher::ProgressPublisher;
use crate::selection::{SelectionCoordinator, SelectionDirective};

/// User intent, sent through a [`SessionHandle`].
#[derive(Debug)]
pub enum SessionCommand {
    /// Select the track at a playlist index.
    SelectTrack(usize),
    /// Toggle play/pause for the current selection.
    PlayPause,
    /// Move to the next track; no-op at the playlist edge.
    Next,
    /// Move to the previous track; no-op at the playlist edge.
    Previous,
    /// Seek to an absolute position in the current track, in milliseconds.
    SeekTo(u64),
    /// Seek backwards by the configured step.
    SeekBack,
    /// Seek forwards by the configured step.
    SeekForward,
    /// Halt playback and drop the engine to idle, keeping the playlist.
    Stop,
    /// Tear the session down; the ack fires once the engine is released.
    Shutdown(oneshot::Sender<()>),
}

/// Cloneable handle to a running [`PlaybackSession`].
///
/// Commands are fire-and-forget apart from delivery: they fail only when
/// the session is gone. State flows back through the watch channels and
/// the event stream.
#[derive(Clone)]
pub struct SessionHandle {
    command_tx: mpsc::UnboundedSender<SessionCommand>,
    phase_rx: watch::Receiver<PlaybackPhase>,
    progress_rx: watch::Receiver<PlaybackProgress>,
    tracks_rx: watch::Receiver<Vec<Track>>,
    nav_rx: watch::Receiver<NavState>,
    event_tx: broadcast::Sender<SessionEvent>,
}

impl SessionHandle {
    fn send(&self, command: SessionCommand) -> Result<()> {
        self.command_tx
            .send(command)
            .map_err(|_| PlaybackError::SessionClosed)
    }

    /// Select the track at `index`.
    pub fn select_track(&self, index: usize) -> Result<()> {
        self.send(SessionCommand::SelectTrack(index))
    }

    /// Toggle play/pause.
    pub fn play_pause(&self) -> Result<()> {
        self.send(SessionCommand::PlayPause)
    }

    /// Move to the next track.
    pub fn next(&self) -> Result<()> {
        self.send(SessionCommand::Next)
    }

    /// Move to the previous track.
    pub fn previous(&self) -> Result<()> {
        self.send(SessionCommand::Previous)
    }

    /// Seek to an absolute position in the current track.
    pub fn seek_to(&self, position_ms: u64) -> Result<()> {
        self.send(SessionCommand::SeekTo(position_ms))
    }

    /// Seek backwards by the configured step.
    pub fn seek_back(&self) -> Result<()> {
        self.send(SessionCommand::SeekBack)
    }

    /// Seek forwards by the configured step.
    pub fn seek_forward(&self) -> Result<()> {
        self.send(SessionCommand::SeekForward)
    }

    /// Halt playback, keeping the playlist loaded.
    pub fn stop(&self) -> Result<()> {
        self.send(SessionCommand::Stop)
    }

    /// Tear the session down and wait until the engine is released.
    ///
    /// Safe to call more than once; a session that is already gone counts
    /// as shut down.
    pub async fn shutdown(&self) {
        let (ack_tx, ack_rx) = oneshot::channel();
        if self
            .command_tx
            .send(SessionCommand::Shutdown(ack_tx))
            .is_err()
        {
            return;
        }
        let _ = ack_rx.await;
    }

    /// Whether the session actor is gone.
    #[must_use]
    pub fn is_closed(&self) -> bool {
        self.command_tx.is_closed()
    }

    /// Watch stream of the authoritative playback phase.
    #[must_use]
    pub fn phase(&self) -> watch::Receiver<PlaybackPhase> {
        self.phase_rx.clone()
    }

    /// Watch stream of progress snapshots.
    #[must_use]
    pub fn progress(&self) -> watch::Receiver<PlaybackProgress> {
        self.progress_rx.clone()
    }

    /// Watch stream of the playlist with its selection/phase projections.
    #[must_use]
    pub fn tracks(&self) -> watch::Receiver<Vec<Track>> {
        self.tracks_rx.clone()
    }

    /// Watch stream of queue-neighbor availability, refreshed on every
    /// selection change.
    #[must_use]
    pub fn nav(&self) -> watch::Receiver<NavState> {
        self.nav_rx.clone()
    }

    /// Subscribe to discrete session events.
    #[must_use]
    pub fn events(&self) -> broadcast::Receiver<SessionEvent> {
        self.event_tx.subscribe()
    }

    /// The phase right now.
    #[must_use]
    pub fn current_phase(&self) -> PlaybackPhase {
        *self.phase_rx.borrow()
    }

    /// The playlist right now.
    #[must_use]
    pub fn current_tracks(&self) -> Vec<Track> {
        self.tracks_rx.borrow().clone()
    }

    /// The neighbor availability right now.
    #[must_use]
    pub fn current_nav(&self) -> NavState {
        *self.nav_rx.borrow()
    }
}

/// The playback session actor.
///
/// Constructed and spawned through [`PlaybackSession::start`]; owned by
/// its task afterwards.
pub struct PlaybackSession {
    adapter: EngineAdapter,
    notifications: NotificationReceiver,
    command_rx: mpsc::UnboundedReceiver<SessionCommand>,
    machine: PhaseMachine,
    coordinator: SelectionCoordinator,
    publisher: ProgressPublisher,
    config: SessionConfig,
    phase_tx: watch::Sender<PlaybackPhase>,
    tracks_tx: watch::Sender<Vec<Track>>,
    nav_tx: watch::Sender<NavState>,
    event_tx: broadcast::Sender<SessionEvent>,
}

impl PlaybackSession {
    /// Spawn a session driving `engine`, fed by `notifications`.
    ///
    /// The playlist is fetched from `catalog` before the first command is
    /// processed. An empty catalog degrades to an idle session that
    /// ignores transport commands instead of failing.
    pub fn start<C>(
        engine: Box<dyn PlayerEngine>,
        notifications: NotificationReceiver,
        catalog: C,
        config: SessionConfig,
    ) -> SessionHandle
    where
        C: TrackCatalog + 'static,
    {
        let (command_tx, command_rx) = mpsc::unbounded_channel();
        let (phase_tx, phase_rx) = watch::channel(PlaybackPhase::Idle);
        let (progress_tx, progress_rx) = watch::channel(PlaybackProgress::default());
        let (tracks_tx, tracks_rx) = watch::channel(Vec::new());
        let (nav_tx, nav_rx) = watch::channel(NavState::default());
        let (event_tx, _) = broadcast::channel(config.event_capacity);

        let adapter = EngineAdapter::new(engine);
        let publisher =
            ProgressPublisher::new(config.progress_interval, progress_tx, event_tx.clone());

        let session = Self {
            adapter,
            notifications,
            command_rx,
            machine: PhaseMachine::new(config.max_transient_recoveries),
            coordinator: SelectionCoordinator::new(),
            publisher,
            config,
            phase_tx,
            tracks_tx,
            nav_tx,
            event_tx: event_tx.clone(),
        };

        tokio::spawn(session.run(catalog));

        SessionHandle {
            command_tx,
            phase_rx,
            progress_rx,
            tracks_rx,
            nav_rx,
            event_tx,
        }
    }

    async fn run<C: TrackCatalog>(mut self, catalog: C) {
        self.load_catalog(&catalog).await;

        loop {
            tokio::select! {
                Some(command) = self.command_rx.recv() => {
                    if self.handle_command(command).await {
                        break;
                    }
                }
                Some(note) = self.notifications.recv() => {
                    self.handle_notification(note).await;
                }
                else => break,
            }
        }

        // Reached on explicit shutdown and when every handle and the
        // engine side are gone; both cleanups are idempotent.
        self.publisher.stop().await;
        self.adapter.release();
        debug!("playback session ended");
    }

    async fn load_catalog<C: TrackCatalog>(&mut self, catalog: &C) {
        let tracks = catalog.fetch_all_tracks().await;
        if tracks.is_empty() {
            warn!(error = %PlaybackError::EmptyCatalog, "session stays idle");
            let _ = self.event_tx.send(SessionEvent::TracksLoaded { count: 0 });
            return;
        }

        info!(count = tracks.len(), "catalog loaded");
        self.adapter.load_playlist(&tracks);
        self.coordinator.set_tracks(tracks);
        self.publish_tracks();
        self.publish_nav();
        let _ = self.event_tx.send(SessionEvent::TracksLoaded {
            count: self.coordinator.len(),
        });
    }

    /// Returns true when the session should stop.
    async fn handle_command(&mut self, command: SessionCommand) -> bool {
        match command {
            SessionCommand::Shutdown(ack) => {
                info!("shutting down playback session");
                self.publisher.stop().await;
                self.adapter.release();
                let _ = ack.send(());
                return true;
            }
            _ if self.coordinator.is_empty() => {
                debug!(?command, "command ignored; no tracks loaded");
            }
            SessionCommand::SelectTrack(index) => self.apply_selection(index),
            SessionCommand::PlayPause => match self.coordinator.selected_index() {
                Some(_) => self.adapter.play_pause(),
                // Nothing picked yet: start the playlist from the top.
                None => self.apply_selection(0),
            },
            SessionCommand::Next => match self.coordinator.next_index() {
                Some(index) => self.apply_selection(index),
                None => debug!("next ignored at playlist edge"),
            },
            SessionCommand::Previous => match self.coordinator.previous_index() {
                Some(index) => self.apply_selection(index),
                None => debug!("previous ignored at playlist edge"),
            },
            SessionCommand::SeekTo(position_ms) => self.adapter.seek_to_position(position_ms),
            SessionCommand::SeekBack => {
                self.adapter.seek_by(-(self.config.seek_back.as_millis() as i64));
            }
            SessionCommand::SeekForward => {
                self.adapter.seek_by(self.config.seek_forward.as_millis() as i64);
            }
            SessionCommand::Stop => {
                self.publisher.stop().await;
                self.adapter.stop();
            }
        }
        false
    }

    fn apply_selection(&mut self, index: usize) {
        // The first selection of a session starts playback; afterwards a
        // new selection inherits the current play state.
        let start_playing =
            self.coordinator.selected_index().is_none() || self.adapter.play_when_ready();

        match self.coordinator.select(index, start_playing) {
            SelectionDirective::Toggle => self.adapter.play_pause(),
            SelectionDirective::Seek {
                index,
                start_playing,
            } => {
                self.adapter.seek_to_track(index, start_playing);
                self.publish_selection();
            }
            SelectionDirective::AlreadyPrimed { .. } => self.publish_selection(),
            SelectionDirective::Ignored => {}
        }
    }

    async fn handle_notification(&mut self, note: EngineNotification) {
        match note {
            EngineNotification::StatusChanged(status) => {
                let outcome = self
                    .machine
                    .on_status(status, self.adapter.play_when_ready());
                self.apply_emissions(outcome.emissions).await;
                if status == EngineStatus::Ended {
                    self.handle_track_ended();
                }
            }
            EngineNotification::PlayIntentChanged(play) => {
                let ready = self.adapter.status() == EngineStatus::Ready;
                let outcome = self.machine.on_play_intent(ready, play);
                self.apply_emissions(outcome.emissions).await;
            }
            EngineNotification::ItemTransition { index, reason } => {
                // A transition resolves whatever seek was in flight. When it
                // confirms a session-initiated seek the direction noted at
                // seek time applies; otherwise the engine moved on its own
                // and the direction is read against the current selection.
                let noted = self.coordinator.take_pending_direction();
                let direction = if self.coordinator.selected_index() == Some(index) {
                    noted.unwrap_or_else(|| self.coordinator.direction_to(index))
                } else {
                    self.coordinator.direction_to(index)
                };
                if self.coordinator.selected_index() != Some(index) {
                    // The engine moved on its own; adopt its position
                    // without re-priming.
                    self.coordinator.mark_engine_driven();
                    if self.coordinator.select(index, true) == SelectionDirective::Ignored {
                        warn!(index, "engine transitioned outside the playlist");
                        return;
                    }
                    self.publish_selection();
                }
                debug!(index, ?reason, %direction, "item transition");
                let outcome = self.machine.on_transition(direction);
                self.apply_emissions(outcome.emissions).await;
            }
            EngineNotification::Failed { kind, message } => {
                let outcome = self.machine.on_failure(kind);
                if outcome.recover {
                    self.adapter.skip_to_next_and_reprime();
                } else {
                    error!(%kind, %message, "engine failure");
                }
                let _ = self.event_tx.send(SessionEvent::PlaybackFailed {
                    kind,
                    message,
                    recovered: outcome.recover,
                });
                self.apply_emissions(outcome.emissions).await;
            }
        }
    }

    fn handle_track_ended(&mut self) {
        match self.config.end_of_playlist {
            EndOfPlaylistPolicy::RestartFromStart => {
                if self.coordinator.is_empty() {
                    return;
                }
                info!("playlist ended; restarting from the top");
                match self.coordinator.select(0, false) {
                    // Single-track playlists come back as a toggle request;
                    // the restart still only re-primes.
                    SelectionDirective::Seek { index, .. }
                    | SelectionDirective::AlreadyPrimed { index } => {
                        self.adapter.reprime_at(index);
                    }
                    SelectionDirective::Toggle => self.adapter.reprime_at(0),
                    SelectionDirective::Ignored => return,
                }
                self.publish_selection();
            }
            EndOfPlaylistPolicy::Stop => {
                debug!("playlist ended; stopping per policy");
            }
        }
    }

    async fn apply_emissions(&mut self, emissions: Vec<PlaybackPhase>) {
        for phase in emissions {
            self.emit_phase(phase).await;
        }
    }

    async fn emit_phase(&mut self, phase: PlaybackPhase) {
        debug!(%phase, "phase change");
        let _ = self.phase_tx.send(phase);
        let _ = self.event_tx.send(SessionEvent::PhaseChanged(phase));
        if self.coordinator.apply_phase(phase) {
            self.publish_tracks();
        }

        if phase.is_playing() {
            self.publisher.start(self.adapter.clone()).await;
        } else if !phase.keeps_progress_running() {
            self.publisher.stop().await;
            // One final snapshot so consumers hold the resting position.
            self.publisher.publish_once(&self.adapter);
        }
    }

    fn publish_tracks(&self) {
        let _ = self.tracks_tx.send(self.coordinator.tracks().to_vec());
    }

    fn publish_selection(&self) {
        self.publish_tracks();
        self.publish_nav();
        let _ = self.event_tx.send(SessionEvent::SelectionChanged {
            index: self.coordinator.selected_index(),
        });
    }

    fn publish_nav(&self) {
        let _ = self.nav_tx.send(self.adapter.nav());
    }
}
