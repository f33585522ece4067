//! Verse Player - Playback Session
//!
//! Platform-agnostic playback session management for Verse Player.
//!
//! This crate provides:
//! - An engine seam ([`PlayerEngine`]) for platform media engines
//! - A phase machine deriving one authoritative `PlaybackPhase` stream
//!   from engine notifications
//! - Periodic progress publishing (single owned emitter task, cancelled
//!   and awaited on every stop)
//! - Selection coordination (manual selection, next/previous, and
//!   engine-driven auto-advance)
//! - A session actor tying it all together behind a cloneable handle
//!
//! # Architecture
//!
//! `verse-playback` is completely platform-agnostic:
//! - No dependency on Android/iOS media frameworks
//! - No dependency on any UI layer
//! - The platform bridge implements [`PlayerEngine`] and forwards its
//!   player callbacks as [`EngineNotification`]s
//!
//! All session output flows through watch channels (phase, progress,
//! track list, nav flags) and a broadcast event stream; commands go in
//! through the [`SessionHandle`].
//!
//! # Example: Driving a Session
//!
//! ```ignore
//! use verse_catalog::HttpTrackCatalog;
//! use verse_playback::{notification_channel, PlaybackSession, SessionConfig};
//!
//! // The platform bridge implements PlayerEngine and pushes its player
//! // callbacks into the notification sender.
//! let (notify_tx, notify_rx) = notification_channel();
//! let engine = AndroidEngineBridge::new(notify_tx);
//!
//! let catalog = HttpTrackCatalog::new("https://music.example.com")?;
//! let handle = PlaybackSession::start(
//!     Box::new(engine),
//!     notify_rx,
//!     catalog,
//!     SessionConfig::default(),
//! );
//!
//! handle.select_track(0)?;
//!
//! let mut phase = handle.phase();
//! while phase.changed().await.is_ok() {
//!     println!("phase: {}", *phase.borrow());
//! }
//! ```
//!
//! # Example: Tuning the Session
//!
//! ```rust
//! use std::time::Duration;
//! use verse_playback::{EndOfPlaylistPolicy, SessionConfig};
//!
//! let config = SessionConfig {
//!     progress_interval: Duration::from_millis(500),
//!     end_of_playlist: EndOfPlaylistPolicy::Stop,
//!     ..SessionConfig::default()
//! };
//!
//! assert_eq!(config.end_of_playlist, EndOfPlaylistPolicy::Stop);
//! ```

mod adapter;
mod config;
mod engine;
mod error;
mod events;
mod machine;
mod publisher;
mod selection;
mod session;

// Public exports
pub use adapter::{EngineAdapter, NavState};
pub use config::{EndOfPlaylistPolicy, SessionConfig};
pub use engine::{
    notification_channel, EngineErrorKind, EngineNotification, EngineStatus, MediaItem,
    NotificationReceiver, NotificationSender, PlayerEngine, TransitionReason,
};
pub use error::{PlaybackError, Result};
pub use events::SessionEvent;
pub use machine::{Outcome, PhaseMachine};
pub use selection::{SelectionCoordinator, SelectionDirective};
pub use session::{PlaybackSession, SessionCommand, SessionHandle};
