//! Verse Player Core
//!
//! Platform-agnostic core types and traits for Verse Player.
//!
//! This crate provides the foundational building blocks shared by the
//! playback session and the catalog implementations.
//!
//! # Architecture
//!
//! The core crate defines:
//! - **Domain Types**: `Track`, `PlaybackPhase`, `PlaybackProgress`,
//!   `SelectionState`
//! - **Core Traits**: `TrackCatalog`
//!
//! # Example
//!
//! ```rust
//! use verse_core::types::{PlaybackPhase, Track};
//!
//! let track = Track::new("t1", "My Song", "My Artist", "https://cdn.example.com/t1.mp3");
//!
//! // Projections start at rest
//! assert!(!track.selected);
//! assert_eq!(track.phase, PlaybackPhase::Idle);
//! ```

#![forbid(unsafe_code)]
#![warn(missing_docs)]

pub mod catalog;
pub mod types;

// Re-export commonly used types
pub use catalog::TrackCatalog;
pub use types::{
    format_clock, AdvanceDirection, PlaybackPhase, PlaybackProgress, SelectionState, Track,
};
