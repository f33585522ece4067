//! Verse Player - Track Catalogs
//!
//! Catalog implementations supplying the playback session's playlist.
//!
//! This crate provides:
//! - [`HttpTrackCatalog`] - fetches a JSON track collection over HTTP
//! - [`StaticTrackCatalog`] - fixed in-memory lists (demos, fixtures)
//!
//! Both implement `verse_core::TrackCatalog`, which is infallible by
//! contract: a fetch failure is logged and degrades to an empty
//! playlist, leaving the session idle instead of broken.

mod error;
mod http;
mod static_catalog;

// Public exports
pub use error::{CatalogError, Result};
pub use http::HttpTrackCatalog;
pub use static_catalog::StaticTrackCatalog;
