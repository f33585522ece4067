//! Error types for catalog access.

use thiserror::Error;

/// Errors that can occur while fetching a track catalog.
///
/// These stay internal to the catalog layer: the [`TrackCatalog`]
/// surface degrades every failure to an empty list after logging it.
///
/// [`TrackCatalog`]: verse_core::TrackCatalog
#[derive(Error, Debug)]
pub enum CatalogError {
    /// HTTP request failed
    #[error("HTTP request failed: {0}")]
    Request(#[from] reqwest::Error),

    /// Server returned an error response
    #[error("Server error ({status}): {message}")]
    ServerError {
        /// HTTP status code.
        status: u16,
        /// Response body, when readable.
        message: String,
    },

    /// Invalid catalog URL
    #[error("Invalid catalog URL: {0}")]
    InvalidUrl(String),

    /// Failed to parse the catalog response
    #[error("Failed to parse response: {0}")]
    ParseError(String),
}

/// Result type for catalog operations.
pub type Result<T> = std::result::Result<T, CatalogError>;
