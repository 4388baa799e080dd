//! Error types for the mood board

use thiserror::Error;

/// Result type alias for mood board operations
pub type Result<T> = std::result::Result<T, Error>;

/// Errors that can occur while building or exporting a board
#[derive(Error, Debug, Clone, PartialEq)]
pub enum Error {
    /// A quote or image fetch failed (transport, status or decoding)
    #[error("Network error: {0}")]
    NetworkError(String),

    /// Tried to add a card to a full board
    #[error("Board is full ({0} cards)")]
    CapacityExceeded(usize),

    /// Select/delete with an absent or unknown card id, or a bad reorder index
    #[error("Invalid selection: {0}")]
    InvalidSelection(String),

    /// Rasterizing or saving the board failed
    #[error("Export failed: {0}")]
    ExportError(String),

    /// Invalid configuration
    #[error("Invalid configuration: {0}")]
    ConfigError(String),

    /// Forwarding a proxy request upstream failed
    #[error("Proxy error: {0}")]
    ProxyError(String),

    /// Generic error
    #[error("{0}")]
    Other(String),
}
