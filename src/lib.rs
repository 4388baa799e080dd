//! Mood Board
//!
//! The state and plumbing behind a mood board generator: pick a random quote
//! and a random background (a photo or a generated color), preview the pair,
//! pin it as a card onto a 3x3 board, rearrange or remove cards, and export
//! the board as `mood-board.jpg`.
//!
//! # Features
//!
//! - **http** (default): reqwest-backed quote source and proxy image source
//! - **export** (default): board rasterizer and JPEG export
//! - **proxy** (default): the `fetch-unsplash` proxy that keeps the photo
//!   provider key on the server
//!
//! # Example
//!
//! ```no_run
//! use moodboard::{MoodBoard, MoodBoardConfig};
//! use moodboard::sources::{HttpQuoteSource, ProxyImageSource};
//!
//! # async fn run() -> moodboard::Result<()> {
//! let config = MoodBoardConfig::default();
//! let mut board = MoodBoard::new(
//!     HttpQuoteSource::new(&config)?,
//!     ProxyImageSource::new(&config)?,
//! );
//! board.start().await;
//! board.add_to_board().await;
//! println!("{} card(s) pinned", board.board().len());
//! # Ok(())
//! # }
//! ```

pub mod error;
pub use error::{Error, Result};

pub mod board;
pub mod card;
pub mod loader;
pub mod random;

mod app;
pub use app::MoodBoard;

// HTTP-backed quote and image sources
#[cfg(feature = "http")]
pub mod sources;

// Board export (layout -> paint -> raster -> JPEG)
#[cfg(feature = "export")]
pub mod rendering;

// Server-side proxy for the photo provider
#[cfg(feature = "proxy")]
pub mod proxy;

pub use board::{BoardState, BoardStore};
pub use card::{Background, Card, CardId, ColorFill, ImageRef, Quote};
pub use loader::{ImageSource, PreviewState, PreviewView, QuoteSource, ResourceLoader};
pub use random::{ColorGroup, Rgb};

/// Maximum number of cards on the board (a 3x3 grid).
pub const MAX_SIZE: usize = 9;

/// Client-side configuration
///
/// Defaults point at the public quote list and a proxy running locally
/// (`moodboard proxy`).
///
/// # Examples
///
/// ```
/// let cfg = moodboard::MoodBoardConfig::default();
/// assert!(cfg.proxy_url.ends_with("/fetch-unsplash"));
/// ```
#[derive(Debug, Clone)]
pub struct MoodBoardConfig {
    /// Endpoint returning the full `[{text, author}]` quote list
    pub quotes_url: String,
    /// The `fetch-unsplash` proxy endpoint
    pub proxy_url: String,
    /// Timeout for each request in milliseconds
    pub timeout_ms: u64,
    /// User agent string to send with requests
    pub user_agent: String,
}

impl Default for MoodBoardConfig {
    fn default() -> Self {
        Self {
            quotes_url: "https://type.fit/api/quotes".to_string(),
            proxy_url: "http://127.0.0.1:8888/fetch-unsplash".to_string(),
            timeout_ms: 30000,
            user_agent: concat!("moodboard/", env!("CARGO_PKG_VERSION")).to_string(),
        }
    }
}
