//! Quotes, backgrounds and the cards that pin them onto the board.

use serde::{Deserialize, Serialize};
use std::fmt;

use crate::random::{ColorGroup, Rgb};
use crate::{Error, Result, MAX_SIZE};

/// A quote as returned by the quote provider.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Quote {
    pub text: String,
    #[serde(default)]
    pub author: Option<String>,
}

impl Quote {
    pub fn new(text: impl Into<String>, author: Option<&str>) -> Self {
        Self {
            text: text.into(),
            author: author.map(str::to_string),
        }
    }

    /// Author name for display, `"Unknown"` when the provider gave none.
    pub fn display_author(&self) -> &str {
        self.author.as_deref().unwrap_or("Unknown")
    }
}

/// A photo chosen from the photo provider.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ImageRef {
    /// Small display URL
    pub url: String,
    /// Provider callback hit when the photo is actually used
    pub download_location: String,
}

/// A generated solid color and the group it was drawn from.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ColorFill {
    pub rgb: Rgb,
    pub group: ColorGroup,
}

/// What sits behind a quote: exactly one of a photo or a color.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Background {
    Image(ImageRef),
    Color(ColorFill),
}

impl Background {
    pub fn as_image(&self) -> Option<&ImageRef> {
        match self {
            Background::Image(img) => Some(img),
            Background::Color(_) => None,
        }
    }
}

/// Stable card identity; never reused within a session.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct CardId(pub u64);

impl fmt::Display for CardId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "#{}", self.0)
    }
}

/// A quote/background combination pinned onto the board.
///
/// Fields are private so a card can only come out of a [`CardFactory`] and
/// cannot be edited afterwards.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Card {
    id: CardId,
    quote: Quote,
    background: Background,
}

impl Card {
    pub fn id(&self) -> CardId {
        self.id
    }

    pub fn quote(&self) -> &Quote {
        &self.quote
    }

    pub fn background(&self) -> &Background {
        &self.background
    }
}

/// Hands out card ids from a session-wide counter.
#[derive(Debug)]
pub struct CardFactory {
    next_id: u64,
}

impl CardFactory {
    pub fn new() -> Self {
        Self { next_id: 1 }
    }

    /// Build a card for a board currently holding `board_len` cards.
    ///
    /// The counter only advances when a card is actually produced.
    pub fn create(&mut self, board_len: usize, quote: Quote, background: Background) -> Result<Card> {
        if board_len >= MAX_SIZE {
            return Err(Error::CapacityExceeded(MAX_SIZE));
        }
        let id = self.allocate_id();
        Ok(Card { id, quote, background })
    }

    fn allocate_id(&mut self) -> CardId {
        let id = CardId(self.next_id);
        self.next_id += 1;
        id
    }
}

impl Default for CardFactory {
    fn default() -> Self {
        Self::new()
    }
}
