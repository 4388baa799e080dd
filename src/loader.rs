//! Preview state and the two independent fetch flows that feed it.
//!
//! The quote list and the background are loaded separately and land in a
//! shared [`PreviewState`] as each one resolves. There is no barrier between
//! the flows and no cancellation: when two background fetches overlap, the
//! one that resolves last overwrites the other.

use std::future::Future;
use std::sync::Mutex;

use log::{debug, info, warn};

use crate::card::{Background, ColorFill, ImageRef, Quote};
use crate::random::{random_color, random_index, ColorGroup};
use crate::{Error, Result};

/// Provider of the full quote list.
pub trait QuoteSource {
    fn fetch_quotes(&self) -> impl Future<Output = Result<Vec<Quote>>> + Send;
}

/// Provider of random photos (normally reached through the proxy).
pub trait ImageSource {
    fn fetch_image(&self) -> impl Future<Output = Result<ImageRef>> + Send;

    /// Tell the provider a photo was used. Called when a photo card is pinned.
    fn track_download(&self, download_location: &str) -> impl Future<Output = Result<()>> + Send;
}

/// Transient state of the not-yet-pinned preview.
#[derive(Debug, Clone, PartialEq)]
pub struct PreviewState {
    pub quotes: Option<Vec<Quote>>,
    pub quote_index: Option<usize>,
    pub image: Option<ImageRef>,
    pub color: Option<ColorFill>,
    pub color_group: ColorGroup,
    pub use_image: bool,
    /// Set while the quote list is loading. Stays set after a failed load.
    pub loading: bool,
    /// Quote flow failure; blocks the whole preview for the session.
    pub error: Option<Error>,
    /// Last background failure; the previous background stays in place.
    pub background_error: Option<Error>,
    /// Image fetches issued but not yet resolved.
    pub pending_backgrounds: usize,
}

impl Default for PreviewState {
    fn default() -> Self {
        Self {
            quotes: None,
            quote_index: None,
            image: None,
            color: Some(ColorFill {
                rgb: random_color(ColorGroup::Any),
                group: ColorGroup::Any,
            }),
            color_group: ColorGroup::Any,
            use_image: true,
            loading: false,
            error: None,
            background_error: None,
            pending_backgrounds: 0,
        }
    }
}

impl PreviewState {
    pub fn current_quote(&self) -> Option<&Quote> {
        let quotes = self.quotes.as_ref()?;
        quotes.get(self.quote_index?)
    }

    /// The background the preview shows for the current toggle, if any.
    pub fn current_background(&self) -> Option<Background> {
        if self.use_image {
            self.image.clone().map(Background::Image)
        } else {
            self.color.map(Background::Color)
        }
    }

    /// What the view layer should draw.
    pub fn view(&self) -> PreviewView {
        if let Some(err) = &self.error {
            return PreviewView::Error(err.clone());
        }
        if self.loading {
            return PreviewView::Loading;
        }
        PreviewView::Ready {
            quote: self.current_quote().cloned(),
            background: self.current_background(),
        }
    }
}

/// Render decision for the preview area.
#[derive(Debug, Clone, PartialEq)]
pub enum PreviewView {
    /// The quote list failed to load; shown for the rest of the session
    Error(Error),
    /// The quote list is still loading
    Loading,
    /// `quote` is `None` when the list was empty; `background` is `None`
    /// while a photo is still on its way
    Ready {
        quote: Option<Quote>,
        background: Option<Background>,
    },
}

/// Drives the quote and background flows over a shared [`PreviewState`].
pub struct ResourceLoader<Q, I> {
    quotes: Q,
    images: I,
    state: Mutex<PreviewState>,
}

impl<Q: QuoteSource, I: ImageSource> ResourceLoader<Q, I> {
    pub fn new(quotes: Q, images: I) -> Self {
        Self {
            quotes,
            images,
            state: Mutex::new(PreviewState::default()),
        }
    }

    pub fn image_source(&self) -> &I {
        &self.images
    }

    pub fn snapshot(&self) -> PreviewState {
        self.with_state(|s| s.clone())
    }

    pub fn view(&self) -> PreviewView {
        self.with_state(|s| s.view())
    }

    /// Fire both flows. Each one updates the preview as soon as it resolves.
    pub async fn start(&self) {
        futures::join!(self.load_quotes(), self.load_background());
    }

    /// Fetch the quote list and pick a random starting quote.
    pub async fn load_quotes(&self) {
        self.with_state(|s| s.loading = true);
        match self.quotes.fetch_quotes().await {
            Ok(quotes) => {
                info!("loaded {} quotes", quotes.len());
                let index = random_index(quotes.len());
                self.with_state(|s| {
                    s.quotes = Some(quotes);
                    s.quote_index = index;
                    s.loading = false;
                });
            }
            Err(err) => {
                warn!("quote fetch failed: {}", err);
                self.with_state(|s| s.error = Some(err));
            }
        }
    }

    /// Fetch a photo or roll a color, depending on the current toggle.
    pub async fn load_background(&self) {
        let (use_image, group) = self.with_state(|s| (s.use_image, s.color_group));
        if !use_image {
            let fill = ColorFill {
                rgb: random_color(group),
                group,
            };
            debug!("new {} color {}", group, fill.rgb);
            self.with_state(|s| {
                s.color = Some(fill);
                s.background_error = None;
            });
            return;
        }

        self.with_state(|s| s.pending_backgrounds += 1);
        let result = self.images.fetch_image().await;
        self.with_state(|s| {
            s.pending_backgrounds = s.pending_backgrounds.saturating_sub(1);
            match result {
                Ok(image) => {
                    debug!("new image {}", image.url);
                    s.image = Some(image);
                    s.background_error = None;
                }
                Err(err) => {
                    warn!("image fetch failed, keeping previous background: {}", err);
                    s.background_error = Some(err);
                }
            }
        });
    }

    /// Pick another quote from the list already loaded. No network call.
    pub fn new_quote(&self) {
        self.with_state(|s| {
            s.quote_index = random_index(s.quotes.as_ref().map_or(0, Vec::len));
        });
    }

    pub async fn new_background(&self) {
        self.load_background().await;
    }

    /// Switch between photo and color backgrounds. Does not fetch.
    pub fn set_use_image(&self, use_image: bool) {
        self.with_state(|s| s.use_image = use_image);
    }

    /// Group used by the next generated color.
    pub fn set_color_group(&self, group: ColorGroup) {
        self.with_state(|s| s.color_group = group);
    }

    pub async fn track_download(&self, download_location: &str) -> Result<()> {
        self.images.track_download(download_location).await
    }

    fn with_state<T>(&self, f: impl FnOnce(&mut PreviewState) -> T) -> T {
        let mut guard = self.state.lock().unwrap_or_else(|e| e.into_inner());
        f(&mut guard)
    }
}
