//! The mood board session: preview loader plus the pinned board.

use log::{debug, warn};

use crate::board::BoardStore;
use crate::card::{Card, CardId};
use crate::loader::{ImageSource, PreviewView, QuoteSource, ResourceLoader};
use crate::random::ColorGroup;
use crate::Result;

/// One user session. The preview and the board are independent: pinning a
/// card snapshots the preview, later preview changes never touch the board.
pub struct MoodBoard<Q, I> {
    loader: ResourceLoader<Q, I>,
    board: BoardStore,
}

impl<Q: QuoteSource, I: ImageSource> MoodBoard<Q, I> {
    pub fn new(quotes: Q, images: I) -> Self {
        Self {
            loader: ResourceLoader::new(quotes, images),
            board: BoardStore::new(),
        }
    }

    pub fn loader(&self) -> &ResourceLoader<Q, I> {
        &self.loader
    }

    pub fn board(&self) -> &BoardStore {
        &self.board
    }

    pub fn preview(&self) -> PreviewView {
        self.loader.view()
    }

    pub async fn start(&self) {
        self.loader.start().await;
    }

    pub fn new_quote(&self) {
        self.loader.new_quote();
    }

    pub async fn new_background(&self) {
        self.loader.new_background().await;
    }

    pub fn set_use_image(&self, use_image: bool) {
        self.loader.set_use_image(use_image);
    }

    pub fn set_color_group(&self, group: ColorGroup) {
        self.loader.set_color_group(group);
    }

    /// Whether "add to board" should be enabled right now.
    pub fn can_add(&self) -> bool {
        self.board.can_add()
            && matches!(
                self.preview(),
                PreviewView::Ready {
                    quote: Some(_),
                    background: Some(_)
                }
            )
    }

    /// Pin the current preview. Photo cards also notify the provider that the
    /// photo was used; a failed notification is logged and the card stays.
    pub async fn add_to_board(&mut self) -> Option<CardId> {
        let (quote, background) = match self.preview() {
            PreviewView::Ready {
                quote: Some(quote),
                background: Some(background),
            } => (quote, background),
            other => {
                warn!("nothing to pin, preview is {:?}", other);
                return None;
            }
        };

        let card = match self.board.create_card(quote, background) {
            Ok(card) => card,
            Err(err) => {
                warn!("cannot pin card: {}", err);
                return None;
            }
        };
        let id = card.id();
        let download = card.background().as_image().map(|img| img.download_location.clone());
        if !self.board.add(card) {
            return None;
        }

        if let Some(location) = download {
            if let Err(err) = self.loader.track_download(&location).await {
                warn!("download accounting for card {} failed: {}", id, err);
            }
        }
        Some(id)
    }

    /// Click on a card. Does not reach the click-outside handler.
    pub fn select(&mut self, id: Option<CardId>) {
        self.board.select(id);
    }

    /// Click outside every card.
    pub fn deselect_all(&mut self) {
        self.board.deselect_all();
    }

    pub fn remove(&mut self, id: Option<CardId>) -> Option<Card> {
        self.board.remove(id)
    }

    pub fn delete_selected(&mut self) -> Option<Card> {
        let selected = self.board.selected();
        self.board.remove(selected)
    }

    pub fn clear_board(&mut self) {
        self.board.clear();
    }

    /// Drop target handler: swap the dragged card with the one it landed on.
    pub fn reorder(&mut self, source: usize, target: usize) -> Result<()> {
        debug!("reorder {} <-> {}", source, target);
        self.board.reorder(source, target)
    }

    /// Export the board. Failures are logged and reported as `None`.
    #[cfg(feature = "export")]
    pub fn export(
        &self,
        exporter: &crate::rendering::BoardExporter,
        saver: &dyn crate::rendering::FileSaver,
    ) -> Option<std::path::PathBuf> {
        match exporter.export_board(self.board.state(), saver) {
            Ok(path) => Some(path),
            Err(err) => {
                warn!("board export failed: {}", err);
                None
            }
        }
    }
}
