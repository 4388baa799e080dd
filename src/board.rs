//! Board state: the ordered, bounded set of pinned cards and the selection.
//!
//! All operations are synchronous and never panic. Malformed input (a missing
//! or unknown id) is logged and ignored. Updates that drop or move cards build
//! a fresh sequence and swap it in, so a previously observed `BoardState`
//! clone is never changed behind the caller's back.

use log::{debug, warn};

use crate::card::{Background, Card, CardFactory, CardId, Quote};
use crate::{Error, Result, MAX_SIZE};

/// Snapshot of the board: cards in grid order and the selected card, if any.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct BoardState {
    pub cards: Vec<Card>,
    pub selected: Option<CardId>,
}

impl BoardState {
    pub fn contains(&self, id: CardId) -> bool {
        self.cards.iter().any(|c| c.id() == id)
    }
}

/// Owns the board and the id counter that feeds it.
#[derive(Debug, Default)]
pub struct BoardStore {
    state: BoardState,
    factory: CardFactory,
}

impl BoardStore {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn state(&self) -> &BoardState {
        &self.state
    }

    pub fn cards(&self) -> &[Card] {
        &self.state.cards
    }

    pub fn selected(&self) -> Option<CardId> {
        self.state.selected
    }

    pub fn len(&self) -> usize {
        self.state.cards.len()
    }

    pub fn is_empty(&self) -> bool {
        self.state.cards.is_empty()
    }

    /// Whether the "add to board" control should be enabled.
    pub fn can_add(&self) -> bool {
        self.len() < MAX_SIZE
    }

    /// Build a card with the next id, or `CapacityExceeded` if the board is full.
    pub fn create_card(&mut self, quote: Quote, background: Background) -> Result<Card> {
        self.factory.create(self.len(), quote, background)
    }

    /// Append a card. Returns `false` (and leaves the board alone) when the
    /// board is full or the card is already on it.
    pub fn add(&mut self, card: Card) -> bool {
        if !self.can_add() {
            warn!("board is full ({} cards), ignoring card {}", MAX_SIZE, card.id());
            return false;
        }
        if self.state.contains(card.id()) {
            warn!("card {} is already on the board", card.id());
            return false;
        }
        debug!("adding card {} at position {}", card.id(), self.len());
        self.state.cards.push(card);
        true
    }

    /// Remove the card with `id`, clearing the selection if it pointed at it.
    pub fn remove(&mut self, id: Option<CardId>) -> Option<Card> {
        let Some(id) = id else {
            warn!("remove called without a card id");
            return None;
        };

        let mut removed = None;
        let kept: Vec<Card> = self
            .state
            .cards
            .iter()
            .filter(|c| {
                if removed.is_none() && c.id() == id {
                    removed = Some((*c).clone());
                    false
                } else {
                    true
                }
            })
            .cloned()
            .collect();

        if removed.is_none() {
            warn!("remove: no card {} on the board", id);
            return None;
        }

        self.state.cards = kept;
        if self.state.selected == Some(id) {
            self.state.selected = None;
        }
        debug!("removed card {}", id);
        removed
    }

    /// Drop every card. The selection is left as is; call
    /// [`deselect_all`](Self::deselect_all) as well to reset it.
    pub fn clear(&mut self) {
        debug!("clearing {} cards", self.len());
        self.state.cards = Vec::new();
    }

    pub fn select(&mut self, id: Option<CardId>) {
        match id {
            None => warn!("select called without a card id"),
            Some(id) if !self.state.contains(id) => warn!("select: no card {} on the board", id),
            Some(id) => self.state.selected = Some(id),
        }
    }

    pub fn deselect_all(&mut self) {
        self.state.selected = None;
    }

    /// Swap the cards at two grid positions.
    pub fn reorder(&mut self, source: usize, target: usize) -> Result<()> {
        let swapped = swap_positions(&self.state.cards, source, target).ok_or_else(|| {
            Error::InvalidSelection(format!(
                "reorder {} -> {} on a board of {}",
                source,
                target,
                self.len()
            ))
        })?;
        self.state.cards = swapped;
        Ok(())
    }
}

/// A copy of `items` with positions `i` and `j` exchanged, or `None` if
/// either index is out of range.
pub fn swap_positions<T: Clone>(items: &[T], i: usize, j: usize) -> Option<Vec<T>> {
    if i >= items.len() || j >= items.len() {
        return None;
    }
    let mut out = items.to_vec();
    out.swap(i, j);
    Some(out)
}
