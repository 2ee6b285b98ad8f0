//! Deck state: the item collection and the index of the active card.

use std::fmt::Debug;
use std::hash::Hash;
use std::sync::Arc;

use crate::error::{DeckError, DeckResult};

/// An item that can be shown on a card.
///
/// The id is used by rendering layers to key cards across frames.
pub trait DeckItem {
    type Id: Clone + Eq + Hash + Debug;

    fn id(&self) -> Self::Id;
}

/// The item collection and the position of the active card within it.
///
/// `index` always lies in `[0, len]`; `index == len` means exhausted.
#[derive(Debug)]
pub struct DeckState<T> {
    items: Arc<[T]>,
    index: usize,
}

impl<T> Clone for DeckState<T> {
    fn clone(&self) -> Self {
        Self {
            items: Arc::clone(&self.items),
            index: self.index,
        }
    }
}

impl<T> DeckState<T> {
    /// Create a deck positioned at its first item.
    pub fn new(items: impl Into<Arc<[T]>>) -> Self {
        Self {
            items: items.into(),
            index: 0,
        }
    }

    pub fn items(&self) -> &Arc<[T]> {
        &self.items
    }

    pub fn index(&self) -> usize {
        self.index
    }

    pub fn len(&self) -> usize {
        self.items.len()
    }

    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }

    /// Check if every item has been swiped.
    pub fn is_exhausted(&self) -> bool {
        self.index >= self.items.len()
    }

    /// The active item, or `None` once exhausted.
    pub fn current_item(&self) -> Option<&T> {
        self.items.get(self.index)
    }

    /// Items after the active one, nearest first.
    pub fn upcoming(&self) -> &[T] {
        self.items.get(self.index + 1..).unwrap_or(&[])
    }

    /// Move to the next item.
    ///
    /// Fails without changing state once exhausted.
    pub fn advance(&mut self) -> DeckResult<usize> {
        if self.is_exhausted() {
            return Err(DeckError::Exhausted {
                index: self.index,
                len: self.items.len(),
            });
        }
        self.index += 1;
        Ok(self.index)
    }

    /// Check whether `items` is the collection this deck holds.
    ///
    /// Compares allocations, not contents.
    pub fn holds(&self, items: &Arc<[T]>) -> bool {
        Arc::ptr_eq(&self.items, items)
    }

    /// Replace the collection.
    ///
    /// Any distinct allocation resets the index to 0, even one with equal
    /// contents. Returns `true` if the index was reset.
    pub fn replace_items(&mut self, items: impl Into<Arc<[T]>>) -> bool {
        let items = items.into();
        if self.holds(&items) {
            return false;
        }
        self.items = items;
        self.index = 0;
        true
    }
}
