//! Render-facing view of a deck frame.
//!
//! The core does not lay cards out. It tells a [`CardRenderer`] which cards
//! are visible, which one is active and how the active one is displaced.

use crate::position::CardStyle;

/// Where a visible card sits in the deck.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum CardPlacement {
    /// The card under the user's finger, displaced by `style`.
    Active { style: CardStyle },
    /// A card waiting behind the active one; `depth` 1 is directly beneath.
    Upcoming { depth: usize },
}

impl CardPlacement {
    pub fn is_active(&self) -> bool {
        matches!(self, Self::Active { .. })
    }
}

/// Snapshot of what should be painted this frame.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum Frame<'a, T> {
    Cards {
        index: usize,
        active: &'a T,
        style: CardStyle,
        upcoming: &'a [T],
    },
    Exhausted,
}

impl<'a, T> Frame<'a, T> {
    pub fn is_exhausted(&self) -> bool {
        matches!(self, Self::Exhausted)
    }

    /// Render the frame, producing one output per visible card.
    ///
    /// Cards are emitted back to front: the deepest upcoming card first and
    /// the active card last. An exhausted frame renders only the
    /// no-more-cards content.
    pub fn render<R>(&self, renderer: &mut R) -> Vec<R::Output>
    where
        R: CardRenderer<T> + ?Sized,
    {
        match *self {
            Self::Exhausted => vec![renderer.render_no_more_cards()],
            Self::Cards {
                active,
                style,
                upcoming,
                ..
            } => {
                let mut out = Vec::with_capacity(upcoming.len() + 1);
                for (i, item) in upcoming.iter().enumerate().rev() {
                    out.push(renderer.render_card(item, CardPlacement::Upcoming { depth: i + 1 }));
                }
                out.push(renderer.render_card(active, CardPlacement::Active { style }));
                out
            }
        }
    }
}

/// Rendering collaborator supplied by the host.
pub trait CardRenderer<T> {
    type Output;

    /// Produce display content for a visible card.
    fn render_card(&mut self, item: &T, placement: CardPlacement) -> Self::Output;

    /// Produce the content shown once every card has been swiped.
    fn render_no_more_cards(&mut self) -> Self::Output;
}
