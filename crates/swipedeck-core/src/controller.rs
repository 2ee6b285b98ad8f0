//! Deck controller: wires gestures, animation and deck state together.
//!
//! One swipe cycle runs:
//!
//! 1. `Idle` -> `Dragging` on the first drag sample; the card follows the
//!    finger with no threshold check.
//! 2. On release the gesture interpreter decides. A cancel springs back and
//!    returns to `Idle`; a commit enters `Committing` with a timed exit.
//! 3. When the exit animation resolves, the direction's callback fires with
//!    the committed item, the position resets to the origin and the deck
//!    advances.
//!
//! The host drives time by calling [`DeckController::tick`] once per frame.

use std::fmt;
use std::sync::Arc;
use std::time::Duration;

use kurbo::Vec2;

use crate::animation::SwipeAnimator;
use crate::config::DeckConfig;
use crate::deck::{DeckItem, DeckState};
use crate::error::DeckResult;
use crate::gesture::{GestureEvent, GestureInterpreter, ReleaseDecision, SwipeDirection};
use crate::pointer::{PointerEvent, PointerTracker};
use crate::position::{CardStyle, PositionModel};
use crate::render::{CardRenderer, Frame};

/// Interaction phase of the active card.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum DeckPhase {
    /// No drag in progress. A snap-back spring may still be settling.
    #[default]
    Idle,
    /// The card is following the pointer.
    Dragging,
    /// A committed swipe is animating off screen.
    Committing(SwipeDirection),
}

type ItemCallback<T> = Box<dyn FnMut(&T)>;
type IndexCallback = Box<dyn FnMut(usize)>;

/// Caller-supplied lifecycle hooks. All default to no-ops.
pub struct DeckCallbacks<T> {
    on_swipe_left: ItemCallback<T>,
    on_swipe_right: ItemCallback<T>,
    on_index_change: IndexCallback,
}

impl<T> Default for DeckCallbacks<T> {
    fn default() -> Self {
        Self {
            on_swipe_left: Box::new(|_: &T| {}),
            on_swipe_right: Box::new(|_: &T| {}),
            on_index_change: Box::new(|_: usize| {}),
        }
    }
}

impl<T> fmt::Debug for DeckCallbacks<T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("DeckCallbacks").finish_non_exhaustive()
    }
}

impl<T> DeckCallbacks<T> {
    pub fn new() -> Self {
        Self::default()
    }

    /// Called once per committed left swipe with the swiped item.
    pub fn on_swipe_left(mut self, f: impl FnMut(&T) + 'static) -> Self {
        self.on_swipe_left = Box::new(f);
        self
    }

    /// Called once per committed right swipe with the swiped item.
    pub fn on_swipe_right(mut self, f: impl FnMut(&T) + 'static) -> Self {
        self.on_swipe_right = Box::new(f);
        self
    }

    /// Called whenever the active index changes, including resets from
    /// [`DeckController::replace_items`]. Rendering layers hook their layout
    /// animation here.
    pub fn on_index_change(mut self, f: impl FnMut(usize) + 'static) -> Self {
        self.on_index_change = Box::new(f);
        self
    }

    fn swiped(&mut self, direction: SwipeDirection, item: &T) {
        match direction {
            SwipeDirection::Left => (self.on_swipe_left)(item),
            SwipeDirection::Right => (self.on_swipe_right)(item),
        }
    }
}

/// The committed card, pinned at release time.
///
/// Holding the collection keeps the item alive if the deck is replaced
/// before the exit animation finishes.
#[derive(Debug)]
struct PendingCommit<T> {
    items: Arc<[T]>,
    index: usize,
}

/// Swipeable deck controller for one deck session.
#[derive(Debug)]
pub struct DeckController<T> {
    config: DeckConfig,
    deck: DeckState<T>,
    position: PositionModel,
    animator: SwipeAnimator<SwipeDirection>,
    pointer: PointerTracker,
    phase: DeckPhase,
    pending: Option<PendingCommit<T>>,
    callbacks: DeckCallbacks<T>,
}

impl<T: DeckItem> DeckController<T> {
    /// Create a controller over `items` with no-op callbacks.
    pub fn new(items: impl Into<Arc<[T]>>, config: DeckConfig) -> DeckResult<Self> {
        Self::with_callbacks(items, config, DeckCallbacks::default())
    }

    /// Create a controller over `items` with the given callbacks.
    pub fn with_callbacks(
        items: impl Into<Arc<[T]>>,
        config: DeckConfig,
        callbacks: DeckCallbacks<T>,
    ) -> DeckResult<Self> {
        config.validate()?;
        Ok(Self {
            config,
            deck: DeckState::new(items),
            position: PositionModel::new(),
            animator: SwipeAnimator::new(),
            pointer: PointerTracker::new(),
            phase: DeckPhase::Idle,
            pending: None,
            callbacks,
        })
    }

    pub fn config(&self) -> &DeckConfig {
        &self.config
    }

    pub fn deck(&self) -> &DeckState<T> {
        &self.deck
    }

    pub fn phase(&self) -> DeckPhase {
        self.phase
    }

    pub fn index(&self) -> usize {
        self.deck.index()
    }

    pub fn is_exhausted(&self) -> bool {
        self.deck.is_exhausted()
    }

    pub fn current_item(&self) -> Option<&T> {
        self.deck.current_item()
    }

    /// Current drag offset of the active card.
    pub fn position(&self) -> Vec2 {
        self.position.value()
    }

    /// Rotation of the active card in degrees, derived from its x offset.
    pub fn rotation(&self) -> f64 {
        self.position.rotation(&self.config)
    }

    pub fn card_style(&self) -> CardStyle {
        self.position.card_style(&self.config)
    }

    /// Whether a tick would change anything.
    pub fn is_animating(&self) -> bool {
        self.animator.is_animating()
    }

    /// Snapshot for the rendering layer.
    pub fn frame(&self) -> Frame<'_, T> {
        match self.deck.current_item() {
            Some(active) => Frame::Cards {
                index: self.deck.index(),
                active,
                style: self.card_style(),
                upcoming: self.deck.upcoming(),
            },
            None => Frame::Exhausted,
        }
    }

    /// Render the current frame with `renderer`.
    pub fn render<R>(&self, renderer: &mut R) -> Vec<R::Output>
    where
        R: CardRenderer<T> + ?Sized,
    {
        self.frame().render(renderer)
    }

    /// Feed a raw pointer event.
    pub fn handle_pointer_event(&mut self, event: PointerEvent) -> Option<ReleaseDecision> {
        let gesture = self.pointer.handle_pointer_event(event)?;
        self.handle_gesture(gesture)
    }

    /// Feed a cumulative drag sample.
    ///
    /// Returns the release decision when the event was an accepted release.
    pub fn handle_gesture(&mut self, event: GestureEvent) -> Option<ReleaseDecision> {
        match event {
            GestureEvent::Move { dx, dy } => {
                self.drag_move(dx, dy);
                None
            }
            GestureEvent::Release { dx, dy } => self.drag_release(dx, dy),
        }
    }

    /// Follow the pointer with the active card.
    ///
    /// Preempts a settling snap-back. Ignored while a commit is animating or
    /// the deck is exhausted.
    pub fn drag_move(&mut self, dx: f64, dy: f64) {
        if !self.accepts_drag() {
            log::trace!("Ignoring drag in phase {:?}", self.phase);
            return;
        }
        if self.phase != DeckPhase::Dragging {
            log::debug!("Drag started on card {}", self.deck.index());
            self.animator.cancel();
            self.phase = DeckPhase::Dragging;
        }
        GestureInterpreter::new(&self.config).on_drag_move(&mut self.position, dx, dy);
    }

    /// Finish the drag with its final delta.
    ///
    /// Returns `None` if the release was ignored.
    pub fn drag_release(&mut self, dx: f64, dy: f64) -> Option<ReleaseDecision> {
        if !self.accepts_drag() {
            log::trace!("Ignoring release in phase {:?}", self.phase);
            return None;
        }
        let decision = GestureInterpreter::new(&self.config).on_drag_release(
            &mut self.position,
            &mut self.animator,
            dx,
            dy,
        );
        match decision {
            ReleaseDecision::Commit(direction) => {
                log::debug!(
                    "Committing {:?} swipe on card {} (dx = {})",
                    direction,
                    self.deck.index(),
                    dx
                );
                self.pending = Some(PendingCommit {
                    items: Arc::clone(self.deck.items()),
                    index: self.deck.index(),
                });
                self.phase = DeckPhase::Committing(direction);
            }
            ReleaseDecision::Cancel => {
                log::debug!("Swipe cancelled (dx = {}), snapping back", dx);
                self.phase = DeckPhase::Idle;
            }
        }
        Some(decision)
    }

    fn accepts_drag(&self) -> bool {
        !self.deck.is_exhausted() && !matches!(self.phase, DeckPhase::Committing(_))
    }

    /// Advance animations by `dt`.
    ///
    /// Returns `true` while an animation is still running.
    pub fn tick(&mut self, dt: Duration) -> bool {
        if let Some(direction) = self.animator.tick(&mut self.position, dt) {
            self.complete_swipe(direction);
        }
        self.animator.is_animating()
    }

    fn complete_swipe(&mut self, direction: SwipeDirection) {
        let Some(pending) = self.pending.take() else {
            log::warn!("Swipe completed with no committed card");
            self.phase = DeckPhase::Idle;
            return;
        };

        if let Some(item) = pending.items.get(pending.index) {
            log::debug!("Swiped {:?}: item {:?}", direction, item.id());
            self.callbacks.swiped(direction, item);
        }

        self.position.reset();
        self.phase = DeckPhase::Idle;

        if !self.deck.holds(&pending.items) || self.deck.index() != pending.index {
            log::debug!("Deck replaced during swipe; index stays at {}", self.deck.index());
            return;
        }
        match self.deck.advance() {
            Ok(index) => (self.callbacks.on_index_change)(index),
            Err(e) => log::warn!("Could not advance deck: {}", e),
        }
        if self.deck.is_exhausted() {
            log::debug!("Deck exhausted after {} cards", self.deck.len());
        }
    }

    /// Replace the item collection.
    ///
    /// A distinct collection resets the index to 0. An in-flight drag or
    /// exit animation is left to finish; a pending commit still reports the
    /// item it was released on but does not advance the new deck. A drag
    /// onto an empty collection has no card to land on and is dropped.
    pub fn replace_items(&mut self, items: impl Into<Arc<[T]>>) -> bool {
        let previous = self.deck.index();
        let reset = self.deck.replace_items(items);
        if reset {
            log::debug!(
                "Deck replaced with {} items (index {} -> 0)",
                self.deck.len(),
                previous
            );
            if self.deck.is_exhausted() && self.phase == DeckPhase::Dragging {
                log::debug!("Dropping drag: replacement deck is empty");
                self.pointer.end();
                self.animator.cancel();
                self.position.reset();
                self.phase = DeckPhase::Idle;
            }
            if previous != 0 {
                (self.callbacks.on_index_change)(0);
            }
        }
        reset
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::render::CardPlacement;
    use std::cell::RefCell;
    use std::rc::Rc;

    const FRAME: Duration = Duration::from_millis(16);

    #[derive(Debug, Clone, PartialEq)]
    struct Card {
        id: u32,
        name: &'static str,
    }

    impl DeckItem for Card {
        type Id = u32;

        fn id(&self) -> u32 {
            self.id
        }
    }

    fn cards() -> Vec<Card> {
        vec![
            Card { id: 1, name: "A" },
            Card { id: 2, name: "B" },
            Card { id: 3, name: "C" },
        ]
    }

    type Log = Rc<RefCell<Vec<String>>>;

    fn recording_controller(items: Vec<Card>) -> (DeckController<Card>, Log) {
        let log: Log = Rc::new(RefCell::new(Vec::new()));
        let left = Rc::clone(&log);
        let right = Rc::clone(&log);
        let index = Rc::clone(&log);
        let callbacks = DeckCallbacks::new()
            .on_swipe_left(move |card: &Card| left.borrow_mut().push(format!("left {}", card.name)))
            .on_swipe_right(move |card: &Card| {
                right.borrow_mut().push(format!("right {}", card.name))
            })
            .on_index_change(move |i| index.borrow_mut().push(format!("index {i}")));
        let controller =
            DeckController::with_callbacks(items, DeckConfig::with_viewport_width(400.0), callbacks)
                .unwrap();
        (controller, log)
    }

    fn settle(controller: &mut DeckController<Card>) {
        for _ in 0..1000 {
            if !controller.tick(FRAME) {
                return;
            }
        }
        panic!("animation did not settle");
    }

    fn swipe(controller: &mut DeckController<Card>, dx: f64) -> Option<ReleaseDecision> {
        controller.drag_move(dx / 2.0, 0.0);
        controller.drag_move(dx, 0.0);
        let decision = controller.drag_release(dx, 0.0);
        settle(controller);
        decision
    }

    #[test]
    fn test_rejects_invalid_config() {
        let result = DeckController::new(cards(), DeckConfig::with_viewport_width(0.0));
        assert!(result.is_err());
    }

    #[test]
    fn test_swipe_scenario() {
        let (mut deck, log) = recording_controller(cards());

        assert_eq!(
            swipe(&mut deck, 150.0),
            Some(ReleaseDecision::Commit(SwipeDirection::Right))
        );
        assert_eq!(*log.borrow(), vec!["right A", "index 1"]);
        assert_eq!(deck.index(), 1);
        assert_eq!(deck.position(), Vec2::ZERO);

        assert_eq!(swipe(&mut deck, -50.0), Some(ReleaseDecision::Cancel));
        assert_eq!(log.borrow().len(), 2);
        assert_eq!(deck.index(), 1);
        assert_eq!(deck.position(), Vec2::ZERO);

        swipe(&mut deck, 150.0);
        swipe(&mut deck, 150.0);
        assert_eq!(
            *log.borrow(),
            vec!["right A", "index 1", "right B", "index 2", "right C", "index 3"]
        );
        assert_eq!(deck.index(), 3);
        assert!(deck.is_exhausted());
        assert!(deck.frame().is_exhausted());
    }

    #[test]
    fn test_left_swipe_fires_left_callback() {
        let (mut deck, log) = recording_controller(cards());
        swipe(&mut deck, -101.0);
        assert_eq!(*log.borrow(), vec!["left A", "index 1"]);
        assert_eq!(deck.current_item().map(|c| c.id), Some(2));
    }

    #[test]
    fn test_default_callbacks_are_no_ops() {
        let mut deck = DeckController::new(cards(), DeckConfig::with_viewport_width(400.0)).unwrap();
        swipe(&mut deck, 200.0);
        swipe(&mut deck, -200.0);
        assert_eq!(deck.index(), 2);
    }

    #[test]
    fn test_n_commits_leave_position_at_rest() {
        let (mut deck, _log) = recording_controller(cards());
        for n in 1..=2 {
            swipe(&mut deck, if n % 2 == 0 { -300.0 } else { 300.0 });
            assert_eq!(deck.index(), n);
            assert_eq!(deck.position(), Vec2::ZERO);
            assert!(deck.rotation().abs() < f64::EPSILON);
        }
    }

    #[test]
    fn test_threshold_release_springs_back() {
        let (mut deck, log) = recording_controller(cards());
        assert_eq!(swipe(&mut deck, 100.0), Some(ReleaseDecision::Cancel));
        assert!(log.borrow().is_empty());
        assert_eq!(deck.index(), 0);
        assert_eq!(deck.position(), Vec2::ZERO);
    }

    #[test]
    fn test_drag_is_tracked_live_with_rotation() {
        let (mut deck, _log) = recording_controller(cards());
        deck.drag_move(300.0, -20.0);
        assert_eq!(deck.phase(), DeckPhase::Dragging);
        assert_eq!(deck.position(), Vec2::new(300.0, -20.0));
        assert!((deck.rotation() - 60.0).abs() < 1e-10);
        assert!(!deck.is_animating());
    }

    #[test]
    fn test_callback_fires_only_on_completion() {
        let (mut deck, log) = recording_controller(cards());
        deck.drag_move(150.0, 0.0);
        deck.drag_release(150.0, 0.0);
        assert_eq!(deck.phase(), DeckPhase::Committing(SwipeDirection::Right));

        deck.tick(FRAME);
        assert!(log.borrow().is_empty());
        assert_eq!(deck.index(), 0);
        assert!(deck.position().x > 150.0);

        settle(&mut deck);
        assert_eq!(*log.borrow(), vec!["right A", "index 1"]);
        assert_eq!(deck.phase(), DeckPhase::Idle);
    }

    #[test]
    fn test_drag_during_commit_is_ignored() {
        let (mut deck, log) = recording_controller(cards());
        deck.drag_release(150.0, 0.0);
        deck.tick(FRAME);

        deck.drag_move(-20.0, 0.0);
        assert_eq!(deck.drag_release(-20.0, 0.0), None);
        assert_eq!(deck.phase(), DeckPhase::Committing(SwipeDirection::Right));

        settle(&mut deck);
        assert_eq!(*log.borrow(), vec!["right A", "index 1"]);
    }

    #[test]
    fn test_drag_preempts_snap_back() {
        let (mut deck, _log) = recording_controller(cards());
        deck.drag_move(80.0, 0.0);
        deck.drag_release(80.0, 0.0);
        deck.tick(FRAME);
        assert!(deck.is_animating());

        deck.drag_move(10.0, 5.0);
        assert!(!deck.is_animating());
        assert_eq!(deck.position(), Vec2::new(10.0, 5.0));
    }

    #[test]
    fn test_exhausted_deck_ignores_drags() {
        let (mut deck, log) = recording_controller(vec![Card { id: 9, name: "Z" }]);
        swipe(&mut deck, 150.0);
        assert!(deck.is_exhausted());

        deck.drag_move(150.0, 0.0);
        assert_eq!(deck.drag_release(150.0, 0.0), None);
        assert_eq!(deck.position(), Vec2::ZERO);
        assert!(!deck.tick(FRAME));
        assert_eq!(*log.borrow(), vec!["right Z", "index 1"]);
    }

    #[test]
    fn test_replace_items_resets_index() {
        let (mut deck, log) = recording_controller(cards());
        swipe(&mut deck, 150.0);
        swipe(&mut deck, 150.0);
        swipe(&mut deck, 150.0);
        assert!(deck.is_exhausted());

        assert!(deck.replace_items(cards()));
        assert_eq!(deck.index(), 0);
        assert!(!deck.is_exhausted());
        assert_eq!(log.borrow().last().map(String::as_str), Some("index 0"));

        swipe(&mut deck, -150.0);
        assert_eq!(log.borrow().last().map(String::as_str), Some("index 1"));
    }

    #[test]
    fn test_replace_during_commit_lets_swipe_finish() {
        let (mut deck, log) = recording_controller(cards());
        swipe(&mut deck, 150.0);
        deck.drag_release(-150.0, 0.0);
        deck.tick(FRAME);

        let replacement = vec![Card { id: 7, name: "X" }, Card { id: 8, name: "Y" }];
        deck.replace_items(replacement);
        assert_eq!(deck.index(), 0);

        settle(&mut deck);
        let log = log.borrow();
        assert_eq!(&log[2..], &["index 0", "left B"]);
        assert_eq!(deck.index(), 0);
        assert_eq!(deck.current_item().map(|c| c.name), Some("X"));
        assert_eq!(deck.position(), Vec2::ZERO);
    }

    #[test]
    fn test_replace_with_empty_deck_drops_drag() {
        let (mut deck, log) = recording_controller(cards());
        deck.handle_pointer_event(PointerEvent::Down {
            position: kurbo::Point::new(100.0, 100.0),
        });
        deck.handle_pointer_event(PointerEvent::Move {
            position: kurbo::Point::new(180.0, 130.0),
        });
        assert_eq!(deck.phase(), DeckPhase::Dragging);

        deck.replace_items(Vec::<Card>::new());
        assert_eq!(deck.phase(), DeckPhase::Idle);
        assert_eq!(deck.position(), Vec2::ZERO);
        assert_eq!(
            deck.handle_pointer_event(PointerEvent::Up {
                position: kurbo::Point::new(180.0, 130.0),
            }),
            None
        );

        deck.replace_items(vec![Card { id: 5, name: "E" }, Card { id: 6, name: "F" }]);
        for _ in 0..200 {
            deck.tick(FRAME);
        }
        assert_eq!(deck.phase(), DeckPhase::Idle);
        assert_eq!(deck.position(), Vec2::ZERO);
        assert!(deck.rotation().abs() < f64::EPSILON);
        assert_eq!(deck.current_item().map(|c| c.id), Some(5));
        assert!(log.borrow().is_empty());
    }

    #[test]
    fn test_drag_spanning_replacement_lands_on_new_first_card() {
        let (mut deck, log) = recording_controller(cards());
        swipe(&mut deck, 150.0);
        deck.drag_move(80.0, 30.0);

        deck.replace_items(vec![Card { id: 5, name: "E" }, Card { id: 6, name: "F" }]);
        assert_eq!(deck.phase(), DeckPhase::Dragging);
        deck.drag_move(160.0, 30.0);
        assert_eq!(
            deck.drag_release(160.0, 30.0),
            Some(ReleaseDecision::Commit(SwipeDirection::Right))
        );
        settle(&mut deck);

        assert_eq!(
            *log.borrow(),
            vec!["right A", "index 1", "index 0", "right E", "index 1"]
        );
        assert_eq!(deck.current_item().map(|c| c.id), Some(6));
        assert_eq!(deck.position(), Vec2::ZERO);
    }

    #[test]
    fn test_restoring_pinned_deck_mid_swipe_does_not_skip_a_card() {
        let (mut deck, log) = recording_controller(cards());
        swipe(&mut deck, 150.0);
        let original = Arc::clone(deck.deck().items());

        deck.drag_release(150.0, 0.0);
        deck.tick(FRAME);
        deck.replace_items(vec![Card { id: 7, name: "X" }]);
        deck.replace_items(Arc::clone(&original));
        assert_eq!(deck.index(), 0);

        settle(&mut deck);
        assert_eq!(log.borrow().last().map(String::as_str), Some("right B"));
        assert_eq!(deck.index(), 0);
        assert_eq!(deck.current_item().map(|c| c.name), Some("A"));
    }

    #[test]
    fn test_pointer_events_drive_a_swipe() {
        let (mut deck, log) = recording_controller(cards());
        let start = kurbo::Point::new(200.0, 300.0);
        deck.handle_pointer_event(PointerEvent::Down { position: start });
        deck.handle_pointer_event(PointerEvent::Move {
            position: kurbo::Point::new(260.0, 310.0),
        });
        assert_eq!(deck.position(), Vec2::new(60.0, 10.0));

        let decision = deck.handle_pointer_event(PointerEvent::Up {
            position: kurbo::Point::new(80.0, 300.0),
        });
        assert_eq!(decision, Some(ReleaseDecision::Commit(SwipeDirection::Left)));
        settle(&mut deck);
        assert_eq!(*log.borrow(), vec!["left A", "index 1"]);
    }

    #[test]
    fn test_render_reports_active_and_upcoming() {
        struct Names;
        impl CardRenderer<Card> for Names {
            type Output = (u32, bool);
            fn render_card(&mut self, item: &Card, placement: CardPlacement) -> (u32, bool) {
                (item.id, placement.is_active())
            }
            fn render_no_more_cards(&mut self) -> (u32, bool) {
                (0, false)
            }
        }

        let (mut deck, _log) = recording_controller(cards());
        swipe(&mut deck, 150.0);
        assert_eq!(deck.render(&mut Names), vec![(3, false), (2, true)]);

        swipe(&mut deck, 150.0);
        swipe(&mut deck, 150.0);
        assert_eq!(deck.render(&mut Names), vec![(0, false)]);
    }
}
