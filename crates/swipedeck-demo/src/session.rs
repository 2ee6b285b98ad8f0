//! Replays a script against a deck controller at a fixed frame rate.

use std::cell::RefCell;
use std::rc::Rc;
use std::time::Duration;

use swipedeck_core::{
    CardPlacement, CardRenderer, DeckCallbacks, DeckConfig, DeckController, GestureEvent,
};

use crate::error::DemoResult;
use crate::script::{DemoCard, Script, Step};

/// Simulated frame interval (60 Hz).
pub const FRAME: Duration = Duration::from_micros(16_667);

/// Upper bound on frames spent settling after the script ends.
const MAX_SETTLE_FRAMES: usize = 600;

/// Renders cards as single text lines.
#[derive(Debug, Default)]
pub struct TextRenderer;

impl CardRenderer<DemoCard> for TextRenderer {
    type Output = String;

    fn render_card(&mut self, item: &DemoCard, placement: CardPlacement) -> String {
        let title = match &item.subtitle {
            Some(subtitle) => format!("{} ({})", item.title, subtitle),
            None => item.title.clone(),
        };
        match placement {
            CardPlacement::Active { style } => format!(
                "> [{}] {} offset=({:.1}, {:.1}) rotate={:.1}deg",
                item.id, title, style.offset.x, style.offset.y, style.rotation_degrees
            ),
            CardPlacement::Upcoming { depth } => {
                format!("{}  [{}] {}", "  ".repeat(depth), item.id, title)
            }
        }
    }

    fn render_no_more_cards(&mut self) -> String {
        "No more cards".to_string()
    }
}

/// A controller plus the transcript of everything its callbacks reported.
pub struct Session {
    controller: DeckController<DemoCard>,
    transcript: Rc<RefCell<Vec<String>>>,
}

impl Session {
    pub fn new(cards: Vec<DemoCard>, config: DeckConfig) -> DemoResult<Self> {
        let transcript = Rc::new(RefCell::new(Vec::new()));
        let left = Rc::clone(&transcript);
        let right = Rc::clone(&transcript);
        let index = Rc::clone(&transcript);
        let callbacks = DeckCallbacks::new()
            .on_swipe_left(move |card: &DemoCard| {
                left.borrow_mut().push(format!("swiped left: {}", card.title));
            })
            .on_swipe_right(move |card: &DemoCard| {
                right.borrow_mut().push(format!("swiped right: {}", card.title));
            })
            .on_index_change(move |i| {
                index.borrow_mut().push(format!("now showing card {i}"));
            });
        let controller = DeckController::with_callbacks(cards, config, callbacks)?;
        Ok(Self {
            controller,
            transcript,
        })
    }

    pub fn controller(&self) -> &DeckController<DemoCard> {
        &self.controller
    }

    /// Apply one scripted step.
    pub fn step(&mut self, step: &Step) {
        match step {
            Step::Drag { dx, dy } => {
                self.controller
                    .handle_gesture(GestureEvent::Move { dx: *dx, dy: *dy });
            }
            Step::Release { dx, dy } => {
                if let Some(decision) = self
                    .controller
                    .handle_gesture(GestureEvent::Release { dx: *dx, dy: *dy })
                {
                    log::info!("Release at dx = {}: {:?}", dx, decision);
                }
            }
            Step::Pointer(event) => {
                if let Some(decision) = self.controller.handle_pointer_event(*event) {
                    log::info!("Pointer release: {:?}", decision);
                }
            }
            Step::Wait { ms } => {
                let frames = (Duration::from_millis(*ms).as_secs_f64() / FRAME.as_secs_f64())
                    .ceil() as usize;
                for _ in 0..frames {
                    self.controller.tick(FRAME);
                }
            }
            Step::Replace { cards } => {
                self.controller.replace_items(cards.clone());
            }
        }
    }

    /// Tick until animations stop, up to a frame budget.
    pub fn settle(&mut self) {
        for _ in 0..MAX_SETTLE_FRAMES {
            if !self.controller.tick(FRAME) {
                return;
            }
        }
        log::warn!("Animation still running after {} frames", MAX_SETTLE_FRAMES);
    }

    /// Replay every step, then let animations finish.
    pub fn run(&mut self, script: &Script) {
        for step in &script.steps {
            self.step(step);
        }
        self.settle();
    }

    /// Callback activity so far.
    pub fn transcript(&self) -> Vec<String> {
        self.transcript.borrow().clone()
    }

    /// Render the current frame as text lines.
    pub fn render(&self) -> Vec<String> {
        self.controller.render(&mut TextRenderer)
    }
}
