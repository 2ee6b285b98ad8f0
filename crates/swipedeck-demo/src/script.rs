//! Session inputs: card decks, gesture scripts and config files.

use std::fs;
use std::path::Path;

use serde::de::DeserializeOwned;
use serde::{Deserialize, Serialize};
use swipedeck_core::{DeckConfig, DeckItem, PointerEvent};

use crate::error::{DemoError, DemoResult};

/// A card in a demo deck.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DemoCard {
    pub id: String,
    pub title: String,
    #[serde(default)]
    pub subtitle: Option<String>,
}

impl DeckItem for DemoCard {
    type Id = String;

    fn id(&self) -> String {
        self.id.clone()
    }
}

/// One scripted input.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Step {
    /// Drag sample, cumulative from the drag start.
    Drag { dx: f64, dy: f64 },
    /// Lift the finger with the given final delta.
    Release { dx: f64, dy: f64 },
    /// Raw pointer event in screen coordinates.
    Pointer(PointerEvent),
    /// Let frames run.
    Wait { ms: u64 },
    /// Swap in a new deck.
    Replace { cards: Vec<DemoCard> },
}

/// An ordered list of inputs to replay.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Script {
    pub steps: Vec<Step>,
}

fn read_json<T: DeserializeOwned>(path: &Path) -> DemoResult<T> {
    let text = fs::read_to_string(path)
        .map_err(|e| DemoError::Io(format!("Failed to read {}: {}", path.display(), e)))?;
    serde_json::from_str(&text).map_err(|e| DemoError::Parse {
        path: path.display().to_string(),
        message: e.to_string(),
    })
}

pub fn load_cards(path: &Path) -> DemoResult<Vec<DemoCard>> {
    read_json(path)
}

pub fn load_script(path: &Path) -> DemoResult<Script> {
    read_json(path)
}

pub fn load_config(path: &Path) -> DemoResult<DeckConfig> {
    let config: DeckConfig = read_json(path)?;
    config.validate()?;
    Ok(config)
}
