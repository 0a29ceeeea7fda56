use serde::{Deserialize, Serialize};

use crate::grid::Cell;
use crate::input::Direction;

/// Player preferences kept by the score store. None of them affect the
/// simulation; they only gate audio.
#[derive(Debug, Clone, Eq, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Settings {
    pub sound: bool,
    /// Percent, `0..=100`.
    pub volume: u8,
    pub control_type: String,
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            sound: true,
            volume: 50,
            control_type: "both".to_owned(),
        }
    }
}

impl Settings {
    /// Volume as a `0.0..=1.0` gain.
    #[must_use]
    pub fn gain(&self) -> f32 {
        f32::from(self.volume.min(100)) / 100.0
    }
}

/// Screens and HUD fed by the controller.
pub trait GameUi {
    fn on_game_over(&mut self, score: u32, level: u32);

    /// `origin` is the cell of the food that was eaten.
    fn on_score_change(&mut self, points: u32, origin: Cell);

    fn on_hud_update(&mut self, score: u32, best_score: u32, level: u32);

    fn on_level_up(&mut self, _level: u32) {}
}

/// Sound effects; `volume` is already scaled to `0.0..=1.0`.
pub trait AudioSink {
    fn on_eat(&mut self, volume: f32);

    fn on_direction_changed(&mut self, direction: Direction, volume: f32);

    fn on_death(&mut self, volume: f32);
}

/// Aggregate statistics that outlive a single game.
pub trait ScoreStore {
    fn best_score(&self) -> u32;

    /// Raises the best score when `score` beats it; returns true on a new
    /// record.
    fn update_best_score(&mut self, score: u32) -> bool;

    fn record_game(&mut self, score: u32, level: u32);

    fn settings(&self) -> Settings;
}

/// UI that ignores every event.
#[derive(Debug, Default, Clone, Copy)]
pub struct NullUi;

impl GameUi for NullUi {
    fn on_game_over(&mut self, _score: u32, _level: u32) {}

    fn on_score_change(&mut self, _points: u32, _origin: Cell) {}

    fn on_hud_update(&mut self, _score: u32, _best_score: u32, _level: u32) {}
}

/// Audio sink that stays silent.
#[derive(Debug, Default, Clone, Copy)]
pub struct NullAudio;

impl AudioSink for NullAudio {
    fn on_eat(&mut self, _volume: f32) {}

    fn on_direction_changed(&mut self, _direction: Direction, _volume: f32) {}

    fn on_death(&mut self, _volume: f32) {}
}
