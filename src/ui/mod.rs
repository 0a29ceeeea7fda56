pub mod hud;
pub mod menu;

use std::time::{Duration, Instant};

use crate::collaborators::GameUi;
use crate::grid::Cell;

/// How long a "+N" popup stays on the board.
pub const SCORE_FLASH_DURATION: Duration = Duration::from_millis(800);

/// Floating "+N" popup shown where food was eaten.
#[derive(Debug, Clone, Copy, Eq, PartialEq)]
pub struct ScoreFlash {
    pub points: u32,
    pub origin: Cell,
    pub at: Instant,
}

/// Latest HUD values and popups received from the controller.
///
/// Events arrive without a timestamp; [`TerminalUi::sync`] stamps them with
/// the host clock so flashes follow whatever clock drives the game.
#[derive(Debug, Clone, Default)]
pub struct TerminalUi {
    pub score: u32,
    pub best_score: u32,
    pub level: u32,
    pub score_changed_at: Option<Instant>,
    pub level_changed_at: Option<Instant>,
    pub final_result: Option<(u32, u32)>,
    flashes: Vec<ScoreFlash>,
    unstamped: Vec<(u32, Cell)>,
    score_changed: bool,
    level_changed: bool,
}

impl TerminalUi {
    #[must_use]
    pub fn new() -> Self {
        Self {
            level: 1,
            ..Self::default()
        }
    }

    /// Popups still visible at `now`.
    pub fn active_flashes(&self, now: Instant) -> impl Iterator<Item = &ScoreFlash> {
        self.flashes
            .iter()
            .filter(move |flash| now.saturating_duration_since(flash.at) < SCORE_FLASH_DURATION)
    }

    /// Stamps events received since the last call with `now` and drops
    /// popups that have expired.
    pub fn sync(&mut self, now: Instant) {
        if std::mem::take(&mut self.score_changed) {
            self.score_changed_at = Some(now);
        }
        if std::mem::take(&mut self.level_changed) {
            self.level_changed_at = Some(now);
        }

        self.flashes
            .extend(self.unstamped.drain(..).map(|(points, origin)| ScoreFlash {
                points,
                origin,
                at: now,
            }));
        self.flashes
            .retain(|flash| now.saturating_duration_since(flash.at) < SCORE_FLASH_DURATION);
    }
}

impl GameUi for TerminalUi {
    fn on_game_over(&mut self, score: u32, level: u32) {
        self.final_result = Some((score, level));
    }

    fn on_score_change(&mut self, points: u32, origin: Cell) {
        self.score_changed = true;
        self.unstamped.push((points, origin));
    }

    fn on_hud_update(&mut self, score: u32, best_score: u32, level: u32) {
        self.score = score;
        self.best_score = best_score;
        self.level = level;
    }

    fn on_level_up(&mut self, _level: u32) {
        self.level_changed = true;
    }
}
