use std::time::{Duration, Instant};

use crate::config::{
    COMBO_BONUS_STEP, COMBO_WINDOW, DEFAULT_TICK_INTERVAL_MS, MIN_TICK_INTERVAL_MS,
    POINTS_PER_LEVEL, TICK_INTERVAL_STEP_MS,
};

/// Tracks consecutive eats that land inside the combo window.
#[derive(Debug, Clone, Copy, Default, Eq, PartialEq)]
pub struct ComboTracker {
    combo_count: u32,
    last_score_at: Option<Instant>,
}

impl ComboTracker {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Registers an eat at `now` and returns the points it is worth.
    ///
    /// An eat within [`COMBO_WINDOW`] of the previous one extends the combo
    /// and earns one bonus point per [`COMBO_BONUS_STEP`] combo eats; any
    /// other eat resets the combo and earns a single point.
    pub fn award(&mut self, now: Instant) -> u32 {
        let in_window = self
            .last_score_at
            .is_some_and(|last| now.saturating_duration_since(last) < COMBO_WINDOW);
        self.last_score_at = Some(now);

        if in_window {
            self.combo_count += 1;
            1 + self.combo_count / COMBO_BONUS_STEP
        } else {
            self.combo_count = 0;
            1
        }
    }

    #[must_use]
    pub fn combo_count(&self) -> u32 {
        self.combo_count
    }
}

/// Level reached at `score`; starts at 1.
#[must_use]
pub fn level_for_score(score: u32) -> u32 {
    score / POINTS_PER_LEVEL + 1
}

/// Tick interval for `level`, shrinking per level down to the floor.
#[must_use]
pub fn tick_interval_for_level(level: u32) -> Duration {
    let penalty_ms = u64::from(level.saturating_sub(1)) * TICK_INTERVAL_STEP_MS;
    let clamped_ms = DEFAULT_TICK_INTERVAL_MS
        .saturating_sub(penalty_ms)
        .max(MIN_TICK_INTERVAL_MS);
    Duration::from_millis(clamped_ms)
}
