use std::time::Instant;

use log::info;

use crate::collaborators::{AudioSink, GameUi, ScoreStore};
use crate::config::GameConfig;
use crate::input::{Direction, GameInput};
use crate::interpolate::{interpolate, RenderFrame};
use crate::scheduler::TickScheduler;
use crate::scoring::tick_interval_for_level;
use crate::simulation::{Simulation, TickOutcome};

/// Current high-level gameplay state.
#[derive(Debug, Clone, Copy, Eq, PartialEq)]
pub enum GameStatus {
    /// Created but not started.
    Ready,
    Playing,
    Paused,
    GameOver,
}

/// Owns one simulation and its tick timer, and reports to the UI, audio and
/// storage collaborators.
///
/// All timestamps come from the host so the controller can be driven by a
/// real clock or a scripted one.
#[derive(Debug)]
pub struct GameController<U, A, S> {
    simulation: Simulation,
    scheduler: TickScheduler,
    status: GameStatus,
    new_record: bool,
    ui: U,
    audio: A,
    store: S,
}

impl<U, A, S> GameController<U, A, S>
where
    U: GameUi,
    A: AudioSink,
    S: ScoreStore,
{
    #[must_use]
    pub fn new(config: GameConfig, ui: U, audio: A, store: S) -> Self {
        Self::with_simulation(Simulation::new(config), ui, audio, store)
    }

    /// Wraps an existing simulation, e.g. one built from a snapshot.
    #[must_use]
    pub fn with_simulation(simulation: Simulation, ui: U, audio: A, store: S) -> Self {
        let scheduler = TickScheduler::new(simulation.current().tick_interval);
        let mut controller = Self {
            simulation,
            scheduler,
            status: GameStatus::Ready,
            new_record: false,
            ui,
            audio,
            store,
        };
        controller.push_hud();
        controller
    }

    /// Starts ticking a game that has not started yet.
    pub fn start_game(&mut self, now: Instant) {
        if self.status != GameStatus::Ready {
            return;
        }

        info!("game started");
        self.status = GameStatus::Playing;
        self.scheduler.start(now);
        self.push_hud();
    }

    /// Stops ticking and freezes the frame in place.
    pub fn pause_game(&mut self, now: Instant) {
        if self.status != GameStatus::Playing {
            return;
        }

        info!("game paused");
        self.status = GameStatus::Paused;
        self.scheduler.stop(now);
    }

    /// Continues a paused game without counting the pause toward the
    /// current tick.
    pub fn resume_game(&mut self, now: Instant) {
        if self.status != GameStatus::Paused {
            return;
        }

        info!("game resumed");
        self.status = GameStatus::Playing;
        self.scheduler.resume(now);
    }

    pub fn toggle_pause(&mut self, now: Instant) {
        match self.status {
            GameStatus::Playing => self.pause_game(now),
            GameStatus::Paused => self.resume_game(now),
            GameStatus::Ready | GameStatus::GameOver => {}
        }
    }

    /// Throws the current game away and starts a fresh one at `now`.
    pub fn restart_game(&mut self, now: Instant) {
        info!("game restarted");
        self.simulation.restart();
        self.scheduler = TickScheduler::new(tick_interval_for_level(1));
        self.scheduler.start(now);
        self.status = GameStatus::Playing;
        self.new_record = false;
        self.push_hud();
    }

    /// Forwards a direction intent. Returns true when it was accepted.
    pub fn change_direction(&mut self, direction: Direction) -> bool {
        if self.status != GameStatus::Playing || !self.simulation.change_direction(direction) {
            return false;
        }

        if let Some(volume) = self.volume() {
            self.audio.on_direction_changed(direction, volume);
        }
        true
    }

    /// Applies one player input for the current status. `Quit` is left to
    /// the host.
    pub fn apply_input(&mut self, input: GameInput, now: Instant) {
        match (input, self.status) {
            (GameInput::Confirm, GameStatus::Ready) => self.start_game(now),
            (GameInput::Confirm, GameStatus::GameOver)
            | (
                GameInput::Restart,
                GameStatus::Playing | GameStatus::Paused | GameStatus::GameOver,
            ) => self.restart_game(now),
            (GameInput::Pause, _) => self.toggle_pause(now),
            (GameInput::Direction(direction), _) => {
                self.change_direction(direction);
            }
            _ => {}
        }
    }

    /// Runs the tick handler when one is due at `now`.
    pub fn update(&mut self, now: Instant) -> Option<TickOutcome> {
        if self.status != GameStatus::Playing || !self.scheduler.poll(now) {
            return None;
        }

        let outcome = self.simulation.tick(now);
        self.dispatch(&outcome, now);
        Some(outcome)
    }

    /// Interpolated frame for display at `now`. Never changes game state.
    #[must_use]
    pub fn frame(&self, now: Instant) -> RenderFrame {
        interpolate(
            self.simulation.previous(),
            self.simulation.current(),
            self.simulation.heading(),
            self.scheduler.alpha(now),
        )
    }

    fn dispatch(&mut self, outcome: &TickOutcome, now: Instant) {
        let state = self.simulation.current();
        let (score, level) = (state.score, state.level);

        if let Some(eaten) = outcome.ate {
            if let Some(volume) = self.volume() {
                self.audio.on_eat(volume);
            }
            self.ui.on_score_change(eaten.points, eaten.origin);
            self.new_record |= self.store.update_best_score(score);
        }

        if let Some(level_up) = outcome.level_up {
            self.scheduler.reschedule(now, level_up.tick_interval);
            self.ui.on_level_up(level_up.level);
        }

        if let Some(game_over) = outcome.game_over {
            self.scheduler.stop(now);
            self.status = GameStatus::GameOver;
            if let Some(volume) = self.volume() {
                self.audio.on_death(volume);
            }
            self.new_record |= self.store.update_best_score(game_over.score);
            self.store.record_game(game_over.score, game_over.level);
            info!(
                "final score {}, level {}{}",
                game_over.score,
                game_over.level,
                if self.new_record { " (new record)" } else { "" }
            );
            self.ui.on_game_over(game_over.score, game_over.level);
        }

        if outcome.ate.is_some() || outcome.game_over.is_some() {
            self.ui.on_hud_update(score, self.store.best_score(), level);
        }
    }

    fn push_hud(&mut self) {
        let state = self.simulation.current();
        self.ui
            .on_hud_update(state.score, self.store.best_score(), state.level);
    }

    fn volume(&self) -> Option<f32> {
        let settings = self.store.settings();
        settings.sound.then(|| settings.gain())
    }

    #[must_use]
    pub fn status(&self) -> GameStatus {
        self.status
    }

    #[must_use]
    pub fn simulation(&self) -> &Simulation {
        &self.simulation
    }

    /// Mutable access for scripting scenarios.
    pub fn simulation_mut(&mut self) -> &mut Simulation {
        &mut self.simulation
    }

    #[must_use]
    pub fn scheduler(&self) -> &TickScheduler {
        &self.scheduler
    }

    /// True once the current game has beaten the stored best score.
    #[must_use]
    pub fn is_new_record(&self) -> bool {
        self.new_record
    }

    #[must_use]
    pub fn ui(&self) -> &U {
        &self.ui
    }

    pub fn ui_mut(&mut self) -> &mut U {
        &mut self.ui
    }

    #[must_use]
    pub fn audio(&self) -> &A {
        &self.audio
    }

    #[must_use]
    pub fn store(&self) -> &S {
        &self.store
    }
}
