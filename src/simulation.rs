use std::time::{Duration, Instant};

use log::{debug, info};
use rand::rngs::StdRng;
use rand::SeedableRng;

use crate::collision::is_terminal;
use crate::config::{GameConfig, START_COL, START_ROW};
use crate::food::Food;
use crate::grid::Cell;
use crate::input::{direction_change_is_valid, Direction};
use crate::scoring::{level_for_score, tick_interval_for_level, ComboTracker};
use crate::snake::Snake;

/// Everything the renderer needs from one tick.
#[derive(Debug, Clone, PartialEq)]
pub struct SimulationState {
    pub snake: Snake,
    pub food: Food,
    pub score: u32,
    pub level: u32,
    pub tick_interval: Duration,
}

impl SimulationState {
    /// Fresh game state with food placed by `rng`.
    fn initial(config: &GameConfig, rng: &mut StdRng) -> Self {
        let snake = Snake::new(Cell::new(START_COL, START_ROW), Direction::Right);
        let food = Food::spawn(rng, config.food_policy, &snake);

        Self {
            snake,
            food,
            score: 0,
            level: 1,
            tick_interval: tick_interval_for_level(1),
        }
    }
}

/// Points earned by one eat and where the food was.
#[derive(Debug, Clone, Copy, Eq, PartialEq)]
pub struct Eaten {
    pub points: u32,
    pub origin: Cell,
}

/// New level and the tick interval that goes with it.
#[derive(Debug, Clone, Copy, Eq, PartialEq)]
pub struct LevelUp {
    pub level: u32,
    pub tick_interval: Duration,
}

/// Final numbers of a finished run.
#[derive(Debug, Clone, Copy, Eq, PartialEq)]
pub struct GameOver {
    pub score: u32,
    pub level: u32,
}

/// What happened during one tick.
#[derive(Debug, Clone, Copy, Default, Eq, PartialEq)]
pub struct TickOutcome {
    pub ate: Option<Eaten>,
    pub level_up: Option<LevelUp>,
    pub game_over: Option<GameOver>,
}

impl TickOutcome {
    /// True when the scheduler must restart with a new period.
    #[must_use]
    pub fn interval_changed(&self) -> bool {
        self.level_up.is_some()
    }
}

/// Single game instance: the tick handler plus the two snapshots kept for
/// interpolation.
#[derive(Debug, Clone)]
pub struct Simulation {
    current: SimulationState,
    previous: SimulationState,
    heading: Option<Direction>,
    pending_heading: Option<Direction>,
    combo: ComboTracker,
    config: GameConfig,
    rng: StdRng,
    terminated: bool,
}

impl Simulation {
    /// Creates a game in its initial state. The snake stays put until the
    /// first direction arrives.
    #[must_use]
    pub fn new(config: GameConfig) -> Self {
        let mut rng = match config.seed {
            Some(seed) => StdRng::seed_from_u64(seed),
            None => StdRng::from_entropy(),
        };
        let current = SimulationState::initial(&config, &mut rng);

        Self {
            previous: current.clone(),
            current,
            heading: None,
            pending_heading: None,
            combo: ComboTracker::new(),
            config,
            rng,
            terminated: false,
        }
    }

    /// Creates a game from an explicit snapshot. Level and tick interval are
    /// derived from the snapshot's score.
    #[must_use]
    pub fn from_state(
        config: GameConfig,
        mut state: SimulationState,
        heading: Option<Direction>,
    ) -> Self {
        let mut simulation = Self::new(config);
        state.level = level_for_score(state.score);
        state.tick_interval = tick_interval_for_level(state.level);
        simulation.previous = state.clone();
        simulation.current = state;
        simulation.heading = heading;
        simulation
    }

    /// Resets every per-game value. The food random stream carries on.
    pub fn restart(&mut self) {
        self.current = SimulationState::initial(&self.config, &mut self.rng);
        self.previous = self.current.clone();
        self.heading = None;
        self.pending_heading = None;
        self.combo = ComboTracker::new();
        self.terminated = false;
    }

    /// Queues a heading for the next tick. Returns false, leaving the queue
    /// untouched, when `direction` reverses the heading of the last tick or
    /// the run is over. Between ticks the last accepted direction wins.
    pub fn change_direction(&mut self, direction: Direction) -> bool {
        if self.terminated {
            return false;
        }

        if let Some(current) = self.heading
            && !direction_change_is_valid(current, direction)
        {
            return false;
        }

        self.pending_heading = Some(direction);
        true
    }

    /// Advances the simulation by one step at time `now`.
    ///
    /// Eating and level changes are applied before the terminal check, so a
    /// fatal eat still counts toward the final score. The candidate head is
    /// tested against the body as it was before the move.
    pub fn tick(&mut self, now: Instant) -> TickOutcome {
        let mut outcome = TickOutcome::default();
        if self.terminated {
            return outcome;
        }

        self.previous = self.current.clone();
        if let Some(next) = self.pending_heading.take() {
            self.heading = Some(next);
        }

        let Some(heading) = self.heading else {
            return outcome;
        };

        let candidate = self.current.snake.advance(heading);
        let eats = candidate == self.current.food.cell;

        if eats {
            let points = self.combo.award(now);
            self.current.score += points;
            outcome.ate = Some(Eaten {
                points,
                origin: self.current.food.cell,
            });
            outcome.level_up = self.recompute_level();
        }

        let snake = &self.current.snake;
        let body_len = if eats || self.config.tail_is_solid {
            snake.len()
        } else {
            snake.len() - 1
        };
        let terminal = is_terminal(candidate, snake.cells().take(body_len));

        if !terminal {
            if eats {
                self.current.snake.grow(candidate, heading);
            } else {
                self.current.snake.move_to(candidate, heading);
            }
        }

        // Eaten food is replaced even when the same move ends the run.
        if eats {
            self.current.food =
                Food::spawn(&mut self.rng, self.config.food_policy, &self.current.snake);
            debug!(
                "ate at {candidate:?}, combo {}, next food at {:?}",
                self.combo.combo_count(),
                self.current.food.cell
            );
        }

        if terminal {
            self.terminated = true;
            self.previous = self.current.clone();
            info!(
                "game over at {candidate:?}: score {}, level {}",
                self.current.score, self.current.level
            );
            outcome.game_over = Some(GameOver {
                score: self.current.score,
                level: self.current.level,
            });
        }

        outcome
    }

    fn recompute_level(&mut self) -> Option<LevelUp> {
        let level = level_for_score(self.current.score);
        if level == self.current.level {
            return None;
        }

        self.current.level = level;
        self.current.tick_interval = tick_interval_for_level(level);
        info!(
            "level up: {level}, tick interval {} ms",
            self.current.tick_interval.as_millis()
        );

        Some(LevelUp {
            level,
            tick_interval: self.current.tick_interval,
        })
    }

    /// State after the most recent tick.
    #[must_use]
    pub fn current(&self) -> &SimulationState {
        &self.current
    }

    /// State before the most recent tick.
    #[must_use]
    pub fn previous(&self) -> &SimulationState {
        &self.previous
    }

    /// Heading used by the most recent tick; `None` before the first input.
    #[must_use]
    pub fn heading(&self) -> Option<Direction> {
        self.heading
    }

    #[must_use]
    pub fn combo_count(&self) -> u32 {
        self.combo.combo_count()
    }

    #[must_use]
    pub fn is_terminated(&self) -> bool {
        self.terminated
    }

    /// Replaces the snake, e.g. to script a scenario.
    pub fn place_snake(&mut self, snake: Snake) {
        self.current.snake = snake;
    }

    /// Moves the food to `cell`.
    pub fn place_food(&mut self, cell: Cell) {
        self.current.food = Food::new(cell);
    }
}

#[cfg(test)]
mod tests {
    use std::time::{Duration, Instant};

    use crate::config::{FoodPolicy, GameConfig};
    use crate::food::Food;
    use crate::grid::Cell;
    use crate::input::Direction;
    use crate::snake::Snake;

    use super::{GameOver, Simulation, SimulationState};

    fn seeded(seed: u64) -> Simulation {
        Simulation::new(GameConfig {
            food_policy: FoodPolicy::AvoidSnake,
            seed: Some(seed),
            ..GameConfig::default()
        })
    }

    fn corner_food(simulation: &mut Simulation) {
        simulation.place_food(Cell::new(17, 17));
    }

    #[test]
    fn snake_waits_for_the_first_direction() {
        let now = Instant::now();
        let mut simulation = seeded(1);
        corner_food(&mut simulation);

        simulation.tick(now);

        assert_eq!(simulation.current().snake.head(), Cell::new(9, 10));
        assert_eq!(simulation.heading(), None);
    }

    #[test]
    fn non_eating_tick_keeps_length() {
        let now = Instant::now();
        let mut simulation = seeded(2);
        corner_food(&mut simulation);
        simulation.change_direction(Direction::Right);

        for _ in 0..3 {
            let before = simulation.current().snake.len();
            simulation.tick(now);
            assert_eq!(simulation.current().snake.len(), before);
        }
        assert_eq!(simulation.current().snake.head(), Cell::new(12, 10));
    }

    #[test]
    fn eating_tick_grows_and_relocates_food() {
        let now = Instant::now();
        let mut simulation = seeded(3);
        simulation.place_food(Cell::new(10, 10));
        simulation.change_direction(Direction::Right);

        let outcome = simulation.tick(now);

        let state = simulation.current();
        assert_eq!(state.snake.len(), 2);
        assert_eq!(state.score, 1);
        assert_eq!(outcome.ate.map(|eaten| eaten.origin), Some(Cell::new(10, 10)));
        assert!(state.food.cell.is_in_bounds());
        assert!(!state.snake.occupies(state.food.cell));
    }

    #[test]
    fn reversal_is_ignored() {
        let now = Instant::now();
        let mut simulation = seeded(4);
        corner_food(&mut simulation);
        simulation.change_direction(Direction::Right);
        simulation.tick(now);

        assert!(!simulation.change_direction(Direction::Left));
        simulation.tick(now);

        assert_eq!(simulation.heading(), Some(Direction::Right));
        assert_eq!(simulation.current().snake.head(), Cell::new(11, 10));
    }

    #[test]
    fn last_direction_between_ticks_wins() {
        let now = Instant::now();
        let mut simulation = seeded(5);
        corner_food(&mut simulation);
        simulation.change_direction(Direction::Right);
        simulation.tick(now);

        assert!(simulation.change_direction(Direction::Up));
        assert!(simulation.change_direction(Direction::Down));
        simulation.tick(now);

        assert_eq!(simulation.current().snake.head(), Cell::new(10, 11));
    }

    #[test]
    fn wall_collision_ends_the_game_once() {
        let now = Instant::now();
        let mut simulation = seeded(6);
        simulation.place_snake(Snake::new(Cell::new(1, 10), Direction::Left));
        corner_food(&mut simulation);
        simulation.change_direction(Direction::Left);

        let outcome = simulation.tick(now);
        assert_eq!(outcome.game_over, Some(GameOver { score: 0, level: 1 }));
        assert!(simulation.is_terminated());
        assert_eq!(simulation.current().snake.head(), Cell::new(1, 10));

        assert_eq!(simulation.tick(now).game_over, None);
        assert!(!simulation.change_direction(Direction::Up));
    }

    #[test]
    fn fatal_eat_scores_and_replaces_the_food() {
        let now = Instant::now();
        let mut simulation = seeded(8);
        simulation.place_snake(Snake::from_cells(
            vec![
                Cell::new(5, 5),
                Cell::new(6, 5),
                Cell::new(6, 6),
                Cell::new(5, 6),
                Cell::new(4, 6),
            ],
            Direction::Left,
        ));
        simulation.place_food(Cell::new(5, 6));
        simulation.change_direction(Direction::Down);

        let outcome = simulation.tick(now);

        let state = simulation.current();
        assert_eq!(outcome.ate.map(|eaten| eaten.points), Some(1));
        assert_eq!(
            outcome.game_over.map(|game_over| game_over.score),
            Some(1)
        );
        assert_eq!(state.snake.len(), 5);
        assert_ne!(state.food.cell, Cell::new(5, 6));
        assert!(!state.snake.occupies(state.food.cell));
    }

    #[test]
    fn self_collision_ends_the_game() {
        let now = Instant::now();
        let mut simulation = seeded(7);
        simulation.place_snake(Snake::from_cells(
            vec![
                Cell::new(5, 5),
                Cell::new(6, 5),
                Cell::new(6, 6),
                Cell::new(5, 6),
                Cell::new(4, 6),
            ],
            Direction::Left,
        ));
        corner_food(&mut simulation);
        simulation.change_direction(Direction::Down);

        let outcome = simulation.tick(now);

        assert!(outcome.game_over.is_some());
        assert!(simulation.is_terminated());
        assert_eq!(simulation.current().snake.len(), 5);
    }

    #[test]
    fn vacating_tail_blocks_the_head_by_default() {
        let now = Instant::now();
        let square = vec![
            Cell::new(5, 5),
            Cell::new(6, 5),
            Cell::new(6, 6),
            Cell::new(5, 6),
        ];
        let mut simulation = seeded(8);
        simulation.place_snake(Snake::from_cells(square.clone(), Direction::Left));
        corner_food(&mut simulation);
        simulation.change_direction(Direction::Down);

        simulation.tick(now);
        assert!(simulation.is_terminated());

        let mut lenient = Simulation::new(GameConfig {
            tail_is_solid: false,
            seed: Some(8),
            ..GameConfig::default()
        });
        lenient.place_snake(Snake::from_cells(square, Direction::Left));
        lenient.place_food(Cell::new(17, 17));
        lenient.change_direction(Direction::Down);

        lenient.tick(now);
        assert!(!lenient.is_terminated());
        assert_eq!(lenient.current().snake.head(), Cell::new(5, 6));
    }

    #[test]
    fn fifth_point_raises_level_and_speed() {
        let start = Instant::now();
        let state = SimulationState {
            snake: Snake::new(Cell::new(5, 5), Direction::Right),
            food: Food::new(Cell::new(6, 5)),
            score: 4,
            level: 1,
            tick_interval: Duration::from_millis(200),
        };
        let mut simulation = Simulation::from_state(
            GameConfig {
                seed: Some(9),
                ..GameConfig::default()
            },
            state,
            Some(Direction::Right),
        );

        let outcome = simulation.tick(start);

        assert!(outcome.interval_changed());
        assert_eq!(simulation.current().level, 2);
        assert_eq!(simulation.current().tick_interval, Duration::from_millis(185));
    }

    #[test]
    fn previous_snapshot_is_the_state_before_the_tick() {
        let now = Instant::now();
        let mut simulation = seeded(10);
        corner_food(&mut simulation);
        simulation.change_direction(Direction::Up);

        simulation.tick(now);

        assert_eq!(simulation.previous().snake.head(), Cell::new(9, 10));
        assert_eq!(simulation.current().snake.head(), Cell::new(9, 9));
    }

    #[test]
    fn restart_resets_everything() {
        let start = Instant::now();
        let mut simulation = seeded(11);
        simulation.change_direction(Direction::Right);
        for step in 0..3u64 {
            let head = simulation.current().snake.head();
            simulation.place_food(head.step(Direction::Right));
            simulation.tick(start + Duration::from_millis(step * 100));
        }
        assert!(simulation.combo_count() > 0);

        simulation.restart();

        let state = simulation.current();
        assert_eq!(state.snake.len(), 1);
        assert_eq!(state.snake.head(), Cell::new(9, 10));
        assert_eq!(state.score, 0);
        assert_eq!(state.level, 1);
        assert_eq!(state.tick_interval, Duration::from_millis(200));
        assert_eq!(simulation.combo_count(), 0);
        assert_eq!(simulation.heading(), None);
        assert!(!simulation.is_terminated());
    }
}
