use std::time::{Duration, Instant};

use combo_snake::collaborators::{NullAudio, NullUi};
use combo_snake::config::GameConfig;
use combo_snake::controller::{GameController, GameStatus};
use combo_snake::grid::Cell;
use combo_snake::input::Direction;
use combo_snake::score::MemoryScoreStore;

type Game = GameController<NullUi, NullAudio, MemoryScoreStore>;

fn ms(value: u64) -> Duration {
    Duration::from_millis(value)
}

fn new_game() -> Game {
    GameController::new(
        GameConfig {
            seed: Some(7),
            ..GameConfig::default()
        },
        NullUi,
        NullAudio,
        MemoryScoreStore::default(),
    )
}

fn feed_ahead(game: &mut Game, direction: Direction) {
    let head = game.simulation().current().snake.head();
    game.simulation_mut().place_food(head.step(direction));
}

#[test]
fn combo_run_levels_up_then_hits_the_wall() {
    let start = Instant::now();
    let mut game = new_game();
    game.start_game(start);
    assert!(game.change_direction(Direction::Right));

    let mut points = Vec::new();
    for step in 1..=4u64 {
        feed_ahead(&mut game, Direction::Right);
        let outcome = game
            .update(start + ms(200 * step))
            .expect("a tick is due every 200ms at level 1");
        points.push(outcome.ate.expect("food was placed ahead").points);
    }

    assert_eq!(points, vec![1, 1, 1, 2]);
    let state = game.simulation().current();
    assert_eq!(state.score, 5);
    assert_eq!(state.level, 2);
    assert_eq!(state.snake.len(), 5);
    assert_eq!(state.snake.head(), Cell::new(13, 10));
    assert_eq!(game.scheduler().interval(), ms(185));
    assert_eq!(game.store().stats.best_score, 5);

    // The faster period starts at the level-up tick.
    game.simulation_mut().place_food(Cell::new(1, 17));
    assert_eq!(game.update(start + ms(900)), None);
    assert!(game.update(start + ms(985)).is_some());
    assert_eq!(game.simulation().current().snake.head(), Cell::new(14, 10));

    assert!(game.change_direction(Direction::Up));
    let mut now = start + ms(985);
    let mut game_overs = 0;
    for _ in 0..20 {
        now += ms(185);
        if let Some(outcome) = game.update(now)
            && outcome.game_over.is_some()
        {
            game_overs += 1;
        }
    }

    assert_eq!(game_overs, 1);
    assert_eq!(game.status(), GameStatus::GameOver);
    assert_eq!(game.simulation().current().snake.head(), Cell::new(14, 3));
    assert_eq!(game.store().stats.total_games, 1);
    assert_eq!(game.store().stats.max_level, 2);
    assert!(game.is_new_record());
}

#[test]
fn pause_freezes_the_frame_and_restart_starts_over() {
    let start = Instant::now();
    let mut game = new_game();
    game.simulation_mut().place_food(Cell::new(1, 17));
    game.start_game(start);
    game.change_direction(Direction::Right);
    assert!(game.update(start + ms(200)).is_some());

    let halfway = game.frame(start + ms(300));
    assert_eq!(halfway.segments[0].position.x, 304.0);

    game.pause_game(start + ms(300));
    assert_eq!(game.update(start + ms(5_000)), None);
    assert_eq!(game.frame(start + ms(5_000)), halfway);

    // One second paused; the remaining half period runs from the resume.
    game.resume_game(start + ms(1_300));
    assert_eq!(game.frame(start + ms(1_300)), halfway);
    assert_eq!(game.update(start + ms(1_350)), None);
    assert!(game.update(start + ms(1_400)).is_some());
    assert_eq!(game.simulation().current().snake.head(), Cell::new(11, 10));

    game.restart_game(start + ms(2_000));
    let state = game.simulation().current();
    assert_eq!(game.status(), GameStatus::Playing);
    assert_eq!(state.snake.head(), Cell::new(9, 10));
    assert_eq!(state.score, 0);
    assert_eq!(game.scheduler().interval(), ms(200));
    assert_eq!(game.simulation().heading(), None);
}
