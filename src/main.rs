use std::fs::File;
use std::io;
use std::path::PathBuf;
use std::time::{Duration, Instant};

use clap::Parser;
use combo_snake::audio::BellAudio;
use combo_snake::config::{FoodPolicy, GameConfig, THEME_MEADOW};
use combo_snake::controller::GameController;
use combo_snake::input::{GameInput, InputHandler};
use combo_snake::renderer::{self, Screen};
use combo_snake::score::{stats_path, FileScoreStore};
use combo_snake::terminal_runtime::TerminalSession;
use combo_snake::ui::TerminalUi;
use log::{info, LevelFilter};
use simplelog::{Config, WriteLogger};

/// One display refresh; input is polled for at most this long per frame.
const FRAME_INTERVAL: Duration = Duration::from_millis(16);

type Game = GameController<TerminalUi, BellAudio, FileScoreStore>;

#[derive(Debug, Parser)]
#[command(version, about)]
struct Cli {
    /// Seed for food placement, for reproducible runs.
    #[arg(long)]
    seed: Option<u64>,

    /// Never place food on a cell the snake occupies.
    #[arg(long = "avoid-snake-food")]
    avoid_snake_food: bool,

    /// Let the head move into the cell the tail is leaving.
    #[arg(long = "tail-vacates")]
    tail_vacates: bool,

    /// Mute sound regardless of the saved setting.
    #[arg(long = "no-sound")]
    no_sound: bool,

    /// Where to write the log.
    #[arg(long = "log-file", default_value = "combo-snake.log")]
    log_file: PathBuf,

    /// Log debug detail.
    #[arg(long)]
    verbose: bool,

    /// Save a new sound volume (0-100) before playing.
    #[arg(long, value_parser = clap::value_parser!(u8).range(0..=100))]
    volume: Option<u8>,

    /// Wipe saved statistics and settings before playing.
    #[arg(long = "reset-stats")]
    reset_stats: bool,

    /// Stats file location (defaults to the platform data directory).
    #[arg(long)]
    scores: Option<PathBuf>,
}

impl Cli {
    fn game_config(&self) -> GameConfig {
        GameConfig {
            food_policy: if self.avoid_snake_food {
                FoodPolicy::AvoidSnake
            } else {
                FoodPolicy::Uniform
            },
            tail_is_solid: !self.tail_vacates,
            seed: self.seed,
        }
    }
}

fn main() -> io::Result<()> {
    let cli = Cli::parse();
    init_logging(&cli);

    let scores_path = cli.scores.clone().unwrap_or_else(stats_path);
    let mut store = FileScoreStore::open_or_default(scores_path);
    if cli.reset_stats {
        info!("resetting stats");
        store.reset();
    }
    if let Some(volume) = cli.volume {
        let mut settings = store.stats().settings.clone();
        settings.volume = volume;
        store.update_settings(settings);
    }
    if cli.no_sound {
        store.mute();
    }

    let game = GameController::new(
        cli.game_config(),
        TerminalUi::new(),
        BellAudio::new(),
        store,
    );
    info!("session started with {:?}", cli.game_config());

    let mut session = TerminalSession::enter()?;
    run(&mut session, game)
}

fn init_logging(cli: &Cli) {
    let level = if cli.verbose {
        LevelFilter::Debug
    } else {
        LevelFilter::Info
    };

    let result = File::create(&cli.log_file)
        .map_err(|error| error.to_string())
        .and_then(|file| {
            WriteLogger::init(level, Config::default(), file).map_err(|error| error.to_string())
        });

    if let Err(error) = result {
        eprintln!("Logging disabled: {error}");
    }
}

fn run(session: &mut TerminalSession, mut game: Game) -> io::Result<()> {
    let mut input = InputHandler::new();

    loop {
        let now = Instant::now();
        game.update(now);
        game.ui_mut().sync(now);

        let scene = game.frame(now);
        session.terminal_mut().draw(|frame| {
            renderer::render(
                frame,
                &scene,
                &Screen {
                    status: game.status(),
                    ui: game.ui(),
                    stats: game.store().stats(),
                    new_record: game.is_new_record(),
                    combo: game.simulation().combo_count(),
                    theme: &THEME_MEADOW,
                    now,
                },
            );
        })?;

        if let Some(game_input) = input.poll_input(FRAME_INTERVAL)? {
            if matches!(game_input, GameInput::Quit) {
                info!("quit requested");
                break;
            }

            game.apply_input(game_input, Instant::now());
        }
    }

    Ok(())
}
