use std::time::Duration;

use ratatui::style::Color;

/// Edge length of one grid cell in pixel units.
pub const CELL_SIZE: i32 = 32;

/// Board edge length in cells (the board is square).
pub const BOARD_CELLS: i32 = 19;

/// Rows at the top of the board reserved for the HUD.
pub const HUD_ROWS: i32 = 3;

/// Leftmost playable column.
pub const MIN_COL: i32 = 1;

/// Rightmost playable column.
pub const MAX_COL: i32 = 17;

/// Topmost playable row (first row below the HUD).
pub const MIN_ROW: i32 = HUD_ROWS;

/// Bottommost playable row.
pub const MAX_ROW: i32 = 17;

/// Column of the single-segment snake at game start.
pub const START_COL: i32 = 9;

/// Row of the single-segment snake at game start.
pub const START_ROW: i32 = 10;

/// Base tick interval in milliseconds.
pub const DEFAULT_TICK_INTERVAL_MS: u64 = 200;

/// Minimum tick interval in milliseconds.
pub const MIN_TICK_INTERVAL_MS: u64 = 80;

/// Interval reduction applied per level above the first.
pub const TICK_INTERVAL_STEP_MS: u64 = 15;

/// Score needed per level increase.
pub const POINTS_PER_LEVEL: u32 = 5;

/// Two eats closer together than this continue a combo.
pub const COMBO_WINDOW: Duration = Duration::from_millis(1000);

/// Every this many combo eats add one bonus point.
pub const COMBO_BONUS_STEP: u32 = 3;

/// How food cells are chosen after each eat.
#[derive(Debug, Clone, Copy, Eq, PartialEq, Default)]
pub enum FoodPolicy {
    /// Any playable cell, including ones the snake occupies.
    #[default]
    Uniform,
    /// Only playable cells the snake does not occupy.
    AvoidSnake,
}

/// Policy knobs for one simulation instance.
#[derive(Debug, Clone, Copy, Eq, PartialEq)]
pub struct GameConfig {
    pub food_policy: FoodPolicy,
    /// When true the current tail cell blocks the head even on ticks where
    /// the tail is about to move away.
    pub tail_is_solid: bool,
    /// Seed for food placement; `None` draws from OS entropy.
    pub seed: Option<u64>,
}

impl Default for GameConfig {
    fn default() -> Self {
        Self {
            food_policy: FoodPolicy::Uniform,
            tail_is_solid: true,
            seed: None,
        }
    }
}

/// Colors used by the terminal renderer.
#[derive(Debug)]
pub struct Theme {
    pub snake_head: Color,
    pub snake_body: Color,
    pub snake_tail: Color,
    pub food: Color,
    pub field_bg: Color,
    pub wall: Color,
    pub hud_text: Color,
    pub hud_accent: Color,
    pub score_flash: Color,
    pub menu_title: Color,
    pub menu_footer: Color,
}

/// Grass field with a green snake and red apple.
pub const THEME_MEADOW: Theme = Theme {
    snake_head: Color::LightYellow,
    snake_body: Color::Green,
    snake_tail: Color::DarkGray,
    food: Color::Red,
    field_bg: Color::Rgb(0x4a, 0x75, 0x2c),
    wall: Color::Rgb(0x57, 0x8a, 0x34),
    hud_text: Color::White,
    hud_accent: Color::Yellow,
    score_flash: Color::LightYellow,
    menu_title: Color::Green,
    menu_footer: Color::DarkGray,
};

/// Glyph for food.
pub const GLYPH_FOOD: &str = "●";
