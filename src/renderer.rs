use std::time::Instant;

use ratatui::layout::Rect;
use ratatui::style::{Modifier, Style};
use ratatui::Frame;

use crate::config::{Theme, BOARD_CELLS, CELL_SIZE, GLYPH_FOOD};
use crate::controller::GameStatus;
use crate::grid::{Cell, PixelPoint};
use crate::interpolate::{BodyShape, RenderFrame, Sprite};
use crate::score::Stats;
use crate::ui::hud::{render_hud, HudInfo};
use crate::ui::menu::{render_game_over_menu, render_pause_menu, render_start_menu};
use crate::ui::TerminalUi;

/// Terminal columns per board cell; cells are drawn two columns wide so
/// they look square.
const COLUMNS_PER_CELL: u16 = 2;

/// Everything besides the frame needed to draw one screen.
#[derive(Debug, Clone, Copy)]
pub struct Screen<'a> {
    pub status: GameStatus,
    pub ui: &'a TerminalUi,
    pub stats: &'a Stats,
    pub new_record: bool,
    pub combo: u32,
    pub theme: &'a Theme,
    pub now: Instant,
}

/// Renders the full terminal frame from an interpolated [`RenderFrame`].
pub fn render(frame: &mut Frame<'_>, scene: &RenderFrame, screen: &Screen<'_>) {
    let board = board_rect(frame.area());
    let theme = screen.theme;

    render_field(frame, board, theme);
    render_hud(
        frame,
        board,
        screen.ui,
        &HudInfo {
            theme,
            length: scene.segments.len(),
            combo: screen.combo,
            now: screen.now,
        },
    );
    render_food(frame, board, scene.food, theme);
    render_snake(frame, board, scene, theme);
    render_score_flashes(frame, board, screen);

    match screen.status {
        GameStatus::Ready => render_start_menu(frame, board, screen.stats, theme),
        GameStatus::Paused => render_pause_menu(frame, board),
        GameStatus::GameOver => {
            let (score, level) = screen.ui.final_result.unwrap_or((scene.score, scene.level));
            render_game_over_menu(
                frame,
                board,
                score,
                level,
                screen.ui.best_score,
                screen.new_record,
            );
        }
        GameStatus::Playing => {}
    }
}

/// Centers the board in `area`, shrinking it when the terminal is small.
#[must_use]
pub fn board_rect(area: Rect) -> Rect {
    let cells = u16::try_from(BOARD_CELLS).unwrap_or(19);
    let width = (cells * COLUMNS_PER_CELL).min(area.width);
    let height = cells.min(area.height);

    Rect {
        x: area.x + (area.width - width) / 2,
        y: area.y + (area.height - height) / 2,
        width,
        height,
    }
}

fn render_field(frame: &mut Frame<'_>, board: Rect, theme: &Theme) {
    let buffer = frame.buffer_mut();
    for row in 0..BOARD_CELLS {
        for col in 0..BOARD_CELLS {
            let cell = Cell::new(col, row);
            let Some((x, y)) = cell_to_terminal(board, cell.to_pixel()) else {
                continue;
            };
            let bg = if cell.is_in_bounds() {
                theme.field_bg
            } else {
                theme.wall
            };
            buffer.set_string(x, y, "  ", Style::new().bg(bg));
        }
    }
}

fn render_food(frame: &mut Frame<'_>, board: Rect, food: PixelPoint, theme: &Theme) {
    let Some((x, y)) = cell_to_terminal(board, food) else {
        return;
    };

    frame.buffer_mut().set_string(
        x,
        y,
        GLYPH_FOOD,
        Style::new().fg(theme.food).bg(theme.field_bg),
    );
}

fn render_snake(frame: &mut Frame<'_>, board: Rect, scene: &RenderFrame, theme: &Theme) {
    let buffer = frame.buffer_mut();

    // Tail first so the head wins where interpolated segments overlap.
    for segment in scene.segments.iter().rev() {
        let Some((x, y)) = cell_to_terminal(board, segment.position) else {
            continue;
        };

        let style = match segment.sprite {
            Sprite::Head(_) => Style::new()
                .fg(theme.snake_head)
                .add_modifier(Modifier::BOLD),
            Sprite::Body(_) => Style::new().fg(theme.snake_body),
            Sprite::Tail(_) => Style::new().fg(theme.snake_tail),
        };
        buffer.set_string(x, y, sprite_glyph(segment.sprite), style.bg(theme.field_bg));
    }
}

fn render_score_flashes(frame: &mut Frame<'_>, board: Rect, screen: &Screen<'_>) {
    let buffer = frame.buffer_mut();
    let style = Style::new()
        .fg(screen.theme.score_flash)
        .add_modifier(Modifier::BOLD);

    for flash in screen.ui.active_flashes(screen.now) {
        // Drawn one row above the eaten food.
        let above = Cell::new(flash.origin.col, flash.origin.row - 1);
        if !above.is_on_board() {
            continue;
        }
        let Some((x, y)) = cell_to_terminal(board, above.to_pixel()) else {
            continue;
        };
        buffer.set_string(x, y, format!("+{}", flash.points), style);
    }
}

/// Two-column glyph for a sprite.
#[must_use]
pub fn sprite_glyph(sprite: Sprite) -> &'static str {
    const HEADS: [&str; 4] = ["▲ ", "▼ ", "◀═", "═▶"];
    const TAILS: [&str; 4] = ["╻ ", "╹ ", "╺═", "═╸"];

    match sprite {
        Sprite::Head(direction) => HEADS[direction as usize],
        Sprite::Tail(direction) => TAILS[direction as usize],
        Sprite::Body(shape) => match shape {
            BodyShape::Horizontal => "══",
            BodyShape::Vertical => "║ ",
            BodyShape::TopLeft => "╝ ",
            BodyShape::TopRight => "╚═",
            BodyShape::BottomLeft => "╗ ",
            BodyShape::BottomRight => "╔═",
        },
    }
}

/// Maps a pixel position to a terminal cell with half-cell horizontal
/// resolution.
fn cell_to_terminal(board: Rect, position: PixelPoint) -> Option<(u16, u16)> {
    let half_cell = CELL_SIZE as f32 / f32::from(COLUMNS_PER_CELL);
    let x_offset = u16::try_from((position.x / half_cell).round() as i32).ok()?;
    let y_offset = u16::try_from((position.y / CELL_SIZE as f32).round() as i32).ok()?;

    let x = board.x.saturating_add(x_offset);
    let y = board.y.saturating_add(y_offset);
    if x >= board.right() || y >= board.bottom() {
        return None;
    }

    Some((x, y))
}
