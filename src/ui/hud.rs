use std::time::{Duration, Instant};

use ratatui::layout::{Alignment, Rect};
use ratatui::style::{Color, Modifier, Style};
use ratatui::text::{Line, Span};
use ratatui::widgets::Paragraph;
use ratatui::Frame;

use crate::config::{Theme, HUD_ROWS};
use crate::ui::TerminalUi;

const VALUE_FLASH_HOLD_DURATION: Duration = Duration::from_millis(500);
const VALUE_FLASH_FADE_DURATION: Duration = Duration::from_millis(1500);
const SEPARATOR: &str = " │ ";

/// Supplemental values displayed by the HUD rows.
#[derive(Debug, Clone, Copy)]
pub struct HudInfo<'a> {
    pub theme: &'a Theme,
    pub length: usize,
    pub combo: u32,
    /// Wall-clock instant of this frame render.
    pub now: Instant,
}

/// Draws score, best score and level into the reserved rows at the top of
/// `board`.
pub fn render_hud(frame: &mut Frame<'_>, board: Rect, ui: &TerminalUi, info: &HudInfo<'_>) {
    let rows = u16::try_from(HUD_ROWS).unwrap_or(3).min(board.height);
    if rows < 2 {
        return;
    }

    let theme = info.theme;
    let value_style = |changed_at| {
        Style::default()
            .fg(flash_color(theme.hud_text, theme.hud_accent, changed_at, info.now))
            .add_modifier(Modifier::BOLD)
    };

    let top = Line::from(vec![
        Span::raw("Score: "),
        Span::styled(ui.score.to_string(), value_style(ui.score_changed_at)),
        Span::raw(SEPARATOR),
        Span::raw("Best: "),
        Span::styled(ui.best_score.to_string(), value_style(None)),
        Span::raw(SEPARATOR),
        Span::raw("Level: "),
        Span::styled(ui.level.to_string(), value_style(ui.level_changed_at)),
    ]);

    let mut bottom = vec![Span::raw(format!("Length: {}", info.length))];
    if info.combo > 0 {
        bottom.push(Span::raw(SEPARATOR));
        bottom.push(Span::styled(
            format!("Combo x{}", info.combo),
            Style::default().fg(theme.hud_accent),
        ));
    }

    let style = Style::default().fg(theme.hud_text).bg(theme.wall);
    let row = |offset: u16| Rect {
        x: board.x,
        y: board.y + offset,
        width: board.width,
        height: 1,
    };

    frame.render_widget(
        Paragraph::new(top).alignment(Alignment::Center).style(style),
        row(1),
    );
    if rows > 2 {
        frame.render_widget(
            Paragraph::new(Line::from(bottom))
                .alignment(Alignment::Center)
                .style(style),
            row(2),
        );
    }
}

/// Accent color held briefly after a change, then eased back to `base`.
#[must_use]
pub fn flash_color(base: Color, accent: Color, changed_at: Option<Instant>, now: Instant) -> Color {
    let Some(changed_at) = changed_at else {
        return base;
    };
    let elapsed = now.saturating_duration_since(changed_at);
    if elapsed >= VALUE_FLASH_HOLD_DURATION + VALUE_FLASH_FADE_DURATION {
        return base;
    }
    if elapsed <= VALUE_FLASH_HOLD_DURATION {
        return accent;
    }

    let fade_elapsed = elapsed - VALUE_FLASH_HOLD_DURATION;
    let t = fade_elapsed.as_secs_f32() / VALUE_FLASH_FADE_DURATION.as_secs_f32();
    blend_color(accent, base, ease_out_cubic(t))
}

fn ease_out_cubic(t: f32) -> f32 {
    let t = t.clamp(0.0, 1.0);
    1.0 - (1.0 - t).powi(3)
}

fn blend_color(from: Color, to: Color, t: f32) -> Color {
    let t = t.clamp(0.0, 1.0);
    match (color_to_rgb(from), color_to_rgb(to)) {
        (Some((fr, fg, fb)), Some((tr, tg, tb))) => {
            Color::Rgb(lerp_u8(fr, tr, t), lerp_u8(fg, tg, t), lerp_u8(fb, tb, t))
        }
        _ => {
            if t < 1.0 {
                from
            } else {
                to
            }
        }
    }
}

fn lerp_u8(from: u8, to: u8, t: f32) -> u8 {
    ((from as f32) + ((to as f32) - (from as f32)) * t).round() as u8
}

fn color_to_rgb(color: Color) -> Option<(u8, u8, u8)> {
    match color {
        Color::Black => Some((0, 0, 0)),
        Color::Red => Some((205, 49, 49)),
        Color::Green => Some((13, 188, 121)),
        Color::Yellow => Some((229, 229, 16)),
        Color::DarkGray => Some((102, 102, 102)),
        Color::LightYellow => Some((245, 245, 67)),
        Color::White => Some((255, 255, 255)),
        Color::Rgb(r, g, b) => Some((r, g, b)),
        _ => None,
    }
}
