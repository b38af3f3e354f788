use ratatui::Frame;
use ratatui::layout::Rect;
use ratatui::style::{Modifier, Style};
use ratatui::widgets::Block;

use crate::config::{
    ArenaSize, BORDER_HALF_BLOCK, GLYPH_FOOD, GLYPH_SNAKE_BODY, GLYPH_SNAKE_HEAD, Theme,
};
use crate::game::{GameState, GameStatus};
use crate::snake::Point;
use crate::ui::hud::{HudInfo, render_hud};
use crate::ui::menu::{render_game_over_menu, render_pause_menu};

/// Renders the full frame from immutable state.
pub fn render(frame: &mut Frame<'_>, state: &GameState, hud_info: &HudInfo<'_>) {
    let area = frame.area();
    let play_area = render_hud(frame, area, state, hud_info);

    let theme = hud_info.theme;
    let block = Block::bordered()
        .border_set(BORDER_HALF_BLOCK)
        .border_style(Style::new().fg(theme.border_fg))
        .style(Style::new().bg(theme.play_bg));

    let inner = block.inner(play_area);
    frame.render_widget(block, play_area);

    let arena = state.config().arena();
    render_food(frame, inner, arena, state.food().position, theme);
    render_snake(frame, inner, state, theme);

    match state.status() {
        GameStatus::Stopped(reason) => render_game_over_menu(
            frame,
            play_area,
            state.snake().len(),
            hud_info.best_length,
            hud_info.new_best,
            reason,
            theme,
        ),
        GameStatus::Running if hud_info.paused => render_pause_menu(frame, play_area, theme),
        GameStatus::Running => {}
    }
}

fn render_food(frame: &mut Frame<'_>, inner: Rect, arena: ArenaSize, food: Point, theme: &Theme) {
    let Some((x, y)) = arena_to_cell(inner, arena, food) else {
        return;
    };

    frame
        .buffer_mut()
        .set_string(x, y, GLYPH_FOOD, Style::new().fg(theme.food).bg(theme.play_bg));
}

fn render_snake(frame: &mut Frame<'_>, inner: Rect, state: &GameState, theme: &Theme) {
    let arena = state.config().arena();
    let snake = state.snake();
    let head_color = if snake.is_boosted() {
        theme.snake_boost
    } else {
        theme.snake_head
    };

    let buffer = frame.buffer_mut();
    for segment in snake.segments() {
        let Some((x, y)) = arena_to_cell(inner, arena, *segment) else {
            continue;
        };
        buffer.set_string(
            x,
            y,
            GLYPH_SNAKE_BODY,
            Style::new().fg(theme.snake_body).bg(theme.play_bg),
        );
    }

    if let Some((x, y)) = arena_to_cell(inner, arena, snake.head()) {
        buffer.set_string(
            x,
            y,
            GLYPH_SNAKE_HEAD,
            Style::new()
                .fg(head_color)
                .bg(theme.play_bg)
                .add_modifier(Modifier::BOLD),
        );
    }
}

/// Scales an arena point onto a terminal cell inside `inner`.
fn arena_to_cell(inner: Rect, arena: ArenaSize, point: Point) -> Option<(u16, u16)> {
    if !point.is_within_bounds(arena) || inner.width == 0 || inner.height == 0 {
        return None;
    }

    let column = scale_axis(point.x, arena.width, inner.width);
    let row = scale_axis(point.y, arena.height, inner.height);

    Some((inner.x.saturating_add(column), inner.y.saturating_add(row)))
}

fn scale_axis(value: f64, extent: f64, cells: u16) -> u16 {
    let scaled = (value / extent * f64::from(cells)).floor();
    // Float rounding can land exactly on the far edge.
    (scaled as u16).min(cells - 1)
}
