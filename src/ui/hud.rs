use ratatui::Frame;
use ratatui::layout::{Alignment, Constraint, Layout, Rect};
use ratatui::style::{Modifier, Style};
use ratatui::text::{Line, Span};
use ratatui::widgets::Paragraph;

use crate::config::Theme;
use crate::game::GameState;

/// Values the HUD shows that live outside the simulation.
#[derive(Debug, Clone, Copy)]
pub struct HudInfo<'a> {
    pub best_length: usize,
    /// Set once the current session has replaced the stored record.
    pub new_best: bool,
    pub paused: bool,
    pub theme: &'a Theme,
}

/// Renders the one-line HUD and returns the play area above it.
#[must_use]
pub fn render_hud(
    frame: &mut Frame<'_>,
    area: Rect,
    state: &GameState,
    info: &HudInfo<'_>,
) -> Rect {
    let [play_area, hud_area] =
        Layout::vertical([Constraint::Min(0), Constraint::Length(1)]).areas(area);

    frame.render_widget(
        Paragraph::new(hud_line(state, info))
            .alignment(Alignment::Right)
            .style(Style::default().fg(info.theme.hud_text)),
        hud_area,
    );

    play_area
}

fn hud_line(state: &GameState, info: &HudInfo<'_>) -> Line<'static> {
    let muted = Style::default().fg(info.theme.menu_footer);
    let value = Style::default().add_modifier(Modifier::BOLD);
    let boost_style = if state.snake().is_boosted() {
        Style::default().fg(info.theme.snake_boost).add_modifier(Modifier::BOLD)
    } else {
        muted
    };

    Line::from(vec![
        Span::styled("Length ", muted),
        Span::styled(state.snake().len().to_string(), value),
        Span::styled("  Best ", muted),
        Span::styled(info.best_length.to_string(), value),
        Span::styled("  Ticks ", muted),
        Span::styled(state.tick_count().to_string(), value),
        Span::styled("  BOOST", boost_style),
        Span::raw(" "),
    ])
}
