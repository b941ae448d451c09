use ratatui::layout::{Alignment, Constraint, Layout, Rect};
use ratatui::style::{Color, Modifier, Style};
use ratatui::text::{Line, Span};
use ratatui::widgets::Paragraph;
use ratatui::Frame;

use crate::game::GameState;

/// Running counters as shown under the board and in the final summary.
#[must_use]
pub fn progress_text(tick_count: u64, fruits_eaten: u32) -> String {
    format!("{tick_count} steps x {fruits_eaten} fruit")
}

/// Renders the one-line HUD and returns the remaining play area above it.
#[must_use]
pub fn render_hud(frame: &mut Frame<'_>, area: Rect, state: &GameState) -> Rect {
    let [play_area, status_area] =
        Layout::vertical([Constraint::Min(0), Constraint::Length(1)]).areas(area);

    frame.render_widget(
        Paragraph::new(status_line(state)).alignment(Alignment::Center),
        status_area,
    );

    play_area
}

fn status_line(state: &GameState) -> Line<'static> {
    let bounds = state.bounds();
    let muted = Style::default().fg(Color::DarkGray);

    Line::from(vec![
        Span::styled(
            progress_text(state.tick_count, state.fruits_eaten),
            Style::default().add_modifier(Modifier::BOLD),
        ),
        Span::styled(
            format!(
                "  {}x{}  length {}  [P] pause  [Q] quit",
                bounds.width,
                bounds.height,
                state.snake.len()
            ),
            muted,
        ),
    ])
}
