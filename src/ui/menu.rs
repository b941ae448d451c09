use ratatui::layout::{Alignment, Constraint, Layout, Rect};
use ratatui::style::{Color, Modifier, Style};
use ratatui::text::Line;
use ratatui::widgets::{Block, Clear, Paragraph};
use ratatui::Frame;

use crate::game::{DeathReason, GameStatus};
use crate::ui::hud::progress_text;

/// Draws the start screen as a centered popup.
pub fn render_start_menu(frame: &mut Frame<'_>, area: Rect) {
    let popup = centered_popup(area, 70, 50);
    frame.render_widget(Clear, popup);

    let [title_row, body_row] =
        Layout::vertical([Constraint::Length(2), Constraint::Min(3)]).areas(popup);

    frame.render_widget(
        Paragraph::new(Line::from("SNAKE GAME"))
            .alignment(Alignment::Center)
            .style(
                Style::default()
                    .fg(Color::Yellow)
                    .add_modifier(Modifier::BOLD),
            ),
        title_row,
    );

    let body = vec![
        Line::from("Use arrows/WASD to move"),
        Line::from("[P] Pause"),
        Line::from(""),
        Line::from("[Enter]/[Space] Start"),
        Line::from("[Q] Quit"),
    ];
    frame.render_widget(
        Paragraph::new(body)
            .alignment(Alignment::Center)
            .block(Block::bordered().title(" start ")),
        body_row,
    );
}

/// Draws the pause screen as a centered popup.
pub fn render_pause_menu(frame: &mut Frame<'_>, area: Rect) {
    let popup = centered_popup(area, 60, 40);
    frame.render_widget(Clear, popup);

    let lines = vec![
        Line::from("PAUSED"),
        Line::from(""),
        Line::from("[P] Resume"),
        Line::from("[Q] Quit"),
    ];
    frame.render_widget(
        Paragraph::new(lines)
            .alignment(Alignment::Center)
            .block(Block::bordered().title(" pause ")),
        popup,
    );
}

/// Draws the end-of-run screen for a loss or a full board.
pub fn render_game_over_menu(
    frame: &mut Frame<'_>,
    area: Rect,
    status: GameStatus,
    death_reason: Option<DeathReason>,
    tick_count: u64,
    fruits_eaten: u32,
) {
    let popup = centered_popup(area, 70, 60);
    frame.render_widget(Clear, popup);

    let (headline, title) = if status == GameStatus::Victory {
        ("YOU WIN", " victory ")
    } else {
        ("GAME OVER", " game over ")
    };

    let lines = vec![
        Line::from(headline).style(Style::default().add_modifier(Modifier::BOLD)),
        Line::from(""),
        Line::from(outcome_text(status, death_reason)),
        Line::from(progress_text(tick_count, fruits_eaten)),
        Line::from(""),
        Line::from("[Enter]/[Q] Exit"),
    ];

    frame.render_widget(
        Paragraph::new(lines)
            .alignment(Alignment::Center)
            .block(Block::bordered().title(title)),
        popup,
    );
}

/// Plain-text reason for the end of a run.
#[must_use]
pub fn outcome_text(status: GameStatus, death_reason: Option<DeathReason>) -> &'static str {
    match (status, death_reason) {
        (GameStatus::Victory, _) => "The board is full!",
        (_, Some(DeathReason::WallCollision)) => "Cause: hit wall",
        (_, Some(DeathReason::SelfCollision)) => "Cause: hit yourself",
        (_, None) => "",
    }
}

fn centered_popup(area: Rect, width_percent: u16, height_percent: u16) -> Rect {
    let [_, mid, _] = Layout::vertical([
        Constraint::Percentage((100 - height_percent) / 2),
        Constraint::Percentage(height_percent),
        Constraint::Percentage((100 - height_percent) / 2),
    ])
    .areas(area);

    let [_, center, _] = Layout::horizontal([
        Constraint::Percentage((100 - width_percent) / 2),
        Constraint::Percentage(width_percent),
        Constraint::Percentage((100 - width_percent) / 2),
    ])
    .areas(mid);

    center
}

#[cfg(test)]
mod tests {
    use super::outcome_text;
    use crate::game::{DeathReason, GameStatus};

    #[test]
    fn outcome_names_the_cause() {
        assert_eq!(
            outcome_text(GameStatus::GameOver, Some(DeathReason::SelfCollision)),
            "Cause: hit yourself"
        );
        assert_eq!(
            outcome_text(GameStatus::GameOver, Some(DeathReason::WallCollision)),
            "Cause: hit wall"
        );
        assert_eq!(outcome_text(GameStatus::Victory, None), "The board is full!");
    }
}
