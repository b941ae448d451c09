use ratatui::layout::Rect;
use ratatui::style::{Color, Style};
use ratatui::text::Text;
use ratatui::widgets::{Block, Paragraph};
use ratatui::Frame;

use crate::game::{GameState, GameStatus};
use crate::ui::hud::render_hud;
use crate::ui::menu::{render_game_over_menu, render_pause_menu, render_start_menu};

/// Renders the full game frame from immutable state.
///
/// The board is drawn from the grid's serialized render buffer, so the
/// frame always shows the state of the last resolved tick.
pub fn render(frame: &mut Frame<'_>, state: &GameState) {
    let area = frame.area();
    let play_area = render_hud(frame, area, state);

    let bounds = state.bounds();
    let cell_width = state.grid.symbols().cell_width();
    let board_width = usize::from(bounds.width) * cell_width + 2;
    let board_height = usize::from(bounds.height) + 2;
    let board_area = centered_rect(play_area, board_width, board_height);

    let block = Block::bordered()
        .title(" snake ")
        .border_style(Style::new().fg(Color::Gray));

    let board = state
        .grid
        .serialize_buffer()
        .map(|text| text.trim_end_matches('\n').to_owned())
        .unwrap_or_default();
    frame.render_widget(Paragraph::new(Text::from(board)).block(block), board_area);

    match state.status {
        GameStatus::Ready => render_start_menu(frame, play_area),
        GameStatus::Paused => render_pause_menu(frame, play_area),
        GameStatus::GameOver | GameStatus::Victory => render_game_over_menu(
            frame,
            play_area,
            state.status,
            state.death_reason,
            state.tick_count,
            state.fruits_eaten,
        ),
        GameStatus::Playing => {}
    }
}

/// Centers a `width` x `height` box in `area`, clamped to the area.
fn centered_rect(area: Rect, width: usize, height: usize) -> Rect {
    let width = u16::try_from(width).unwrap_or(u16::MAX).min(area.width);
    let height = u16::try_from(height).unwrap_or(u16::MAX).min(area.height);

    Rect {
        x: area.x + (area.width - width) / 2,
        y: area.y + (area.height - height) / 2,
        width,
        height,
    }
}

#[cfg(test)]
mod tests {
    use ratatui::backend::TestBackend;
    use ratatui::layout::Rect;
    use ratatui::Terminal;

    use super::{centered_rect, render};
    use crate::config::GridSize;
    use crate::game::{GameState, GameStatus};
    use crate::symbols::SymbolTable;

    fn rendered_text(state: &GameState) -> String {
        let backend = TestBackend::new(60, 20);
        let mut terminal = Terminal::new(backend).expect("test terminal should build");
        terminal
            .draw(|frame| render(frame, state))
            .expect("draw should succeed");

        terminal
            .backend()
            .buffer()
            .content()
            .iter()
            .map(|cell| cell.symbol())
            .collect()
    }

    #[test]
    fn centered_rect_is_clamped_to_area() {
        let area = Rect::new(0, 0, 10, 4);

        assert_eq!(centered_rect(area, 4, 2), Rect::new(3, 1, 4, 2));
        assert_eq!(centered_rect(area, 40, 20), area);
    }

    #[test]
    fn frame_shows_board_and_progress() {
        let mut state = GameState::new_with_seed(
            GridSize {
                width: 8,
                height: 6,
            },
            SymbolTable::classic(),
            3,
        )
        .expect("valid state");
        state.begin_tick().expect("tick should succeed");

        let text = rendered_text(&state);

        assert!(text.contains("0 steps x 0 fruit"));
        assert!(text.contains("snake"));
        assert!(text.contains("........"));
    }

    #[test]
    fn pause_popup_is_drawn_when_paused() {
        let mut state = GameState::new_with_seed(
            GridSize {
                width: 8,
                height: 6,
            },
            SymbolTable::classic(),
            4,
        )
        .expect("valid state");
        state.tick(None).expect("tick should succeed");
        state.status = GameStatus::Paused;

        assert!(rendered_text(&state).contains("PAUSED"));
    }

    #[test]
    fn start_popup_is_drawn_when_ready() {
        let mut state = GameState::new_with_seed(
            GridSize {
                width: 8,
                height: 6,
            },
            SymbolTable::classic(),
            5,
        )
        .expect("valid state");
        state.status = GameStatus::Ready;

        let text = rendered_text(&state);

        assert!(text.contains("SNAKE GAME"));
        assert!(!text.contains("PAUSED"));
    }
}
