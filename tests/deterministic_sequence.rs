use grid_snake::config::GridSize;
use grid_snake::game::{DeathReason, GameState, GameStatus, TickResult};
use grid_snake::input::{Direction, GameInput};
use grid_snake::snake::{Position, Snake};
use grid_snake::symbols::SymbolTable;

fn state_with_snake(size: GridSize, cells: &[(i32, i32)]) -> GameState {
    let mut state =
        GameState::new_with_seed(size, SymbolTable::classic(), 42).expect("valid state");
    let positions: Vec<Position> = cells.iter().map(|&(x, y)| Position { x, y }).collect();
    let snake = Snake::new(state.registry.allocate_id(), &positions).expect("valid snake");
    state.replace_snake(snake);
    state
}

#[test]
fn stepwise_fruit_collection_and_wall_collision() {
    let mut state = state_with_snake(
        GridSize {
            width: 6,
            height: 4,
        },
        &[(1, 1), (0, 1)],
    );
    state
        .place_fruit(Position { x: 2, y: 1 })
        .expect("cell should be free");

    let outcome = state.tick(None).expect("tick should succeed");
    assert_eq!(outcome.result, TickResult::Continue);
    assert_eq!(state.snake.head(), Position { x: 2, y: 1 });

    let outcome = state.tick(None).expect("tick should succeed");
    assert!(outcome.ate_fruit);
    assert_eq!(state.fruits_eaten, 1);
    assert_eq!(state.snake.len(), 3);
    assert_eq!(state.registry.total_occupied(), 3);

    state.apply_input(GameInput::Direction(Direction::Up));
    state.finish_tick();
    assert_eq!(state.status, GameStatus::Playing);
    assert_eq!(state.snake.head(), Position { x: 3, y: 0 });

    state.tick(None).expect("tick should succeed");
    let outcome = state.tick(None).expect("tick should succeed");
    assert_eq!(outcome.result, TickResult::Lost(DeathReason::WallCollision));
    assert_eq!(state.status, GameStatus::GameOver);
}

#[test]
fn buffer_and_registry_agree_on_every_tick() {
    let mut state = GameState::new_with_seed(
        GridSize {
            width: 12,
            height: 9,
        },
        SymbolTable::classic(),
        7,
    )
    .expect("valid state");
    let turns = [Direction::Up, Direction::Left, Direction::Down, Direction::Right];

    for step in 0..40 {
        let turn = turns[step / 3 % turns.len()];
        let outcome = state.tick(Some(turn)).expect("tick should succeed");
        if outcome.result != TickResult::Continue {
            break;
        }

        let snake_cells = state.snake.coords();
        assert_eq!(snake_cells.len(), state.snake.segments().len());
        assert_eq!(state.registry.coords_of(state.snake.id()), Some(snake_cells));

        let fruit_cells: usize = state.fruits.iter().map(|fruit| fruit.coords().len()).sum();
        assert_eq!(
            state.registry.total_occupied(),
            snake_cells.len() + fruit_cells
        );
    }
}
