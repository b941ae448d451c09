use std::slice;

use rand::rngs::StdRng;
use rand::seq::SliceRandom;
use rand::SeedableRng;
use tracing::{debug, info, warn};

use crate::config::{FRUIT_SPAWN_INTERVAL_TICKS, GridSize, MAX_FRUIT_SPAWN_ATTEMPTS};
use crate::error::GameError;
use crate::fruit::Fruit;
use crate::grid::Grid;
use crate::input::{direction_change_is_valid, Direction, GameInput};
use crate::registry::OccupancyRegistry;
use crate::snake::{Position, Snake};
use crate::symbols::SymbolTable;

/// Current high-level gameplay state.
#[derive(Debug, Clone, Copy, Eq, PartialEq)]
pub enum GameStatus {
    /// Waiting on the start screen; ticks are no-ops.
    Ready,
    Playing,
    Paused,
    GameOver,
    Victory,
}

/// Why a run ended in [`GameStatus::GameOver`].
#[derive(Debug, Clone, Copy, Eq, PartialEq)]
pub enum DeathReason {
    WallCollision,
    SelfCollision,
}

/// Terminal or continuing result of one tick.
#[derive(Debug, Clone, Copy, Eq, PartialEq)]
pub enum TickResult {
    Continue,
    Lost(DeathReason),
    Won,
}

/// What the front end needs to know after the resolve half of a tick.
#[derive(Debug, Clone, Copy, Eq, PartialEq)]
pub struct TickOutcome {
    pub result: TickResult,
    /// A fruit was eaten this tick; used for the audio cue.
    pub ate_fruit: bool,
}

impl TickOutcome {
    fn quiet(result: TickResult) -> Self {
        Self {
            result,
            ate_fruit: false,
        }
    }
}

/// Complete mutable game state for one session.
///
/// The registry lives and dies with the session.
#[derive(Debug, Clone)]
pub struct GameState {
    pub grid: Grid,
    pub registry: OccupancyRegistry,
    pub snake: Snake,
    pub fruits: Vec<Fruit>,
    pub tick_count: u64,
    pub fruits_eaten: u32,
    pub status: GameStatus,
    pub death_reason: Option<DeathReason>,
    pending_direction: Option<Direction>,
    rng: StdRng,
}

impl GameState {
    /// Creates a session seeded from system entropy.
    pub fn new(size: GridSize, symbols: SymbolTable) -> Result<Self, GameError> {
        Self::with_rng(size, symbols, StdRng::from_entropy())
    }

    /// Creates a deterministic state for tests and reproducible simulations.
    pub fn new_with_seed(
        size: GridSize,
        symbols: SymbolTable,
        seed: u64,
    ) -> Result<Self, GameError> {
        Self::with_rng(size, symbols, StdRng::seed_from_u64(seed))
    }

    fn with_rng(size: GridSize, symbols: SymbolTable, mut rng: StdRng) -> Result<Self, GameError> {
        let mut grid = Grid::new(size, symbols)?;
        let mut registry = OccupancyRegistry::new();
        let snake = grid.spawn_snake(&mut rng, &mut registry)?;
        snake.occupy(&mut registry);
        // Gives the start screen a board to draw.
        grid.rebuild_render_buffer(slice::from_ref(&snake), &[])?;

        info!(
            width = size.width,
            height = size.height,
            head_x = snake.head().x,
            head_y = snake.head().y,
            "game session started"
        );

        Ok(Self {
            grid,
            registry,
            snake,
            fruits: Vec::new(),
            tick_count: 0,
            fruits_eaten: 0,
            status: GameStatus::Playing,
            death_reason: None,
            pending_direction: None,
            rng,
        })
    }

    #[must_use]
    pub fn bounds(&self) -> GridSize {
        self.grid.size()
    }

    /// Swaps in a different snake, keeping the registry in step.
    pub fn replace_snake(&mut self, snake: Snake) {
        self.snake.vacate(&mut self.registry);
        self.snake = snake;
        self.snake.occupy(&mut self.registry);
        self.pending_direction = None;
    }

    /// Registers and activates a fruit at `position`.
    ///
    /// Fails if the cell is off the grid or already occupied.
    pub fn place_fruit(&mut self, position: Position) -> Result<(), GameError> {
        if !position.is_within_bounds(self.bounds()) || self.registry.contains(position) {
            return Err(GameError::InvalidArgument(format!(
                "cannot place fruit at ({}, {})",
                position.x, position.y
            )));
        }

        let fruit = Fruit::new(self.registry.allocate_id(), position);
        fruit.occupy(&mut self.registry);
        self.fruits.push(fruit);
        Ok(())
    }

    /// Runs both halves of a tick with `input` as the only input of the wait window.
    pub fn tick(&mut self, input: Option<Direction>) -> Result<TickOutcome, GameError> {
        let outcome = self.begin_tick()?;
        if outcome.result == TickResult::Continue {
            if let Some(direction) = input {
                self.apply_input(GameInput::Direction(direction));
            }
            self.finish_tick();
        }
        Ok(outcome)
    }

    /// Collision checks, win check, fruit consumption and buffer rebuild.
    ///
    /// The front end displays the rebuilt buffer and collects input before
    /// calling [`Self::finish_tick`].
    pub fn begin_tick(&mut self) -> Result<TickOutcome, GameError> {
        match self.status {
            GameStatus::Playing => {}
            GameStatus::Ready | GameStatus::Paused => {
                return Ok(TickOutcome::quiet(TickResult::Continue));
            }
            GameStatus::GameOver => {
                let reason = self.death_reason.unwrap_or(DeathReason::WallCollision);
                return Ok(TickOutcome::quiet(TickResult::Lost(reason)));
            }
            GameStatus::Victory => return Ok(TickOutcome::quiet(TickResult::Won)),
        }

        if self.snake.is_out_of_bounds(self.bounds()) {
            return Ok(self.lose(DeathReason::WallCollision));
        }

        if self.snake.is_self_colliding() {
            return Ok(self.lose(DeathReason::SelfCollision));
        }

        // A head resting on a fruit holds one cell twice, so count cells, not entries.
        if self.registry.distinct_occupied() == self.bounds().total_cells() {
            self.status = GameStatus::Victory;
            info!(
                ticks = self.tick_count,
                fruits = self.fruits_eaten,
                "board filled, game won"
            );
            return Ok(TickOutcome::quiet(TickResult::Won));
        }

        let ate_fruit = self.consume_fruit();

        self.grid
            .rebuild_render_buffer(slice::from_ref(&self.snake), &self.fruits)?;

        Ok(TickOutcome {
            result: TickResult::Continue,
            ate_fruit,
        })
    }

    /// Moves the snake and periodically spawns fruit.
    pub fn finish_tick(&mut self) {
        if self.status != GameStatus::Playing {
            return;
        }

        let direction = self
            .pending_direction
            .take()
            .filter(|next| direction_change_is_valid(self.snake.direction(), *next))
            .unwrap_or_else(|| self.snake.direction());
        self.snake.move_to(direction, &mut self.registry);
        self.tick_count += 1;

        if self.tick_count % FRUIT_SPAWN_INTERVAL_TICKS == 0 && self.fruits.is_empty() {
            self.spawn_fruit();
        }
    }

    /// Applies one external input event.
    pub fn apply_input(&mut self, input: GameInput) {
        match input {
            GameInput::Direction(direction) => {
                if self.status == GameStatus::Playing {
                    self.steer(direction);
                }
            }
            GameInput::Pause => {
                self.status = match self.status {
                    GameStatus::Playing => GameStatus::Paused,
                    GameStatus::Paused => GameStatus::Playing,
                    other => other,
                };
            }
            GameInput::Quit | GameInput::Confirm => {}
        }
    }

    /// Buffers a turn for the next move. Reversals of the head are dropped so
    /// an earlier valid turn in the same window survives.
    fn steer(&mut self, direction: Direction) {
        if direction_change_is_valid(self.snake.direction(), direction) {
            self.pending_direction = Some(direction);
        }
    }

    fn lose(&mut self, reason: DeathReason) -> TickOutcome {
        self.status = GameStatus::GameOver;
        self.death_reason = Some(reason);
        info!(
            ?reason,
            ticks = self.tick_count,
            fruits = self.fruits_eaten,
            "game over"
        );
        TickOutcome::quiet(TickResult::Lost(reason))
    }

    /// Eats at most one fruit per tick.
    fn consume_fruit(&mut self) -> bool {
        let eaten = self
            .fruits
            .iter()
            .position(|fruit| self.snake.eats(fruit, &mut self.registry));

        let Some(index) = eaten else {
            return false;
        };

        let fruit = self.fruits.remove(index);
        self.fruits_eaten += 1;
        self.snake.grow(&mut self.registry);
        debug!(
            x = fruit.position().x,
            y = fruit.position().y,
            length = self.snake.len(),
            "fruit eaten"
        );
        true
    }

    /// Places one fruit on a free cell.
    ///
    /// Random interior candidates are tried a bounded number of times before
    /// falling back to the list of free cells.
    fn spawn_fruit(&mut self) {
        if self.registry.total_occupied() >= self.bounds().total_cells() {
            return;
        }

        for _ in 0..MAX_FRUIT_SPAWN_ATTEMPTS {
            let fruit = self.grid.spawn_fruit(&mut self.rng, &mut self.registry);
            if !self.registry.contains_any(fruit.coords()) {
                self.activate_fruit(fruit);
                return;
            }
        }

        let mut free = self.grid.free_cells(&self.registry, true);
        if free.is_empty() {
            free = self.grid.free_cells(&self.registry, false);
        }

        match free.choose(&mut self.rng).copied() {
            Some(position) => {
                warn!(
                    attempts = MAX_FRUIT_SPAWN_ATTEMPTS,
                    "random fruit placement exhausted, using free-cell fallback"
                );
                let fruit = Fruit::new(self.registry.allocate_id(), position);
                self.activate_fruit(fruit);
            }
            None => debug!("no free cell for fruit"),
        }
    }

    fn activate_fruit(&mut self, fruit: Fruit) {
        fruit.occupy(&mut self.registry);
        debug!(
            x = fruit.position().x,
            y = fruit.position().y,
            tick = self.tick_count,
            "fruit spawned"
        );
        self.fruits.push(fruit);
    }
}
