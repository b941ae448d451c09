use rand::seq::SliceRandom;
use rand::Rng;

use crate::config::GridSize;
use crate::error::GameError;
use crate::fruit::Fruit;
use crate::input::Direction;
use crate::registry::OccupancyRegistry;
use crate::snake::{Position, Snake};
use crate::symbols::{Cell, Role, SymbolTable};

/// The playing field: an all-empty template plus a render buffer rebuilt each tick.
#[derive(Debug, Clone)]
pub struct Grid {
    size: GridSize,
    symbols: SymbolTable,
    template: Vec<Vec<Cell>>,
    buffer: Option<Vec<Vec<Cell>>>,
}

impl Grid {
    /// Creates a grid, rejecting sizes below the playable minimum.
    pub fn new(size: GridSize, symbols: SymbolTable) -> Result<Self, GameError> {
        size.validate()?;

        let row = vec![Cell::Empty; usize::from(size.width)];
        let template = vec![row; usize::from(size.height)];

        Ok(Self {
            size,
            symbols,
            template,
            buffer: None,
        })
    }

    #[must_use]
    pub fn size(&self) -> GridSize {
        self.size
    }

    #[must_use]
    pub fn symbols(&self) -> &SymbolTable {
        &self.symbols
    }

    /// Spawns an unregistered two-segment snake.
    ///
    /// The head lands strictly inside the outer ring so every neighbour,
    /// including the randomly chosen tail cell, is on the grid.
    pub fn spawn_snake<R: Rng + ?Sized>(
        &self,
        rng: &mut R,
        registry: &mut OccupancyRegistry,
    ) -> Result<Snake, GameError> {
        let head = self.random_interior_position(rng);
        let tail_direction = *Direction::ALL
            .choose(rng)
            .ok_or(GameError::State("no directions to choose from"))?;
        let tail = head.step(tail_direction);

        Snake::new(registry.allocate_id(), &[head, tail])
    }

    /// Picks a random interior cell for a fruit without checking occupancy.
    ///
    /// The caller validates the candidate against the registry and registers it.
    pub fn spawn_fruit<R: Rng + ?Sized>(
        &self,
        rng: &mut R,
        registry: &mut OccupancyRegistry,
    ) -> Fruit {
        Fruit::new(registry.allocate_id(), self.random_interior_position(rng))
    }

    /// Cells not present in `registry`, row by row.
    #[must_use]
    pub fn free_cells(&self, registry: &OccupancyRegistry, interior_only: bool) -> Vec<Position> {
        let margin = i32::from(interior_only);
        let width = i32::from(self.size.width);
        let height = i32::from(self.size.height);

        (margin..height - margin)
            .flat_map(|y| (margin..width - margin).map(move |x| Position { x, y }))
            .filter(|position| !registry.contains(*position))
            .collect()
    }

    /// Resets the render buffer from the template and stamps snakes, then fruit.
    pub fn rebuild_render_buffer(
        &mut self,
        snakes: &[Snake],
        fruits: &[Fruit],
    ) -> Result<(), GameError> {
        if self.template.is_empty() {
            return Err(GameError::State("empty grid template has not been created"));
        }

        self.buffer = Some(self.template.clone());

        for snake in snakes {
            for (index, segment) in snake.segments().iter().enumerate() {
                let role = if index == 0 { Role::Head } else { Role::Tail };
                self.stamp(segment.position, Cell::Snake(role, segment.facing))?;
            }
        }

        for fruit in fruits {
            self.stamp(fruit.position(), Cell::Fruit)?;
        }

        Ok(())
    }

    /// Returns the buffer as newline-terminated rows of symbols.
    pub fn serialize_buffer(&self) -> Result<String, GameError> {
        let buffer = self
            .buffer
            .as_ref()
            .ok_or(GameError::State("render buffer has not been built"))?;

        let row_width = usize::from(self.size.width) * self.symbols.cell_width() + 1;
        let mut out = String::with_capacity(row_width * buffer.len());
        for row in buffer {
            for cell in row {
                out.push_str(self.symbols.symbol(*cell));
            }
            out.push('\n');
        }

        Ok(out)
    }

    /// Returns the buffered cell at `position`, if a buffer exists and the position is on the grid.
    #[must_use]
    pub fn cell_at(&self, position: Position) -> Option<Cell> {
        let (x, y) = self.index_of(position)?;
        self.buffer.as_ref().map(|buffer| buffer[y][x])
    }

    fn stamp(&mut self, position: Position, cell: Cell) -> Result<(), GameError> {
        let index = self.index_of(position);
        let buffer = self
            .buffer
            .as_mut()
            .ok_or(GameError::State("render buffer has not been built"))?;

        // Off-grid segments are not drawn.
        if let Some((x, y)) = index {
            buffer[y][x] = cell;
        }

        Ok(())
    }

    fn index_of(&self, position: Position) -> Option<(usize, usize)> {
        if !position.is_within_bounds(self.size) {
            return None;
        }

        Some((usize::try_from(position.x).ok()?, usize::try_from(position.y).ok()?))
    }

    fn random_interior_position<R: Rng + ?Sized>(&self, rng: &mut R) -> Position {
        Position {
            x: rng.gen_range(1..=i32::from(self.size.width) - 2),
            y: rng.gen_range(1..=i32::from(self.size.height) - 2),
        }
    }
}

#[cfg(test)]
mod tests {
    use rand::rngs::StdRng;
    use rand::SeedableRng;

    use super::Grid;
    use crate::config::GridSize;
    use crate::error::GameError;
    use crate::fruit::Fruit;
    use crate::input::Direction;
    use crate::registry::OccupancyRegistry;
    use crate::snake::{Position, Snake};
    use crate::symbols::{Cell, Role, SymbolTable};

    fn grid(width: u16, height: u16) -> Grid {
        Grid::new(GridSize { width, height }, SymbolTable::classic())
            .expect("test grid should be valid")
    }

    #[test]
    fn construction_enforces_minimum_size() {
        assert!(Grid::new(GridSize { width: 3, height: 3 }, SymbolTable::classic()).is_ok());
        assert!(matches!(
            Grid::new(GridSize { width: 2, height: 9 }, SymbolTable::classic()),
            Err(GameError::InvalidDimension { .. })
        ));
        assert!(matches!(
            Grid::new(GridSize { width: 9, height: 2 }, SymbolTable::classic()),
            Err(GameError::InvalidDimension { .. })
        ));
    }

    #[test]
    fn empty_grid_serializes_to_rows_of_empty_symbols() {
        let mut grid = grid(4, 3);

        grid.rebuild_render_buffer(&[], &[])
            .expect("rebuild should succeed");

        assert_eq!(
            grid.serialize_buffer().expect("buffer exists"),
            "....\n....\n....\n"
        );
    }

    #[test]
    fn serializing_before_first_rebuild_is_a_state_error() {
        let grid = grid(5, 5);

        assert!(matches!(
            grid.serialize_buffer(),
            Err(GameError::State(_))
        ));
        assert_eq!(grid.cell_at(Position { x: 0, y: 0 }), None);
    }

    #[test]
    fn snake_and_fruit_are_stamped_with_role_symbols() {
        let mut grid = grid(5, 4);
        let mut registry = OccupancyRegistry::new();
        let snake = Snake::new(
            registry.allocate_id(),
            &[
                Position { x: 2, y: 1 },
                Position { x: 1, y: 1 },
                Position { x: 1, y: 2 },
            ],
        )
        .expect("valid snake");
        let fruit = Fruit::new(registry.allocate_id(), Position { x: 4, y: 3 });

        grid.rebuild_render_buffer(&[snake], &[fruit])
            .expect("rebuild should succeed");

        assert_eq!(
            grid.cell_at(Position { x: 2, y: 1 }),
            Some(Cell::Snake(Role::Head, Direction::Right))
        );
        assert_eq!(
            grid.cell_at(Position { x: 1, y: 2 }),
            Some(Cell::Snake(Role::Tail, Direction::Up))
        );
        assert_eq!(
            grid.serialize_buffer().expect("buffer exists"),
            ".....\n.|>..\n.|...\n....@\n"
        );
    }

    #[test]
    fn rebuild_discards_previous_frame() {
        let mut grid = grid(3, 3);
        let mut registry = OccupancyRegistry::new();
        let fruit = Fruit::new(registry.allocate_id(), Position { x: 1, y: 1 });

        grid.rebuild_render_buffer(&[], &[fruit])
            .expect("rebuild should succeed");
        grid.rebuild_render_buffer(&[], &[])
            .expect("rebuild should succeed");

        assert_eq!(grid.cell_at(Position { x: 1, y: 1 }), Some(Cell::Empty));
    }

    #[test]
    fn spawned_snakes_start_inside_with_adjacent_tail() {
        let mut rng = StdRng::seed_from_u64(11);
        let mut registry = OccupancyRegistry::new();
        let grid = grid(6, 4);

        for _ in 0..200 {
            let snake = grid
                .spawn_snake(&mut rng, &mut registry)
                .expect("spawn should succeed");
            let head = snake.head();

            assert_eq!(snake.len(), 2);
            assert!((1..=4).contains(&head.x) && (1..=2).contains(&head.y));
            assert!(!snake.is_out_of_bounds(grid.size()));
            assert!(snake.coords()[1].direction_to(head).is_some());
            assert!(!snake.is_self_colliding());
        }
    }

    #[test]
    fn spawned_fruit_stays_in_the_interior() {
        let mut rng = StdRng::seed_from_u64(5);
        let mut registry = OccupancyRegistry::new();
        let grid = grid(3, 5);

        for _ in 0..100 {
            let fruit = grid.spawn_fruit(&mut rng, &mut registry);
            assert_eq!(fruit.position().x, 1);
            assert!((1..=3).contains(&fruit.position().y));
        }
        assert!(registry.is_empty());
    }

    #[test]
    fn free_cells_skip_registered_positions() {
        let grid = grid(4, 4);
        let mut registry = OccupancyRegistry::new();
        let id = registry.allocate_id();
        registry.register(id, &[Position { x: 1, y: 1 }, Position { x: 2, y: 1 }]);

        assert_eq!(
            grid.free_cells(&registry, true),
            vec![Position { x: 1, y: 2 }, Position { x: 2, y: 2 }]
        );
        assert_eq!(grid.free_cells(&registry, false).len(), 14);
    }
}
