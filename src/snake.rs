use crate::config::GridSize;
use crate::error::GameError;
use crate::fruit::Fruit;
use crate::input::Direction;
use crate::registry::{ObjectId, OccupancyRegistry};

/// Shortest snake that can be constructed.
pub const MIN_SNAKE_LEN: usize = 2;

/// Grid position in logical cell coordinates.
#[derive(Debug, Clone, Copy, Eq, PartialEq, Hash, PartialOrd, Ord)]
pub struct Position {
    pub x: i32,
    pub y: i32,
}

impl Position {
    /// Returns true when the position lies inside the bounds.
    #[must_use]
    pub fn is_within_bounds(self, bounds: GridSize) -> bool {
        self.x >= 0
            && self.y >= 0
            && self.x < i32::from(bounds.width)
            && self.y < i32::from(bounds.height)
    }

    /// Returns the neighbouring position one unit along `direction`.
    #[must_use]
    pub fn step(self, direction: Direction) -> Self {
        let (dx, dy) = direction.delta();
        Self {
            x: self.x + dx,
            y: self.y + dy,
        }
    }

    /// Direction of a single step from `self` to `to`, if they are orthogonal neighbours.
    #[must_use]
    pub fn direction_to(self, to: Position) -> Option<Direction> {
        Direction::ALL
            .into_iter()
            .find(|direction| self.step(*direction) == to)
    }
}

/// One body cell and the direction it moved in on the last step.
#[derive(Debug, Clone, Copy, Eq, PartialEq)]
pub struct Segment {
    pub position: Position,
    pub facing: Direction,
}

/// The player snake: an ordered chain of segments, head first.
///
/// `coords` is the position projection of `body` and is recomputed after
/// every mutation, before the registry entry is refreshed.
#[derive(Debug, Clone)]
pub struct Snake {
    id: ObjectId,
    body: Vec<Segment>,
    coords: Vec<Position>,
}

impl Snake {
    /// Builds a snake from head-first positions, inferring each segment's facing.
    ///
    /// Every segment but the last faces away from its successor; the last one
    /// faces toward its predecessor. The snake is not registered until
    /// [`Snake::occupy`] is called.
    pub fn new(id: ObjectId, positions: &[Position]) -> Result<Self, GameError> {
        if positions.len() < MIN_SNAKE_LEN {
            return Err(GameError::InvalidArgument(format!(
                "a snake needs at least {MIN_SNAKE_LEN} segments, got {}",
                positions.len()
            )));
        }

        let mut body = Vec::with_capacity(positions.len());
        for pair in positions.windows(2) {
            let facing = pair[1].direction_to(pair[0]).ok_or_else(|| {
                GameError::InvalidArgument(format!(
                    "segments ({}, {}) and ({}, {}) are not adjacent",
                    pair[0].x, pair[0].y, pair[1].x, pair[1].y
                ))
            })?;
            body.push(Segment {
                position: pair[0],
                facing,
            });
        }

        // Adjacency of the final pair was checked above.
        let last = positions[positions.len() - 1];
        let previous = positions[positions.len() - 2];
        let facing = last
            .direction_to(previous)
            .ok_or_else(|| GameError::InvalidArgument("tail segment is not adjacent".to_owned()))?;
        body.push(Segment {
            position: last,
            facing,
        });

        let coords = positions.to_vec();
        Ok(Self { id, body, coords })
    }

    #[must_use]
    pub fn id(&self) -> ObjectId {
        self.id
    }

    /// Registers the snake's cells.
    pub fn occupy(&self, registry: &mut OccupancyRegistry) {
        registry.register(self.id, &self.coords);
    }

    /// Removes the snake's cells from the registry.
    pub fn vacate(&self, registry: &mut OccupancyRegistry) {
        registry.unregister(self.id);
    }

    /// Advances every segment one cell.
    ///
    /// The head turns to `direction` and each following segment adopts the
    /// facing its predecessor had before the step, so the body retraces the
    /// head's path. Callers filter out reversals of the head's facing.
    pub fn move_to(&mut self, direction: Direction, registry: &mut OccupancyRegistry) {
        debug_assert!(direction != self.direction().opposite());

        let mut next_facing = direction;
        for segment in &mut self.body {
            let previous_facing = segment.facing;
            segment.facing = next_facing;
            segment.position = segment.position.step(next_facing);
            next_facing = previous_facing;
        }

        self.refresh(registry);
    }

    /// Appends a segment directly behind the current tail.
    pub fn grow(&mut self, registry: &mut OccupancyRegistry) {
        let tail = self.tail_segment();
        self.body.push(Segment {
            position: tail.position.step(tail.facing.opposite()),
            facing: tail.facing,
        });

        self.refresh(registry);
    }

    /// Returns true when the head sits on `fruit`, removing the fruit from the registry.
    ///
    /// Growth is left to the caller.
    pub fn eats(&self, fruit: &Fruit, registry: &mut OccupancyRegistry) -> bool {
        if self.head() != fruit.position() {
            return false;
        }

        fruit.vacate(registry);
        true
    }

    /// Returns true if the head overlaps any non-head segment.
    #[must_use]
    pub fn is_self_colliding(&self) -> bool {
        let head = self.head();
        self.coords.iter().skip(1).any(|position| *position == head)
    }

    /// Returns true if the head has left the grid.
    ///
    /// The body only ever trails through cells the head already visited, so
    /// the head is the only segment that needs checking.
    #[must_use]
    pub fn is_out_of_bounds(&self, bounds: GridSize) -> bool {
        !self.head().is_within_bounds(bounds)
    }

    /// Returns the current head position.
    #[must_use]
    pub fn head(&self) -> Position {
        self.body[0].position
    }

    /// Returns the direction the head moved in last.
    #[must_use]
    pub fn direction(&self) -> Direction {
        self.body[0].facing
    }

    /// Segments from head to tail.
    #[must_use]
    pub fn segments(&self) -> &[Segment] {
        &self.body
    }

    /// Occupied positions from head to tail.
    #[must_use]
    pub fn coords(&self) -> &[Position] {
        &self.coords
    }

    /// Returns true if any segment occupies `position`.
    #[must_use]
    pub fn occupies(&self, position: Position) -> bool {
        self.coords.contains(&position)
    }

    /// Returns current segment count.
    #[must_use]
    pub fn len(&self) -> usize {
        self.body.len()
    }

    /// Always false after construction; kept for the `len` convention.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.body.is_empty()
    }

    fn tail_segment(&self) -> Segment {
        self.body[self.body.len() - 1]
    }

    fn refresh(&mut self, registry: &mut OccupancyRegistry) {
        self.coords = self.body.iter().map(|segment| segment.position).collect();
        registry.register(self.id, &self.coords);
    }
}
