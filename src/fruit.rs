use std::slice;

use crate::registry::{ObjectId, OccupancyRegistry};
use crate::snake::Position;

/// A single fruit cell on the board.
#[derive(Debug, Clone, Copy, Eq, PartialEq)]
pub struct Fruit {
    id: ObjectId,
    position: Position,
}

impl Fruit {
    /// Creates an unregistered fruit at `position`.
    #[must_use]
    pub fn new(id: ObjectId, position: Position) -> Self {
        Self { id, position }
    }

    #[must_use]
    pub fn id(&self) -> ObjectId {
        self.id
    }

    #[must_use]
    pub fn position(&self) -> Position {
        self.position
    }

    /// The fruit's occupied cells, always exactly one.
    #[must_use]
    pub fn coords(&self) -> &[Position] {
        slice::from_ref(&self.position)
    }

    pub fn occupy(&self, registry: &mut OccupancyRegistry) {
        registry.register(self.id, self.coords());
    }

    pub fn vacate(&self, registry: &mut OccupancyRegistry) {
        registry.unregister(self.id);
    }
}

#[cfg(test)]
mod tests {
    use super::Fruit;
    use crate::registry::OccupancyRegistry;
    use crate::snake::Position;

    #[test]
    fn fruit_occupies_exactly_its_cell() {
        let mut registry = OccupancyRegistry::new();
        let fruit = Fruit::new(registry.allocate_id(), Position { x: 2, y: 1 });

        assert!(!registry.contains(fruit.position()));

        fruit.occupy(&mut registry);
        assert_eq!(registry.total_occupied(), 1);
        assert_eq!(fruit.coords(), &[Position { x: 2, y: 1 }]);

        fruit.vacate(&mut registry);
        assert!(registry.is_empty());
    }
}
