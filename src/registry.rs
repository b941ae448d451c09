use std::collections::HashMap;

use crate::snake::Position;

/// Identity of one game object within a session.
#[derive(Debug, Clone, Copy, Eq, PartialEq, Hash, PartialOrd, Ord)]
pub struct ObjectId(u64);

/// Tracks which cells each game object currently occupies.
///
/// The registry never owns snakes or fruit. Objects insert and refresh their
/// own coordinate sets keyed by [`ObjectId`]; a per-cell reference count keeps
/// single-cell lookups constant time.
#[derive(Debug, Clone, Default)]
pub struct OccupancyRegistry {
    entries: HashMap<ObjectId, Vec<Position>>,
    cells: HashMap<Position, usize>,
    total: usize,
    next_id: u64,
}

impl OccupancyRegistry {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Hands out an identity that has not been used in this registry.
    pub fn allocate_id(&mut self) -> ObjectId {
        let id = ObjectId(self.next_id);
        self.next_id += 1;
        id
    }

    /// Inserts or overwrites the coordinate set for `id`.
    pub fn register(&mut self, id: ObjectId, coords: &[Position]) {
        self.unregister(id);

        for &position in coords {
            *self.cells.entry(position).or_insert(0) += 1;
        }
        self.total += coords.len();
        self.entries.insert(id, coords.to_vec());
    }

    /// Removes the entry for `id`. Returns `false` when nothing was registered.
    pub fn unregister(&mut self, id: ObjectId) -> bool {
        let Some(coords) = self.entries.remove(&id) else {
            return false;
        };

        for position in &coords {
            if let Some(count) = self.cells.get_mut(position) {
                *count -= 1;
                if *count == 0 {
                    self.cells.remove(position);
                }
            }
        }
        self.total -= coords.len();
        true
    }

    /// Returns true if any registered object occupies `position`.
    #[must_use]
    pub fn contains(&self, position: Position) -> bool {
        self.cells.contains_key(&position)
    }

    /// Returns true if any of `coords` is occupied by any registered object.
    ///
    /// The caller's own entry takes part in the check; see
    /// [`Self::contains_any_except`] to leave it out.
    #[must_use]
    pub fn contains_any(&self, coords: &[Position]) -> bool {
        coords.iter().any(|position| self.contains(*position))
    }

    /// Like [`Self::contains_any`], ignoring the cells registered under `exclude`.
    #[must_use]
    pub fn contains_any_except(&self, coords: &[Position], exclude: ObjectId) -> bool {
        let own = self.entries.get(&exclude);

        coords.iter().any(|position| {
            let total = self.cells.get(position).copied().unwrap_or(0);
            let own_count = own.map_or(0, |cells| {
                cells.iter().filter(|cell| *cell == position).count()
            });
            total > own_count
        })
    }

    /// Sum of occupied-cell counts across all entries.
    #[must_use]
    pub fn total_occupied(&self) -> usize {
        self.total
    }

    /// Number of distinct cells held by at least one entry.
    #[must_use]
    pub fn distinct_occupied(&self) -> usize {
        self.cells.len()
    }

    /// Returns the coordinates registered for `id`.
    #[must_use]
    pub fn coords_of(&self, id: ObjectId) -> Option<&[Position]> {
        self.entries.get(&id).map(Vec::as_slice)
    }

    /// Number of registered objects.
    #[must_use]
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}
