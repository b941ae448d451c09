use crate::error::GameError;

/// Smallest accepted grid width or height.
///
/// A snake's head spawns on an interior cell, which needs a ring around it.
pub const MIN_GRID_DIMENSION: u16 = 3;

/// Base tick interval in milliseconds.
pub const DEFAULT_TICK_INTERVAL_MS: u64 = 100;

/// Minimum tick interval in milliseconds.
pub const MIN_TICK_INTERVAL_MS: u64 = 20;

/// Upper bound for a single input poll inside a tick's wait window.
pub const INPUT_POLL_INTERVAL_MS: u64 = 20;

/// A new fruit is considered every this many ticks when none is active.
pub const FRUIT_SPAWN_INTERVAL_TICKS: u64 = 5;

/// Random placement attempts before falling back to enumerating free cells.
pub const MAX_FRUIT_SPAWN_ATTEMPTS: usize = 64;

/// Name of the symbol table used when none is requested.
pub const DEFAULT_SYMBOLS: &str = "classic";

/// Logical grid dimensions passed through the game as a named type.
#[derive(Debug, Clone, Copy, Eq, PartialEq)]
pub struct GridSize {
    pub width: u16,
    pub height: u16,
}

impl GridSize {
    /// Builds a size, rejecting dimensions below [`MIN_GRID_DIMENSION`].
    pub fn validated(width: u16, height: u16) -> Result<Self, GameError> {
        let size = Self { width, height };
        size.validate()?;
        Ok(size)
    }

    /// Checks the playable minimum on both axes.
    pub fn validate(self) -> Result<(), GameError> {
        if self.width < MIN_GRID_DIMENSION || self.height < MIN_GRID_DIMENSION {
            return Err(GameError::InvalidDimension {
                width: self.width,
                height: self.height,
            });
        }

        Ok(())
    }

    /// Returns the total number of cells in the grid.
    #[must_use]
    pub fn total_cells(self) -> usize {
        usize::from(self.width) * usize::from(self.height)
    }
}

/// Parses one dimension typed at the startup prompt.
pub fn parse_dimension(raw: &str) -> Result<u16, GameError> {
    raw.trim()
        .parse::<u16>()
        .map_err(|_| GameError::InvalidArgument(format!("'{}' is not a number", raw.trim())))
}
