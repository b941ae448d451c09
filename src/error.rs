use std::io;
use std::path::PathBuf;

use thiserror::Error;

use crate::config::MIN_GRID_DIMENSION;

/// Failures raised by the game state engine and its setup.
///
/// Collisions and a full board are not errors; they are reported through
/// [`crate::game::TickResult`].
#[derive(Debug, Error)]
pub enum GameError {
    /// Grid width or height below the playable minimum.
    #[error(
        "grid must be at least {min}x{min} cells, got {width}x{height}",
        min = MIN_GRID_DIMENSION
    )]
    InvalidDimension { width: u16, height: u16 },

    /// Operation called out of sequence, e.g. serializing before a buffer exists.
    #[error("invalid state: {0}")]
    State(&'static str),

    /// Malformed constructor input.
    #[error("invalid argument: {0}")]
    InvalidArgument(String),

    #[error("failed to read symbol table {}: {source}", .path.display())]
    SymbolIo {
        path: PathBuf,
        #[source]
        source: io::Error,
    },

    #[error("failed to parse symbol table: {0}")]
    SymbolParse(#[from] serde_json::Error),
}

impl From<GameError> for io::Error {
    fn from(error: GameError) -> Self {
        match error {
            GameError::SymbolIo { source, .. } => source,
            other => io::Error::new(io::ErrorKind::InvalidInput, other),
        }
    }
}
