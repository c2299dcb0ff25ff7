use std::io;
use std::path::PathBuf;

use thiserror::Error;

use crate::types::{Role, Tile};

/// Fatal problems with a game configuration, raised at construction.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum ConfigError {
    #[error("maze has no rows")]
    EmptyMaze,

    #[error("maze row {row} has {found} cells, expected {expected}")]
    RaggedRow {
        row: usize,
        expected: usize,
        found: usize,
    },

    #[error("invalid maze marker {found:?} at column {col}, row {row}")]
    InvalidMarker { row: usize, col: usize, found: char },

    #[error("wall and open markers are both {0:?}")]
    AmbiguousMarkers(char),

    #[error("maze has no open cells")]
    NoOpenCells,

    #[error("tile size must be positive, got {0}")]
    InvalidTileSize(i32),

    #[error("tile size {tile_size} is too large for a {width}x{height} maze")]
    TileSizeTooLarge {
        tile_size: i32,
        width: i32,
        height: i32,
    },

    #[error("{role} speed must be positive, got {speed}")]
    InvalidSpeed { role: Role, speed: i32 },

    #[error("{role} speed {speed} does not evenly divide tile size {tile_size}")]
    SpeedDoesNotDivideTile {
        role: Role,
        speed: i32,
        tile_size: i32,
    },

    #[error("pursuer cadence must be at least one tick")]
    ZeroCadence,

    #[error("{role} start {tile} is outside the maze")]
    StartOutOfBounds { role: Role, tile: Tile },

    #[error("{role} start {tile} is a wall")]
    StartOnWall { role: Role, tile: Tile },
}

#[derive(Debug, Error)]
pub enum LoadError {
    #[error("failed to read '{path}'")]
    Io {
        path: PathBuf,
        #[source]
        source: io::Error,
    },

    #[error("failed to parse config '{path}'")]
    Json {
        path: PathBuf,
        #[source]
        source: serde_json::Error,
    },

    #[error(transparent)]
    Config(#[from] ConfigError),
}
