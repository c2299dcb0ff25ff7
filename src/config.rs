use std::fs;
use std::path::Path;

use serde::{Deserialize, Serialize};

use crate::constants::{
    DEFAULT_MAZE, PLAYER_SPEED, PLAYER_START, PURSUER_CADENCE, PURSUER_SPEED, PURSUER_START,
    TILE_SIZE,
};
use crate::engine::PursuitMode;
use crate::error::{ConfigError, LoadError};
use crate::types::{Role, Tile};
use crate::world::{split_rows, MarkerSet, Maze};

#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct GameConfig {
    pub maze: Vec<String>,
    pub markers: MarkerSet,
    pub tile_size: i32,
    pub player_speed: i32,
    pub pursuer_speed: i32,
    pub pursuer_cadence: u32,
    pub player_start: Tile,
    pub pursuer_start: Tile,
    pub pursuit_mode: PursuitMode,
}

impl Default for GameConfig {
    fn default() -> Self {
        Self {
            maze: DEFAULT_MAZE.iter().map(|row| row.to_string()).collect(),
            markers: MarkerSet::default(),
            tile_size: TILE_SIZE,
            player_speed: PLAYER_SPEED,
            pursuer_speed: PURSUER_SPEED,
            pursuer_cadence: PURSUER_CADENCE,
            player_start: PLAYER_START,
            pursuer_start: PURSUER_START,
            pursuit_mode: PursuitMode::Cadence,
        }
    }
}

impl GameConfig {
    pub fn from_json_str(raw: &str) -> Result<Self, serde_json::Error> {
        serde_json::from_str(raw)
    }

    pub fn load(path: &Path) -> Result<Self, LoadError> {
        let raw = fs::read_to_string(path).map_err(|source| LoadError::Io {
            path: path.to_path_buf(),
            source,
        })?;
        Self::from_json_str(&raw).map_err(|source| LoadError::Json {
            path: path.to_path_buf(),
            source,
        })
    }

    /// Replaces the maze with the rows of a plain text layout.
    pub fn with_maze_text(mut self, text: &str) -> Self {
        self.maze = split_rows(text);
        self
    }

    pub fn validate(&self) -> Result<Maze, ConfigError> {
        let maze = Maze::parse(self.maze.as_slice(), self.markers)?;

        if self.tile_size <= 0 {
            return Err(ConfigError::InvalidTileSize(self.tile_size));
        }
        // Pixel coordinates span the whole grid and must fit in i32.
        let fits = maze.width().checked_mul(self.tile_size).is_some()
            && maze.height().checked_mul(self.tile_size).is_some();
        if !fits {
            return Err(ConfigError::TileSizeTooLarge {
                tile_size: self.tile_size,
                width: maze.width(),
                height: maze.height(),
            });
        }
        for (role, speed) in [
            (Role::Player, self.player_speed),
            (Role::Pursuer, self.pursuer_speed),
        ] {
            if speed <= 0 {
                return Err(ConfigError::InvalidSpeed { role, speed });
            }
            if self.tile_size % speed != 0 {
                return Err(ConfigError::SpeedDoesNotDivideTile {
                    role,
                    speed,
                    tile_size: self.tile_size,
                });
            }
        }
        if self.pursuer_cadence == 0 {
            return Err(ConfigError::ZeroCadence);
        }
        for (role, tile) in [
            (Role::Player, self.player_start),
            (Role::Pursuer, self.pursuer_start),
        ] {
            if !maze.contains(tile) {
                return Err(ConfigError::StartOutOfBounds { role, tile });
            }
            if !maze.is_walkable(tile) {
                return Err(ConfigError::StartOnWall { role, tile });
            }
        }

        Ok(maze)
    }
}
