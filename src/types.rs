use std::fmt;

use serde::{Deserialize, Serialize};

#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Direction {
    Up,
    Down,
    Left,
    Right,
    None,
}

impl Direction {
    pub const CARDINAL: [Direction; 4] = [
        Direction::Up,
        Direction::Down,
        Direction::Left,
        Direction::Right,
    ];

    /// Parses a directional input. Anything other than the four cardinal
    /// names is rejected, which callers treat as an ignored input.
    pub fn parse_move(value: &str) -> Option<Self> {
        match value {
            "up" => Some(Self::Up),
            "down" => Some(Self::Down),
            "left" => Some(Self::Left),
            "right" => Some(Self::Right),
            _ => None,
        }
    }

    pub fn delta(self) -> (i32, i32) {
        match self {
            Direction::Up => (0, -1),
            Direction::Down => (0, 1),
            Direction::Left => (-1, 0),
            Direction::Right => (1, 0),
            Direction::None => (0, 0),
        }
    }

    pub fn is_cardinal(self) -> bool {
        self != Direction::None
    }

    /// Direction of the single step from `from` to `to`, or `None` when the
    /// tiles are not 4-adjacent.
    pub fn between(from: Tile, to: Tile) -> Direction {
        match (to.x - from.x, to.y - from.y) {
            (1, 0) => Direction::Right,
            (-1, 0) => Direction::Left,
            (0, 1) => Direction::Down,
            (0, -1) => Direction::Up,
            _ => Direction::None,
        }
    }
}

#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub struct Tile {
    pub x: i32,
    pub y: i32,
}

impl Tile {
    pub const fn new(x: i32, y: i32) -> Self {
        Self { x, y }
    }

    pub fn step(self, dir: Direction) -> Tile {
        let (dx, dy) = dir.delta();
        Tile::new(self.x + dx, self.y + dy)
    }

    pub fn is_adjacent(self, other: Tile) -> bool {
        (self.x - other.x).abs() + (self.y - other.y).abs() == 1
    }
}

impl fmt::Display for Tile {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "({}, {})", self.x, self.y)
    }
}

/// Continuous position in distance units (pixels), top-left of the entity.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Position {
    pub x: i32,
    pub y: i32,
}

impl Position {
    pub fn of_tile(tile: Tile, tile_size: i32) -> Self {
        Self {
            x: tile.x * tile_size,
            y: tile.y * tile_size,
        }
    }

    pub fn tile(self, tile_size: i32) -> Tile {
        Tile::new(self.x.div_euclid(tile_size), self.y.div_euclid(tile_size))
    }

    pub fn is_aligned(self, tile_size: i32) -> bool {
        self.x % tile_size == 0 && self.y % tile_size == 0
    }
}

#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Role {
    Player,
    Pursuer,
}

impl fmt::Display for Role {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Role::Player => f.write_str("player"),
            Role::Pursuer => f.write_str("pursuer"),
        }
    }
}

#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum GameOverReason {
    Victory,
    Caught,
}

#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize)]
#[serde(tag = "state", rename_all = "snake_case")]
pub enum GameStatus {
    Running,
    Won { tick: u64 },
    Lost { tick: u64 },
}

#[derive(Clone, Debug, Serialize)]
pub struct WorldInit {
    pub width: i32,
    pub height: i32,
    #[serde(rename = "tileSize")]
    pub tile_size: i32,
    pub tiles: Vec<String>,
    pub pickups: Vec<Tile>,
}

#[derive(Clone, Debug, Serialize)]
pub struct EntityView {
    pub tile: Tile,
    pub position: Position,
    pub dir: Direction,
    pub aligned: bool,
}

#[derive(Clone, Debug, PartialEq, Eq, Serialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum RuntimeEvent {
    PickupCollected {
        x: i32,
        y: i32,
        remaining: usize,
    },
    PursuerHopped {
        from: Tile,
        to: Tile,
    },
    PursuerSteered {
        dir: Direction,
    },
    PlayerCaught {
        x: i32,
        y: i32,
    },
    AllPickupsCollected,
}

#[derive(Clone, Debug, Serialize)]
pub struct Snapshot {
    pub tick: u64,
    #[serde(rename = "elapsedMs")]
    pub elapsed_ms: u64,
    pub status: GameStatus,
    pub player: EntityView,
    pub pursuer: EntityView,
    #[serde(rename = "pickupsLeft")]
    pub pickups_left: usize,
    pub pickups: Vec<Tile>,
    pub events: Vec<RuntimeEvent>,
}

#[derive(Clone, Debug, Serialize)]
pub struct GameSummary {
    pub reason: Option<GameOverReason>,
    pub ticks: u64,
    #[serde(rename = "durationMs")]
    pub duration_ms: u64,
    #[serde(rename = "pickupsCollected")]
    pub pickups_collected: usize,
    #[serde(rename = "pickupsTotal")]
    pub pickups_total: usize,
    #[serde(rename = "pursuitCycles")]
    pub pursuit_cycles: u64,
    #[serde(rename = "pursuerMoves")]
    pub pursuer_moves: u64,
}
