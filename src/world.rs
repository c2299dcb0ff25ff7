use std::collections::{HashSet, VecDeque};

use serde::{Deserialize, Serialize};

use crate::constants::{OPEN_MARKER, WALL_MARKER};
use crate::error::ConfigError;
use crate::types::{Tile, WorldInit};

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Cell {
    Wall,
    Open,
}

/// Characters used for walls and open cells in a textual maze.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct MarkerSet {
    pub wall: char,
    pub open: char,
}

impl MarkerSet {
    pub const ASCII: MarkerSet = MarkerSet {
        wall: '#',
        open: '.',
    };

    fn decode(&self, c: char) -> Option<Cell> {
        if c == self.wall {
            Some(Cell::Wall)
        } else if c == self.open {
            Some(Cell::Open)
        } else {
            None
        }
    }
}

impl Default for MarkerSet {
    fn default() -> Self {
        Self {
            wall: WALL_MARKER,
            open: OPEN_MARKER,
        }
    }
}

/// Immutable rectangular grid of walls and open cells.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Maze {
    width: i32,
    height: i32,
    cells: Vec<Cell>,
}

impl Maze {
    pub fn parse<S: AsRef<str>>(rows: &[S], markers: MarkerSet) -> Result<Self, ConfigError> {
        if markers.wall == markers.open {
            return Err(ConfigError::AmbiguousMarkers(markers.wall));
        }
        let Some(first) = rows.first() else {
            return Err(ConfigError::EmptyMaze);
        };
        let width = first.as_ref().chars().count();
        if width == 0 {
            return Err(ConfigError::EmptyMaze);
        }

        let mut cells = Vec::with_capacity(width * rows.len());
        for (row, line) in rows.iter().enumerate() {
            let line = line.as_ref();
            let found = line.chars().count();
            if found != width {
                return Err(ConfigError::RaggedRow {
                    row,
                    expected: width,
                    found,
                });
            }
            for (col, c) in line.chars().enumerate() {
                let cell = markers
                    .decode(c)
                    .ok_or(ConfigError::InvalidMarker { row, col, found: c })?;
                cells.push(cell);
            }
        }

        if !cells.contains(&Cell::Open) {
            return Err(ConfigError::NoOpenCells);
        }

        Ok(Self {
            width: width as i32,
            height: rows.len() as i32,
            cells,
        })
    }

    pub fn width(&self) -> i32 {
        self.width
    }

    pub fn height(&self) -> i32 {
        self.height
    }

    pub fn contains(&self, tile: Tile) -> bool {
        tile.x >= 0 && tile.y >= 0 && tile.x < self.width && tile.y < self.height
    }

    pub fn cell(&self, tile: Tile) -> Option<Cell> {
        if !self.contains(tile) {
            return None;
        }
        self.cells
            .get((tile.y * self.width + tile.x) as usize)
            .copied()
    }

    pub fn is_walkable(&self, tile: Tile) -> bool {
        self.cell(tile) == Some(Cell::Open)
    }

    /// Open tiles in row-major order.
    pub fn open_tiles(&self) -> impl Iterator<Item = Tile> + '_ {
        let width = self.width;
        self.cells
            .iter()
            .enumerate()
            .filter(|(_, cell)| **cell == Cell::Open)
            .map(move |(idx, _)| Tile::new(idx as i32 % width, idx as i32 / width))
    }

    /// Largest valid position on each axis for the given tile size.
    pub fn max_position(&self, tile_size: i32) -> (i32, i32) {
        ((self.width - 1) * tile_size, (self.height - 1) * tile_size)
    }

    pub fn to_rows(&self, markers: MarkerSet) -> Vec<String> {
        self.cells
            .chunks(self.width as usize)
            .map(|row| {
                row.iter()
                    .map(|cell| match cell {
                        Cell::Wall => markers.wall,
                        Cell::Open => markers.open,
                    })
                    .collect()
            })
            .collect()
    }
}

/// Splits a text layout into maze rows, one per line. Blank lines are
/// skipped and trailing whitespace (including `\r`) is dropped.
pub fn split_rows(text: &str) -> Vec<String> {
    text.lines()
        .map(str::trim_end)
        .filter(|line| !line.is_empty())
        .map(str::to_string)
        .collect()
}

pub fn to_world_init(maze: &Maze, tile_size: i32, pickups: &[Tile]) -> WorldInit {
    WorldInit {
        width: maze.width(),
        height: maze.height(),
        tile_size,
        tiles: maze.to_rows(MarkerSet::ASCII),
        pickups: pickups.to_vec(),
    }
}

/// Flood fill of every open tile 4-connected to `start`.
pub fn reachable_tiles(maze: &Maze, start: Tile) -> HashSet<Tile> {
    let mut out = HashSet::new();
    if !maze.is_walkable(start) {
        return out;
    }

    let mut queue = VecDeque::new();
    out.insert(start);
    queue.push_back(start);

    while let Some(Tile { x, y }) = queue.pop_front() {
        for next in [
            Tile::new(x - 1, y),
            Tile::new(x + 1, y),
            Tile::new(x, y - 1),
            Tile::new(x, y + 1),
        ] {
            if !maze.is_walkable(next) {
                continue;
            }
            if out.insert(next) {
                queue.push_back(next);
            }
        }
    }

    out
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::constants::DEFAULT_MAZE;

    #[test]
    fn default_layout_parses_with_expected_dimensions() {
        let maze = Maze::parse(&DEFAULT_MAZE, MarkerSet::default()).expect("default maze");
        assert_eq!(maze.width(), 13);
        assert_eq!(maze.height(), 9);
        assert!(maze.is_walkable(Tile::new(1, 1)));
        assert!(maze.is_walkable(Tile::new(5, 5)));
        assert!(!maze.is_walkable(Tile::new(0, 0)));
    }

    #[test]
    fn out_of_bounds_is_never_walkable() {
        let rows = split_rows("...\n...\n");
        let maze = Maze::parse(rows.as_slice(), MarkerSet::ASCII).expect("open maze");
        assert!(maze.is_walkable(Tile::new(2, 1)));
        assert!(!maze.is_walkable(Tile::new(-1, 0)));
        assert!(!maze.is_walkable(Tile::new(3, 0)));
        assert!(!maze.is_walkable(Tile::new(0, 2)));
        assert_eq!(maze.cell(Tile::new(0, -1)), None);
    }

    #[test]
    fn ragged_rows_are_rejected() {
        let err = Maze::parse(&["#####", "#..#", "#####"], MarkerSet::ASCII).unwrap_err();
        assert_eq!(
            err,
            ConfigError::RaggedRow {
                row: 1,
                expected: 5,
                found: 4
            }
        );
    }

    #[test]
    fn unknown_markers_are_rejected_with_location() {
        let err = Maze::parse(&["###", "#x#", "###"], MarkerSet::ASCII).unwrap_err();
        assert_eq!(
            err,
            ConfigError::InvalidMarker {
                row: 1,
                col: 1,
                found: 'x'
            }
        );
    }

    #[test]
    fn empty_and_all_wall_mazes_are_rejected() {
        let empty: [&str; 0] = [];
        assert_eq!(
            Maze::parse(&empty, MarkerSet::ASCII).unwrap_err(),
            ConfigError::EmptyMaze
        );
        assert_eq!(
            Maze::parse(&["##", "##"], MarkerSet::ASCII).unwrap_err(),
            ConfigError::NoOpenCells
        );
        let same = MarkerSet {
            wall: '#',
            open: '#',
        };
        assert_eq!(
            Maze::parse(&["#"], same).unwrap_err(),
            ConfigError::AmbiguousMarkers('#')
        );
    }

    #[test]
    fn open_tiles_are_row_major() {
        let rows = split_rows("#.#\n..#\n");
        let maze = Maze::parse(rows.as_slice(), MarkerSet::ASCII).expect("maze");
        let tiles: Vec<Tile> = maze.open_tiles().collect();
        assert_eq!(tiles, vec![Tile::new(1, 0), Tile::new(0, 1), Tile::new(1, 1)]);
    }

    #[test]
    fn split_rows_skips_blank_lines_and_trailing_whitespace() {
        assert_eq!(split_rows("111  \r\n\n101\r\n111\n\n"), vec!["111", "101", "111"]);
        assert!(split_rows("\n \n").is_empty());
    }

    #[test]
    fn rows_round_trip_through_markers() {
        let maze = Maze::parse(&DEFAULT_MAZE, MarkerSet::default()).expect("default maze");
        assert_eq!(maze.to_rows(MarkerSet::default()), DEFAULT_MAZE.to_vec());
        assert_eq!(maze.to_rows(MarkerSet::ASCII)[1], "#...........#");
    }

    #[test]
    fn flood_fill_stops_at_walls() {
        let rows = split_rows("#######\n#..#..#\n#######\n");
        let maze = Maze::parse(rows.as_slice(), MarkerSet::ASCII).expect("maze");
        let reachable = reachable_tiles(&maze, Tile::new(1, 1));
        assert_eq!(reachable.len(), 2);
        assert!(!reachable.contains(&Tile::new(4, 1)));
        assert!(reachable_tiles(&maze, Tile::new(0, 0)).is_empty());
    }
}
