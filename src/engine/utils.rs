use rand::rngs::StdRng;
use rand::Rng;

use crate::types::{Direction, Tile};
use crate::world::Maze;

pub(super) fn manhattan(a: Tile, b: Tile) -> i32 {
    (a.x - b.x).abs() + (a.y - b.y).abs()
}

pub(super) fn walkable_directions(maze: &Maze, from: Tile) -> Vec<Direction> {
    Direction::CARDINAL
        .into_iter()
        .filter(|dir| maze.is_walkable(from.step(*dir)))
        .collect()
}

pub(super) fn random_direction(maze: &Maze, from: Tile, rng: &mut StdRng) -> Direction {
    let options = walkable_directions(maze, from);
    if options.is_empty() {
        return Direction::None;
    }
    options[rng.random_range(0..options.len())]
}
