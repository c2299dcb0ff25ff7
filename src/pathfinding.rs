use std::collections::{HashMap, VecDeque};

use crate::types::{Direction, Tile};
use crate::world::Maze;

/// Exploration order of neighbours: +x, -x, +y, -y. Among equally short
/// paths, the one found first in this order wins.
pub const NEIGHBOR_ORDER: [Direction; 4] = [
    Direction::Right,
    Direction::Left,
    Direction::Down,
    Direction::Up,
];

/// Breadth-first shortest path from `source` to `target`, both ends
/// included. `Some(vec![source])` when they are equal, `None` when `target`
/// cannot be reached.
pub fn shortest_path(maze: &Maze, source: Tile, target: Tile) -> Option<Vec<Tile>> {
    let mut came_from: HashMap<Tile, Option<Tile>> = HashMap::new();
    let mut queue = VecDeque::new();
    came_from.insert(source, None);
    queue.push_back(source);

    while let Some(current) = queue.pop_front() {
        if current == target {
            break;
        }
        for dir in NEIGHBOR_ORDER {
            let next = current.step(dir);
            if !maze.is_walkable(next) || came_from.contains_key(&next) {
                continue;
            }
            came_from.insert(next, Some(current));
            queue.push_back(next);
        }
    }

    if !came_from.contains_key(&target) {
        return None;
    }

    let mut path = vec![target];
    let mut node = target;
    while let Some(Some(prev)) = came_from.get(&node) {
        path.push(*prev);
        node = *prev;
    }
    path.reverse();
    Some(path)
}

/// Direction of the first step along `path`, `None` for degenerate paths.
pub fn first_step(path: &[Tile]) -> Direction {
    match path {
        [from, to, ..] => Direction::between(*from, *to),
        _ => Direction::None,
    }
}
