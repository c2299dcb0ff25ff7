use serde::{Deserialize, Serialize};

use super::mover::Mover;
use crate::pathfinding::{first_step, shortest_path};
use crate::types::{Direction, EntityView, Position, Tile};
use crate::world::Maze;

#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum PursuitMode {
    /// One instantaneous tile hop along the shortest path every `cadence`
    /// ticks.
    #[default]
    Cadence,
    /// Re-plans at every tile alignment and glides like the player.
    Continuous,
}

impl PursuitMode {
    pub fn parse(value: &str) -> Option<Self> {
        match value {
            "cadence" => Some(Self::Cadence),
            "continuous" => Some(Self::Continuous),
            _ => None,
        }
    }
}

/// What a single pursuer tick did.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum PursuitCycle {
    /// Cadence counter still running.
    Waiting,
    /// Not on a tile boundary, kept gliding.
    Gliding,
    Hopped { from: Tile, to: Tile },
    Steered { dir: Direction },
    /// Target unreachable or already reached.
    Held,
}

#[derive(Clone, Debug)]
pub struct Pursuer {
    mode: PursuitMode,
    mover: Mover,
    cadence: u32,
    counter: u32,
}

impl Pursuer {
    pub fn new(mode: PursuitMode, start: Tile, speed: i32, tile_size: i32, cadence: u32) -> Self {
        Self {
            mode,
            mover: Mover::new(start, speed, tile_size),
            cadence,
            counter: 0,
        }
    }

    pub fn tick(&mut self, maze: &Maze, target: Tile) -> PursuitCycle {
        match self.mode {
            PursuitMode::Cadence => self.tick_cadence(maze, target),
            PursuitMode::Continuous => self.tick_continuous(maze, target),
        }
    }

    fn tick_cadence(&mut self, maze: &Maze, target: Tile) -> PursuitCycle {
        self.counter += 1;
        if self.counter < self.cadence {
            return PursuitCycle::Waiting;
        }
        self.counter = 0;

        let from = self.mover.tile();
        match shortest_path(maze, from, target) {
            Some(path) if path.len() >= 2 => {
                let to = path[1];
                self.mover.place(to, Direction::between(from, to));
                PursuitCycle::Hopped { from, to }
            }
            _ => {
                self.mover.face(Direction::None);
                PursuitCycle::Held
            }
        }
    }

    fn tick_continuous(&mut self, maze: &Maze, target: Tile) -> PursuitCycle {
        if !self.mover.is_aligned() {
            self.mover.tick(maze);
            return PursuitCycle::Gliding;
        }

        let dir = shortest_path(maze, self.mover.tile(), target)
            .map(|path| first_step(&path))
            .unwrap_or(Direction::None);
        self.mover.set_intent(dir);
        self.mover.tick(maze);
        if dir == Direction::None {
            PursuitCycle::Held
        } else {
            PursuitCycle::Steered { dir }
        }
    }

    pub fn tile_position(&self) -> Tile {
        self.mover.tile()
    }

    pub fn position(&self) -> Position {
        self.mover.position()
    }

    pub fn direction(&self) -> Direction {
        self.mover.direction()
    }

    pub fn ticks_until_cycle(&self) -> u32 {
        self.cadence.saturating_sub(self.counter)
    }

    pub fn view(&self) -> EntityView {
        EntityView {
            tile: self.mover.tile(),
            position: self.mover.position(),
            dir: self.mover.direction(),
            aligned: self.mover.is_aligned(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::world::MarkerSet;

    fn room() -> Maze {
        Maze::parse(&["#####", "#...#", "#.#.#", "#...#", "#####"], MarkerSet::ASCII)
            .expect("valid maze")
    }

    #[test]
    fn parse_mode_names() {
        assert_eq!(PursuitMode::parse("cadence"), Some(PursuitMode::Cadence));
        assert_eq!(PursuitMode::parse("continuous"), Some(PursuitMode::Continuous));
        assert_eq!(PursuitMode::parse("teleport"), None);
    }

    #[test]
    fn cadence_pursuer_hops_once_per_cycle() {
        let maze = room();
        let mut pursuer = Pursuer::new(PursuitMode::Cadence, Tile::new(3, 3), 2, 40, 20);
        for _ in 0..19 {
            assert_eq!(pursuer.tick(&maze, Tile::new(1, 1)), PursuitCycle::Waiting);
        }
        assert_eq!(pursuer.tile_position(), Tile::new(3, 3));
        assert_eq!(
            pursuer.tick(&maze, Tile::new(1, 1)),
            PursuitCycle::Hopped {
                from: Tile::new(3, 3),
                to: Tile::new(2, 3),
            }
        );
        assert_eq!(pursuer.position(), Position { x: 80, y: 120 });
        assert_eq!(pursuer.direction(), Direction::Left);
        assert_eq!(pursuer.ticks_until_cycle(), 20);
    }

    #[test]
    fn cadence_pursuer_holds_on_unreachable_target() {
        let maze = Maze::parse(&["#######", "#..#..#", "#######"], MarkerSet::ASCII)
            .expect("valid maze");
        let mut pursuer = Pursuer::new(PursuitMode::Cadence, Tile::new(5, 1), 2, 40, 1);
        for _ in 0..5 {
            assert_eq!(pursuer.tick(&maze, Tile::new(1, 1)), PursuitCycle::Held);
        }
        assert_eq!(pursuer.tile_position(), Tile::new(5, 1));
    }

    #[test]
    fn cadence_pursuer_stays_on_target() {
        let maze = room();
        let mut pursuer = Pursuer::new(PursuitMode::Cadence, Tile::new(1, 1), 2, 40, 1);
        assert_eq!(pursuer.tick(&maze, Tile::new(1, 1)), PursuitCycle::Held);
        assert_eq!(pursuer.tile_position(), Tile::new(1, 1));
    }

    #[test]
    fn continuous_pursuer_glides_between_decisions() {
        let maze = room();
        let mut pursuer = Pursuer::new(PursuitMode::Continuous, Tile::new(3, 3), 2, 40, 20);
        assert_eq!(
            pursuer.tick(&maze, Tile::new(1, 1)),
            PursuitCycle::Steered {
                dir: Direction::Left
            }
        );
        assert_eq!(pursuer.position(), Position { x: 118, y: 120 });
        for _ in 1..20 {
            assert_eq!(pursuer.tick(&maze, Tile::new(1, 1)), PursuitCycle::Gliding);
        }
        assert_eq!(pursuer.tile_position(), Tile::new(2, 3));
        assert!(pursuer.view().aligned);
    }

    #[test]
    fn continuous_pursuer_stops_when_target_reached() {
        let maze = room();
        let mut pursuer = Pursuer::new(PursuitMode::Continuous, Tile::new(1, 3), 2, 40, 20);
        let mut last = PursuitCycle::Waiting;
        for _ in 0..100 {
            last = pursuer.tick(&maze, Tile::new(1, 1));
        }
        assert_eq!(last, PursuitCycle::Held);
        assert_eq!(pursuer.tile_position(), Tile::new(1, 1));
        assert_eq!(pursuer.direction(), Direction::None);
    }
}
