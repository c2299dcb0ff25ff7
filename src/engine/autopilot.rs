use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};

use super::utils::{manhattan, random_direction};
use super::GameEngine;
use crate::constants::{AUTOPILOT_DANGER_DISTANCE, AUTOPILOT_THINK_TICKS};
use crate::pathfinding::{first_step, shortest_path};
use crate::types::{Direction, Tile};
use crate::world::Maze;

const UNREACHABLE_DISTANCE: usize = 99;

/// Computer driver for the player: flees when the pursuer is close,
/// otherwise heads for the nearest pickup.
#[derive(Clone, Debug)]
pub struct Autopilot {
    rng: StdRng,
    think_every: u64,
    danger_distance: usize,
    wander_chance: f32,
    next_think_at: u64,
}

impl Autopilot {
    /// Runs replay exactly for the same seed.
    pub fn new(seed: u64) -> Self {
        Self {
            rng: StdRng::seed_from_u64(seed),
            think_every: AUTOPILOT_THINK_TICKS,
            danger_distance: AUTOPILOT_DANGER_DISTANCE,
            wander_chance: 0.05,
            next_think_at: 0,
        }
    }

    pub fn with_wander_chance(mut self, chance: f32) -> Self {
        self.wander_chance = chance;
        self
    }

    /// Returns the input to submit before the next step, if any.
    pub fn decide(&mut self, engine: &GameEngine) -> Option<Direction> {
        if engine.is_ended() || engine.tick() < self.next_think_at {
            return None;
        }
        self.next_think_at = engine.tick() + self.think_every;

        let maze = engine.maze();
        let here = engine.player().decision_tile();
        let threat = engine.pursuer().tile_position();

        let close = manhattan(here, threat) as usize <= self.danger_distance
            && path_distance(maze, here, threat) <= self.danger_distance;
        let dir = if close {
            self.choose_escape_direction(maze, here, threat)
        } else if self.rng.random::<f32>() < self.wander_chance {
            random_direction(maze, here, &mut self.rng)
        } else {
            self.choose_pickup_direction(engine, here, threat)
        };
        dir.is_cardinal().then_some(dir)
    }

    fn choose_pickup_direction(&mut self, engine: &GameEngine, here: Tile, threat: Tile) -> Direction {
        let maze = engine.maze();
        let nearest = engine
            .pickups()
            .iter()
            .filter(|tile| **tile != here)
            .filter_map(|tile| shortest_path(maze, here, *tile))
            .filter(|path| !path.contains(&threat))
            .min_by_key(|path| path.len());

        match nearest {
            Some(path) => first_step(&path),
            None => random_direction(maze, here, &mut self.rng),
        }
    }

    fn choose_escape_direction(&mut self, maze: &Maze, here: Tile, threat: Tile) -> Direction {
        let mut best = Direction::None;
        let mut best_dist = 0;
        for dir in Direction::CARDINAL {
            let next = here.step(dir);
            if !maze.is_walkable(next) || next == threat {
                continue;
            }
            let dist = path_distance(maze, next, threat);
            if best == Direction::None || dist > best_dist {
                best_dist = dist;
                best = dir;
            }
        }
        if best == Direction::None {
            random_direction(maze, here, &mut self.rng)
        } else {
            best
        }
    }
}

fn path_distance(maze: &Maze, from: Tile, to: Tile) -> usize {
    shortest_path(maze, from, to)
        .map(|path| path.len() - 1)
        .unwrap_or(UNREACHABLE_DISTANCE)
}
