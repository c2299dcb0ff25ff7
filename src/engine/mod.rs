use std::collections::BTreeSet;

use crate::config::GameConfig;
use crate::constants::elapsed_ms;
use crate::error::ConfigError;
use crate::types::{
    Direction, GameOverReason, GameStatus, GameSummary, RuntimeEvent, Snapshot, Tile, WorldInit,
};
use crate::world::{reachable_tiles, to_world_init, Maze};

mod autopilot;
mod mover;
mod player;
mod pursuer;
mod terminal;
mod utils;

pub use self::autopilot::Autopilot;
pub use self::mover::Mover;
pub use self::player::Player;
pub use self::pursuer::{PursuitCycle, PursuitMode, Pursuer};

/// Simulation context: owns the maze, both entities and the pickups, and
/// advances them one tick at a time.
#[derive(Clone, Debug)]
pub struct GameEngine {
    pub config: GameConfig,
    maze: Maze,
    player: Player,
    pursuer: Pursuer,
    pickups: BTreeSet<Tile>,
    pickups_total: usize,
    events: Vec<RuntimeEvent>,

    tick_counter: u64,
    ended: bool,
    end_reason: Option<GameOverReason>,
    won_at: Option<u64>,
    lost_at: Option<u64>,
    pursuit_cycles: u64,
    pursuer_moves: u64,
}

impl GameEngine {
    pub fn new(config: GameConfig) -> Result<Self, ConfigError> {
        let maze = config.validate()?;
        let player = Player::new(config.player_start, config.player_speed, config.tile_size);
        let pursuer = Pursuer::new(
            config.pursuit_mode,
            config.pursuer_start,
            config.pursuer_speed,
            config.tile_size,
            config.pursuer_cadence,
        );
        let pickups: BTreeSet<Tile> = maze.open_tiles().collect();

        let reachable = reachable_tiles(&maze, config.player_start);
        let stranded = pickups.iter().filter(|t| !reachable.contains(*t)).count();
        if stranded > 0 {
            log::warn!(
                "{stranded} pickup(s) are unreachable from the player start {}; the game cannot be won",
                config.player_start
            );
        }

        Ok(Self {
            pickups_total: pickups.len(),
            config,
            maze,
            player,
            pursuer,
            pickups,
            events: Vec::new(),
            tick_counter: 0,
            ended: false,
            end_reason: None,
            won_at: None,
            lost_at: None,
            pursuit_cycles: 0,
            pursuer_moves: 0,
        })
    }

    pub fn maze(&self) -> &Maze {
        &self.maze
    }

    pub fn player(&self) -> &Player {
        &self.player
    }

    pub fn pursuer(&self) -> &Pursuer {
        &self.pursuer
    }

    pub fn pickups(&self) -> &BTreeSet<Tile> {
        &self.pickups
    }

    pub fn tick(&self) -> u64 {
        self.tick_counter
    }

    pub fn is_ended(&self) -> bool {
        self.ended
    }

    pub fn end_reason(&self) -> Option<GameOverReason> {
        self.end_reason
    }

    pub fn won_at(&self) -> Option<u64> {
        self.won_at
    }

    pub fn lost_at(&self) -> Option<u64> {
        self.lost_at
    }

    pub fn status(&self) -> GameStatus {
        match (self.won_at, self.lost_at) {
            (Some(tick), _) => GameStatus::Won { tick },
            (_, Some(tick)) => GameStatus::Lost { tick },
            _ => GameStatus::Running,
        }
    }

    pub fn get_world_init(&self) -> WorldInit {
        let pickups: Vec<Tile> = self.pickups.iter().copied().collect();
        to_world_init(&self.maze, self.config.tile_size, &pickups)
    }

    /// Buffers a directional input for the next `step`. Non-cardinal input
    /// is ignored.
    pub fn submit_input(&mut self, dir: Direction) {
        if self.ended {
            return;
        }
        self.player.set_intent(dir);
    }

    pub fn step(&mut self) {
        if self.ended {
            return;
        }
        self.tick_counter += 1;

        self.player.tick(&self.maze);
        let target = self.player.tile_position();
        let cycle = self.pursuer.tick(&self.maze, target);
        self.record_pursuit(cycle);

        if self.resolve_collision() {
            return;
        }
        self.collect_pickup();
    }

    fn record_pursuit(&mut self, cycle: PursuitCycle) {
        match cycle {
            PursuitCycle::Waiting | PursuitCycle::Gliding => {}
            PursuitCycle::Hopped { from, to } => {
                self.pursuit_cycles += 1;
                self.pursuer_moves += 1;
                log::debug!("tick {}: pursuer hopped {from} -> {to}", self.tick_counter);
                self.events.push(RuntimeEvent::PursuerHopped { from, to });
            }
            PursuitCycle::Steered { dir } => {
                self.pursuit_cycles += 1;
                self.pursuer_moves += 1;
                self.events.push(RuntimeEvent::PursuerSteered { dir });
            }
            PursuitCycle::Held => {
                self.pursuit_cycles += 1;
                log::trace!("tick {}: pursuer holds position", self.tick_counter);
            }
        }
    }

    pub fn build_snapshot(&mut self, include_events: bool) -> Snapshot {
        let snapshot = Snapshot {
            tick: self.tick_counter,
            elapsed_ms: elapsed_ms(self.tick_counter),
            status: self.status(),
            player: self.player.view(),
            pursuer: self.pursuer.view(),
            pickups_left: self.pickups.len(),
            pickups: self.pickups.iter().copied().collect(),
            events: if include_events {
                self.events.clone()
            } else {
                Vec::new()
            },
        };
        if include_events {
            self.events.clear();
        }
        snapshot
    }

    pub fn build_summary(&self) -> GameSummary {
        GameSummary {
            reason: self.end_reason,
            ticks: self.tick_counter,
            duration_ms: elapsed_ms(self.tick_counter),
            pickups_collected: self.pickups_total - self.pickups.len(),
            pickups_total: self.pickups_total,
            pursuit_cycles: self.pursuit_cycles,
            pursuer_moves: self.pursuer_moves,
        }
    }
}
