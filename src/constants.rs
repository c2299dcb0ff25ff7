use crate::types::Tile;

pub const TICK_RATE: u32 = 60;
pub const TICK_MS: u64 = 1000 / TICK_RATE as u64;

pub const TILE_SIZE: i32 = 40;
pub const PLAYER_SPEED: i32 = 2;
pub const PURSUER_SPEED: i32 = 2;
pub const PURSUER_CADENCE: u32 = 20;

pub const WALL_MARKER: char = '1';
pub const OPEN_MARKER: char = '0';

pub const PLAYER_START: Tile = Tile::new(1, 1);
pub const PURSUER_START: Tile = Tile::new(5, 5);

pub const DEFAULT_MAZE: [&str; 9] = [
    "1111111111111",
    "1000000000001",
    "1011110111101",
    "1010000010101",
    "1010111010101",
    "1000000010101",
    "1010011110101",
    "1000000000001",
    "1111111111111",
];

/// Safety cap for simulated runs: ten minutes of game time.
pub const DEFAULT_MAX_TICKS: u64 = TICK_RATE as u64 * 600;

pub const AUTOPILOT_THINK_TICKS: u64 = 6;
pub const AUTOPILOT_DANGER_DISTANCE: usize = 3;

pub fn elapsed_ms(ticks: u64) -> u64 {
    ticks.saturating_mul(1000) / TICK_RATE as u64
}
