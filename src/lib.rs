pub mod config;
pub mod constants;
pub mod engine;
pub mod error;
pub mod input;
pub mod pathfinding;
pub mod types;
pub mod world;
