use super::mover::Mover;
use crate::types::{Direction, EntityView, Position, Tile};
use crate::world::Maze;

#[derive(Clone, Debug)]
pub struct Player {
    mover: Mover,
}

impl Player {
    pub fn new(start: Tile, speed: i32, tile_size: i32) -> Self {
        Self {
            mover: Mover::new(start, speed, tile_size),
        }
    }

    /// Buffers a directional intent, replacing any earlier one. Non-cardinal
    /// input is ignored.
    pub fn set_intent(&mut self, dir: Direction) {
        if dir.is_cardinal() {
            self.mover.set_intent(dir);
        }
    }

    pub fn intent(&self) -> Direction {
        self.mover.intent()
    }

    pub fn tick(&mut self, maze: &Maze) -> bool {
        self.mover.tick(maze)
    }

    pub fn tile_position(&self) -> Tile {
        self.mover.tile()
    }

    pub fn decision_tile(&self) -> Tile {
        self.mover.decision_tile()
    }

    pub fn position(&self) -> Position {
        self.mover.position()
    }

    pub fn direction(&self) -> Direction {
        self.mover.direction()
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
