use super::GameEngine;
use crate::types::{GameOverReason, RuntimeEvent};

impl GameEngine {
    /// Ends the game when both entities share a tile. Returns true if the
    /// player was caught this tick.
    pub(super) fn resolve_collision(&mut self) -> bool {
        let tile = self.player.tile_position();
        if tile != self.pursuer.tile_position() {
            return false;
        }
        self.lost_at = Some(self.tick_counter);
        self.events.push(RuntimeEvent::PlayerCaught {
            x: tile.x,
            y: tile.y,
        });
        self.finish(GameOverReason::Caught);
        true
    }

    pub(super) fn collect_pickup(&mut self) {
        let tile = self.player.tile_position();
        if !self.pickups.remove(&tile) {
            return;
        }
        self.events.push(RuntimeEvent::PickupCollected {
            x: tile.x,
            y: tile.y,
            remaining: self.pickups.len(),
        });
        if self.pickups.is_empty() {
            self.won_at = Some(self.tick_counter);
            self.events.push(RuntimeEvent::AllPickupsCollected);
            self.finish(GameOverReason::Victory);
        }
    }

    fn finish(&mut self, reason: GameOverReason) {
        if self.ended {
            return;
        }
        self.ended = true;
        self.end_reason = Some(reason);
        log::info!(
            "game over at tick {}: {:?} ({} of {} pickups collected)",
            self.tick_counter,
            reason,
            self.pickups_total - self.pickups.len(),
            self.pickups_total
        );
    }
}
