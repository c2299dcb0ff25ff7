use crate::types::{Direction, Position, Tile};
use crate::world::Maze;

/// Grid-locked movement: constant velocity along the committed direction,
/// with direction changes only when the position sits exactly on a tile.
#[derive(Clone, Debug)]
pub struct Mover {
    position: Position,
    direction: Direction,
    intent: Direction,
    speed: i32,
    tile_size: i32,
}

impl Mover {
    /// `speed` must evenly divide `tile_size`; config validation enforces it.
    pub fn new(start: Tile, speed: i32, tile_size: i32) -> Self {
        Self {
            position: Position::of_tile(start, tile_size),
            direction: Direction::None,
            intent: Direction::None,
            speed,
            tile_size,
        }
    }

    pub fn position(&self) -> Position {
        self.position
    }

    pub fn direction(&self) -> Direction {
        self.direction
    }

    pub fn intent(&self) -> Direction {
        self.intent
    }

    pub fn tile(&self) -> Tile {
        self.position.tile(self.tile_size)
    }

    pub fn is_aligned(&self) -> bool {
        self.position.is_aligned(self.tile_size)
    }

    /// Tile where the next direction decision will be taken.
    pub fn decision_tile(&self) -> Tile {
        let here = self.tile();
        if self.is_aligned() {
            return here;
        }
        match self.direction {
            Direction::Right | Direction::Down => here.step(self.direction),
            _ => here,
        }
    }

    pub fn set_intent(&mut self, intent: Direction) {
        self.intent = intent;
    }

    /// Snaps onto `tile`. Used by discrete hops.
    pub fn place(&mut self, tile: Tile, facing: Direction) {
        self.position = Position::of_tile(tile, self.tile_size);
        self.direction = facing;
    }

    pub fn face(&mut self, facing: Direction) {
        self.direction = facing;
    }

    /// Advances one tick. Returns true when the committed direction changed.
    pub fn tick(&mut self, maze: &Maze) -> bool {
        let before = self.direction;

        if self.is_aligned() {
            let here = self.tile();
            if maze.is_walkable(here.step(self.intent)) {
                self.direction = self.intent;
            }
            if !maze.is_walkable(here.step(self.direction)) {
                self.direction = Direction::None;
            }
        }

        let (dx, dy) = self.direction.delta();
        let (max_x, max_y) = maze.max_position(self.tile_size);
        self.position.x = (self.position.x + dx * self.speed).clamp(0, max_x);
        self.position.y = (self.position.y + dy * self.speed).clamp(0, max_y);

        self.direction != before
    }
}

#[cfg(test)]
mod tests {
    use proptest::prelude::*;

    use super::*;
    use crate::world::MarkerSet;

    fn corridor() -> Maze {
        Maze::parse(
            &["#######", "#.....#", "#.#.#.#", "#.....#", "#######"],
            MarkerSet::ASCII,
        )
        .expect("valid maze")
    }

    #[test]
    fn moves_speed_units_per_tick_along_committed_direction() {
        let maze = corridor();
        let mut mover = Mover::new(Tile::new(1, 1), 2, 40);
        mover.set_intent(Direction::Right);
        assert!(mover.tick(&maze));
        assert_eq!(mover.position(), Position { x: 42, y: 40 });
        for _ in 0..19 {
            mover.tick(&maze);
        }
        assert_eq!(mover.position(), Position { x: 80, y: 40 });
        assert_eq!(mover.tile(), Tile::new(2, 1));
        assert!(mover.is_aligned());
    }

    #[test]
    fn stops_at_wall_when_no_turn_is_possible() {
        let maze = corridor();
        let mut mover = Mover::new(Tile::new(4, 1), 2, 40);
        mover.set_intent(Direction::Right);
        for _ in 0..60 {
            mover.tick(&maze);
        }
        assert_eq!(mover.tile(), Tile::new(5, 1));
        assert_eq!(mover.direction(), Direction::None);
        assert_eq!(mover.position(), Position { x: 200, y: 40 });
    }

    #[test]
    fn blocked_intent_waits_for_an_opening() {
        let maze = corridor();
        let mut mover = Mover::new(Tile::new(1, 1), 2, 40);
        mover.set_intent(Direction::Right);
        mover.tick(&maze);
        // (2,2) is a wall; the turn must be deferred until (3,1).
        mover.set_intent(Direction::Down);
        for _ in 1..40 {
            mover.tick(&maze);
            assert_eq!(mover.direction(), Direction::Right);
        }
        assert_eq!(mover.position(), Position { x: 120, y: 40 });
        assert!(mover.tick(&maze));
        assert_eq!(mover.direction(), Direction::Down);
        assert_eq!(mover.position(), Position { x: 120, y: 42 });
    }

    #[test]
    fn reversal_mid_tile_waits_for_alignment() {
        let maze = corridor();
        let mut mover = Mover::new(Tile::new(1, 1), 2, 40);
        mover.set_intent(Direction::Right);
        mover.tick(&maze);
        mover.set_intent(Direction::Left);
        for _ in 1..20 {
            mover.tick(&maze);
            assert_eq!(mover.direction(), Direction::Right);
        }
        mover.tick(&maze);
        assert_eq!(mover.direction(), Direction::Left);
    }

    #[test]
    fn decision_tile_is_the_tile_being_entered() {
        let maze = corridor();
        let mut mover = Mover::new(Tile::new(2, 1), 2, 40);
        assert_eq!(mover.decision_tile(), Tile::new(2, 1));
        mover.set_intent(Direction::Right);
        mover.tick(&maze);
        assert_eq!(mover.tile(), Tile::new(2, 1));
        assert_eq!(mover.decision_tile(), Tile::new(3, 1));

        let mut mover = Mover::new(Tile::new(2, 1), 2, 40);
        mover.set_intent(Direction::Left);
        mover.tick(&maze);
        assert_eq!(mover.tile(), Tile::new(1, 1));
        assert_eq!(mover.decision_tile(), Tile::new(1, 1));
    }

    #[test]
    fn place_snaps_to_tile() {
        let mut mover = Mover::new(Tile::new(1, 1), 2, 40);
        mover.place(Tile::new(3, 2), Direction::Down);
        assert_eq!(mover.position(), Position { x: 120, y: 80 });
        assert_eq!(mover.direction(), Direction::Down);
        assert!(mover.is_aligned());
    }

    fn direction_strategy() -> impl Strategy<Value = Direction> {
        prop_oneof![
            Just(Direction::Up),
            Just(Direction::Down),
            Just(Direction::Left),
            Just(Direction::Right),
            Just(Direction::None),
        ]
    }

    proptest! {
        #[test]
        fn stays_in_bounds_and_turns_only_when_aligned(
            inputs in prop::collection::vec((0..25usize, direction_strategy()), 1..40),
            speed in prop_oneof![Just(1i32), Just(2), Just(4), Just(5), Just(8)],
        ) {
            let maze = corridor();
            let mut mover = Mover::new(Tile::new(1, 1), speed, 40);
            let (max_x, max_y) = maze.max_position(40);
            for (ticks, dir) in inputs {
                mover.set_intent(dir);
                for _ in 0..ticks {
                    let aligned_before = mover.is_aligned();
                    let changed = mover.tick(&maze);
                    if changed {
                        prop_assert!(aligned_before);
                    }
                    let pos = mover.position();
                    prop_assert!((0..=max_x).contains(&pos.x));
                    prop_assert!((0..=max_y).contains(&pos.y));
                    prop_assert!(maze.is_walkable(mover.tile()));
                }
            }
        }
    }
}
