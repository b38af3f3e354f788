use rand::Rng;

use crate::config::ArenaSize;
use crate::snake::Point;

/// Food item currently active in the arena.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Food {
    pub position: Point,
}

impl Food {
    #[must_use]
    pub fn new(position: Point) -> Self {
        Self { position }
    }

    /// Spawns food uniformly in `[0, width) × [0, height)`.
    #[must_use]
    pub fn spawn<R: Rng + ?Sized>(rng: &mut R, arena: ArenaSize) -> Self {
        Self::new(spawn_position(rng, arena))
    }

    /// Spawns replacement food guaranteed to sit somewhere other than `self`.
    #[must_use]
    pub fn respawn<R: Rng + ?Sized>(self, rng: &mut R, arena: ArenaSize) -> Self {
        loop {
            let next = spawn_position(rng, arena);
            if next != self.position {
                return Self::new(next);
            }
        }
    }

    /// Returns true when `head` is closer than `tolerance` on both axes.
    #[must_use]
    pub fn is_reached_by(self, head: Point, tolerance: f64) -> bool {
        (head.x - self.position.x).abs() < tolerance && (head.y - self.position.y).abs() < tolerance
    }
}

/// Draws a uniformly distributed position inside the arena.
#[must_use]
pub fn spawn_position<R: Rng + ?Sized>(rng: &mut R, arena: ArenaSize) -> Point {
    Point {
        x: rng.gen_range(0.0..arena.width),
        y: rng.gen_range(0.0..arena.height),
    }
}
