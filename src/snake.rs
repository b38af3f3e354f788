use std::collections::VecDeque;

use crate::config::{ArenaSize, ConfigError, BOOST_MULTIPLIER};
use crate::input::Direction;

/// Arena position in continuous world coordinates.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Point {
    pub x: f64,
    pub y: f64,
}

impl Point {
    #[must_use]
    pub const fn new(x: f64, y: f64) -> Self {
        Self { x, y }
    }

    /// Returns true when the point lies inside `[0, width) × [0, height)`.
    #[must_use]
    pub fn is_within_bounds(self, arena: ArenaSize) -> bool {
        self.x >= 0.0 && self.y >= 0.0 && self.x < arena.width && self.y < arena.height
    }

    /// Returns this point moved by `(dx, dy)`.
    #[must_use]
    pub fn offset(self, dx: f64, dy: f64) -> Self {
        Self {
            x: self.x + dx,
            y: self.y + dy,
        }
    }
}

/// Snake body, heading and boost state.
///
/// The body is stored tail-first, head-last and is never empty.
#[derive(Debug, Clone, PartialEq)]
pub struct Snake {
    body: VecDeque<Point>,
    direction: Direction,
    boosted: bool,
}

impl Snake {
    /// Creates a one-segment snake at `start`.
    #[must_use]
    pub fn new(start: Point, direction: Direction) -> Self {
        Self {
            body: VecDeque::from([start]),
            direction,
            boosted: false,
        }
    }

    /// Creates a snake from explicit segments ordered tail-first, head-last.
    pub fn from_segments(segments: Vec<Point>, direction: Direction) -> Result<Self, ConfigError> {
        if segments.is_empty() {
            return Err(ConfigError::EmptySnake);
        }

        Ok(Self {
            body: VecDeque::from(segments),
            direction,
            boosted: false,
        })
    }

    /// Replaces the heading.
    pub fn set_direction(&mut self, direction: Direction) {
        self.direction = direction;
    }

    /// Flips boost on or off.
    pub fn toggle_boost(&mut self) {
        self.boosted = !self.boosted;
    }

    #[must_use]
    pub fn is_boosted(&self) -> bool {
        self.boosted
    }

    /// Returns 2.0 while boosted, 1.0 otherwise.
    #[must_use]
    pub fn boost_multiplier(&self) -> f64 {
        if self.boosted { BOOST_MULTIPLIER } else { 1.0 }
    }

    /// Returns where the head lands after one tick of `step_length`.
    #[must_use]
    pub fn next_head_position(&self, step_length: f64) -> Point {
        let (dx, dy) = self.direction.unit();
        let distance = step_length * self.boost_multiplier();
        self.head().offset(dx * distance, dy * distance)
    }

    /// Pushes `head` and, unless `grow` is set, drops the oldest segment.
    pub fn advance(&mut self, head: Point, grow: bool) {
        self.body.push_back(head);
        if !grow {
            let _ = self.body.pop_front();
        }
    }

    /// Returns the current head position.
    #[must_use]
    pub fn head(&self) -> Point {
        *self
            .body
            .back()
            .expect("snake body must always contain at least one segment")
    }

    /// Returns true if any segment sits exactly on `point`.
    #[must_use]
    pub fn occupies(&self, point: Point) -> bool {
        self.body.contains(&point)
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.body.len()
    }

    /// Returns true when there are no segments.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.body.is_empty()
    }

    #[must_use]
    pub fn direction(&self) -> Direction {
        self.direction
    }

    /// Iterates over segments from tail to head.
    pub fn segments(&self) -> impl DoubleEndedIterator<Item = &Point> {
        self.body.iter()
    }
}

#[cfg(test)]
mod tests {
    use crate::config::{ArenaSize, ConfigError};
    use crate::input::Direction;

    use super::{Point, Snake};

    #[test]
    fn bounds_are_half_open() {
        let arena = ArenaSize::default();

        assert!(Point::new(0.0, 0.0).is_within_bounds(arena));
        assert!(Point::new(799.9, 599.9).is_within_bounds(arena));
        assert!(!Point::new(800.0, 300.0).is_within_bounds(arena));
        assert!(!Point::new(400.0, 600.0).is_within_bounds(arena));
        assert!(!Point::new(-0.1, 300.0).is_within_bounds(arena));
    }

    #[test]
    fn next_head_scales_with_boost() {
        let mut snake = Snake::new(Point::new(400.0, 300.0), Direction::Down);

        assert_eq!(snake.next_head_position(10.0), Point::new(400.0, 310.0));

        snake.toggle_boost();
        assert!(snake.is_boosted());
        assert_eq!(snake.boost_multiplier(), 2.0);
        assert_eq!(snake.next_head_position(10.0), Point::new(400.0, 320.0));

        snake.toggle_boost();
        assert_eq!(snake.boost_multiplier(), 1.0);
    }

    #[test]
    fn advance_without_growth_shifts_body() {
        let mut snake = Snake::from_segments(
            vec![Point::new(380.0, 300.0), Point::new(390.0, 300.0)],
            Direction::Right,
        )
        .unwrap();

        snake.advance(Point::new(400.0, 300.0), false);

        let segments: Vec<Point> = snake.segments().copied().collect();
        assert_eq!(
            segments,
            vec![Point::new(390.0, 300.0), Point::new(400.0, 300.0)]
        );
        assert_eq!(snake.head(), Point::new(400.0, 300.0));
    }

    #[test]
    fn advance_with_growth_keeps_tail() {
        let mut snake = Snake::new(Point::new(400.0, 300.0), Direction::Right);

        snake.advance(Point::new(410.0, 300.0), true);

        assert_eq!(snake.len(), 2);
        assert!(snake.occupies(Point::new(400.0, 300.0)));
        assert_eq!(snake.head(), Point::new(410.0, 300.0));
    }

    #[test]
    fn empty_segments_are_rejected() {
        assert_eq!(
            Snake::from_segments(Vec::new(), Direction::Up),
            Err(ConfigError::EmptySnake)
        );
    }

    #[test]
    fn set_direction_overwrites_without_guard() {
        let mut snake = Snake::new(Point::new(400.0, 300.0), Direction::Right);

        snake.set_direction(Direction::Left);

        assert_eq!(snake.direction(), Direction::Left);
        assert_eq!(snake.next_head_position(10.0), Point::new(390.0, 300.0));
    }
}
