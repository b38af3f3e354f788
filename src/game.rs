use std::fmt;

use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};
use serde::{Deserialize, Serialize};
use tracing::{debug, info};

use crate::config::{ReversalRule, SelfCollisionRule, SimConfig};
use crate::food::Food;
use crate::input::{is_reversal, Direction, TickInput};
use crate::snake::{Point, Snake};

/// Why a simulation stopped.
#[derive(Debug, Clone, Copy, Eq, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum StopReason {
    OutOfBounds,
    SelfCollision,
}

impl fmt::Display for StopReason {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::OutOfBounds => f.write_str("left the arena"),
            Self::SelfCollision => f.write_str("ran into itself"),
        }
    }
}

/// Simulation status; `Stopped` is terminal.
#[derive(Debug, Clone, Copy, Eq, PartialEq)]
pub enum GameStatus {
    Running,
    Stopped(StopReason),
}

impl GameStatus {
    #[must_use]
    pub fn is_running(self) -> bool {
        self == Self::Running
    }
}

/// Result of one simulation step.
#[derive(Debug, Clone, PartialEq)]
pub struct StepOutcome {
    pub snake: Snake,
    pub food: Food,
    pub status: GameStatus,
    pub grew: bool,
}

/// Advances one tick: steer, move, check bounds and self-collision, eat or shift.
///
/// Inputs are borrowed and the next state is returned by value. On a stopping
/// tick the body and food are returned untouched; only the heading and boost
/// reflect the tick's input.
pub fn step<R: Rng + ?Sized>(
    snake: &Snake,
    food: &Food,
    config: &SimConfig,
    input: TickInput,
    rng: &mut R,
) -> StepOutcome {
    let mut snake = snake.clone();
    let food = *food;

    if let Some(direction) = input.direction {
        apply_direction(&mut snake, direction, config.reversal());
    }
    if input.boost_toggled {
        snake.toggle_boost();
    }

    let new_head = snake.next_head_position(config.step_length());

    if !new_head.is_within_bounds(config.arena()) {
        return stopped(snake, food, StopReason::OutOfBounds);
    }

    if snake.occupies(new_head) && config.self_collision() == SelfCollisionRule::EndsGame {
        return stopped(snake, food, StopReason::SelfCollision);
    }

    let grew = food.is_reached_by(new_head, config.pickup_tolerance());
    snake.advance(new_head, grew);

    let food = if grew {
        let next = food.respawn(rng, config.arena());
        debug!(
            length = snake.len(),
            x = next.position.x,
            y = next.position.y,
            "food eaten, respawned"
        );
        next
    } else {
        food
    };

    StepOutcome {
        snake,
        food,
        status: GameStatus::Running,
        grew,
    }
}

fn apply_direction(snake: &mut Snake, direction: Direction, rule: ReversalRule) {
    if rule == ReversalRule::Reject && is_reversal(snake.direction(), direction) {
        return;
    }
    snake.set_direction(direction);
}

fn stopped(snake: Snake, food: Food, reason: StopReason) -> StepOutcome {
    StepOutcome {
        snake,
        food,
        status: GameStatus::Stopped(reason),
        grew: false,
    }
}

/// Complete state for one simulation session.
#[derive(Debug, Clone)]
pub struct GameState {
    snake: Snake,
    food: Food,
    status: GameStatus,
    tick_count: u64,
    food_eaten: u32,
    config: SimConfig,
    rng: StdRng,
}

impl GameState {
    /// Creates a session seeded from OS entropy.
    #[must_use]
    pub fn new(config: SimConfig) -> Self {
        Self::with_rng(config, StdRng::from_entropy())
    }

    /// Creates a deterministic session for tests and reproducible runs.
    #[must_use]
    pub fn new_with_seed(config: SimConfig, seed: u64) -> Self {
        Self::with_rng(config, StdRng::seed_from_u64(seed))
    }

    fn with_rng(config: SimConfig, mut rng: StdRng) -> Self {
        let (snake, food) = initial_pieces(&config, &mut rng);
        Self {
            snake,
            food,
            status: GameStatus::Running,
            tick_count: 0,
            food_eaten: 0,
            config,
            rng,
        }
    }

    /// Advances by one tick. A stopped session is left unchanged.
    pub fn tick(&mut self, input: TickInput) -> GameStatus {
        if !self.status.is_running() {
            return self.status;
        }

        let outcome = step(&self.snake, &self.food, &self.config, input, &mut self.rng);
        self.tick_count += 1;
        self.snake = outcome.snake;
        self.food = outcome.food;
        self.status = outcome.status;
        if outcome.grew {
            self.food_eaten += 1;
        }

        if let GameStatus::Stopped(reason) = self.status {
            info!(
                %reason,
                ticks = self.tick_count,
                length = self.snake.len(),
                "simulation stopped"
            );
        }

        self.status
    }

    /// Starts a fresh snake and food with the same config.
    pub fn restart(&mut self) {
        let (snake, food) = initial_pieces(&self.config, &mut self.rng);
        self.snake = snake;
        self.food = food;
        self.status = GameStatus::Running;
        self.tick_count = 0;
        self.food_eaten = 0;
    }

    /// Replaces the snake; intended for scripted scenarios.
    pub fn set_snake(&mut self, snake: Snake) {
        self.snake = snake;
    }

    /// Replaces the food; intended for scripted scenarios.
    pub fn set_food(&mut self, food: Food) {
        self.food = food;
    }

    #[must_use]
    pub fn snake(&self) -> &Snake {
        &self.snake
    }

    #[must_use]
    pub fn food(&self) -> Food {
        self.food
    }

    #[must_use]
    pub fn status(&self) -> GameStatus {
        self.status
    }

    #[must_use]
    pub fn config(&self) -> &SimConfig {
        &self.config
    }

    #[must_use]
    pub fn tick_count(&self) -> u64 {
        self.tick_count
    }

    #[must_use]
    pub fn food_eaten(&self) -> u32 {
        self.food_eaten
    }
}

fn initial_pieces<R: Rng + ?Sized>(config: &SimConfig, rng: &mut R) -> (Snake, Food) {
    let (x, y) = config.arena().center();
    let snake = Snake::new(Point::new(x, y), Direction::Right);
    let food = Food::spawn(rng, config.arena());
    (snake, food)
}

#[cfg(test)]
mod tests {
    use rand::rngs::StdRng;
    use rand::SeedableRng;

    use crate::config::{ReversalRule, SelfCollisionRule, SimConfig};
    use crate::food::Food;
    use crate::input::{Direction, TickInput};
    use crate::snake::{Point, Snake};

    use super::{step, GameState, GameStatus, StopReason};

    const FAR_FOOD: Food = Food {
        position: Point::new(10.0, 10.0),
    };

    fn rng() -> StdRng {
        StdRng::seed_from_u64(5)
    }

    #[test]
    fn one_tick_right_from_center() {
        let snake = Snake::new(Point::new(400.0, 300.0), Direction::Right);

        let outcome = step(
            &snake,
            &FAR_FOOD,
            &SimConfig::default(),
            TickInput::default(),
            &mut rng(),
        );

        assert_eq!(outcome.status, GameStatus::Running);
        assert_eq!(outcome.snake.head(), Point::new(410.0, 300.0));
        assert_eq!(outcome.snake.len(), 1);
        assert_eq!(outcome.food, FAR_FOOD);
        assert!(!outcome.grew);
    }

    #[test]
    fn boosted_tick_moves_twice_as_far() {
        let snake = Snake::new(Point::new(400.0, 300.0), Direction::Up);

        let outcome = step(
            &snake,
            &FAR_FOOD,
            &SimConfig::default(),
            TickInput::toggle_boost(),
            &mut rng(),
        );

        assert!(outcome.snake.is_boosted());
        assert_eq!(outcome.snake.head(), Point::new(400.0, 280.0));
    }

    #[test]
    fn leaving_the_arena_stops_without_moving() {
        let snake = Snake::new(Point::new(795.0, 300.0), Direction::Right);

        let outcome = step(
            &snake,
            &FAR_FOOD,
            &SimConfig::default(),
            TickInput::default(),
            &mut rng(),
        );

        assert_eq!(outcome.status, GameStatus::Stopped(StopReason::OutOfBounds));
        assert_eq!(outcome.snake.head(), Point::new(795.0, 300.0));
    }

    #[test]
    fn bounds_check_runs_before_food() {
        let snake = Snake::new(Point::new(795.0, 300.0), Direction::Right);
        let food = Food::new(Point::new(799.0, 300.0));

        let outcome = step(
            &snake,
            &food,
            &SimConfig::default(),
            TickInput::default(),
            &mut rng(),
        );

        assert_eq!(outcome.status, GameStatus::Stopped(StopReason::OutOfBounds));
        assert_eq!(outcome.snake.len(), 1);
        assert_eq!(outcome.food, food);
    }

    #[test]
    fn eating_food_grows_and_respawns() {
        let snake = Snake::new(Point::new(400.0, 300.0), Direction::Right);
        let food = Food::new(Point::new(410.0, 300.0));

        let outcome = step(
            &snake,
            &food,
            &SimConfig::default(),
            TickInput::default(),
            &mut rng(),
        );

        assert!(outcome.grew);
        assert_eq!(outcome.snake.len(), 2);
        assert_eq!(outcome.snake.head(), Point::new(410.0, 300.0));
        assert_ne!(outcome.food.position, Point::new(410.0, 300.0));
    }

    #[test]
    fn revisiting_the_body_stops_with_self_collision() {
        let snake = Snake::from_segments(
            vec![
                Point::new(400.0, 300.0),
                Point::new(410.0, 300.0),
                Point::new(420.0, 300.0),
            ],
            Direction::Right,
        )
        .unwrap();

        let outcome = step(
            &snake,
            &FAR_FOOD,
            &SimConfig::default(),
            TickInput::turn(Direction::Left),
            &mut rng(),
        );

        assert_eq!(
            outcome.status,
            GameStatus::Stopped(StopReason::SelfCollision)
        );
        let body: Vec<Point> = outcome.snake.segments().copied().collect();
        assert_eq!(
            body,
            vec![
                Point::new(400.0, 300.0),
                Point::new(410.0, 300.0),
                Point::new(420.0, 300.0),
            ]
        );
    }

    #[test]
    fn ignore_rule_lets_the_snake_pass_through_itself() {
        let snake = Snake::from_segments(
            vec![
                Point::new(400.0, 300.0),
                Point::new(410.0, 300.0),
                Point::new(420.0, 300.0),
            ],
            Direction::Right,
        )
        .unwrap();
        let config = SimConfig::default().with_self_collision(SelfCollisionRule::Ignore);

        let outcome = step(
            &snake,
            &FAR_FOOD,
            &config,
            TickInput::turn(Direction::Left),
            &mut rng(),
        );

        assert_eq!(outcome.status, GameStatus::Running);
        assert_eq!(outcome.snake.head(), Point::new(410.0, 300.0));
        assert_eq!(outcome.snake.len(), 3);
    }

    #[test]
    fn reject_rule_drops_reversals() {
        let snake = Snake::new(Point::new(400.0, 300.0), Direction::Right);
        let config = SimConfig::default().with_reversal(ReversalRule::Reject);

        let reversed = step(
            &snake,
            &FAR_FOOD,
            &config,
            TickInput::turn(Direction::Left),
            &mut rng(),
        );
        assert_eq!(reversed.snake.direction(), Direction::Right);
        assert_eq!(reversed.snake.head(), Point::new(410.0, 300.0));

        let turned = step(
            &snake,
            &FAR_FOOD,
            &config,
            TickInput::turn(Direction::Down),
            &mut rng(),
        );
        assert_eq!(turned.snake.head(), Point::new(400.0, 310.0));
    }

    #[test]
    fn new_session_starts_at_arena_center_heading_right() {
        let state = GameState::new_with_seed(SimConfig::default(), 1);

        assert_eq!(state.snake().head(), Point::new(400.0, 300.0));
        assert_eq!(state.snake().direction(), Direction::Right);
        assert_eq!(state.snake().len(), 1);
        assert!(state.food().position.is_within_bounds(state.config().arena()));
        assert_eq!(state.status(), GameStatus::Running);
    }

    #[test]
    fn stopped_session_ignores_further_ticks() {
        let mut state = GameState::new_with_seed(SimConfig::default(), 2);
        state.set_snake(Snake::new(Point::new(795.0, 300.0), Direction::Right));

        assert_eq!(
            state.tick(TickInput::default()),
            GameStatus::Stopped(StopReason::OutOfBounds)
        );

        let snake = state.snake().clone();
        let food = state.food();
        for _ in 0..5 {
            state.tick(TickInput {
                direction: Some(Direction::Left),
                boost_toggled: true,
            });
        }

        assert_eq!(state.snake(), &snake);
        assert_eq!(state.food(), food);
        assert_eq!(state.tick_count(), 1);
    }

    #[test]
    fn restart_resets_counters_and_status() {
        let mut state = GameState::new_with_seed(SimConfig::default(), 3);
        state.set_food(Food::new(Point::new(410.0, 300.0)));
        state.tick(TickInput::default());
        assert_eq!(state.food_eaten(), 1);

        state.set_snake(Snake::new(Point::new(795.0, 300.0), Direction::Right));
        state.tick(TickInput::default());
        assert!(!state.status().is_running());

        state.restart();

        assert_eq!(state.status(), GameStatus::Running);
        assert_eq!(state.tick_count(), 0);
        assert_eq!(state.food_eaten(), 0);
        assert_eq!(state.snake().len(), 1);
    }
}
