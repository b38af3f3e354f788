use ratatui::style::Color;
use ratatui::symbols::border;
use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Default arena width in world units.
pub const DEFAULT_ARENA_WIDTH: f64 = 800.0;

/// Default arena height in world units.
pub const DEFAULT_ARENA_HEIGHT: f64 = 600.0;

/// Per-axis displacement applied on every unboosted tick.
pub const DEFAULT_STEP_LENGTH: f64 = 10.0;

/// Maximum per-axis head-to-food distance that counts as a pickup.
pub const DEFAULT_PICKUP_TOLERANCE: f64 = 10.0;

/// Step multiplier while boost is active.
pub const BOOST_MULTIPLIER: f64 = 2.0;

/// Base tick interval in milliseconds.
pub const DEFAULT_TICK_INTERVAL_MS: u64 = 100;

/// Minimum tick interval in milliseconds.
pub const MIN_TICK_INTERVAL_MS: u64 = 20;

/// Frame loop sleep between input polls.
pub const FRAME_INTERVAL_MS: u64 = 16;

/// Construction-time misconfiguration of a simulation.
#[derive(Debug, Clone, Copy, PartialEq, Error)]
pub enum ConfigError {
    #[error("arena dimensions must be positive and finite, got {width}×{height}")]
    InvalidArena { width: f64, height: f64 },
    #[error("step length must be positive and finite, got {0}")]
    InvalidStepLength(f64),
    #[error("step length {step_length} is too small to move a point in a {width}×{height} arena")]
    StepLengthBelowPrecision {
        step_length: f64,
        width: f64,
        height: f64,
    },
    #[error("pickup tolerance must be positive and finite, got {0}")]
    InvalidPickupTolerance(f64),
    #[error("tick interval must be at least {min} ms, got {0} ms", min = MIN_TICK_INTERVAL_MS)]
    TickIntervalTooShort(u64),
    #[error("snake body must contain at least one segment")]
    EmptySnake,
}

/// Rectangular arena bounds: legal coordinates are `[0, width) × [0, height)`.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ArenaSize {
    pub width: f64,
    pub height: f64,
}

impl ArenaSize {
    /// Validates and creates arena bounds.
    pub fn new(width: f64, height: f64) -> Result<Self, ConfigError> {
        if !is_positive_finite(width) || !is_positive_finite(height) {
            return Err(ConfigError::InvalidArena { width, height });
        }
        Ok(Self { width, height })
    }

    /// Returns the arena center, where new snakes start.
    #[must_use]
    pub fn center(self) -> (f64, f64) {
        (self.width / 2.0, self.height / 2.0)
    }
}

impl Default for ArenaSize {
    fn default() -> Self {
        Self {
            width: DEFAULT_ARENA_WIDTH,
            height: DEFAULT_ARENA_HEIGHT,
        }
    }
}

/// What happens when the new head lands on an existing body point.
#[derive(Debug, Clone, Copy, Default, Eq, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum SelfCollisionRule {
    /// The simulation stops with a self-collision reason.
    #[default]
    EndsGame,
    /// The overlap is detected and ignored; the snake keeps moving.
    Ignore,
}

/// Whether a direction input may reverse the snake in place.
#[derive(Debug, Clone, Copy, Default, Eq, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ReversalRule {
    /// Any requested direction replaces the current one.
    #[default]
    Allow,
    /// Exact 180° reversals are dropped.
    Reject,
}

/// Validated, immutable parameters for one simulation.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct SimConfig {
    arena: ArenaSize,
    step_length: f64,
    pickup_tolerance: f64,
    self_collision: SelfCollisionRule,
    reversal: ReversalRule,
}

impl SimConfig {
    /// Creates a config with default rules after validating every numeric field.
    pub fn new(
        arena: ArenaSize,
        step_length: f64,
        pickup_tolerance: f64,
    ) -> Result<Self, ConfigError> {
        let arena = ArenaSize::new(arena.width, arena.height)?;
        if !is_positive_finite(step_length) {
            return Err(ConfigError::InvalidStepLength(step_length));
        }
        // A step lost to rounding at the far edge would leave the head in place.
        if arena.width + step_length == arena.width || arena.height + step_length == arena.height {
            return Err(ConfigError::StepLengthBelowPrecision {
                step_length,
                width: arena.width,
                height: arena.height,
            });
        }
        if !is_positive_finite(pickup_tolerance) {
            return Err(ConfigError::InvalidPickupTolerance(pickup_tolerance));
        }

        Ok(Self {
            arena,
            step_length,
            pickup_tolerance,
            self_collision: SelfCollisionRule::default(),
            reversal: ReversalRule::default(),
        })
    }

    #[must_use]
    pub fn with_self_collision(mut self, rule: SelfCollisionRule) -> Self {
        self.self_collision = rule;
        self
    }

    #[must_use]
    pub fn with_reversal(mut self, rule: ReversalRule) -> Self {
        self.reversal = rule;
        self
    }

    #[must_use]
    pub fn arena(&self) -> ArenaSize {
        self.arena
    }

    #[must_use]
    pub fn step_length(&self) -> f64 {
        self.step_length
    }

    #[must_use]
    pub fn pickup_tolerance(&self) -> f64 {
        self.pickup_tolerance
    }

    #[must_use]
    pub fn self_collision(&self) -> SelfCollisionRule {
        self.self_collision
    }

    #[must_use]
    pub fn reversal(&self) -> ReversalRule {
        self.reversal
    }
}

impl Default for SimConfig {
    fn default() -> Self {
        Self {
            arena: ArenaSize::default(),
            step_length: DEFAULT_STEP_LENGTH,
            pickup_tolerance: DEFAULT_PICKUP_TOLERANCE,
            self_collision: SelfCollisionRule::default(),
            reversal: ReversalRule::default(),
        }
    }
}

fn is_positive_finite(value: f64) -> bool {
    value.is_finite() && value > 0.0
}

/// Colors applied to the terminal rendering.
#[derive(Debug)]
pub struct Theme {
    pub snake_head: Color,
    pub snake_body: Color,
    /// Head color while boost is active.
    pub snake_boost: Color,
    pub food: Color,
    pub play_bg: Color,
    pub border_fg: Color,
    pub hud_text: Color,
    pub menu_title: Color,
    pub menu_footer: Color,
}

pub const THEME_SEASHELL: Theme = Theme {
    snake_head: Color::White,
    snake_body: Color::Green,
    snake_boost: Color::Yellow,
    food: Color::Red,
    play_bg: Color::Black,
    border_fg: Color::Gray,
    hud_text: Color::White,
    menu_title: Color::Green,
    menu_footer: Color::DarkGray,
};

/// Half-block border set: solid side faces the play area.
pub const BORDER_HALF_BLOCK: border::Set = border::Set {
    top_left: "▄",
    top_right: "▄",
    bottom_left: "▀",
    bottom_right: "▀",
    vertical_left: "█",
    vertical_right: "█",
    horizontal_top: "▄",
    horizontal_bottom: "▀",
};

pub const GLYPH_SNAKE_HEAD: &str = "█";
pub const GLYPH_SNAKE_BODY: &str = "▓";
pub const GLYPH_FOOD: &str = "●";

#[cfg(test)]
mod tests {
    use super::{ArenaSize, ConfigError, ReversalRule, SelfCollisionRule, SimConfig};

    #[test]
    fn default_config_matches_documented_values() {
        let config = SimConfig::default();

        assert_eq!(config.arena(), ArenaSize::new(800.0, 600.0).unwrap());
        assert_eq!(config.step_length(), 10.0);
        assert_eq!(config.pickup_tolerance(), 10.0);
        assert_eq!(config.self_collision(), SelfCollisionRule::EndsGame);
        assert_eq!(config.reversal(), ReversalRule::Allow);
    }

    #[test]
    fn zero_sized_arena_is_rejected() {
        assert_eq!(
            ArenaSize::new(0.0, 600.0),
            Err(ConfigError::InvalidArena {
                width: 0.0,
                height: 600.0
            })
        );
        assert!(ArenaSize::new(800.0, -1.0).is_err());
        assert!(ArenaSize::new(f64::INFINITY, 600.0).is_err());
    }

    #[test]
    fn zero_step_length_is_rejected() {
        let result = SimConfig::new(ArenaSize::default(), 0.0, 10.0);
        assert_eq!(result, Err(ConfigError::InvalidStepLength(0.0)));
    }

    #[test]
    fn step_length_lost_to_rounding_is_rejected() {
        let result = SimConfig::new(ArenaSize::default(), 1e-14, 10.0);
        assert_eq!(
            result,
            Err(ConfigError::StepLengthBelowPrecision {
                step_length: 1e-14,
                width: 800.0,
                height: 600.0,
            })
        );

        assert!(SimConfig::new(ArenaSize::default(), 0.5, 10.0).is_ok());
    }

    #[test]
    fn nan_tolerance_is_rejected() {
        let result = SimConfig::new(ArenaSize::default(), 10.0, f64::NAN);
        assert!(matches!(
            result,
            Err(ConfigError::InvalidPickupTolerance(_))
        ));
    }

    #[test]
    fn unvalidated_arena_is_checked_again_by_sim_config() {
        let arena = ArenaSize {
            width: 0.0,
            height: 0.0,
        };
        assert!(SimConfig::new(arena, 10.0, 10.0).is_err());
    }

    #[test]
    fn rule_builders_override_defaults() {
        let config = SimConfig::default()
            .with_self_collision(SelfCollisionRule::Ignore)
            .with_reversal(ReversalRule::Reject);

        assert_eq!(config.self_collision(), SelfCollisionRule::Ignore);
        assert_eq!(config.reversal(), ReversalRule::Reject);
    }
}
