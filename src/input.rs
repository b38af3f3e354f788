use std::io;
use std::time::Duration;

use crossterm::event::{self, Event, KeyCode, KeyEvent, KeyEventKind};

/// Canonical movement directions, in screen coordinates (y grows downward).
#[derive(Debug, Clone, Copy, Eq, PartialEq)]
pub enum Direction {
    Up,
    Down,
    Left,
    Right,
}

impl Direction {
    /// Returns the opposite direction.
    #[must_use]
    pub fn opposite(self) -> Self {
        match self {
            Self::Up => Self::Down,
            Self::Down => Self::Up,
            Self::Left => Self::Right,
            Self::Right => Self::Left,
        }
    }

    /// Returns the unit step vector `(dx, dy)` for this direction.
    #[must_use]
    pub fn unit(self) -> (f64, f64) {
        match self {
            Self::Up => (0.0, -1.0),
            Self::Down => (0.0, 1.0),
            Self::Left => (-1.0, 0.0),
            Self::Right => (1.0, 0.0),
        }
    }
}

/// Returns whether a direction change is an exact 180° reversal.
#[must_use]
pub fn is_reversal(current: Direction, next: Direction) -> bool {
    next == current.opposite()
}

/// One tick's worth of input handed to the simulation step.
#[derive(Debug, Clone, Copy, Default, Eq, PartialEq)]
pub struct TickInput {
    pub direction: Option<Direction>,
    /// True only on the tick the boost key went down.
    pub boost_toggled: bool,
}

impl TickInput {
    #[must_use]
    pub fn turn(direction: Direction) -> Self {
        Self {
            direction: Some(direction),
            boost_toggled: false,
        }
    }

    #[must_use]
    pub fn toggle_boost() -> Self {
        Self {
            direction: None,
            boost_toggled: true,
        }
    }
}

/// Direction keys seen as held during one tick.
#[derive(Debug, Clone, Copy, Default, Eq, PartialEq)]
pub struct HeldKeys {
    pub up: bool,
    pub down: bool,
    pub left: bool,
    pub right: bool,
}

impl HeldKeys {
    /// Resolves simultaneous keys in fixed priority: up, down, left, right.
    #[must_use]
    pub fn resolve(self) -> Option<Direction> {
        if self.up {
            Some(Direction::Up)
        } else if self.down {
            Some(Direction::Down)
        } else if self.left {
            Some(Direction::Left)
        } else if self.right {
            Some(Direction::Right)
        } else {
            None
        }
    }

    fn press(&mut self, direction: Direction) {
        match direction {
            Direction::Up => self.up = true,
            Direction::Down => self.down = true,
            Direction::Left => self.left = true,
            Direction::Right => self.right = true,
        }
    }
}

/// Session-level commands that bypass the simulation step.
#[derive(Debug, Clone, Copy, Eq, PartialEq)]
pub enum Command {
    Pause,
    Restart,
    Quit,
}

/// Meaning of a single key press in the terminal driver.
#[derive(Debug, Clone, Copy, Eq, PartialEq)]
pub enum KeyAction {
    Steer(Direction),
    Boost,
    Command(Command),
}

/// Maps a terminal key to its action; unknown keys map to `None`.
#[must_use]
pub fn key_action(code: KeyCode) -> Option<KeyAction> {
    let action = match code {
        KeyCode::Up | KeyCode::Char('w' | 'W') => KeyAction::Steer(Direction::Up),
        KeyCode::Down | KeyCode::Char('s' | 'S') => KeyAction::Steer(Direction::Down),
        KeyCode::Left | KeyCode::Char('a' | 'A') => KeyAction::Steer(Direction::Left),
        KeyCode::Right | KeyCode::Char('d' | 'D') => KeyAction::Steer(Direction::Right),
        KeyCode::Char(' ') => KeyAction::Boost,
        KeyCode::Char('p' | 'P') => KeyAction::Command(Command::Pause),
        KeyCode::Enter => KeyAction::Command(Command::Restart),
        KeyCode::Esc | KeyCode::Char('q' | 'Q') => KeyAction::Command(Command::Quit),
        _ => return None,
    };
    Some(action)
}

/// Collects terminal key events between ticks.
///
/// Terminals report presses rather than held state, so every direction key
/// pressed since the last tick counts as held for that tick.
#[derive(Debug, Default)]
pub struct InputHandler {
    held: HeldKeys,
    boost_pressed: bool,
}

impl InputHandler {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Drains pending terminal events and returns the first session command seen.
    pub fn poll(&mut self) -> io::Result<Option<Command>> {
        let mut command = None;

        while event::poll(Duration::ZERO)? {
            let Event::Key(KeyEvent {
                code,
                kind: KeyEventKind::Press,
                ..
            }) = event::read()?
            else {
                continue;
            };

            if let Some(action) = key_action(code) {
                if let Some(next) = self.record(action) {
                    command.get_or_insert(next);
                }
            }
        }

        Ok(command)
    }

    /// Records one key action; returns it back when it is a session command.
    pub fn record(&mut self, action: KeyAction) -> Option<Command> {
        match action {
            KeyAction::Steer(direction) => {
                self.held.press(direction);
                None
            }
            KeyAction::Boost => {
                self.boost_pressed = true;
                None
            }
            KeyAction::Command(command) => Some(command),
        }
    }

    /// Resolves everything recorded since the previous tick and clears it.
    pub fn take_tick_input(&mut self) -> TickInput {
        let input = TickInput {
            direction: self.held.resolve(),
            boost_toggled: self.boost_pressed,
        };
        self.held = HeldKeys::default();
        self.boost_pressed = false;
        input
    }
}
