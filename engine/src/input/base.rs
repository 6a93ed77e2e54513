// engine/src/input/base.rs
#![forbid(unsafe_code)]

use crate::engine::{Direction, Game};

/// Lifecycle requests coming from the player side.
#[derive(Clone, Copy, Debug, Eq, PartialEq)]
pub enum Control {
    Start,
    Pause,
    Resume,
    TogglePause,
    End,
}

/// Input adapter consulted once per frame by a `Session`.
///
/// Requests are only requests: the engine validates them (reverse turns, redundant
/// start/pause) and silently drops what it cannot honour.
///
/// Object-safe so it can be used as `Box<dyn InputSource>`.
pub trait InputSource {
    /// Direction wanted for the next tick, if any.
    fn direction_request(&mut self, game: &Game) -> Option<Direction>;

    /// Start / pause / resume / end request, if any. Polled before `direction_request`.
    fn control_request(&mut self, game: &Game) -> Option<Control>;

    /// True once the input side wants the session torn down.
    fn teardown(&mut self) -> bool {
        false
    }
}

/// Built-in input sources selectable by name.
#[derive(Clone, Copy, Debug, Eq, PartialEq)]
pub enum InputKind {
    Keyboard,
    Autopilot,
    Random,
}

impl InputKind {
    pub fn from_cli(s: &str) -> Self {
        match s.to_lowercase().as_str() {
            "keyboard" | "keys" | "play" => InputKind::Keyboard,
            "random" | "rand" => InputKind::Random,
            _ => InputKind::Autopilot,
        }
    }
}
