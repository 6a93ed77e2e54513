// engine/src/input/scripted.rs
#![forbid(unsafe_code)]

use std::collections::VecDeque;

use crate::engine::{Direction, Game};

use super::base::{Control, InputSource};

/// Requests delivered on one frame.
#[derive(Clone, Copy, Debug, Default, Eq, PartialEq)]
pub struct ScriptFrame {
    pub control: Option<Control>,
    pub direction: Option<Direction>,
}

/// Replays a fixed list of frames, one per `Session::frame()` call.
///
/// Once the script runs out it stays silent, or requests teardown if built with
/// `teardown_when_done`.
#[derive(Clone, Debug, Default)]
pub struct ScriptedInput {
    frames: VecDeque<ScriptFrame>,
    current: ScriptFrame,
    teardown_when_done: bool,
}

impl ScriptedInput {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn control(mut self, c: Control) -> Self {
        self.frames.push_back(ScriptFrame {
            control: Some(c),
            direction: None,
        });
        self
    }

    pub fn steer(mut self, d: Direction) -> Self {
        self.frames.push_back(ScriptFrame {
            control: None,
            direction: Some(d),
        });
        self
    }

    /// `n` frames without requests.
    pub fn idle(mut self, n: usize) -> Self {
        self.frames.extend(std::iter::repeat(ScriptFrame::default()).take(n));
        self
    }

    pub fn frame(mut self, f: ScriptFrame) -> Self {
        self.frames.push_back(f);
        self
    }

    pub fn teardown_when_done(mut self) -> Self {
        self.teardown_when_done = true;
        self
    }

    pub fn remaining(&self) -> usize {
        self.frames.len()
    }
}

impl InputSource for ScriptedInput {
    fn control_request(&mut self, _game: &Game) -> Option<Control> {
        self.current = self.frames.pop_front().unwrap_or_default();
        self.current.control
    }

    fn direction_request(&mut self, _game: &Game) -> Option<Direction> {
        self.current.direction.take()
    }

    fn teardown(&mut self) -> bool {
        self.teardown_when_done && self.frames.is_empty()
    }
}
