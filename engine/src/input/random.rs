// engine/src/input/random.rs
#![forbid(unsafe_code)]

use rand::prelude::*;

use crate::engine::{Direction, Game, Phase};

use super::base::{Control, InputSource};

/// Seeded random steering: turns with probability `turn_prob` each frame.
///
/// Reverse turns are requested too; the engine is expected to reject them.
pub struct RandomInput {
    rng: StdRng,
    turn_prob: f64,
}

impl RandomInput {
    pub const DEFAULT_TURN_PROB: f64 = 0.2;

    pub fn new(seed: u64) -> Self {
        Self::with_turn_prob(seed, Self::DEFAULT_TURN_PROB)
    }

    pub fn with_turn_prob(seed: u64, turn_prob: f64) -> Self {
        Self {
            rng: StdRng::seed_from_u64(seed),
            turn_prob: turn_prob.clamp(0.0, 1.0),
        }
    }
}

impl InputSource for RandomInput {
    fn direction_request(&mut self, game: &Game) -> Option<Direction> {
        if !game.is_running() || !self.rng.gen_bool(self.turn_prob) {
            return None;
        }
        Direction::all().choose(&mut self.rng).copied()
    }

    fn control_request(&mut self, game: &Game) -> Option<Control> {
        (game.phase() == Phase::Idle).then_some(Control::Start)
    }
}
