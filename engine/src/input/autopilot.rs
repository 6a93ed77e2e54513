// engine/src/input/autopilot.rs
#![forbid(unsafe_code)]

use crate::engine::{Cell, Direction, Game, Phase};

use super::base::{Control, InputSource};

/// Greedy steering toward the active item.
///
/// Candidate moves exclude the reverse turn and any move whose next cell is off-grid or on
/// the actor (the tail counts as occupied, matching the kernel). Among the rest it picks the
/// smallest Manhattan distance to the item, then the most free neighbours, then keeps the
/// current heading. Deterministic: no RNG.
#[derive(Clone, Debug, Default)]
pub struct AutopilotInput {
    /// Also request `Start` after a session terminates.
    restart: bool,
}

impl AutopilotInput {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn restarting() -> Self {
        Self { restart: true }
    }

    fn is_free(game: &Game, c: Cell) -> bool {
        game.board().in_bounds(c) && !game.board().is_occupied(c)
    }

    fn free_neighbours(game: &Game, c: Cell) -> usize {
        Direction::all()
            .iter()
            .filter(|&&d| Self::is_free(game, c.step(d)))
            .count()
    }

    /// Best safe direction, or `None` if every move collides.
    pub fn choose(game: &Game) -> Option<Direction> {
        let head = game.head()?;
        let current = game.direction();
        let target = game.item().map(|it| it.cell);

        Direction::all()
            .iter()
            .copied()
            .filter(|d| !d.is_reverse_of(current))
            .filter(|&d| Self::is_free(game, head.step(d)))
            .min_by_key(|&d| {
                let next = head.step(d);
                let dist = target.map(|t| next.manhattan(t)).unwrap_or(0);
                let room = Self::free_neighbours(game, next);
                (dist, usize::MAX - room, d != current)
            })
    }
}

impl InputSource for AutopilotInput {
    fn direction_request(&mut self, game: &Game) -> Option<Direction> {
        if !game.is_running() {
            return None;
        }
        Self::choose(game)
    }

    fn control_request(&mut self, game: &Game) -> Option<Control> {
        match game.phase() {
            Phase::Idle => Some(Control::Start),
            Phase::Terminated if self.restart => Some(Control::Start),
            _ => None,
        }
    }
}
