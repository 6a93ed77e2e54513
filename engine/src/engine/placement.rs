// engine/src/engine/placement.rs
#![forbid(unsafe_code)]

use log::debug;
use rand::prelude::*;

use crate::engine::constants::PLACEMENT_ATTEMPTS;
use crate::engine::geometry::Cell;
use crate::engine::grid::Board;
use crate::engine::items::{Item, TrashKind};

/// Owns the item RNG stream.
///
/// All randomness of a session lives here, so a seed fully determines placement.
#[derive(Clone)]
pub struct ItemPlacer {
    rng: StdRng,
    attempts: usize,
}

impl ItemPlacer {
    pub fn new(seed: u64) -> Self {
        Self::with_attempts(seed, PLACEMENT_ATTEMPTS)
    }

    /// `attempts == 0` skips sampling and always scans.
    pub fn with_attempts(seed: u64, attempts: usize) -> Self {
        Self {
            rng: StdRng::seed_from_u64(seed),
            attempts,
        }
    }

    pub fn attempts(&self) -> usize {
        self.attempts
    }

    /// Picks a free cell and a category.
    ///
    /// Returns `None` iff the board has no free cell (or there are no categories).
    pub fn place(&mut self, board: &Board, kinds: &[TrashKind]) -> Option<Item> {
        if kinds.is_empty() {
            return None;
        }
        let cell = self.sample_free(board)?;
        let kind = self.rng.gen_range(0..kinds.len());
        Some(Item {
            cell,
            kind,
            points: kinds[kind].points,
        })
    }

    fn sample_free(&mut self, board: &Board) -> Option<Cell> {
        if board.free_count() == 0 {
            return None;
        }

        for _ in 0..self.attempts {
            let c = Cell::new(
                self.rng.gen_range(0..board.width()) as i32,
                self.rng.gen_range(0..board.height()) as i32,
            );
            if !board.is_occupied(c) {
                return Some(c);
            }
        }

        debug!(
            "item placement: {} samples hit the actor, scanning {} free cells",
            self.attempts,
            board.free_count()
        );
        board.free_cells().choose(&mut self.rng).copied()
    }
}
