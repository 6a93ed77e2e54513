// engine/src/engine/game.rs
#![forbid(unsafe_code)]

use std::collections::VecDeque;

use log::{debug, info};

use crate::engine::config::{ConfigError, GameConfig};
use crate::engine::geometry::{Cell, Direction};
use crate::engine::grid::Board;
use crate::engine::items::{Item, TrashKind};
use crate::engine::placement::ItemPlacer;

#[derive(Clone, Copy, Debug, Eq, PartialEq)]
pub enum Phase {
    Idle,
    Running,
    Paused,
    Terminated,
}

#[derive(Clone, Copy, Debug, Eq, PartialEq)]
pub enum EndReason {
    /// Next head left the grid.
    HitWall,
    /// Next head landed on the actor.
    HitSelf,
    /// Actor covers every cell; no item can be placed.
    BoardFull,
    /// Explicit `end()`.
    Stopped,
}

/// Terminal summary, produced exactly once per session.
#[derive(Clone, Copy, Debug, Eq, PartialEq)]
pub struct SessionReport {
    pub score: u64,
    pub items_collected: u64,
    pub ticks: u64,
    pub length: usize,
    pub reason: EndReason,
}

#[derive(Clone, Copy, Debug, Default)]
pub struct StepResult {
    /// The tick was processed (the session was Running).
    pub advanced: bool,
    /// This call moved the session into Terminated.
    pub terminated: bool,
    /// Item collected on this tick, if any.
    pub collected: Option<Item>,
    /// Present iff `terminated`.
    pub report: Option<SessionReport>,
}

#[derive(Clone)]
pub struct Game {
    config: GameConfig,
    board: Board,
    placer: ItemPlacer,

    /// Head at the front.
    snake: VecDeque<Cell>,
    direction: Direction,
    pending: Direction,
    item: Option<Item>,

    score: u64,
    items_collected: u64,
    ticks: u64,

    phase: Phase,
    end_reason: Option<EndReason>,
}

impl Game {
    /// Default configuration.
    pub fn new(seed: u64) -> Self {
        Self::build(GameConfig::default(), ItemPlacer::new(seed))
    }

    pub fn with_config(config: GameConfig, seed: u64) -> Result<Self, ConfigError> {
        Self::with_placer(config, ItemPlacer::new(seed))
    }

    /// Inject a custom placer (e.g. a different sampling budget).
    pub fn with_placer(config: GameConfig, placer: ItemPlacer) -> Result<Self, ConfigError> {
        config.validate()?;
        Ok(Self::build(config, placer))
    }

    fn build(config: GameConfig, placer: ItemPlacer) -> Self {
        let board = Board::new(config.grid.width, config.grid.height);
        Self {
            config,
            board,
            placer,
            snake: VecDeque::new(),
            direction: Direction::Right,
            pending: Direction::Right,
            item: None,
            score: 0,
            items_collected: 0,
            ticks: 0,
            phase: Phase::Idle,
            end_reason: None,
        }
    }

    // -------------------------------------------------------------------------
    // Read-only view
    // -------------------------------------------------------------------------

    pub fn config(&self) -> &GameConfig {
        &self.config
    }

    pub fn board(&self) -> &Board {
        &self.board
    }

    pub fn width(&self) -> usize {
        self.board.width()
    }

    pub fn height(&self) -> usize {
        self.board.height()
    }

    pub fn phase(&self) -> Phase {
        self.phase
    }

    /// Running or Paused.
    pub fn is_active(&self) -> bool {
        matches!(self.phase, Phase::Running | Phase::Paused)
    }

    pub fn is_running(&self) -> bool {
        self.phase == Phase::Running
    }

    pub fn is_over(&self) -> bool {
        self.phase == Phase::Terminated
    }

    pub fn snake(&self) -> &VecDeque<Cell> {
        &self.snake
    }

    pub fn head(&self) -> Option<Cell> {
        self.snake.front().copied()
    }

    pub fn len(&self) -> usize {
        self.snake.len()
    }

    pub fn is_empty(&self) -> bool {
        self.snake.is_empty()
    }

    pub fn direction(&self) -> Direction {
        self.direction
    }

    pub fn pending_direction(&self) -> Direction {
        self.pending
    }

    pub fn item(&self) -> Option<Item> {
        self.item
    }

    pub fn item_kind(&self) -> Option<&TrashKind> {
        self.item.and_then(|it| self.config.items.get(it.kind))
    }

    pub fn score(&self) -> u64 {
        self.score
    }

    pub fn items_collected(&self) -> u64 {
        self.items_collected
    }

    pub fn ticks(&self) -> u64 {
        self.ticks
    }

    pub fn end_reason(&self) -> Option<EndReason> {
        self.end_reason
    }

    /// Terminal summary of the last finished session.
    pub fn report(&self) -> Option<SessionReport> {
        self.end_reason.map(|reason| self.make_report(reason))
    }

    // -------------------------------------------------------------------------
    // Controls
    // -------------------------------------------------------------------------

    /// Resets session state and enters Running.
    ///
    /// No-op (returns false) while a session is Running or Paused.
    pub fn start(&mut self) -> bool {
        if self.is_active() {
            return false;
        }
        self.reset_session();
        self.phase = Phase::Running;
        info!(
            "session start: grid={}x{} len={} item={:?}",
            self.width(),
            self.height(),
            self.snake.len(),
            self.item
        );
        true
    }

    fn reset_session(&mut self) {
        self.board.clear();
        self.snake.clear();
        for c in self.config.start_path() {
            self.board.occupy(c);
            self.snake.push_back(c);
        }

        self.direction = Direction::Right;
        self.pending = Direction::Right;
        self.score = 0;
        self.items_collected = 0;
        self.ticks = 0;
        self.end_reason = None;

        // Config validation guarantees a free cell here.
        self.item = self.placer.place(&self.board, &self.config.items);
    }

    /// Buffers `dir` for the next tick.
    ///
    /// Rejected (returns false) when no session is active or when `dir` reverses the
    /// direction the actor is currently moving in. Checked against the current
    /// direction, not the pending one, so two quick turns cannot fold the actor back.
    pub fn set_direction(&mut self, dir: Direction) -> bool {
        if !self.is_active() || dir.is_reverse_of(self.direction) {
            return false;
        }
        self.pending = dir;
        true
    }

    /// Running -> Paused. Returns whether the phase changed.
    pub fn pause(&mut self) -> bool {
        if self.phase != Phase::Running {
            return false;
        }
        self.phase = Phase::Paused;
        true
    }

    /// Paused -> Running. Returns whether the phase changed.
    pub fn resume(&mut self) -> bool {
        if self.phase != Phase::Paused {
            return false;
        }
        self.phase = Phase::Running;
        true
    }

    pub fn toggle_pause(&mut self) -> bool {
        match self.phase {
            Phase::Running => self.pause(),
            Phase::Paused => self.resume(),
            _ => false,
        }
    }

    /// Ends an active session and returns its report; `None` if nothing was active.
    pub fn end(&mut self) -> Option<SessionReport> {
        if !self.is_active() {
            return None;
        }
        self.terminate(EndReason::Stopped).report
    }

    /// Changes grid bounds between sessions.
    ///
    /// A finished session is discarded; the engine returns to Idle.
    pub fn resize(&mut self, width: usize, height: usize) -> Result<(), ConfigError> {
        if self.is_active() {
            return Err(ConfigError::SessionActive);
        }
        let config = self.config.clone().with_grid(width, height);
        config.validate()?;

        self.config = config;
        self.board = Board::new(width, height);
        self.snake.clear();
        self.item = None;
        self.end_reason = None;
        self.phase = Phase::Idle;
        Ok(())
    }

    /// Places the active item at `cell` with category `kind`.
    ///
    /// Intended for scripted setups; refused if no session is active, the cell is off-grid
    /// or on the actor, or `kind` is not a configured category.
    pub fn force_item(&mut self, cell: Cell, kind: usize) -> bool {
        if !self.is_active() || !self.board.in_bounds(cell) || self.board.is_occupied(cell) {
            return false;
        }
        let Some(k) = self.config.items.get(kind) else {
            return false;
        };
        self.item = Some(Item {
            cell,
            kind,
            points: k.points,
        });
        true
    }

    // -------------------------------------------------------------------------
    // Transition kernel
    // -------------------------------------------------------------------------

    /// One simulation step.
    ///
    /// Kernel semantics:
    /// - Not Running => no-op (`advanced == false`).
    /// - Pending direction is adopted first; the next head is checked against the bounds,
    ///   then against every actor cell (tail included), before anything moves.
    /// - Collection keeps the tail (growth by one) and places a new item; if no free cell is
    ///   left the session ends with `BoardFull`.
    pub fn tick(&mut self) -> StepResult {
        if self.phase != Phase::Running {
            return StepResult::default();
        }

        self.direction = self.pending;
        let Some(head) = self.head() else {
            return self.terminate(EndReason::Stopped);
        };
        let next = head.step(self.direction);

        if !self.board.in_bounds(next) {
            return self.terminate(EndReason::HitWall);
        }
        if self.board.is_occupied(next) {
            return self.terminate(EndReason::HitSelf);
        }

        self.ticks += 1;
        self.snake.push_front(next);
        self.board.occupy(next);

        let collected = self.item.filter(|it| it.cell == next);
        match collected {
            Some(item) => {
                self.score += u64::from(item.points);
                self.items_collected += 1;
                debug!(
                    "collected {} (+{}) at ({}, {}): score={} len={}",
                    self.config.items[item.kind].name,
                    item.points,
                    next.x,
                    next.y,
                    self.score,
                    self.snake.len()
                );

                self.item = self.placer.place(&self.board, &self.config.items);
                if self.item.is_none() {
                    let mut r = self.terminate(EndReason::BoardFull);
                    r.collected = Some(item);
                    return r;
                }
            }
            None => {
                if let Some(tail) = self.snake.pop_back() {
                    self.board.vacate(tail);
                }
            }
        }

        StepResult {
            advanced: true,
            terminated: false,
            collected,
            report: None,
        }
    }

    fn terminate(&mut self, reason: EndReason) -> StepResult {
        let advanced = self.phase == Phase::Running && reason != EndReason::Stopped;
        self.phase = Phase::Terminated;
        self.end_reason = Some(reason);

        let report = self.make_report(reason);
        info!(
            "session over: reason={:?} score={} items={} ticks={} len={}",
            reason, report.score, report.items_collected, report.ticks, report.length
        );

        StepResult {
            advanced,
            terminated: true,
            collected: None,
            report: Some(report),
        }
    }

    fn make_report(&self, reason: EndReason) -> SessionReport {
        SessionReport {
            score: self.score,
            items_collected: self.items_collected,
            ticks: self.ticks,
            length: self.snake.len(),
            reason,
        }
    }

    // -------------------------------------------------------------------------
    // Text view
    // -------------------------------------------------------------------------

    /// Board glyph at `c`: `@` head, `o` body, item glyph, or space.
    pub fn glyph_at(&self, c: Cell) -> char {
        if self.head() == Some(c) {
            return '@';
        }
        if self.board.is_occupied(c) {
            return 'o';
        }
        match self.item {
            Some(it) if it.cell == c => self
                .config
                .items
                .get(it.kind)
                .map(TrashKind::glyph)
                .unwrap_or('*'),
            _ => ' ',
        }
    }

    pub fn render_ascii(&self) -> String {
        let w = self.width();
        let h = self.height();
        let border = format!("+{}+\n", "-".repeat(w));

        let mut s = String::with_capacity((w + 3) * (h + 3));
        s.push_str(&border);
        for y in 0..h {
            s.push('|');
            for x in 0..w {
                s.push(self.glyph_at(Cell::new(x as i32, y as i32)));
            }
            s.push_str("|\n");
        }
        s.push_str(&border);
        s.push_str(&format!(
            "phase={:?} dir={} score={} items={} len={} ticks={}",
            self.phase,
            self.direction.glyph(),
            self.score,
            self.items_collected,
            self.snake.len(),
            self.ticks,
        ));
        if let Some(reason) = self.end_reason {
            s.push_str(&format!(" end={reason:?}"));
        }
        s.push('\n');
        s
    }
}
