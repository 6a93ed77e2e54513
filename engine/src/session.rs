// engine/src/session.rs
#![forbid(unsafe_code)]

/*
Session driver

Binds one `Game` to its collaborators:
- an input source (subscribed once, here, at construction),
- a renderer,
- a score reporter.

The tick clock is NOT owned here. Whoever drives the session (a terminal loop, a batch
runner, a test) calls `frame()` once per period; `tick_interval()` tells it the period.

Per frame, in order:
1. teardown check (an active session is ended first, so its score is still reported),
2. control request (start / pause / resume / end),
3. direction request,
4. one kernel tick,
5. render.
Every report the kernel emits is forwarded to the reporter immediately; the kernel emits
at most one per session, so each session is submitted exactly once.
*/

use std::time::Duration;

use log::debug;

use crate::engine::{Direction, Game, SessionReport, StepResult};
use crate::input::{Control, InputSource};
use crate::render::Renderer;
use crate::report::{RewardOutcome, ScoreReporter};

#[derive(Clone, Copy, Debug, Default)]
pub struct FrameOutcome {
    pub step: StepResult,
    /// Control request seen this frame (whether or not it changed anything).
    pub control: Option<Control>,
    /// A direction request was accepted this frame.
    pub steered: bool,
    pub torn_down: bool,
}

pub struct Session {
    game: Game,
    input: Box<dyn InputSource>,
    renderer: Box<dyn Renderer>,
    reporter: Box<dyn ScoreReporter>,
    reports_sent: u64,
    torn_down: bool,
}

impl Session {
    pub fn new(
        game: Game,
        input: Box<dyn InputSource>,
        renderer: Box<dyn Renderer>,
        reporter: Box<dyn ScoreReporter>,
    ) -> Self {
        Self {
            game,
            input,
            renderer,
            reporter,
            reports_sent: 0,
            torn_down: false,
        }
    }

    pub fn game(&self) -> &Game {
        &self.game
    }

    pub fn tick_interval(&self) -> Duration {
        self.game.config().tick_interval()
    }

    pub fn reports_sent(&self) -> u64 {
        self.reports_sent
    }

    pub fn is_torn_down(&self) -> bool {
        self.torn_down
    }

    /// Advance one frame. After teardown every call is a no-op.
    pub fn frame(&mut self) -> FrameOutcome {
        if self.torn_down {
            return FrameOutcome {
                torn_down: true,
                ..FrameOutcome::default()
            };
        }

        if self.input.teardown() {
            self.teardown();
            return FrameOutcome {
                torn_down: true,
                ..FrameOutcome::default()
            };
        }

        let control = self.input.control_request(&self.game);
        if let Some(c) = control {
            self.apply_control(c);
        }

        let steered = match self.input.direction_request(&self.game) {
            Some(d) => self.game.set_direction(d),
            None => false,
        };

        let step = self.game.tick();
        if let Some(report) = step.report {
            self.dispatch(report);
        }

        let reward = self.reward();
        self.renderer.render(&self.game, reward);

        FrameOutcome {
            step,
            control,
            steered,
            torn_down: false,
        }
    }

    fn apply_control(&mut self, c: Control) {
        let changed = match c {
            Control::Start => self.game.start(),
            Control::Pause => self.game.pause(),
            Control::Resume => self.game.resume(),
            Control::TogglePause => self.game.toggle_pause(),
            Control::End => self.end(),
        };
        if !changed {
            debug!("control {:?} ignored in phase {:?}", c, self.game.phase());
        }
    }

    fn dispatch(&mut self, report: SessionReport) {
        self.reports_sent += 1;
        self.reporter.submit(&report);
    }

    // -------------------------------------------------------------------------
    // Direct controls (for drivers that bypass the input source)
    // -------------------------------------------------------------------------

    pub fn start(&mut self) -> bool {
        self.game.start()
    }

    pub fn set_direction(&mut self, d: Direction) -> bool {
        self.game.set_direction(d)
    }

    pub fn pause(&mut self) -> bool {
        self.game.pause()
    }

    pub fn resume(&mut self) -> bool {
        self.game.resume()
    }

    /// Ends an active session and submits its report. Returns whether anything ended.
    pub fn end(&mut self) -> bool {
        match self.game.end() {
            Some(report) => {
                self.dispatch(report);
                true
            }
            None => false,
        }
    }

    /// Ends any active session and stops accepting frames.
    pub fn teardown(&mut self) {
        if self.torn_down {
            return;
        }
        self.end();
        self.torn_down = true;
    }

    /// Reward for the last finished session, once it has arrived.
    pub fn reward(&mut self) -> Option<RewardOutcome> {
        if !self.game.is_over() {
            return None;
        }
        self.reporter.outcome()
    }

    /// Waits up to `timeout` for the reward of the last finished session.
    pub fn wait_reward(&mut self, timeout: Duration) -> Option<RewardOutcome> {
        if !self.game.is_over() {
            return None;
        }
        self.reporter.wait_outcome(timeout)
    }

    /// Gives back the game and reporter (e.g. to reuse a ledger across sessions).
    pub fn into_parts(self) -> (Game, Box<dyn ScoreReporter>) {
        (self.game, self.reporter)
    }
}
