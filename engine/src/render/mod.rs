// engine/src/render/mod.rs
#![forbid(unsafe_code)]

use std::io::Write;

use log::warn;

use crate::engine::Game;
use crate::report::RewardOutcome;

/// Render adapter: presents the read-only game view once per frame.
///
/// `reward` is the latest score-submission outcome once the session has terminated
/// (and it has arrived), `None` otherwise.
pub trait Renderer {
    fn render(&mut self, game: &Game, reward: Option<RewardOutcome>);
}

/// Renders nothing (tests, headless runs).
#[derive(Default)]
pub struct NoopRenderer;

impl Renderer for NoopRenderer {
    fn render(&mut self, _game: &Game, _reward: Option<RewardOutcome>) {}
}

/// Writes `Game::render_ascii()` frames to any writer.
pub struct AsciiRenderer<W: Write> {
    out: W,
    frames: u64,
    failed: bool,
}

impl<W: Write> AsciiRenderer<W> {
    pub fn new(out: W) -> Self {
        Self {
            out,
            frames: 0,
            failed: false,
        }
    }

    pub fn frames(&self) -> u64 {
        self.frames
    }

    pub fn into_inner(self) -> W {
        self.out
    }

    fn write_frame(&mut self, game: &Game, reward: Option<RewardOutcome>) -> std::io::Result<()> {
        self.out.write_all(game.render_ascii().as_bytes())?;
        if let Some(r) = reward {
            writeln!(
                self.out,
                "reward: coins={} accepted={}",
                r.coins, r.accepted
            )?;
        }
        self.out.flush()
    }
}

impl<W: Write> Renderer for AsciiRenderer<W> {
    fn render(&mut self, game: &Game, reward: Option<RewardOutcome>) {
        if self.failed {
            return;
        }
        match self.write_frame(game, reward) {
            Ok(()) => self.frames += 1,
            Err(e) => {
                warn!("ascii renderer disabled after write error: {e}");
                self.failed = true;
            }
        }
    }
}
