// snake_cli/src/rollout/runner.rs
#![forbid(unsafe_code)]

use std::io;
use std::time::Duration;

use anyhow::{Context, Result};
use indicatif::{ProgressBar, ProgressStyle};
use log::debug;

use snake_engine::{
    AsciiRenderer, AutopilotInput, Game, GameConfig, InputKind, InputSource, NoopRenderer,
    RandomInput, Renderer, ScoreReporter, Session,
};

use super::sinks::{ReportRow, RolloutSink};
use super::stats::{FinalReport, RolloutStats};

#[derive(Clone, Debug)]
pub struct RunnerConfig {
    // ---------------- core rollout ----------------
    /// Number of sessions to play.
    pub sessions: u64,
    /// Base seed; each session uses base_seed + session_id.
    pub base_seed: u64,
    /// Autopilot or Random (keyboard play does not go through the runner).
    pub input: InputKind,
    pub game: GameConfig,

    /// End a session after this many ticks. 0 = uncapped.
    pub max_ticks: u64,

    // ---------------- output ----------------
    /// 0 = final summary only
    /// 1 = progress bar
    /// 2 = progress bar + periodic table (via sink)
    pub verbosity: u8,

    /// Print a table row every N sessions (only used when verbosity == 2).
    /// 0 disables table reporting.
    pub report_every: u64,

    // ---------------- rendering ----------------
    /// If Some(ms): render every frame; sleep ms between frames (0 = no sleep).
    pub render_ms: Option<u64>,
}

pub struct Runner {
    cfg: RunnerConfig,
    sink: Box<dyn RolloutSink>,
}

impl Runner {
    pub fn new(cfg: RunnerConfig, sink: Box<dyn RolloutSink>) -> Self {
        Self { cfg, sink }
    }

    fn input_for(&self, seed: u64) -> Box<dyn InputSource> {
        match self.cfg.input {
            InputKind::Random => Box::new(RandomInput::new(seed.wrapping_add(999))),
            _ => Box::new(AutopilotInput::new()),
        }
    }

    fn renderer(&self) -> Box<dyn Renderer> {
        if self.cfg.render_ms.is_some() {
            Box::new(AsciiRenderer::new(io::stdout()))
        } else {
            Box::new(NoopRenderer)
        }
    }

    /// Plays `cfg.sessions` sessions back to back, feeding every report to `reporter`.
    pub fn run(&mut self, mut reporter: Box<dyn ScoreReporter>) -> Result<FinalReport> {
        let cfg = self.cfg.clone();
        let wait = cfg.game.report.timeout();

        // Progress bar is UI only; runner logic does not depend on it.
        let pb = if cfg.verbosity >= 1 {
            let pb = ProgressBar::new(cfg.sessions);
            pb.set_style(
                ProgressStyle::with_template(
                    "{bar:40.cyan/blue} {pos:>7}/{len:<7}  {percent:>3}%  {elapsed_precise}  {msg}",
                )
                .context("invalid progress bar template")?
                .progress_chars("=>-"),
            );
            Some(pb)
        } else {
            None
        };

        let mut stats = RolloutStats::new();

        for session_id in 0..cfg.sessions {
            let seed = cfg.base_seed.wrapping_add(session_id);
            let game = Game::with_config(cfg.game.clone(), seed)
                .with_context(|| format!("cannot build session {session_id}"))?;

            let mut session = Session::new(game, self.input_for(seed), self.renderer(), reporter);

            // ------------------------------------------------------------
            // Frames until the kernel terminates or the tick cap ends it.
            // ------------------------------------------------------------
            loop {
                let out = session.frame();
                if out.step.advanced {
                    stats.on_tick();
                }
                if let Some(ms) = cfg.render_ms {
                    if ms > 0 {
                        std::thread::sleep(Duration::from_millis(ms));
                    }
                }
                if out.step.terminated || out.torn_down {
                    break;
                }
                if cfg.max_ticks > 0 && session.game().ticks() >= cfg.max_ticks {
                    debug!("session {session_id} capped at {} ticks", cfg.max_ticks);
                    session.end();
                    break;
                }
            }

            let reward = session.wait_reward(wait);
            let (game, back) = session.into_parts();
            reporter = back;

            if let Some(report) = game.report() {
                stats.on_session_end(&report, reward);

                if cfg.render_ms.is_some() {
                    println!(
                        "=== session {}: score={} items={} len={} end={:?} coins={} ===",
                        session_id,
                        report.score,
                        report.items_collected,
                        report.length,
                        report.reason,
                        reward.map_or(0, |r| r.coins),
                    );
                }
            }

            if let Some(ref pb) = pb {
                pb.inc(1);
                pb.set_message(stats.live_msg());
            }

            // ------------------------------------------------------------
            // Periodic table report (verbosity == 2 only).
            // ------------------------------------------------------------
            if cfg.verbosity == 2
                && cfg.report_every > 0
                && stats.sessions_finished % cfg.report_every == 0
            {
                let row = ReportRow {
                    session: stats.sessions_finished,
                    sessions_total: cfg.sessions,
                    tps: stats.ticks_per_sec(),
                    ticks: stats.ticks_done,
                    avg_score: stats.avg_score(),
                    best_score: stats.score_best,
                    avg_items: stats.avg_items(),
                    avg_len: stats.avg_len(),
                    avg_ticks: stats.avg_ticks(),
                    coins: stats.coins_sum,
                    hit_wall: stats.hit_wall,
                    hit_self: stats.hit_self,
                    board_full: stats.board_full,
                    stopped: stats.stopped,
                };
                self.sink.on_report_row(&row, pb.as_ref());
            }
        }

        if let Some(pb) = pb {
            pb.finish_with_message("done");
        }

        Ok(stats.final_report(cfg.input, cfg.base_seed))
    }
}
