// snake_cli/src/rollout/stats.rs
#![forbid(unsafe_code)]

use std::time::Instant;

use snake_engine::{EndReason, InputKind, RewardOutcome, SessionReport};

#[derive(Clone, Debug)]
pub struct RolloutStats {
    pub sessions_finished: u64,
    pub ticks_done: u64,

    // per-session aggregates
    pub score_sum: u64,
    pub score_best: u64,
    pub items_sum: u64,
    pub len_sum: u64,
    pub len_best: usize,
    pub session_ticks_sum: u64,

    // rewards
    pub coins_sum: u64,
    pub rewards_accepted: u64,

    // end reasons
    pub hit_wall: u64,
    pub hit_self: u64,
    pub board_full: u64,
    pub stopped: u64,

    t0: Instant,
}

impl RolloutStats {
    pub fn new() -> Self {
        Self {
            sessions_finished: 0,
            ticks_done: 0,
            score_sum: 0,
            score_best: 0,
            items_sum: 0,
            len_sum: 0,
            len_best: 0,
            session_ticks_sum: 0,
            coins_sum: 0,
            rewards_accepted: 0,
            hit_wall: 0,
            hit_self: 0,
            board_full: 0,
            stopped: 0,
            t0: Instant::now(),
        }
    }

    /// Call once per advancing tick.
    pub fn on_tick(&mut self) {
        self.ticks_done += 1;
    }

    /// Call once per finished session, with its reward if one arrived in time.
    pub fn on_session_end(&mut self, report: &SessionReport, reward: Option<RewardOutcome>) {
        self.sessions_finished += 1;

        self.score_sum += report.score;
        self.score_best = self.score_best.max(report.score);
        self.items_sum += report.items_collected;
        self.len_sum += report.length as u64;
        self.len_best = self.len_best.max(report.length);
        self.session_ticks_sum += report.ticks;

        match report.reason {
            EndReason::HitWall => self.hit_wall += 1,
            EndReason::HitSelf => self.hit_self += 1,
            EndReason::BoardFull => self.board_full += 1,
            EndReason::Stopped => self.stopped += 1,
        }

        if let Some(r) = reward {
            self.coins_sum += r.coins;
            if r.accepted {
                self.rewards_accepted += 1;
            }
        }
    }

    pub fn elapsed_secs(&self) -> f64 {
        self.t0.elapsed().as_secs_f64()
    }

    pub fn ticks_per_sec(&self) -> f64 {
        let dt = self.elapsed_secs();
        if dt > 0.0 {
            self.ticks_done as f64 / dt
        } else {
            0.0
        }
    }

    fn per_session(&self, total: u64) -> f64 {
        if self.sessions_finished > 0 {
            total as f64 / self.sessions_finished as f64
        } else {
            0.0
        }
    }

    pub fn avg_score(&self) -> f64 {
        self.per_session(self.score_sum)
    }

    pub fn avg_items(&self) -> f64 {
        self.per_session(self.items_sum)
    }

    pub fn avg_len(&self) -> f64 {
        self.per_session(self.len_sum)
    }

    pub fn avg_ticks(&self) -> f64 {
        self.per_session(self.session_ticks_sum)
    }

    pub fn live_msg(&self) -> String {
        format!(
            "tps={:.1} avg_score={:.1} best={} avg_len={:.1} coins={} wall/self/full/stop={}/{}/{}/{}",
            self.ticks_per_sec(),
            self.avg_score(),
            self.score_best,
            self.avg_len(),
            self.coins_sum,
            self.hit_wall,
            self.hit_self,
            self.board_full,
            self.stopped,
        )
    }

    pub fn final_report(&self, input: InputKind, base_seed: u64) -> FinalReport {
        FinalReport {
            input,
            base_seed,
            sessions: self.sessions_finished,
            ticks: self.ticks_done,
            elapsed_s: self.elapsed_secs(),
            ticks_per_s: self.ticks_per_sec(),
            avg_score: self.avg_score(),
            best_score: self.score_best,
            avg_items: self.avg_items(),
            avg_len: self.avg_len(),
            best_len: self.len_best,
            avg_ticks: self.avg_ticks(),
            coins: self.coins_sum,
            rewards_accepted: self.rewards_accepted,
            hit_wall: self.hit_wall,
            hit_self: self.hit_self,
            board_full: self.board_full,
            stopped: self.stopped,
        }
    }
}

#[derive(Clone, Debug)]
pub struct FinalReport {
    pub input: InputKind,
    pub base_seed: u64,

    pub sessions: u64,
    pub ticks: u64,
    pub elapsed_s: f64,
    pub ticks_per_s: f64,

    pub avg_score: f64,
    pub best_score: u64,
    pub avg_items: f64,
    pub avg_len: f64,
    pub best_len: usize,
    pub avg_ticks: f64,

    pub coins: u64,
    pub rewards_accepted: u64,

    pub hit_wall: u64,
    pub hit_self: u64,
    pub board_full: u64,
    pub stopped: u64,
}
