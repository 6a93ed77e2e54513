// engine/src/report/base.rs
#![forbid(unsafe_code)]

use std::time::Duration;

use serde::{Deserialize, Serialize};

use crate::engine::SessionReport;

/// What the scoring side made of a submitted session.
#[derive(Clone, Copy, Debug, Default, Eq, PartialEq)]
pub struct RewardOutcome {
    /// The collaborator confirmed the submission.
    pub accepted: bool,
    pub coins: u64,
}

impl RewardOutcome {
    /// Zero-reward summary used whenever submission fails.
    pub fn fallback() -> Self {
        Self {
            accepted: false,
            coins: 0,
        }
    }
}

/// Request body of the score-saving endpoint.
#[derive(Clone, Copy, Debug, Eq, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ScorePayload {
    pub score: u64,
    pub items_collected: u64,
}

impl From<&SessionReport> for ScorePayload {
    fn from(r: &SessionReport) -> Self {
        Self {
            score: r.score,
            items_collected: r.items_collected,
        }
    }
}

/// Response body: `{"status": "success", "coins_earned": 7}`.
#[derive(Clone, Debug, Eq, PartialEq, Deserialize)]
pub struct ScoreResponse {
    pub status: String,
    #[serde(default)]
    pub coins_earned: u64,
}

impl ScoreResponse {
    pub fn into_outcome(self) -> RewardOutcome {
        if self.status == "success" {
            RewardOutcome {
                accepted: true,
                coins: self.coins_earned,
            }
        } else {
            RewardOutcome::fallback()
        }
    }
}

/// Receives terminal session reports.
///
/// `submit` is fire-and-forget: it must return without waiting on the collaborator.
/// Object-safe so sessions can hold `Box<dyn ScoreReporter>`.
pub trait ScoreReporter {
    fn submit(&mut self, report: &SessionReport);

    /// Outcome of the latest submission, if it has arrived. Never blocks.
    fn outcome(&mut self) -> Option<RewardOutcome>;

    /// Like `outcome`, but may wait up to `timeout` for a pending submission.
    fn wait_outcome(&mut self, _timeout: Duration) -> Option<RewardOutcome> {
        self.outcome()
    }
}

/// Discards reports.
#[derive(Default)]
pub struct NoopReporter;

impl ScoreReporter for NoopReporter {
    fn submit(&mut self, _report: &SessionReport) {}

    fn outcome(&mut self) -> Option<RewardOutcome> {
        None
    }
}
