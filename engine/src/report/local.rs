// engine/src/report/local.rs
#![forbid(unsafe_code)]

use log::info;

use crate::engine::SessionReport;

use super::base::{RewardOutcome, ScoreReporter};
use super::coins::coins_for_score;

/// Offline reporter: applies the coin rule itself and keeps a running balance.
#[derive(Clone, Debug, Default)]
pub struct LocalLedger {
    balance: u64,
    submissions: u64,
    last: Option<RewardOutcome>,
}

impl LocalLedger {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn balance(&self) -> u64 {
        self.balance
    }

    pub fn submissions(&self) -> u64 {
        self.submissions
    }
}

impl ScoreReporter for LocalLedger {
    fn submit(&mut self, report: &SessionReport) {
        let coins = coins_for_score(report.score);
        self.balance = self.balance.saturating_add(coins);
        self.submissions += 1;
        self.last = Some(RewardOutcome {
            accepted: true,
            coins,
        });
        info!(
            "ledger: score={} items={} coins=+{} balance={}",
            report.score, report.items_collected, coins, self.balance
        );
    }

    fn outcome(&mut self) -> Option<RewardOutcome> {
        self.last
    }
}
