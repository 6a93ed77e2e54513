// engine/src/report/mod.rs
#![forbid(unsafe_code)]

mod base;
mod coins;
mod http;
mod local;

/**
 * Score reporting public API.
 *
 * A finished session is handed to one `ScoreReporter`; the reward comes back later
 * through `outcome()` and never blocks the tick loop.
 */
pub use base::{NoopReporter, RewardOutcome, ScorePayload, ScoreReporter, ScoreResponse};
pub use coins::{coins_for_score, COIN_THRESHOLD};
pub use http::{HttpReporter, ReportError};
pub use local::LocalLedger;
