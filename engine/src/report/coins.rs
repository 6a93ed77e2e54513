// engine/src/report/coins.rs
#![forbid(unsafe_code)]

/// Scores below this earn nothing.
pub const COIN_THRESHOLD: u64 = 150;

const COIN_BASE: f64 = 4.0;
const COIN_GROWTH: f64 = 0.005;

/// Coins earned for a final score: `round(4 * e^(0.005 * (score - 150)))`, zero below
/// the threshold. Saturates at `u64::MAX` for absurd scores.
pub fn coins_for_score(score: u64) -> u64 {
    if score < COIN_THRESHOLD {
        return 0;
    }
    let excess = (score - COIN_THRESHOLD) as f64;
    (COIN_BASE * (COIN_GROWTH * excess).exp()).round() as u64
}
