// engine/src/engine/constants.rs
#![forbid(unsafe_code)]

/// Default grid: the 600x400 play field at 25 px per cell.
pub const DEFAULT_W: usize = 24;
pub const DEFAULT_H: usize = 16;

/// Default frame interval of the external tick clock.
pub const DEFAULT_TICK_MS: u64 = 100;

/// Actor length at session start.
pub const DEFAULT_START_LEN: usize = 3;

/**
 * Random samples tried before item placement falls back to scanning every free cell.
 * - Sampling is uniform over the whole grid, so hits on the actor are rejected and retried.
 * - The scan keeps placement total even when the actor covers most of the grid.
 */
pub const PLACEMENT_ATTEMPTS: usize = 64;

/// Default request timeout for score submission.
pub const DEFAULT_REPORT_TIMEOUT_MS: u64 = 5_000;
