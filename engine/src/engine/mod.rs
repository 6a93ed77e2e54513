// engine/src/engine/mod.rs
#![forbid(unsafe_code)]

mod config;
mod constants;
mod game;
mod geometry;
mod grid;
mod items;
mod placement;

/**
 * Curated engine public API.
 *
 * Internal implementation modules remain private; only stable items are re-exported here.
 */
pub use config::{ConfigError, GameConfig, GridConfig, ReportConfig};
pub use constants::{
    DEFAULT_H, DEFAULT_REPORT_TIMEOUT_MS, DEFAULT_START_LEN, DEFAULT_TICK_MS, DEFAULT_W,
    PLACEMENT_ATTEMPTS,
};
pub use game::{EndReason, Game, Phase, SessionReport, StepResult};
pub use geometry::{Cell, Direction};
pub use grid::Board;
pub use items::{Item, TrashKind};
pub use placement::ItemPlacer;
